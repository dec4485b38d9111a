//! Output Writer — names and persists the rendered PDF.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::debug;

use crate::errors::GeneratorError;
use crate::models::ResumeConfig;

/// `resume-<jobTitle|tailored>-<YYYY-MM-DD>.pdf`, with path separators in the
/// title replaced by `-`.
pub fn default_filename(job_title: Option<&str>, date: NaiveDate) -> String {
    let title = job_title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or("tailored")
        .replace(['/', '\\'], "-");
    format!("resume-{title}-{}.pdf", date.format("%Y-%m-%d"))
}

/// Target path inside `output_dir`. Only the file-name component of a
/// configured `filename` is honoured, so output never escapes the directory.
pub fn output_path(output_dir: &Path, config: &ResumeConfig, date: NaiveDate) -> PathBuf {
    let configured = config
        .filename
        .as_deref()
        .and_then(|f| Path::new(f).file_name())
        .map(|name| name.to_string_lossy().into_owned());

    let filename =
        configured.unwrap_or_else(|| default_filename(config.job_title.as_deref(), date));
    output_dir.join(filename)
}

/// Writes to `<path>.partial` and renames into place, so a failed write never
/// leaves a truncated PDF under the final name.
pub async fn write_pdf(path: &Path, bytes: &[u8]) -> Result<(), GeneratorError> {
    let write_err = |source| GeneratorError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir).await.map_err(write_err)?;
    }

    let mut partial = path.as_os_str().to_owned();
    partial.push(".partial");
    let partial = PathBuf::from(partial);

    tokio::fs::write(&partial, bytes).await.map_err(write_err)?;
    if let Err(source) = tokio::fs::rename(&partial, path).await {
        tokio::fs::remove_file(&partial).await.ok();
        return Err(write_err(source));
    }

    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
