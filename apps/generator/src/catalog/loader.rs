//! Config Loader — resolves a configuration name to a YAML file and parses it.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::GeneratorError;
use crate::models::ResumeConfig;

/// Accepted file extensions, in lookup order.
pub const CONFIG_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Returns the sorted, de-duplicated names of every configuration in `dir`.
/// A missing or unreadable directory yields an empty list.
pub async fn available_configs(dir: &Path) -> Vec<String> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Config directory {} not readable: {e}", dir.display());
            return Vec::new();
        }
    };

    let mut names = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        if !has_config_extension(&path) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            names.push(stem.to_string());
        }
    }

    names.sort();
    names.dedup();
    names
}

/// Path that `name` resolves to: the first existing `<name>.<ext>`,
/// or `<name>.yaml` when none exists.
pub fn config_path(dir: &Path, name: &str) -> PathBuf {
    CONFIG_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{name}.{ext}")))
        .find(|p| p.is_file())
        .unwrap_or_else(|| dir.join(format!("{name}.{}", CONFIG_EXTENSIONS[0])))
}

/// Loads and parses the configuration called `name` from `dir`.
pub async fn load_config(dir: &Path, name: &str) -> Result<ResumeConfig, GeneratorError> {
    let path = config_path(dir, name);

    let contents = match tokio::fs::read_to_string(&path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(GeneratorError::ConfigNotFound {
                name: name.to_string(),
                path,
            });
        }
        Err(e) => {
            return Err(GeneratorError::ConfigParse {
                name: name.to_string(),
                message: e.to_string(),
            });
        }
    };

    let config = parse_config(name, &contents)?;
    debug!("Loaded configuration '{name}' from {}", path.display());
    Ok(config)
}

/// Parses YAML text into a `ResumeConfig`. A blank document is an empty config.
pub fn parse_config(name: &str, contents: &str) -> Result<ResumeConfig, GeneratorError> {
    if contents.trim().is_empty() {
        return Ok(ResumeConfig::default());
    }

    serde_yaml::from_str(contents).map_err(|e| GeneratorError::ConfigParse {
        name: name.to_string(),
        message: e.to_string(),
    })
}

fn has_config_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| CONFIG_EXTENSIONS.contains(&ext))
}
