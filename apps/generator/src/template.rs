//! Template Store — the canonical base résumé document.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::GeneratorError;

#[derive(Debug, Clone)]
pub struct Template {
    pub path: PathBuf,
    pub html: String,
}

impl Template {
    pub async fn load(path: &Path) -> Result<Self, GeneratorError> {
        let html = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| GeneratorError::TemplateLoad {
                path: path.to_path_buf(),
                source,
            })?;

        debug!("Loaded template {} ({} bytes)", path.display(), html.len());
        Ok(Self {
            path: path.to_path_buf(),
            html,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_reads_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        std::fs::write(&path, "<html><body>Hi</body></html>").unwrap();

        let template = Template::load(&path).await.unwrap();
        assert_eq!(template.html, "<html><body>Hi</body></html>");
        assert_eq!(template.path, path);
    }

    #[tokio::test]
    async fn test_missing_template_is_template_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Template::load(&dir.path().join("missing.html"))
            .await
            .unwrap_err();
        assert!(matches!(err, GeneratorError::TemplateLoad { .. }));
        assert!(err.to_string().contains("missing.html"));
    }
}
