use std::path::PathBuf;

use thiserror::Error;

/// Generation-level error type.
/// Every variant is terminal for the invocation; nothing is retried.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound { name: String, path: PathBuf },

    #[error("Error reading configuration '{name}': {message}")]
    ConfigParse { name: String, message: String },

    #[error("Failed to load template {}: {source}", path.display())]
    TemplateLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to start local server: {0}")]
    ServerStart(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GeneratorError {
    /// Short machine-friendly code, used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            GeneratorError::ConfigNotFound { .. } => "CONFIG_NOT_FOUND",
            GeneratorError::ConfigParse { .. } => "CONFIG_PARSE_ERROR",
            GeneratorError::TemplateLoad { .. } => "TEMPLATE_LOAD_ERROR",
            GeneratorError::ServerStart(_) => "SERVER_START_ERROR",
            GeneratorError::Render(_) => "RENDER_ERROR",
            GeneratorError::Write { .. } => "WRITE_ERROR",
        }
    }
}

impl From<chromiumoxide::error::CdpError> for GeneratorError {
    fn from(e: chromiumoxide::error::CdpError) -> Self {
        GeneratorError::Render(e.to_string())
    }
}
