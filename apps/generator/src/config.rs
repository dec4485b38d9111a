use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Runtime settings loaded from environment variables.
/// Every variable has a default; only malformed numeric values are rejected.
#[derive(Debug, Clone)]
pub struct Settings {
    pub configs_dir: PathBuf,
    pub template_dir: PathBuf,
    pub template_file: String,
    pub output_dir: PathBuf,
    pub server_host: String,
    pub server_port: u16,
    /// Explicit browser binary. `None` means discover at launch time.
    pub chrome_executable: Option<PathBuf>,
    pub navigation_timeout: Duration,
    pub launch_timeout: Duration,
    pub rust_log: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Settings {
            configs_dir: env_or("RESUME_CONFIGS_DIR", "configs").into(),
            template_dir: env_or("RESUME_TEMPLATE_DIR", "docs").into(),
            template_file: env_or("RESUME_TEMPLATE_FILE", "index.html"),
            output_dir: env_or("RESUME_OUTPUT_DIR", "generated-resumes").into(),
            server_host: env_or("RESUME_SERVER_HOST", "127.0.0.1"),
            server_port: env_or("RESUME_SERVER_PORT", "8080")
                .parse::<u16>()
                .context("RESUME_SERVER_PORT must be a valid port number")?,
            chrome_executable: std::env::var_os("CHROME_PATH").map(PathBuf::from),
            navigation_timeout: Duration::from_secs(
                env_or("RESUME_NAVIGATION_TIMEOUT_SECS", "30")
                    .parse::<u64>()
                    .context("RESUME_NAVIGATION_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            launch_timeout: Duration::from_secs(
                env_or("RESUME_LAUNCH_TIMEOUT_SECS", "60")
                    .parse::<u64>()
                    .context("RESUME_LAUNCH_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    /// Full path of the base résumé document.
    pub fn template_path(&self) -> PathBuf {
        self.template_dir.join(&self.template_file)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back_to_default() {
        assert_eq!(
            env_or("RESUME_GENERATOR_TEST_UNSET_VARIABLE", "fallback"),
            "fallback"
        );
    }

    #[test]
    fn test_template_path_joins_dir_and_file() {
        let settings = Settings {
            configs_dir: "configs".into(),
            template_dir: "docs".into(),
            template_file: "index.html".to_string(),
            output_dir: "generated-resumes".into(),
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            chrome_executable: None,
            navigation_timeout: Duration::from_secs(30),
            launch_timeout: Duration::from_secs(60),
            rust_log: "info".to_string(),
        };
        assert_eq!(settings.template_path(), PathBuf::from("docs/index.html"));
    }
}
