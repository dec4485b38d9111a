//! Human-readable summaries of the configuration directory for `--list`,
//! `--help` and the missing-config hint.

use std::path::Path;

use crate::catalog::loader::{available_configs, load_config};

const NAME_WIDTH: usize = 12;
const LABEL_WIDTH: usize = 11;

/// Detailed listing printed by `--list`.
pub async fn describe_configs(dir: &Path) -> String {
    let names = available_configs(dir).await;
    let mut lines = vec![String::new(), "📋 Available Resume Configurations:".to_string(), String::new()];

    if names.is_empty() {
        lines.push(format!("  No configuration files found in {}", dir.display()));
        return lines.join("\n");
    }

    for name in &names {
        match load_config(dir, name).await {
            Ok(config) => {
                lines.push(format!(
                    "🔧 {name:<NAME_WIDTH$} - {}",
                    config.job_title.as_deref().unwrap_or("Custom configuration")
                ));

                if let Some(c) = &config.customizations {
                    if let Some(company) = &c.company_name {
                        lines.push(detail("Company:", company));
                    }
                    if let Some(focus) = &c.key_skills {
                        lines.push(detail("Focus:", focus));
                    }
                }
                if let Some(filename) = &config.filename {
                    lines.push(detail("Output:", filename));
                }
                let highlights = config
                    .customizations
                    .as_ref()
                    .map_or(0, |c| c.highlight_skills.len());
                if highlights > 0 {
                    lines.push(detail(
                        "Highlights:",
                        &format!("{highlights} skills emphasized"),
                    ));
                }
            }
            Err(e) => lines.push(format!("❌ {name:<NAME_WIDTH$} - Error: {e}")),
        }
        lines.push(String::new());
    }

    lines.push("💡 Usage: generate [config-name]".to_string());
    lines.push(format!("📝 Edit configs in: {}", dir.display()));
    lines.join("\n")
}

/// One line per configuration, appended to `--help`.
pub async fn summarize_configs(dir: &Path) -> String {
    let names = available_configs(dir).await;
    if names.is_empty() {
        return format!("  (no configuration files found in {})", dir.display());
    }

    let mut lines = Vec::with_capacity(names.len());
    for name in &names {
        let line = match load_config(dir, name).await {
            Ok(config) => format!(
                "  {name:<NAME_WIDTH$} - {}",
                config.job_title.as_deref().unwrap_or("Custom configuration")
            ),
            Err(_) => format!("  {name:<NAME_WIDTH$} - (Error loading config)"),
        };
        lines.push(line);
    }
    lines.join("\n")
}

/// Printed after a failed lookup so the user can pick a valid name.
pub async fn missing_config_hint(dir: &Path) -> String {
    let names = available_configs(dir).await;
    if names.is_empty() {
        return format!(
            "\n❌ No configuration files found in {}\n💡 Create a .yaml config file first, or check the configs directory",
            dir.display()
        );
    }

    let mut lines = vec![String::new(), "📋 Available configurations:".to_string()];
    lines.extend(names.iter().map(|n| format!("  - {n}")));
    lines.push(String::new());
    lines.push("💡 Use --list for detailed information about each config".to_string());
    lines.join("\n")
}

fn detail(label: &str, value: &str) -> String {
    format!("   {label:<LABEL_WIDTH$} {value}")
}
