//! Resume Generation — orchestrates one tailored résumé.
//!
//! Flow: load template → customize → start server → probe → render →
//!       stop server (always) → write PDF.
//!
//! Nothing is written unless rendering succeeds.

use std::path::PathBuf;

use chrono::Utc;
use tracing::{error, info};

use crate::config::Settings;
use crate::customize::customize;
use crate::errors::GeneratorError;
use crate::generation::output;
use crate::models::ResumeConfig;
use crate::render::PageRenderer;
use crate::server;
use crate::state::AppState;
use crate::template::Template;

/// Generates the PDF for `config` and returns where it was written.
pub async fn generate_tailored_resume(
    settings: &Settings,
    renderer: &dyn PageRenderer,
    config: &ResumeConfig,
) -> Result<PathBuf, GeneratorError> {
    let result = run(settings, renderer, config).await;
    if let Err(e) = &result {
        error!(code = e.code(), "Generation failed: {e}");
    }
    result
}

async fn run(
    settings: &Settings,
    renderer: &dyn PageRenderer,
    config: &ResumeConfig,
) -> Result<PathBuf, GeneratorError> {
    let template = Template::load(&settings.template_path()).await?;
    info!("Loaded template {}", template.path.display());

    info!("Applying customizations");
    let tailored = customize(&template.html, config);
    info!(
        sections_removed = tailored.report.sections_removed,
        terms_emphasized = tailored.report.terms_emphasized,
        objective_inserted = tailored.report.objective_inserted,
        references = ?tailored.report.references,
        "Customization complete"
    );

    let output_path = output::output_path(&settings.output_dir, config, Utc::now().date_naive());

    let server = server::start(
        &settings.server_host,
        settings.server_port,
        AppState::new(tailored.html),
        &settings.template_dir,
    )
    .await?;

    let rendered = match server.probe().await {
        Ok(()) => {
            info!("Rendering {}", server.url());
            renderer.render_pdf(&server.url()).await
        }
        Err(e) => Err(e),
    };
    server.stop().await;
    let bytes = rendered?;

    output::write_pdf(&output_path, &bytes).await?;
    info!("PDF generated: {}", output_path.display());
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::models::Customizations;

    /// Fetches the served page like a browser would and "prints" its body.
    struct FetchingRenderer {
        seen_url: Mutex<Option<String>>,
    }

    #[async_trait]
    impl PageRenderer for FetchingRenderer {
        async fn render_pdf(&self, url: &str) -> Result<Vec<u8>, GeneratorError> {
            *self.seen_url.lock().unwrap() = Some(url.to_string());
            let body = reqwest::get(url)
                .await
                .map_err(|e| GeneratorError::Render(e.to_string()))?
                .text()
                .await
                .map_err(|e| GeneratorError::Render(e.to_string()))?;
            Ok(format!("%PDF-fake\n{body}").into_bytes())
        }
    }

    struct FailingRenderer {
        seen_url: Mutex<Option<String>>,
    }

    #[async_trait]
    impl PageRenderer for FailingRenderer {
        async fn render_pdf(&self, url: &str) -> Result<Vec<u8>, GeneratorError> {
            *self.seen_url.lock().unwrap() = Some(url.to_string());
            Err(GeneratorError::Render("navigation timed out".to_string()))
        }
    }

    fn workspace() -> (tempfile::TempDir, Settings) {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path().join("docs");
        std::fs::create_dir_all(&docs).unwrap();
        std::fs::write(
            docs.join("index.html"),
            "<html><head></head><body><main>\
             <section><div><h2># ABOUT ME</h2><p>Builds cloud systems.</p></div></section>\
             <section><div><h2># PROJECTS</h2><p>Hobby work.</p></div></section>\
             </main></body></html>",
        )
        .unwrap();

        let settings = Settings {
            configs_dir: dir.path().join("configs"),
            template_dir: docs,
            template_file: "index.html".to_string(),
            output_dir: dir.path().join("generated-resumes"),
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            chrome_executable: None,
            navigation_timeout: Duration::from_secs(5),
            launch_timeout: Duration::from_secs(5),
            rust_log: "info".to_string(),
        };
        (dir, settings)
    }

    fn config() -> ResumeConfig {
        ResumeConfig {
            job_title: Some("Cloud Engineer".to_string()),
            filename: Some("cloud.pdf".to_string()),
            customizations: Some(Customizations {
                company_name: Some("LEGO Group".to_string()),
                highlight_skills: vec!["cloud".to_string()],
                remove_sections: vec!["PROJECTS".to_string()],
                ..Default::default()
            }),
        }
    }

    #[tokio::test]
    async fn test_renders_tailored_page_and_writes_output() {
        let (_dir, settings) = workspace();
        let renderer = FetchingRenderer {
            seen_url: Mutex::new(None),
        };

        let path = generate_tailored_resume(&settings, &renderer, &config())
            .await
            .unwrap();

        assert_eq!(path, settings.output_dir.join("cloud.pdf"));
        let pdf = std::fs::read_to_string(&path).unwrap();
        assert!(pdf.starts_with("%PDF-fake"));
        assert!(pdf.contains(r#"<strong class="text-terminal-yellow">cloud</strong>"#));
        assert!(pdf.contains("Why I'm applying to LEGO Group"));
        assert!(!pdf.contains("Hobby work."));

        let url = renderer.seen_url.lock().unwrap().clone().unwrap();
        assert!(reqwest::get(&url).await.is_err(), "server must be stopped");
    }

    #[tokio::test]
    async fn test_render_failure_writes_nothing_and_stops_server() {
        let (_dir, settings) = workspace();
        let renderer = FailingRenderer {
            seen_url: Mutex::new(None),
        };

        let err = generate_tailored_resume(&settings, &renderer, &config())
            .await
            .unwrap_err();
        assert!(matches!(err, GeneratorError::Render(_)));
        assert!(!settings.output_dir.join("cloud.pdf").exists());

        let url = renderer.seen_url.lock().unwrap().clone().unwrap();
        assert!(reqwest::get(&url).await.is_err(), "server must be stopped");
    }

    #[tokio::test]
    async fn test_missing_template_fails_before_rendering() {
        let (_dir, mut settings) = workspace();
        settings.template_file = "missing.html".to_string();
        let renderer = FailingRenderer {
            seen_url: Mutex::new(None),
        };

        let err = generate_tailored_resume(&settings, &renderer, &config())
            .await
            .unwrap_err();
        assert!(matches!(err, GeneratorError::TemplateLoad { .. }));
        assert!(renderer.seen_url.lock().unwrap().is_none());
    }
}
