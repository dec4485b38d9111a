//! Headless Chrome backend (Chrome DevTools Protocol via chromiumoxide).
//!
//! A fresh browser is launched per render and always closed afterwards.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetEmulatedMediaParams;
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::errors::GeneratorError;
use crate::render::{print, PageRenderer};

const LAUNCH_ARGS: &[&str] = &[
    "--no-sandbox",
    "--disable-setuid-sandbox",
    "--disable-dev-shm-usage",
    "--disable-accelerated-2d-canvas",
    "--no-first-run",
    "--no-zygote",
    "--disable-gpu",
];

/// Checked in order when no executable is configured.
const KNOWN_LOCATIONS: &[&str] = &[
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/chromium",
    "/usr/bin/chromium-browser",
    r"C:\Program Files\Google\Chrome\Application\chrome.exe",
];

const STYLE_SETTLE: Duration = Duration::from_millis(1000);
const HANDLER_SHUTDOWN: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct RendererSettings {
    pub executable: Option<PathBuf>,
    pub navigation_timeout: Duration,
    pub launch_timeout: Duration,
}

impl RendererSettings {
    /// Explicit `CHROME_PATH` wins; otherwise the first known install location.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            executable: settings.chrome_executable.clone().or_else(discover_chrome),
            navigation_timeout: settings.navigation_timeout,
            launch_timeout: settings.launch_timeout,
        }
    }
}

/// First well-known browser location that exists. `None` leaves detection to
/// chromiumoxide.
pub fn discover_chrome() -> Option<PathBuf> {
    first_existing(KNOWN_LOCATIONS.iter().map(Path::new))
}

fn first_existing<'a>(candidates: impl IntoIterator<Item = &'a Path>) -> Option<PathBuf> {
    candidates
        .into_iter()
        .find(|p| p.is_file())
        .map(Path::to_path_buf)
}

pub struct ChromeRenderer {
    settings: RendererSettings,
}

impl ChromeRenderer {
    pub fn new(settings: RendererSettings) -> Self {
        Self { settings }
    }

    fn browser_config(&self) -> Result<BrowserConfig, GeneratorError> {
        let mut builder = BrowserConfig::builder()
            .args(LAUNCH_ARGS.iter().copied())
            .launch_timeout(self.settings.launch_timeout)
            .request_timeout(self.settings.navigation_timeout);
        if let Some(path) = &self.settings.executable {
            builder = builder.chrome_executable(path);
        }
        builder
            .build()
            .map_err(|e| GeneratorError::Render(format!("invalid browser configuration: {e}")))
    }

    async fn launch(&self) -> Result<(Browser, JoinHandle<()>), GeneratorError> {
        let config = self.browser_config()?;
        match &self.settings.executable {
            Some(path) => info!("Launching browser {}", path.display()),
            None => info!("Launching browser (auto-detected)"),
        }

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| GeneratorError::Render(format!("browser launch failed: {e}")))?;

        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser event error: {e}");
                }
            }
        });
        Ok((browser, events))
    }

    async fn print_page(&self, browser: &Browser, url: &str) -> Result<Vec<u8>, GeneratorError> {
        let page = browser.new_page("about:blank").await?;

        info!("Loading page {url}");
        let timeout = self.settings.navigation_timeout;
        tokio::time::timeout(timeout, navigate_until_idle(&page, url))
            .await
            .map_err(|_| {
                GeneratorError::Render(format!("navigation to {url} timed out after {timeout:?}"))
            })??;

        debug!("Switching to print media");
        page.execute(SetEmulatedMediaParams {
            media: Some("print".to_string()),
            ..Default::default()
        })
        .await?;

        debug!("Forcing light background for print");
        let inject = print::style_injection_script(print::PRINT_OVERRIDE_CSS)
            .map_err(|e| GeneratorError::Render(e.to_string()))?;
        evaluate(&page, &inject).await?;
        tokio::time::sleep(STYLE_SETTLE).await;

        info!("Exporting PDF");
        let bytes = page.pdf(print::pdf_params()).await?;
        if let Err(e) = page.close().await {
            debug!("Page close failed: {e}");
        }
        Ok(bytes)
    }
}

#[async_trait]
impl PageRenderer for ChromeRenderer {
    async fn render_pdf(&self, url: &str) -> Result<Vec<u8>, GeneratorError> {
        let (mut browser, events) = self.launch().await?;

        let result = self.print_page(&browser, url).await;

        if let Err(e) = browser.close().await {
            warn!("Browser close failed: {e}");
        }
        if let Err(e) = browser.wait().await {
            warn!("Browser did not exit cleanly: {e}");
        }
        if tokio::time::timeout(HANDLER_SHUTDOWN, events).await.is_err() {
            warn!("Browser event loop did not finish within {HANDLER_SHUTDOWN:?}");
        }

        result
    }
}

async fn navigate_until_idle(page: &Page, url: &str) -> Result<(), GeneratorError> {
    page.goto(url).await?;
    evaluate(page, &print::network_idle_script(print::IDLE_WINDOW)).await
}

async fn evaluate(page: &Page, expression: &str) -> Result<(), GeneratorError> {
    let params = EvaluateParams::builder()
        .expression(expression)
        .await_promise(true)
        .return_by_value(true)
        .build()
        .map_err(GeneratorError::Render)?;
    page.evaluate_expression(params).await?;
    Ok(())
}
