//! Page Renderer — turns the served page into PDF bytes.
//!
//! Flow: launch browser → navigate → wait for network idle → print media →
//!       light-background override → export PDF → close browser.

pub mod chrome;
pub mod print;

use async_trait::async_trait;

use crate::errors::GeneratorError;

pub use chrome::{ChromeRenderer, RendererSettings};

/// Swappable rendering backend. Orchestration only ever sees this trait.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Renders the page at `url`. Any failure is a `GeneratorError::Render`.
    async fn render_pdf(&self, url: &str) -> Result<Vec<u8>, GeneratorError>;
}
