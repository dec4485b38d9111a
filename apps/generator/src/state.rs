use std::sync::Arc;

/// Shared state for the ephemeral server's route handlers.
#[derive(Clone)]
pub struct AppState {
    /// Tailored document served at `/` and `/index.html`.
    pub document: Arc<str>,
}

impl AppState {
    pub fn new(document: impl Into<Arc<str>>) -> Self {
        Self {
            document: document.into(),
        }
    }
}
