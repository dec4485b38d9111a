pub mod document;
pub mod health;

use std::path::Path;

use axum::{routing::get, Router};
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Router for the ephemeral server: the tailored document, a health probe,
/// and every other path served from the template's asset directory.
pub fn build_router(state: AppState, asset_dir: &Path) -> Router {
    Router::new()
        .route("/", get(document::document_handler))
        .route("/index.html", get(document::document_handler))
        .route("/health", get(health::health_handler))
        .fallback_service(ServeDir::new(asset_dir))
        .with_state(state)
}
