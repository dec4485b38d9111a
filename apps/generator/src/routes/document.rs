use axum::{extract::State, response::Html};

use crate::state::AppState;

/// GET / and GET /index.html
/// Returns the tailored document instead of the template file on disk.
pub async fn document_handler(State(state): State<AppState>) -> Html<String> {
    Html(state.document.to_string())
}
