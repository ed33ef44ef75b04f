use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::presentation::state::AppState;

/// `GET /api/readme`: the welcome markdown, served verbatim.
pub async fn readme_handler(State(state): State<AppState>) -> Response {
    match tokio::fs::read_to_string(&state.settings.readme.path).await {
        Ok(content) => ([(header::CONTENT_TYPE, "text/plain")], content).into_response(),
        Err(e) => {
            tracing::error!(error = %e, path = %state.settings.readme.path, "Failed to read readme");
            (StatusCode::NOT_FOUND, "File not found").into_response()
        }
    }
}
