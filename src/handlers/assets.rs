use axum::{
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use tracing::debug;

use crate::{
    error::{AppError, AppResult},
    status_page, AppState,
};

// ── Fallback: static assets ───────────────────────────────────────────────────

/// Serves the frontend build for anything the route table does not match.
/// `/` falls back to the built-in status page when the build has no index.
pub async fn static_fallback(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> AppResult<Response> {
    if method != Method::GET && method != Method::HEAD {
        return Err(AppError::NotFound);
    }

    let path = uri.path();
    if let Some(asset) = state.assets.fetch(path).await {
        debug!(path, bytes = asset.bytes.len(), "Serving static asset");
        return Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, asset.content_type)],
            asset.bytes,
        )
            .into_response());
    }

    if path == "/" || path == "/index.html" {
        return Ok((StatusCode::OK, Html(status_page::render())).into_response());
    }

    Err(AppError::NotFound)
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}
