use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::{error::AppResult, AppState};

// ── GET /metrics ──────────────────────────────────────────────────────────────

pub async fn metrics(State(state): State<AppState>) -> AppResult<Response> {
    let body = state.counter.render()?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, state.counter.content_type())],
        body,
    )
        .into_response())
}
