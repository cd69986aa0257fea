use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use crate::{models::BuildInfo, AppState};

// ── GET /devsecops-info ───────────────────────────────────────────────────────

pub async fn devsecops_info(State(state): State<AppState>) -> (StatusCode, Json<BuildInfo>) {
    (
        StatusCode::OK,
        Json(BuildInfo::assemble(&state.build, Utc::now())),
    )
}
