pub mod assets;
pub mod devsecops;
pub mod metrics;

use axum::{http::StatusCode, Json};
use serde_json::json;

pub async fn greeting() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({ "message": "Hello from backend!" })))
}

pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({ "status": "UP" })))
}

pub async fn readiness() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(json!({ "ready": true })))
}
