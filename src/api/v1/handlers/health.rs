/*
 * Responsibility
 * - GET /health (liveness)
 * - Not behind the authorization gate
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
