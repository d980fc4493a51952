/*
 * Responsibility
 * - GET /health (疎通用)
 * - gate を通らないことの確認用でもある
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
