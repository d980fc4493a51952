// Responsibility
// - URL 構造を定義
// - /health, /api/auth/*, /api/protected/*
// - 認証必須なのは /api/protected 配下のみ (gate middleware は prefix で判定する)
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::handlers::{
    auth::{login, logout, me, refresh, register},
    health::health,
    samples::{create_sample, delete_sample, get_sample, list_samples, update_sample},
    stats::usage_stats,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh))
        .route("/api/auth/logout", post(logout))
        .route("/api/protected/me", get(me))
        .route(
            "/api/protected/samples",
            get(list_samples).post(create_sample),
        )
        .route(
            "/api/protected/samples/{sample_id}",
            get(get_sample).put(update_sample).delete(delete_sample),
        )
        .route("/api/protected/stats", get(usage_stats))
}
