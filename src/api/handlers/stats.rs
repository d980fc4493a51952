/*
 * Responsibility
 * - GET /api/protected/stats (dashboard 用の利用統計)
 */
use axum::{Json, extract::State};
use tracing::error;

use crate::api::dto::stats::UsageStatsResponse;
use crate::api::extractors::AuthCtxExtractor;
use crate::error::AppError;
use crate::repos::stats_repo;
use crate::state::AppState;

pub async fn usage_stats(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<UsageStatsResponse>, AppError> {
    let row = stats_repo::usage_for_author(&state.db, ctx.user_id)
        .await
        .map_err(|e| {
            error!(error = %e, "stats_repo::usage_for_author failed");
            AppError::Internal
        })?;

    Ok(Json(UsageStatsResponse {
        total_samples: row.total_samples,
        total_words: row.total_words,
        samples_last_week: row.recent_samples,
        last_sample_at: row.last_sample_at,
    }))
}
