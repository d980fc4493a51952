/*
 * Responsibility
 * - /api/protected/samples 系 CRUD handler
 * - Path の id は公開 ID → extractor で復号して内部 ID で受け取る
 * - AuthCtx の user_id で repo をスコープする (他人の sample は 404)
 */
use axum::{Json, extract::State, http::StatusCode};
use tracing::error;

use crate::{
    api::dto::samples::{CreateSampleRequest, SampleResponse, UpdateSampleRequest},
    api::extractors::{AuthCtxExtractor, PublicSampleId},
    error::AppError,
    repos::sample_repo,
    state::AppState,
};

/// 一覧の上限。paging は必要になったら query param 化する
const LIST_LIMIT: i64 = 50;

fn word_count(content: &str) -> i32 {
    // whitespace 区切り。CJK の分かち書きはしない (原文準拠)
    content.split_whitespace().count().try_into().unwrap_or(i32::MAX)
}

fn row_to_response(state: &AppState, row: sample_repo::SampleRow) -> Result<SampleResponse, AppError> {
    let public_id = state.id_codec.encode(row.sample_id).map_err(|e| {
        error!(error = %e, sample_id = row.sample_id, "failed to encode public id");
        AppError::Internal
    })?;

    Ok(SampleResponse {
        id: public_id,
        title: row.title,
        content: row.content,
        word_count: row.word_count,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

pub async fn list_samples(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<Vec<SampleResponse>>, AppError> {
    let rows = sample_repo::list_by_author(&state.db, ctx.user_id, LIST_LIMIT, 0)
        .await
        .map_err(|e| {
            error!(error = %e, "sample_repo::list_by_author failed");
            AppError::Internal
        })?;

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        res.push(row_to_response(&state, row)?);
    }

    Ok(Json(res))
}

pub async fn create_sample(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Json(req): Json<CreateSampleRequest>,
) -> Result<(StatusCode, Json<SampleResponse>), AppError> {
    req.validate().map_err(AppError::invalid_request)?;

    let words = word_count(&req.content);
    let row = sample_repo::create(&state.db, ctx.user_id, &req.title, &req.content, words)
        .await
        .map_err(|e| {
            error!(error = %e, "sample_repo::create failed");
            AppError::Internal
        })?;

    let res = row_to_response(&state, row)?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn get_sample(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    sample_id: PublicSampleId,
) -> Result<Json<SampleResponse>, AppError> {
    let row = sample_repo::get(&state.db, ctx.user_id, sample_id.id)
        .await
        .map_err(|e| {
            error!(error = %e, "sample_repo::get failed");
            AppError::Internal
        })?
        .ok_or(AppError::NotFound("sample"))?;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn update_sample(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    sample_id: PublicSampleId,
    Json(req): Json<UpdateSampleRequest>,
) -> Result<Json<SampleResponse>, AppError> {
    req.validate().map_err(AppError::invalid_request)?;

    // content が変わる時だけ wordCount を再計算する
    let words = req.content.as_deref().map(word_count);

    let row = sample_repo::update(
        &state.db,
        ctx.user_id,
        sample_id.id,
        req.title.as_deref(),
        req.content.as_deref(),
        words,
    )
    .await
    .map_err(|e| {
        error!(error = %e, "sample_repo::update failed");
        AppError::Internal
    })?
    .ok_or(AppError::NotFound("sample"))?;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn delete_sample(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    sample_id: PublicSampleId,
) -> Result<StatusCode, AppError> {
    let deleted = sample_repo::delete(&state.db, ctx.user_id, sample_id.id)
        .await
        .map_err(|e| {
            error!(error = %e, "sample_repo::delete failed");
            AppError::Internal
        })?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("sample"))
    }
}

#[cfg(test)]
mod tests {
    use super::word_count;

    #[test]
    fn word_count_splits_on_whitespace() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("one"), 1);
        assert_eq!(word_count("  spaced   out\nlines\ttabs "), 4);
    }
}
