/*
 * Responsibility
 * - /api/auth 系 handler (register/login/refresh/logout) と /api/protected/me
 * - token の発行・cookie の set/clear は services 側。handler は配線のみ
 */
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::{error, info};

use crate::api::dto::auth::{
    LoginRequest, LogoutResponse, MeResponse, RefreshRequest, RegisterRequest, TokenResponse,
    UserResponse,
};
use crate::api::extractors::AuthCtxExtractor;
use crate::error::AppError;
use crate::repos::user_repo;
use crate::services::auth::session::{self, REFRESH_COOKIE};
use crate::services::auth::token_issuer::IssuedTokenPair;
use crate::services::password;
use crate::state::AppState;

fn token_response(pair: IssuedTokenPair) -> TokenResponse {
    TokenResponse {
        access_token: pair.access_token,
        token_type: pair.token_type.to_string(),
        expires_in: pair.expires_in,
        refresh_token: pair.refresh_token,
    }
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    req.validate().map_err(AppError::invalid_request)?;

    let password_hash = password::hash(&req.password)?;

    let row = user_repo::create(&state.db, req.email.trim(), req.user_name.trim(), &password_hash)
        .await
        .map_err(|e| {
            error!(error = %e, "user_repo::create failed");
            AppError::Internal
        })?
        .ok_or(AppError::EmailTaken)?;

    info!(user_id = %row.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: row.id,
            email: row.email,
            user_name: row.user_name,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<TokenResponse>), AppError> {
    req.validate().map_err(AppError::invalid_request)?;

    let row = user_repo::get_by_email(&state.db, req.email.trim())
        .await
        .map_err(|e| {
            error!(error = %e, "user_repo::get_by_email failed");
            AppError::Internal
        })?
        .ok_or(AppError::InvalidCredentials)?;

    if !password::verify(&req.password, &row.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    let pair = state.tokens.issue_token_pair(row.id)?;
    let jar = session::issue(jar, &state.cookies, &pair);

    info!(user_id = %row.id, "login succeeded");

    Ok((jar, Json(token_response(pair))))
}

pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<TokenResponse>), AppError> {
    // cookie 優先、body はフォールバック
    let from_cookie = jar.get(REFRESH_COOKIE).map(|c| c.value().to_string());
    let from_body = body.ok().and_then(|Json(req)| req.refresh_token);

    let refresh_token = from_cookie.or(from_body).ok_or(AppError::AuthRequired)?;

    let pair = state.tokens.refresh(&refresh_token)?;
    let jar = session::issue(jar, &state.cookies, &pair);

    Ok((jar, Json(token_response(pair))))
}

/// 状態を持たない logout: cookie を空値 + Max-Age=0 で上書きするだけ。
/// 常に成功する（冪等）。
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<LogoutResponse>), AppError> {
    let jar = session::clear(jar, &state.cookies);

    info!("session cookies cleared");

    Ok((
        jar,
        Json(LogoutResponse {
            success: true,
            message: "Logged out",
        }),
    ))
}

pub async fn me(
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<MeResponse>, AppError> {
    Ok(Json(MeResponse {
        user_id: ctx.user_id,
    }))
}
