/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - db: PgPool, verifier/tokens: 認証サービス, id_codec, cookie 設定
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use sqlx::PgPool;

use crate::services::auth::access_jwt::AccessTokenVerifier;
use crate::services::auth::session::CookiePolicy;
use crate::services::auth::token_issuer::TokenService;
use crate::services::id_codec::IdCodec;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub verifier: Arc<AccessTokenVerifier>,
    pub tokens: Arc<TokenService>,
    pub id_codec: IdCodec,
    pub cookies: CookiePolicy,
}
