//! Request gate: bearer token 検証 → AuthCtx を extensions に入れる
//!
//! - `/api/protected/*` のみ検証対象 (prefix 判定は services::auth::gate)
//! - それ以外のパスは素通し
//! - 失敗理由は warn ログに残し、クライアントへは一律の 401 だけを返す

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::gate::{self, DenyReason, GateDecision};
use crate::state::AppState;

/// Apply the request gate to the whole router.
///
/// 例：
/// ```ignore
/// let app = api::routes();
/// let app = middleware::auth::access::apply(app, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match gate::evaluate(&state.verifier, req.uri().path(), authorization) {
        GateDecision::Open => Ok(next.run(req).await),
        GateDecision::Allow(verified) => {
            let auth_ctx = AuthCtx::new(verified.user_id, verified.jti);

            // middleware → extractor への受け渡し
            req.extensions_mut().insert(auth_ctx);

            Ok(next.run(req).await)
        }
        GateDecision::Deny(DenyReason::MissingCredentials) => Err(AppError::AuthRequired),
        GateDecision::Deny(DenyReason::InvalidToken(err)) => {
            tracing::warn!(
                error = ?err,
                "access token verification failed"
            );
            Err(AppError::InvalidToken)
        }
    }
}
