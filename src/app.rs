/*
 * Responsibility
 * - Config読み込み → 依存生成 → Router 組み立て
 * - Middleware の適用 (gate/CORS/http 衛生)
 * - axum::serve() で起動
 */
use std::sync::Arc;
use std::{panic, process};

use anyhow::{Context, Result};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware;
use crate::services::auth::access_jwt::AccessTokenVerifier;
use crate::services::auth::session::CookiePolicy;
use crate::services::auth::token_issuer::{JwtIssuer, TokenService};
use crate::services::id_codec::IdCodec;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,kaku=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing so they don't get "lost"
        // (stderr can be hidden depending on how the process is launched.)
        tracing::error!(?info, "panic");

        // In development, fail fast: crash the whole process so we notice immediately.
        // In production, prefer the default behavior (stderr) and let the server keep running.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    let abort_on_panic = !config.app_env.is_production();
    init_panic_hook(abort_on_panic);

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub async fn build_state(config: &Config) -> Result<AppState> {
    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let verifier = AccessTokenVerifier::new(
        config.jwt_secret.as_bytes(),
        &config.auth_issuer,
        &config.auth_audience,
        config.access_token_leeway_seconds,
    );

    let issuer = JwtIssuer::new(
        config.jwt_secret.as_bytes(),
        config.auth_issuer.clone(),
        config.auth_audience.clone(),
        config.access_token_ttl_seconds,
        config.refresh_token_ttl_seconds,
    );

    let tokens = TokenService::new(issuer, verifier.clone());

    let id_codec = IdCodec::new(config.sqids_min_length, &config.sqids_alphabet)?;

    let cookies = CookiePolicy {
        secure: config.app_env.is_production(),
        access_max_age_seconds: config.access_token_ttl_seconds,
        refresh_max_age_seconds: config.refresh_token_ttl_seconds,
    };

    Ok(AppState {
        db,
        verifier: Arc::new(verifier),
        tokens: Arc::new(tokens),
        id_codec,
        cookies,
    })
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = api::routes();
    let router = middleware::auth::access::apply(router, state.clone());
    let router = router.with_state(state);

    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router)
}
