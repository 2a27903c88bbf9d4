/*
 * Responsibility
 * - Config loading → dependency wiring → Router assembly
 * - Router-wide middleware (HTTP layers, CORS); the auth gate is attached per route in api::v1
 * - axum::serve() startup
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::error::AppError;
use crate::middleware;
use crate::repos::{CastStore, PgCastStore};
use crate::services::auth::build_auth_service;
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG wins when set, e.g. RUST_LOG=info,casting_api=debug,tower_http=debug
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development crashes loudly; production keeps serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("loading configuration")?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );
    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let db = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("connecting to database")?;

    let store = PgCastStore::new(db);
    store
        .ensure_schema()
        .await
        .context("creating movies/actors tables")?;
    tracing::info!(backend = store.backend_name(), "cast store ready");

    // The JWKS cache starts empty; the first protected request fills it.
    let auth = build_auth_service(config).context("building token verifier")?;
    let trusted = auth.verifier().config();
    tracing::info!(
        issuer = %trusted.issuer,
        audience = %trusted.audience,
        algorithms = ?trusted.algorithms,
        leeway_seconds = trusted.leeway_seconds,
        jwks_url = %config.auth_jwks_url,
        "token verification configured"
    );

    Ok(AppState::new(Arc::new(store), auth))
}

/// v1 routes plus the structured 404 fallback, without router-wide layers.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api::v1::routes(&state))
        .fallback(not_found)
        .with_state(state)
}

fn build_router(state: AppState, config: &Config) -> Router {
    let router = api_router(state);
    let router = middleware::http::apply(router, config);
    middleware::cors::apply(router, config)
}

async fn not_found() -> AppError {
    AppError::NotFound
}
