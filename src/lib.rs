pub(crate) mod api;
pub(crate) mod core;
pub(crate) mod db;
pub(crate) mod repositories;
pub(crate) mod schemas;
pub(crate) mod services;

#[cfg(test)]
mod test_support;

use crate::core::{bootstrap, config::Settings, redis::RedisHandle, state::AppState, telemetry};

/// Redis only backs auth throttling, so the service starts without it.
async fn connect_redis(settings: &Settings) -> RedisHandle {
    let redis = RedisHandle::new(settings.redis().redis_url());
    match redis.connect().await {
        Ok(()) => tracing::info!("Redis connected successfully"),
        Err(err) => {
            tracing::error!(error = %err, "Failed to connect to Redis; auth rate limiting disabled")
        }
    }
    redis
}

async fn prepare(state: &AppState) {
    if let Err(err) = bootstrap::ensure_first_admin(state).await {
        tracing::error!(error = %err, "Failed to ensure first administrator");
    }
    if let Err(err) = bootstrap::prune_expired_sessions(state).await {
        tracing::warn!(error = %err, "Failed to prune expired sessions");
    }
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    telemetry::init_tracing(&settings)?;
    core::metrics::init(&settings)?;
    if settings.security().secret_key_generated {
        tracing::warn!("SECRET_KEY not set; signing tokens with a generated key file");
    }

    let db_pool = db::init_pool(&settings).await?;
    db::run_migrations(&db_pool).await?;
    let redis = connect_redis(&settings).await;

    let state = AppState::new(settings, db_pool, redis.clone());
    prepare(&state).await;

    let listener = tokio::net::TcpListener::bind(state.settings().server_addr()).await?;
    tracing::info!(
        host = %state.settings().server_host(),
        port = state.settings().server_port(),
        environment = %state.settings().runtime().environment.as_str(),
        "SIAKAD API listening"
    );

    let served = axum::serve(listener, api::router::router(state))
        .with_graceful_shutdown(core::shutdown::shutdown_signal())
        .await;

    redis.disconnect().await;
    tracing::info!("Redis disconnected");

    Ok(served?)
}
