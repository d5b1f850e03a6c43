use std::collections::BTreeMap;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::core::metrics;
use crate::core::redis::RedisHealth;
use crate::core::state::AppState;
use crate::schemas::{HealthResponse, RootResponse};

pub(crate) async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    let api = state.settings().api();
    Json(RootResponse {
        message: api.project_name.clone(),
        version: api.version.clone(),
        api_prefix: api.api_v1_str.clone(),
    })
}

/// 503 only when the database is unreachable; a missing redis just disables auth throttling.
pub(crate) async fn healthz(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let mut components = BTreeMap::new();

    let database_ok = match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(state.db()).await {
        Ok(_) => {
            components.insert("database", "healthy".to_string());
            true
        }
        Err(err) => {
            components.insert("database", format!("unhealthy: {err}"));
            false
        }
    };

    let redis_ok = match state.redis().health().await {
        RedisHealth::Healthy => {
            components.insert("redis", "healthy".to_string());
            true
        }
        RedisHealth::Disconnected => {
            components.insert("redis", "disconnected".to_string());
            false
        }
        RedisHealth::Unhealthy(error) => {
            components.insert("redis", format!("unhealthy: {error}"));
            false
        }
    };

    let (code, status) = match (database_ok, redis_ok) {
        (false, _) => (StatusCode::SERVICE_UNAVAILABLE, "unhealthy"),
        (true, false) => (StatusCode::OK, "degraded"),
        (true, true) => (StatusCode::OK, "healthy"),
    };

    (code, Json(HealthResponse { service: "siakad-api", status, components }))
}

pub(crate) async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    if !state.settings().telemetry().prometheus_enabled {
        return StatusCode::NOT_FOUND.into_response();
    }

    match metrics::render() {
        Some(body) => ([(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
            .into_response(),
        None => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}
