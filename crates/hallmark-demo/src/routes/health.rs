//! Health check endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Basic health check (is the server running?)
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
pub struct ReadyResponse {
    status: &'static str,
    secret: bool,
}

/// Readiness check (has the process secret been generated?)
pub async fn ready_check() -> Result<Json<ReadyResponse>, StatusCode> {
    if hallmark::is_initialized() {
        Ok(Json(ReadyResponse {
            status: "ready",
            secret: true,
        }))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

#[derive(Serialize)]
pub struct StatsResponse {
    uptime_secs: u64,
    payload_size: usize,
    valid_duration_secs: u64,
}

/// Effective settings and uptime
pub async fn stats(
    State(state): State<AppState>,
) -> Json<StatsResponse> {
    Json(StatsResponse {
        uptime_secs: state.uptime_secs(),
        payload_size: state.config.payload_size,
        valid_duration_secs: state.config.valid_duration_secs,
    })
}
