// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::cache::CacheStats;
use axum::{extract::State, http::header, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::atomic::Ordering;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub discord_connected: bool,
    pub secondary_api: bool,
    pub uptime_seconds: u64,
    pub cache: CacheReport,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Serialize)]
pub struct CacheReport {
    pub entries: usize,
    #[serde(flatten)]
    pub stats: CacheStats,
}

/// Plain liveness probe for hosting platforms.
pub async fn root_handler() -> &'static str {
    "OK"
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = state.connected.load(Ordering::Relaxed);

    // The process is alive either way; "degraded" just means the gateway
    // hasn't reported ready (yet, or since a reconnect).
    let status = if connected {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    };

    Json(HealthResponse {
        status,
        discord_connected: connected,
        secondary_api: state.secondary_enabled,
        uptime_seconds: state.started_at.elapsed().as_secs(),
        cache: CacheReport {
            entries: state.cache.len(),
            stats: state.cache.stats(),
        },
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        crate::metrics::gather_metrics(),
    )
}
