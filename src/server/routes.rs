// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{health_handler, metrics_handler, root_handler};
use crate::cache::TtlCache;
use crate::fetch::FetchedResponse;
use axum::{routing::get, Router};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<TtlCache<FetchedResponse>>,
    /// Set once the Discord gateway reports ready.
    pub connected: Arc<AtomicBool>,
    pub secondary_enabled: bool,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        cache: Arc<TtlCache<FetchedResponse>>,
        connected: Arc<AtomicBool>,
        secondary_enabled: bool,
    ) -> Self {
        Self {
            cache,
            connected,
            secondary_enabled,
            started_at: Instant::now(),
        }
    }
}

/// Probe routes. Every response carries an `x-request-id`, generated when
/// the caller didn't send one.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
