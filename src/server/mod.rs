//! Axum-based liveness server.
//!
//! Hosting platforms probe `GET /` to decide whether the process is alive.
//! `GET /health` adds gateway and cache detail, `GET /metrics` exposes the
//! Prometheus registry.
//!
//! # Components
//!
//! - `handlers`: Endpoint implementations.
//! - `routes`: Router, request ID layers and shared state.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod routes;

pub use handlers::{HealthResponse, HealthStatus};
pub use routes::{create_router, AppState};

use crate::config::ServerConfig;
use crate::error::{BotError, Result};
use std::future::Future;
use std::net::SocketAddr;
use tracing::info;

/// Bind and serve until `shutdown` resolves.
pub async fn serve<F>(config: &ServerConfig, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| BotError::Config(format!("invalid server address: {}", e)))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Health server listening on {}", addr);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
