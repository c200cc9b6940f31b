// Liveness server tests
// Author: kelexine (https://github.com/kelexine)

use axum::body::Body;
use axum::http::{Request, StatusCode};
use ftcbot::cache::TtlCache;
use ftcbot::server::{create_router, AppState};
use http_body_util::BodyExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

fn state(connected: bool) -> AppState {
    AppState::new(
        Arc::new(TtlCache::new(Duration::from_secs(60))),
        Arc::new(AtomicBool::new(connected)),
        false,
    )
}

async fn get(state: AppState, uri: &str) -> (StatusCode, String) {
    let response = create_router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_root_is_ok() {
    let (status, body) = get(state(false), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn test_health_degraded_until_connected() {
    let (status, body) = get(state(false), "/health").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["discord_connected"], false);
    assert_eq!(json["secondary_api"], false);
    assert_eq!(json["cache"]["entries"], 0);
}

#[tokio::test]
async fn test_health_follows_connection_flag() {
    let state = state(false);
    state.connected.store(true, Ordering::Relaxed);

    let (_, body) = get(state, "/health").await;
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["discord_connected"], true);
}

#[tokio::test]
async fn test_metrics_exposed() {
    ftcbot::metrics::record_command("ping", "ok", 0.001);

    let (status, body) = get(state(true), "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("commands_total"));
}

#[tokio::test]
async fn test_request_id_header_set() {
    let response = create_router(state(true))
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (status, _) = get(state(true), "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
