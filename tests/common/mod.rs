//! Shared test utilities for relay integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use relay::api::{create_router, AppState};
use relay::config::RelayConfig;
use std::sync::Arc;
use tower::ServiceExt;

/// Config pointed at a mock backend, with limits loose enough to stay out
/// of the way unless a test tightens them.
pub fn test_config(backend_url: &str) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.backend.url = backend_url.to_string();
    config.backend.model = "test-model".to_string();
    config.backend.timeout_seconds = 5;
    config.limits.rate_limit = 100;
    config
}

/// Build a router from a config.
pub fn make_app(config: RelayConfig) -> axum::Router {
    let state = Arc::new(AppState::new(Arc::new(config)));
    create_router(state)
}

/// POST a JSON body and return (status, parsed response body).
pub async fn post_json(
    app: &axum::Router,
    uri: &str,
    body: serde_json::Value,
    headers: &[(&str, &str)],
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

/// GET a path and return (status, parsed response body).
pub async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}
