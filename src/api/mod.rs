//! # Relay HTTP API
//!
//! HTTP endpoints forwarding user prompts to the generation backend.
//!
//! ## Endpoints
//!
//! - `POST /ask` - JSON prompt in, generated text out
//! - `POST /telegram` - same contract, protected by the X-API-TOKEN header
//! - `POST /webhook` - Telegram update in, reply delivered out-of-band
//! - `GET /health` - service status with model name and timestamp
//!
//! ## Request flow
//!
//! 1. Authorization (protected endpoint only)
//! 2. Payload validation (shape, emptiness, length cap)
//! 3. Admission check against the per-client rate limiter
//! 4. Backend invocation with a bounded timeout, exactly one attempt
//! 5. Uniform result: `{"success": true, "response": ...}` or
//!    `{"success": false, "error": ...}`

mod ask;
mod health;
mod telegram;
mod webhook;
pub mod types;

pub use types::*;

use crate::admission::RateLimiter;
use crate::backend::GenerateClient;
use crate::config::RelayConfig;
use crate::telegram::TelegramClient;
use axum::http::HeaderMap;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (1 MB). Prompts are length-capped far below this.
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub generator: GenerateClient,
    pub limiter: Arc<RateLimiter>,
    pub telegram: TelegramClient,
}

impl AppState {
    /// Create application state with the given configuration.
    pub fn new(config: Arc<RelayConfig>) -> Self {
        // Outer bound on any outbound call; the generate call narrows it
        let timeout_secs = config.server.request_timeout_seconds;

        let http_client = Arc::new(
            reqwest::Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .pool_max_idle_per_host(10)
                .build()
                .expect("Failed to create HTTP client"),
        );

        let generator = GenerateClient::new(
            &config.backend,
            &config.generation,
            Arc::clone(&http_client),
        );
        let telegram = TelegramClient::new(&config.telegram, Arc::clone(&http_client));
        let limiter = Arc::new(RateLimiter::new(
            config.limits.rate_limit,
            Duration::from_secs(config.limits.window_seconds),
        ));

        Self {
            config,
            generator,
            limiter,
            telegram,
        }
    }
}

/// Create the main API router with all endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ask", post(ask::handle))
        .route("/telegram", post(telegram::handle))
        .route("/webhook", post(webhook::handle))
        .route("/health", get(health::handle))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Resolve the client identifier used by the admission check.
///
/// Prefers the first X-Forwarded-For entry, falls back to the peer address.
pub(crate) fn client_id(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| peer.map(|a| a.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}
