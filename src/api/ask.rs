//! Prompt endpoint handler.

use crate::api::{client_id, ApiError, AppState, AskRequest, AskResponse};
use crate::logging::{generate_request_id, truncate_prompt};
use crate::validate::validate_prompt;
use axum::{
    extract::{ConnectInfo, State},
    http::HeaderMap,
    Json,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

/// POST /ask - Validate, admit, and forward a prompt to the backend.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    process(&state, &headers, connect_info.map(|c| c.0), &request).await
}

/// Shared validate -> admit -> generate pipeline for /ask and /telegram.
pub(super) async fn process(
    state: &AppState,
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    request: &AskRequest,
) -> Result<Json<AskResponse>, ApiError> {
    let request_id = generate_request_id();

    let prompt = validate_prompt(&request.prompt, state.config.limits.max_prompt_chars)?;

    let client = client_id(headers, peer);
    if !state.limiter.allow(&client) {
        warn!(request_id = %request_id, client = %client, "Rate limit exceeded");
        return Err(ApiError::RateLimited);
    }

    match truncate_prompt(prompt, state.config.logging.enable_content_logging) {
        Some(preview) => {
            info!(request_id = %request_id, client = %client, preview = %preview, "Prompt received")
        }
        None => {
            info!(request_id = %request_id, client = %client, chars = prompt.chars().count(), "Prompt received")
        }
    }

    let text = state.generator.generate(prompt).await.map_err(|e| {
        warn!(request_id = %request_id, error = %e, "Backend invocation failed");
        e
    })?;

    info!(request_id = %request_id, chars = text.chars().count(), "Generation succeeded");
    Ok(Json(AskResponse::new(text)))
}
