//! Token-protected prompt endpoint handler.

use crate::api::{ask, ApiError, AppState, AskRequest, AskResponse};
use crate::auth::authorize;
use axum::{
    extract::{ConnectInfo, State},
    http::HeaderMap,
    Json,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::warn;

/// Header carrying the shared API token.
pub const API_TOKEN_HEADER: &str = "x-api-token";

/// POST /telegram - Same contract as /ask, gated by the X-API-TOKEN header.
///
/// The token check runs before validation and admission: a rejected call
/// consumes no rate-limit budget and never reaches the backend.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    if let Some(expected) = &state.config.auth.api_token {
        let provided = headers
            .get(API_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok());

        if !authorize(provided, expected) {
            warn!("Unauthorized access attempt on /telegram");
            return Err(ApiError::Unauthorized);
        }
    }

    ask::process(&state, &headers, connect_info.map(|c| c.0), &request).await
}
