//! Request and response types for the relay API.

use crate::backend::BackendError;
use crate::validate::ValidationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body for POST /ask and POST /telegram.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AskRequest {
    /// User prompt. Missing field is treated as an empty prompt.
    #[serde(default)]
    pub prompt: String,
}

/// Successful generation response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AskResponse {
    pub success: bool,
    pub response: String,
}

impl AskResponse {
    pub fn new(response: String) -> Self {
        Self {
            success: true,
            response,
        }
    }
}

/// Telegram update payload, reduced to the fields the webhook consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookUpdate {
    #[serde(default)]
    pub message: Option<WebhookMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookMessage {
    pub chat: WebhookChat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookChat {
    pub id: i64,
}

/// Webhook acknowledgement, returned regardless of downstream outcome.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebhookAck {
    pub ok: bool,
}

impl WebhookAck {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// Error body shared by all failing endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

/// API-level error taxonomy, translated to the HTTP contract at the boundary.
///
/// Every failure is reported to the caller exactly once; nothing is retried.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Bad or missing input, surfaced as 400.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Bad or missing token, surfaced as 401.
    #[error("Unauthorized")]
    Unauthorized,

    /// Admission check rejected the call, surfaced as 429.
    #[error("Rate limit exceeded, try again later")]
    RateLimited,

    /// Backend invocation failure, surfaced as 500 with its message.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            success: false,
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ask_request_missing_prompt_defaults_empty() {
        let req: AskRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req.prompt, "");
    }

    #[test]
    fn test_ask_response_serialize() {
        let response = AskResponse::new("generated text".to_string());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["response"], "generated text");
    }

    #[test]
    fn test_webhook_update_deserialize() {
        let json = json!({
            "update_id": 10,
            "message": {
                "message_id": 1,
                "chat": {"id": 42, "type": "private"},
                "text": "hello"
            }
        });
        let update: WebhookUpdate = serde_json::from_value(json).unwrap();
        let message = update.message.unwrap();
        assert_eq!(message.chat.id, 42);
        assert_eq!(message.text.as_deref(), Some("hello"));
    }

    #[test]
    fn test_webhook_update_without_message() {
        let update: WebhookUpdate = serde_json::from_value(json!({"update_id": 10})).unwrap();
        assert!(update.message.is_none());
    }

    #[test]
    fn test_webhook_update_without_text() {
        let json = json!({
            "message": {"chat": {"id": 42}, "photo": []}
        });
        let update: WebhookUpdate = serde_json::from_value(json).unwrap();
        assert!(update.message.unwrap().text.is_none());
    }

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            ApiError::Validation(ValidationError::Empty)
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::RateLimited.into_response().status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            ApiError::Backend(BackendError::Timeout(1000))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_response_shape() {
        let error = ApiError::Backend(BackendError::Timeout(180000));
        let body = ErrorResponse {
            success: false,
            error: error.to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("timed out"));
    }
}
