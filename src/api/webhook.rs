//! Telegram webhook handler.
//!
//! The webhook is acknowledged immediately; generation and reply delivery run
//! in a detached task so the chat platform never waits on the backend.

use crate::api::{AppState, WebhookAck, WebhookUpdate};
use crate::logging::generate_request_id;
use crate::validate::validate_prompt;
use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::{info, warn};

/// POST /webhook - Accept a Telegram update, always answer `{"ok": true}`.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    Json(update): Json<WebhookUpdate>,
) -> Json<WebhookAck> {
    let Some(message) = update.message else {
        return Json(WebhookAck::ok());
    };
    let Some(text) = message.text else {
        return Json(WebhookAck::ok());
    };

    let chat_id = message.chat.id;
    tokio::spawn(async move {
        respond(state, chat_id, text).await;
    });

    Json(WebhookAck::ok())
}

/// Out-of-band pipeline: validate, admit, generate, deliver.
///
/// Failures become a human-readable reply to the chat instead of an HTTP
/// error; delivery failures are logged and dropped.
async fn respond(state: Arc<AppState>, chat_id: i64, text: String) {
    let request_id = generate_request_id();
    info!(request_id = %request_id, chat_id, "Webhook message received");

    let reply = match generate_reply(&state, chat_id, &text).await {
        Ok(reply) => reply,
        Err(error) => {
            warn!(request_id = %request_id, chat_id, %error, "Webhook processing failed");
            format!("Failed to process request: {}", error)
        }
    };

    if let Err(e) = state.telegram.send_message(chat_id, &reply).await {
        warn!(request_id = %request_id, chat_id, error = %e, "Reply delivery failed");
    } else {
        info!(request_id = %request_id, chat_id, "Reply delivered");
    }
}

async fn generate_reply(
    state: &AppState,
    chat_id: i64,
    text: &str,
) -> Result<String, crate::api::ApiError> {
    let prompt = validate_prompt(text, state.config.limits.max_prompt_chars)?;

    // Chats are rate-limited by their Telegram id
    let client = format!("tg:{}", chat_id);
    if !state.limiter.allow(&client) {
        return Err(crate::api::ApiError::RateLimited);
    }

    Ok(state.generator.generate(prompt).await?)
}
