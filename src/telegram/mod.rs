//! Telegram Bot API client for out-of-band reply delivery.

use crate::config::TelegramConfig;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors from the Telegram send-message API.
#[derive(Error, Debug)]
pub enum TelegramError {
    #[error("Telegram connection error: {0}")]
    Connection(String),

    #[error("Telegram API error {status}: {message}")]
    Api { status: u16, message: String },
}

/// Client for the Telegram `sendMessage` endpoint.
pub struct TelegramClient {
    api_base: String,
    bot_token: Option<String>,
    client: Arc<Client>,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
}

impl TelegramClient {
    pub fn new(config: &TelegramConfig, client: Arc<Client>) -> Self {
        Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            bot_token: config.bot_token.clone(),
            client,
        }
    }

    /// Whether a bot token is configured and replies can be delivered.
    pub fn is_configured(&self) -> bool {
        self.bot_token.is_some()
    }

    /// Deliver `text` to `chat_id` through the Bot API.
    ///
    /// A no-op when no bot token is configured.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), TelegramError> {
        let Some(token) = &self.bot_token else {
            tracing::warn!(chat_id, "Skipping reply delivery, no bot token configured");
            return Ok(());
        };

        let url = format!("{}/bot{}/sendMessage", self.api_base, token);
        let body = SendMessageRequest { chat_id, text };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .timeout(Duration::from_secs(30))
            .send()
            .await
            .map_err(|e| TelegramError::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TelegramError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_unconfigured_without_token() {
        let client = TelegramClient::new(&TelegramConfig::default(), Arc::new(Client::new()));
        assert!(!client.is_configured());
    }

    #[test]
    fn test_client_configured_with_token() {
        let config = TelegramConfig {
            bot_token: Some("123:abc".to_string()),
            ..TelegramConfig::default()
        };
        let client = TelegramClient::new(&config, Arc::new(Client::new()));
        assert!(client.is_configured());
    }

    #[tokio::test]
    async fn test_send_without_token_is_noop() {
        let client = TelegramClient::new(&TelegramConfig::default(), Arc::new(Client::new()));
        assert!(client.send_message(42, "hello").await.is_ok());
    }

    #[test]
    fn test_send_message_request_shape() {
        let body = SendMessageRequest {
            chat_id: 42,
            text: "hi",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["chat_id"], 42);
        assert_eq!(json["text"], "hi");
    }
}
