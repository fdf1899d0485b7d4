//! Telegram delivery configuration

use serde::{Deserialize, Serialize};

/// Settings for out-of-band reply delivery through the Telegram Bot API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot token for the sendMessage API. Webhook replies are skipped when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,
    /// Bot API base URL, overridable for tests
    pub api_base: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            api_base: "https://api.telegram.org".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telegram_config_defaults() {
        let config = TelegramConfig::default();
        assert!(config.bot_token.is_none());
        assert_eq!(config.api_base, "https://api.telegram.org");
    }
}
