//! Configuration module for prompt-relay
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`RELAY_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use relay::config::RelayConfig;
//!
//! // Load defaults
//! let config = RelayConfig::default();
//! assert_eq!(config.server.port, 5000);
//!
//! // Parse from TOML
//! let toml = r#"
//! [server]
//! port = 9000
//! "#;
//! let config: RelayConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.server.port, 9000);
//! ```

pub mod backend;
pub mod error;
pub mod limits;
pub mod logging;
pub mod server;
pub mod telegram;

pub use backend::{BackendConfig, GenerationConfig};
pub use error::ConfigError;
pub use limits::LimitsConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use telegram::TelegramConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the relay server.
///
/// Aggregates all configuration sections: HTTP server, generation backend,
/// generation options, admission limits, authorization, Telegram delivery,
/// and logging.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Generation backend endpoint and model
    pub backend: BackendConfig,
    /// Generation option set forwarded to the backend
    pub generation: GenerationConfig,
    /// Admission and prompt-size limits
    pub limits: LimitsConfig,
    /// Authorization settings
    pub auth: AuthConfig,
    /// Telegram delivery settings
    pub telegram: TelegramConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Authorization configuration for the token-protected endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared token expected in the X-API-TOKEN header on POST /telegram.
    /// When unset, the endpoint accepts requests without a token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

impl RelayConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports RELAY_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("RELAY_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("RELAY_HOST") {
            self.server.host = host;
        }

        if let Ok(url) = std::env::var("RELAY_BACKEND_URL") {
            self.backend.url = url;
        }
        if let Ok(model) = std::env::var("RELAY_MODEL") {
            self.backend.model = model;
        }

        if let Ok(token) = std::env::var("RELAY_API_TOKEN") {
            self.auth.api_token = Some(token);
        }
        if let Ok(token) = std::env::var("RELAY_BOT_TOKEN") {
            self.telegram.bot_token = Some(token);
        }

        if let Ok(limit) = std::env::var("RELAY_RATE_LIMIT") {
            if let Ok(l) = limit.parse() {
                self.limits.rate_limit = l;
            }
        }
        if let Ok(cap) = std::env::var("RELAY_MAX_PROMPT_CHARS") {
            if let Ok(c) = cap.parse() {
                self.limits.max_prompt_chars = c;
            }
        }

        if let Ok(level) = std::env::var("RELAY_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("RELAY_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation {
                field: "server.port".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }

        if self.backend.url.is_empty() {
            return Err(ConfigError::Validation {
                field: "backend.url".to_string(),
                message: "URL cannot be empty".to_string(),
            });
        }
        if self.backend.model.is_empty() {
            return Err(ConfigError::Validation {
                field: "backend.model".to_string(),
                message: "model cannot be empty".to_string(),
            });
        }

        if self.limits.rate_limit == 0 {
            return Err(ConfigError::Validation {
                field: "limits.rate_limit".to_string(),
                message: "rate limit must be at least 1".to_string(),
            });
        }
        if self.limits.max_prompt_chars == 0 {
            return Err(ConfigError::Validation {
                field: "limits.max_prompt_chars".to_string(),
                message: "prompt cap must be at least 1".to_string(),
            });
        }

        if let Some(token) = &self.auth.api_token {
            if token.is_empty() {
                return Err(ConfigError::Validation {
                    field: "auth.api_token".to_string(),
                    message: "token cannot be empty when set".to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_relay_config_defaults() {
        let config = RelayConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.backend.url, "http://localhost:11434");
        assert!(config.auth.api_token.is_none());
        assert!(config.telegram.bot_token.is_none());
    }

    #[test]
    fn test_config_parse_minimal_toml() {
        let toml = r#"
        [server]
        port = 9000
        "#;

        let config: RelayConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0"); // Default
    }

    #[test]
    fn test_config_parse_full_toml() {
        let toml = r#"
        [server]
        host = "127.0.0.1"
        port = 8080

        [backend]
        url = "http://10.0.0.5:11434"
        model = "deepseek-r1:32b"
        timeout_seconds = 240

        [generation]
        temperature = 0.5
        num_ctx = 2048
        num_gpu = 25
        num_thread = 4

        [limits]
        rate_limit = 10
        window_seconds = 30
        max_prompt_chars = 2000

        [auth]
        api_token = "secret"

        [telegram]
        bot_token = "123:abc"
        "#;

        let config: RelayConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.backend.model, "deepseek-r1:32b");
        assert_eq!(config.generation.num_ctx, 2048);
        assert_eq!(config.limits.rate_limit, 10);
        assert_eq!(config.auth.api_token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_config_load_from_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[server]\nport = 8080").unwrap();

        let config = RelayConfig::load(Some(temp.path())).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_config_missing_file_error() {
        let result = RelayConfig::load(Some(Path::new("/nonexistent/config.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_config_load_none_returns_defaults() {
        let config = RelayConfig::load(None).unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_config_env_override_model() {
        std::env::set_var("RELAY_MODEL", "llama3:8b");
        let config = RelayConfig::default().with_env_overrides();
        std::env::remove_var("RELAY_MODEL");

        assert_eq!(config.backend.model, "llama3:8b");
    }

    #[test]
    fn test_config_env_override_api_token() {
        std::env::set_var("RELAY_API_TOKEN", "tok");
        let config = RelayConfig::default().with_env_overrides();
        std::env::remove_var("RELAY_API_TOKEN");

        assert_eq!(config.auth.api_token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_config_env_invalid_value_ignored() {
        std::env::set_var("RELAY_RATE_LIMIT", "not-a-number");
        let config = RelayConfig::default().with_env_overrides();
        std::env::remove_var("RELAY_RATE_LIMIT");

        // Should keep default, not crash
        assert_eq!(config.limits.rate_limit, LimitsConfig::default().rate_limit);
    }

    #[test]
    fn test_config_validation_zero_port() {
        let mut config = RelayConfig::default();
        config.server.port = 0;

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "server.port"
        ));
    }

    #[test]
    fn test_config_validation_empty_backend_url() {
        let mut config = RelayConfig::default();
        config.backend.url = String::new();

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field.contains("url")
        ));
    }

    #[test]
    fn test_config_validation_empty_token_rejected() {
        let mut config = RelayConfig::default();
        config.auth.api_token = Some(String::new());

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_rate_limit() {
        let mut config = RelayConfig::default();
        config.limits.rate_limit = 0;

        assert!(config.validate().is_err());
    }
}
