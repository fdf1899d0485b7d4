//! Generation backend client.
//!
//! Wraps the Ollama-style `POST /api/generate` endpoint behind a uniform
//! result shape: one bounded attempt per call, backend-layer failures mapped
//! to [`BackendError`] kinds. Nothing here retries.

pub mod error;

pub use error::BackendError;

use crate::config::{BackendConfig, GenerationConfig};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Client for the text-generation backend.
///
/// Builds each outbound request from a fixed system instruction, the user
/// prompt, and the configured option set.
pub struct GenerateClient {
    /// Base URL (e.g., "http://localhost:11434")
    base_url: String,
    model: String,
    system_prompt: String,
    options: GenerateOptions,
    timeout: Duration,
    /// Shared HTTP client for connection pooling
    client: Arc<Client>,
}

/// Option set sent with every generate call.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOptions {
    pub temperature: f32,
    pub num_ctx: u32,
    pub num_gpu: u32,
    pub num_thread: u32,
}

impl From<&GenerationConfig> for GenerateOptions {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            temperature: config.temperature,
            num_ctx: config.num_ctx,
            num_gpu: config.num_gpu,
            num_thread: config.num_thread,
        }
    }
}

/// Ollama /api/generate request format
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    options: &'a GenerateOptions,
}

/// Ollama /api/generate response format
#[derive(Deserialize)]
struct GenerateResponse {
    response: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl GenerateClient {
    pub fn new(
        backend: &BackendConfig,
        generation: &GenerationConfig,
        client: Arc<Client>,
    ) -> Self {
        Self {
            base_url: backend.url.trim_end_matches('/').to_string(),
            model: backend.model.clone(),
            system_prompt: backend.system_prompt.clone(),
            options: GenerateOptions::from(generation),
            timeout: Duration::from_secs(backend.timeout_seconds),
            client,
        }
    }

    /// Model identifier this client generates with.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run one generation call for `prompt`.
    ///
    /// The prompt is prefixed with the configured system instruction. Exactly
    /// one attempt is made; the call is bounded by the configured timeout.
    /// On success the trimmed response text is returned.
    pub async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        let url = format!("{}/api/generate", self.base_url);
        let timeout_ms = self.timeout.as_millis() as u64;

        let body = GenerateRequest {
            model: &self.model,
            prompt: format!("{}\n\n{}", self.system_prompt, prompt),
            stream: false,
            options: &self.options,
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BackendError::Timeout(timeout_ms)
                } else {
                    BackendError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                BackendError::Timeout(timeout_ms)
            } else {
                BackendError::Connection(e.to_string())
            }
        })?;

        if !status.is_success() {
            // Ollama error payloads carry {"error": "..."}
            let message = serde_json::from_str::<GenerateResponse>(&text)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or(text);
            return Err(BackendError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&text).map_err(|e| {
            BackendError::MalformedResponse(format!("Failed to parse generate response: {}", e))
        })?;

        if let Some(error) = parsed.error {
            return Err(BackendError::Upstream {
                status: status.as_u16(),
                message: error,
            });
        }

        match parsed.response {
            Some(text) => Ok(text.trim().to_string()),
            None => Err(BackendError::MalformedResponse(
                "Missing 'response' field in generate response".to_string(),
            )),
        }
    }
}
