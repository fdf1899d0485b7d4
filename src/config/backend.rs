//! Generation backend configuration

use serde::{Deserialize, Serialize};

/// Generation backend endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the Ollama-compatible backend (e.g., "http://localhost:11434")
    pub url: String,
    /// Model identifier passed on every generate call
    pub model: String,
    /// Per-call timeout for the generate request
    pub timeout_seconds: u64,
    /// System instruction prepended to every user prompt
    pub system_prompt: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:11434".to_string(),
            model: "deepseek-r1:32b".to_string(),
            timeout_seconds: 180,
            system_prompt: "You are a professional assistant. Answer precisely and in a structured way.".to_string(),
        }
    }
}

/// Option set forwarded verbatim to the backend with each generate call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub temperature: f32,
    /// Context window size in tokens
    pub num_ctx: u32,
    /// Share of layers offloaded to the accelerator
    pub num_gpu: u32,
    /// CPU threads used for generation
    pub num_thread: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            num_ctx: 4096,
            num_gpu: 50,
            num_thread: 8,
        }
    }
}
