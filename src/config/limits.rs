//! Admission and prompt-size limits

use serde::{Deserialize, Serialize};

/// Rate-limiting and input-size limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum calls per client within the admission window
    pub rate_limit: usize,
    /// Sliding admission window in seconds
    pub window_seconds: u64,
    /// Maximum prompt length in characters, checked after trimming
    pub max_prompt_chars: usize,
    /// Interval between sweeps of fully-expired client histories
    pub sweep_interval_seconds: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            rate_limit: 5,
            window_seconds: 60,
            max_prompt_chars: 4000,
            sweep_interval_seconds: 300,
        }
    }
}
