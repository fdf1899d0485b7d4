//! Prompt validation ahead of admission and backend calls.

use thiserror::Error;

/// Validation failures for inbound prompts.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Prompt absent or whitespace-only after trimming.
    #[error("Prompt must not be empty")]
    Empty,

    /// Prompt exceeds the configured length cap.
    #[error("Prompt is too long: {len} characters (maximum {max})")]
    TooLong { len: usize, max: usize },
}

/// Validate a raw prompt against the configured cap.
///
/// Returns the trimmed prompt on success. The length check runs here so an
/// over-long prompt never reaches the backend.
pub fn validate_prompt(raw: &str, max_chars: usize) -> Result<&str, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }

    let len = trimmed.chars().count();
    if len > max_chars {
        return Err(ValidationError::TooLong {
            len,
            max: max_chars,
        });
    }

    Ok(trimmed)
}
