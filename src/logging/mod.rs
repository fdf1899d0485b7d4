//! Structured logging helpers for request tracing.

use uuid::Uuid;

/// Maximum characters of prompt content included in log previews.
const PREVIEW_CHARS: usize = 100;

/// Generate a correlation ID for tracking one request through the pipeline.
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Build the tracing filter string from the logging configuration.
pub fn build_filter_directives(config: &crate::config::LoggingConfig) -> String {
    config.level.clone()
}

/// Truncate a prompt for a privacy-safe log preview.
///
/// Returns None when content logging is disabled; otherwise the first
/// ~100 characters of the prompt.
pub fn truncate_prompt(prompt: &str, enable_content_logging: bool) -> Option<String> {
    if !enable_content_logging {
        return None;
    }

    let mut preview: String = prompt.chars().take(PREVIEW_CHARS).collect();
    if prompt.chars().count() > PREVIEW_CHARS {
        preview.push_str("...");
    }
    Some(preview)
}
