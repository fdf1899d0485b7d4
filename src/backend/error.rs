//! Error types for backend invocation.

use thiserror::Error;

/// Failures from the generation backend, one kind per failure layer.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Request exceeded the configured deadline.
    #[error("Backend request timed out after {0}ms")]
    Timeout(u64),

    /// Network connectivity error (DNS, connection refused, etc.).
    #[error("Backend connection error: {0}")]
    Connection(String),

    /// Response missing the expected text field or not parseable.
    #[error("Malformed backend response: {0}")]
    MalformedResponse(String),

    /// Backend returned a structured error payload or non-2xx status.
    #[error("Backend error {status}: {message}")]
    Upstream { status: u16, message: String },
}
