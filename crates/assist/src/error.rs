use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by a [`crate::CompletionClient`].
///
/// None of these ever reach the caller of a clone comparison: the strategies
/// that use the collaborator log them and fall back to deterministic output.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssistError {
    /// No credentials configured; the collaborator must not be called.
    #[error("language model collaborator is not configured")]
    Unavailable,
    /// Configuration is inconsistent (e.g. custom provider without `api_url`).
    #[error("invalid assist config: {0}")]
    InvalidConfig(String),
    /// Transport-level failure (DNS, TLS, connection reset).
    #[error("request failed: {0}")]
    Request(String),
    /// Provider answered with a non-success HTTP status.
    #[error("HTTP error {status}: {body}")]
    Status { status: u16, body: String },
    /// Response body did not have the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    /// The call did not complete within its deadline.
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    /// The circuit breaker is open for this provider.
    #[error("circuit breaker is open for provider '{0}'")]
    CircuitOpen(String),
}

impl AssistError {
    /// Whether a retry has a chance of succeeding.
    pub fn is_retryable(&self) -> bool {
        match self {
            AssistError::Request(_) | AssistError::Timeout(_) => true,
            AssistError::Status { status, .. } => {
                matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
            }
            AssistError::Unavailable
            | AssistError::InvalidConfig(_)
            | AssistError::MalformedResponse(_)
            | AssistError::CircuitOpen(_) => false,
        }
    }
}
