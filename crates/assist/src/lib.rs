//! # clonescan language-model collaborator
//!
//! Both optional AI features of the clone detector (key-phrase extraction and
//! narrative explanations) talk to a text-completion service through the
//! [`CompletionClient`] trait defined here. The crate ships one real
//! implementation, [`HttpCompletionClient`], which speaks the OpenAI chat
//! completions API, the Anthropic messages API, or a minimal custom JSON
//! protocol (`{"prompt": ...}` in, `{"text": ...}` out).
//!
//! The collaborator is never required. [`connect`] returns `None` when no API
//! key is configured so callers can pick their deterministic strategy at
//! construction time instead of failing on every request.
//!
//! ## Resilience
//!
//! Transient failures (timeouts, connection resets, 429/5xx) are retried with
//! exponential backoff; consecutive failures open a circuit breaker so a dead
//! provider costs one fast rejection per call rather than a full timeout.
//!
//! ## Env vars
//!
//! - `CLONESCAN_LLM_API_KEY` - enables the collaborator
//! - `CLONESCAN_LLM_API_URL` - endpoint override
//! - `CLONESCAN_LLM_MODEL` - model name
//! - `CLONESCAN_LLM_PROVIDER` - `openai`, `anthropic` or `custom`

pub mod circuit_breaker;
pub mod client;
pub mod config;
pub mod error;
pub mod retry;

use std::sync::Arc;

pub use crate::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
pub use crate::client::{CompletionClient, HttpCompletionClient, Prompt};
pub use crate::config::AssistConfig;
pub use crate::error::AssistError;
pub use crate::retry::{execute_with_retry, RetryConfig, RetryOutcome};

/// Build a shared completion client when the collaborator is configured.
///
/// Returns `None` (and logs why) when credentials are missing or the
/// configuration is invalid; callers then use their deterministic strategies.
pub fn connect(cfg: &AssistConfig) -> Option<Arc<dyn CompletionClient>> {
    if !cfg.is_available() {
        tracing::debug!("no language model credentials configured; using deterministic strategies");
        return None;
    }
    match HttpCompletionClient::new(cfg.clone()) {
        Ok(client) => {
            tracing::info!(provider = %cfg.provider, model = %cfg.model, "language model collaborator enabled");
            Some(Arc::new(client))
        }
        Err(err) => {
            tracing::warn!(error = %err, "language model collaborator disabled");
            None
        }
    }
}
