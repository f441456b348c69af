use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::circuit_breaker::CircuitBreakerConfig;
use crate::retry::RetryConfig;
use crate::AssistError;

/// Environment variable holding the collaborator API key.
pub const ENV_API_KEY: &str = "CLONESCAN_LLM_API_KEY";
/// Environment variable overriding the endpoint URL.
pub const ENV_API_URL: &str = "CLONESCAN_LLM_API_URL";
/// Environment variable overriding the model name.
pub const ENV_MODEL: &str = "CLONESCAN_LLM_MODEL";
/// Environment variable selecting the provider (`openai`, `anthropic`, `custom`).
pub const ENV_PROVIDER: &str = "CLONESCAN_LLM_PROVIDER";

/// Runtime configuration for the language-model collaborator.
///
/// # Example
/// ```
/// use assist::AssistConfig;
///
/// let cfg = AssistConfig {
///     provider: "openai".into(),
///     api_key: Some("sk-test".into()),
///     ..Default::default()
/// };
/// assert!(cfg.is_available());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssistConfig {
    /// Provider hint: `"openai"` (or any OpenAI-compatible server), `"anthropic"`, or `"custom"`.
    pub provider: String,
    /// Endpoint override. Required for `"custom"`; defaults to the public API otherwise.
    pub api_url: Option<String>,
    /// Secret key. When absent the collaborator is considered unavailable.
    /// Only set programmatically or from `CLONESCAN_LLM_API_KEY`; never read
    /// from or written to a config document.
    #[serde(skip)]
    pub api_key: Option<String>,
    /// Model identifier sent with every request.
    pub model: String,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Per-attempt HTTP timeout in seconds.
    pub timeout_secs: u64,
    /// Retry policy for transient failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_config: Option<RetryConfig>,
    /// Circuit breaker policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circuit_breaker_config: Option<CircuitBreakerConfig>,
    /// Whether retry and circuit breaking are active.
    pub enable_resilience: bool,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            provider: "openai".into(),
            api_url: None,
            api_key: None,
            model: "gpt-4o-mini".into(),
            max_tokens: 512,
            temperature: 0.2,
            timeout_secs: 3,
            retry_config: None,
            circuit_breaker_config: None,
            enable_resilience: true,
        }
    }
}

impl AssistConfig {
    /// Build a config from `CLONESCAN_LLM_*` environment variables on top of defaults.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `CLONESCAN_LLM_*` environment variables to an existing config.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(key) = env_non_empty(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(url) = env_non_empty(ENV_API_URL) {
            self.api_url = Some(url);
        }
        if let Some(model) = env_non_empty(ENV_MODEL) {
            self.model = model;
        }
        if let Some(provider) = env_non_empty(ENV_PROVIDER) {
            self.provider = provider;
        }
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// A collaborator is available only when credentials are present.
    pub fn is_available(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|key| !key.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Longest a single `complete` call can take before it gives up on its
    /// own: every attempt timing out plus the largest backoff between them.
    pub fn worst_case_latency(&self) -> Duration {
        if !self.enable_resilience {
            return self.timeout();
        }
        let retry = self.retry_config.unwrap_or_default();
        let attempts = retry.max_retries.saturating_add(1);
        self.timeout().saturating_mul(attempts) + retry.max_total_backoff()
    }

    pub fn validate(&self) -> Result<(), AssistError> {
        if self.model.trim().is_empty() {
            return Err(AssistError::InvalidConfig("model must not be empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(AssistError::InvalidConfig(
                "timeout_secs must be greater than zero".into(),
            ));
        }
        if self.max_tokens == 0 {
            return Err(AssistError::InvalidConfig(
                "max_tokens must be greater than zero".into(),
            ));
        }
        let provider = self.provider.to_ascii_lowercase();
        if !matches!(
            provider.as_str(),
            "openai" | "gpt" | "anthropic" | "claude" | "custom"
        ) {
            return Err(AssistError::InvalidConfig(format!(
                "unknown provider '{}'",
                self.provider
            )));
        }
        if provider == "custom" && self.api_url.is_none() {
            return Err(AssistError::InvalidConfig(
                "api_url is required for the custom provider".into(),
            ));
        }
        Ok(())
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unavailable() {
        let cfg = AssistConfig::default();
        assert!(!cfg.is_available());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn blank_key_is_unavailable() {
        let cfg = AssistConfig::default().with_api_key("   ");
        assert!(!cfg.is_available());
    }

    #[test]
    fn custom_provider_requires_url() {
        let cfg = AssistConfig::default().with_provider("custom");
        assert!(matches!(cfg.validate(), Err(AssistError::InvalidConfig(_))));

        let cfg = cfg.with_api_url("http://localhost:9000/complete");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn unknown_provider_rejected() {
        let cfg = AssistConfig::default().with_provider("carrier-pigeon");
        let err = cfg.validate().expect_err("provider should be rejected");
        assert!(err.to_string().contains("carrier-pigeon"));
    }

    #[test]
    fn api_key_is_never_serialized() {
        let cfg = AssistConfig::default().with_api_key("sk-secret");
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(!json.contains("sk-secret"));
    }

    #[test]
    fn api_key_is_not_read_from_documents() {
        let cfg: AssistConfig = serde_json::from_str(r#"{"api_key":"sk-from-file"}"#).unwrap();
        assert!(cfg.api_key.is_none());
        assert!(!cfg.is_available());
    }

    #[test]
    fn worst_case_latency_counts_attempts_and_backoff() {
        let cfg = AssistConfig::default();
        // 3 attempts of 3s plus at most 300ms + 600ms of jittered backoff.
        assert_eq!(cfg.worst_case_latency(), Duration::from_millis(9_900));

        let mut single = cfg.clone().with_timeout_secs(4);
        single.enable_resilience = false;
        assert_eq!(single.worst_case_latency(), Duration::from_secs(4));
    }

    #[test]
    fn deserializes_partial_document() {
        let cfg: AssistConfig =
            serde_json::from_str(r#"{"provider":"anthropic","timeout_secs":5}"#).unwrap();
        assert_eq!(cfg.provider, "anthropic");
        assert_eq!(cfg.timeout_secs, 5);
        assert_eq!(cfg.max_tokens, AssistConfig::default().max_tokens);
    }
}
