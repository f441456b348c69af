use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::circuit_breaker::CircuitBreaker;
use crate::retry::{execute_with_retry, RetryConfig};
use crate::{AssistConfig, AssistError};

const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// A single bounded prompt sent to the collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Optional system instruction.
    pub system: Option<String>,
    /// User message body.
    pub user: String,
    /// Budget for the whole call, retries included. The caller stops
    /// waiting after this long, so the client must give up no later.
    pub deadline: Option<Duration>,
}

impl Prompt {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            system: None,
            user: user.into(),
            deadline: None,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

async fn within_deadline<T, F>(deadline: Option<Duration>, call: F) -> Result<T, AssistError>
where
    F: Future<Output = Result<T, AssistError>>,
{
    match deadline {
        Some(deadline) => tokio::time::timeout(deadline, call)
            .await
            .unwrap_or(Err(AssistError::Timeout(deadline))),
        None => call.await,
    }
}

/// Counts a call as failed unless it is explicitly marked successful,
/// including when the caller drops the future part way through.
struct BreakerCall<'a> {
    breaker: &'a CircuitBreaker,
    settled: bool,
}

impl<'a> BreakerCall<'a> {
    fn start(breaker: &'a CircuitBreaker) -> Self {
        Self {
            breaker,
            settled: false,
        }
    }

    fn succeed(mut self) {
        self.settled = true;
        self.breaker.record_success();
    }
}

impl Drop for BreakerCall<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.breaker.record_failure();
        }
    }
}

/// Text-completion collaborator.
///
/// Implementations must be cheap to share behind an `Arc`. Callers treat every
/// error as recoverable and switch to their deterministic strategy.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Return the model's free-text answer to `prompt`.
    async fn complete(&self, prompt: &Prompt) -> Result<String, AssistError>;

    /// Provider label used in logs.
    fn provider(&self) -> &str;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ProviderKind {
    OpenAi,
    Anthropic,
    Custom,
}

fn provider_kind(cfg: &AssistConfig) -> ProviderKind {
    match cfg.provider.to_ascii_lowercase().as_str() {
        "anthropic" | "claude" => ProviderKind::Anthropic,
        "custom" => ProviderKind::Custom,
        _ => ProviderKind::OpenAi,
    }
}

/// HTTP-backed [`CompletionClient`] with retry and circuit breaking.
#[derive(Debug)]
pub struct HttpCompletionClient {
    http: reqwest::Client,
    cfg: AssistConfig,
    kind: ProviderKind,
    url: String,
    breaker: CircuitBreaker,
}

impl HttpCompletionClient {
    /// Build a client. Fails when credentials are missing or the config is invalid.
    pub fn new(cfg: AssistConfig) -> Result<Self, AssistError> {
        if !cfg.is_available() {
            return Err(AssistError::Unavailable);
        }
        cfg.validate()?;

        let http = reqwest::Client::builder()
            .timeout(cfg.timeout())
            .build()
            .map_err(|e| AssistError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;

        let kind = provider_kind(&cfg);
        let url = match (&cfg.api_url, kind) {
            (Some(url), _) => url.clone(),
            (None, ProviderKind::Anthropic) => ANTHROPIC_URL.to_string(),
            (None, ProviderKind::OpenAi) => OPENAI_URL.to_string(),
            (None, ProviderKind::Custom) => {
                return Err(AssistError::InvalidConfig(
                    "api_url is required for the custom provider".into(),
                ))
            }
        };
        let breaker = CircuitBreaker::new(cfg.circuit_breaker_config.unwrap_or_default());

        Ok(Self {
            http,
            cfg,
            kind,
            url,
            breaker,
        })
    }

    pub fn config(&self) -> &AssistConfig {
        &self.cfg
    }

    async fn send(&self, payload: &Value) -> Result<Value, AssistError> {
        let mut request = self.http.post(&self.url).json(payload);
        if let Some(key) = self.cfg.api_key.as_deref() {
            request = match self.kind {
                ProviderKind::Anthropic => request
                    .header("x-api-key", key)
                    .header("anthropic-version", ANTHROPIC_VERSION),
                ProviderKind::OpenAi | ProviderKind::Custom => request.bearer_auth(key),
            };
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AssistError::Timeout(self.cfg.timeout())
            } else {
                AssistError::Request(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AssistError::MalformedResponse(format!("invalid JSON body: {e}")))
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, prompt: &Prompt) -> Result<String, AssistError> {
        let payload = build_payload(self.kind, &self.cfg, prompt);

        if !self.cfg.enable_resilience {
            let call = async {
                let response = self.send(&payload).await?;
                extract_text(self.kind, response)
            };
            return within_deadline(prompt.deadline, call).await;
        }

        if !self.breaker.allow_request() {
            return Err(AssistError::CircuitOpen(self.cfg.provider.clone()));
        }

        let breaker_call = BreakerCall::start(&self.breaker);
        let retry_cfg: RetryConfig = self.cfg.retry_config.unwrap_or_default();
        let call = async {
            let outcome = execute_with_retry(&retry_cfg, |_attempt| self.send(&payload)).await;
            let attempts = outcome.attempts;
            let text = outcome
                .into_result()
                .and_then(|v| extract_text(self.kind, v))?;
            Ok::<_, AssistError>((text, attempts))
        };

        match within_deadline(prompt.deadline, call).await {
            Ok((text, attempts)) => {
                breaker_call.succeed();
                tracing::debug!(provider = %self.cfg.provider, attempts, "completion succeeded");
                Ok(text)
            }
            Err(err) => {
                tracing::debug!(provider = %self.cfg.provider, error = %err, "completion failed");
                Err(err)
            }
        }
    }

    fn provider(&self) -> &str {
        &self.cfg.provider
    }
}

fn build_payload(kind: ProviderKind, cfg: &AssistConfig, prompt: &Prompt) -> Value {
    match kind {
        ProviderKind::OpenAi => {
            let mut messages = Vec::with_capacity(2);
            if let Some(system) = prompt.system.as_deref() {
                messages.push(json!({ "role": "system", "content": system }));
            }
            messages.push(json!({ "role": "user", "content": prompt.user }));
            json!({
                "model": cfg.model,
                "messages": messages,
                "max_tokens": cfg.max_tokens,
                "temperature": cfg.temperature,
            })
        }
        ProviderKind::Anthropic => {
            let mut body = json!({
                "model": cfg.model,
                "max_tokens": cfg.max_tokens,
                "temperature": cfg.temperature,
                "messages": [{ "role": "user", "content": prompt.user }],
            });
            if let Some(system) = prompt.system.as_deref() {
                body["system"] = Value::String(system.to_string());
            }
            body
        }
        ProviderKind::Custom => json!({
            "system": prompt.system,
            "prompt": prompt.user,
            "max_tokens": cfg.max_tokens,
        }),
    }
}

fn extract_text(kind: ProviderKind, value: Value) -> Result<String, AssistError> {
    let text = match kind {
        ProviderKind::OpenAi => value
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(str::to_owned),
        ProviderKind::Anthropic => value.get("content").and_then(Value::as_array).map(|blocks| {
            blocks
                .iter()
                .filter_map(|block| block.get("text").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("")
        }),
        ProviderKind::Custom => ["text", "completion", "output"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str))
            .map(str::to_owned),
    };

    match text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        Some(_) => Err(AssistError::MalformedResponse("empty completion".into())),
        None => Err(AssistError::MalformedResponse(
            "response did not contain completion text".into(),
        )),
    }
}
