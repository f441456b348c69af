//! # clonescan key phrases
//!
//! Reduces the visible body text of a page to a short, ranked list of phrases
//! that distinguish the business behind it. Two strategies implement the
//! [`PhraseExtractor`] trait:
//!
//! - [`FrequencyExtractor`] - deterministic, always available: top tokens by
//!   frequency after lowercasing, punctuation stripping and stop-word removal.
//! - [`LlmPhraseExtractor`] - asks a language model for a JSON list of phrases
//!   and silently falls back to the frequency ranking on any failure.
//!
//! Neither strategy can fail from the caller's point of view.
//!
//! ```
//! use phrases::{extract_key_phrases, PhraseConfig};
//!
//! let phrases = extract_key_phrases(
//!     "Acme compliance training. Compliance audits for every site.",
//!     &PhraseConfig::default(),
//! );
//! assert_eq!(phrases[0], "compliance");
//! ```

pub mod config;
pub mod frequency;
mod llm;

use std::sync::Arc;

use assist::CompletionClient;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use crate::config::{PhraseConfig, PhraseError};
pub use crate::frequency::{rank_by_frequency, strip_punctuation, STOP_WORDS};
pub use crate::llm::parse_phrase_list;

/// Which strategy actually produced a phrase list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhraseSource {
    Frequency,
    Llm,
    /// The collaborator was tried and failed; frequency ranking was used.
    Fallback,
}

impl PhraseSource {
    pub fn fell_back(self) -> bool {
        matches!(self, PhraseSource::Fallback)
    }
}

/// Phrases plus the strategy that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPhrases {
    pub phrases: Vec<String>,
    pub source: PhraseSource,
}

/// Strategy for turning body text into ranked key phrases.
#[async_trait]
pub trait PhraseExtractor: Send + Sync {
    /// At most `max_phrases` phrases, most important first, tagged with
    /// their source. Never fails.
    async fn extract_ranked(&self, text: &str) -> KeyPhrases;

    async fn extract(&self, text: &str) -> Vec<String> {
        self.extract_ranked(text).await.phrases
    }

    /// Short label used in logs and metrics.
    fn strategy(&self) -> &'static str;
}

/// Deterministic frequency-based strategy.
#[derive(Debug, Clone, Default)]
pub struct FrequencyExtractor {
    cfg: PhraseConfig,
}

impl FrequencyExtractor {
    pub fn new(cfg: PhraseConfig) -> Self {
        Self { cfg }
    }

    /// Synchronous form; the async trait method delegates here.
    pub fn extract_sync(&self, text: &str) -> Vec<String> {
        rank_by_frequency(text, &self.cfg)
    }

    pub fn config(&self) -> &PhraseConfig {
        &self.cfg
    }
}

#[async_trait]
impl PhraseExtractor for FrequencyExtractor {
    async fn extract_ranked(&self, text: &str) -> KeyPhrases {
        KeyPhrases {
            phrases: self.extract_sync(text),
            source: PhraseSource::Frequency,
        }
    }

    fn strategy(&self) -> &'static str {
        "frequency"
    }
}

/// Collaborator-backed strategy with deterministic fallback.
pub struct LlmPhraseExtractor {
    client: Arc<dyn CompletionClient>,
    cfg: PhraseConfig,
}

impl LlmPhraseExtractor {
    pub fn new(client: Arc<dyn CompletionClient>, cfg: PhraseConfig) -> Self {
        Self { client, cfg }
    }
}

#[async_trait]
impl PhraseExtractor for LlmPhraseExtractor {
    async fn extract_ranked(&self, text: &str) -> KeyPhrases {
        if text.trim().is_empty() {
            return KeyPhrases {
                phrases: Vec::new(),
                source: PhraseSource::Llm,
            };
        }
        match llm::extract_via_llm(&self.client, text, &self.cfg).await {
            Ok(phrases) => {
                tracing::debug!(
                    count = phrases.len(),
                    provider = self.client.provider(),
                    "llm key phrases"
                );
                KeyPhrases {
                    phrases,
                    source: PhraseSource::Llm,
                }
            }
            Err(failure) => {
                tracing::warn!(
                    provider = self.client.provider(),
                    error = %failure,
                    "key phrase collaborator failed; using frequency ranking"
                );
                KeyPhrases {
                    phrases: llm::fallback(text, &self.cfg),
                    source: PhraseSource::Fallback,
                }
            }
        }
    }

    fn strategy(&self) -> &'static str {
        "llm"
    }
}

/// Pick the strategy once, at construction time.
pub fn select_extractor(
    client: Option<Arc<dyn CompletionClient>>,
    cfg: PhraseConfig,
) -> Arc<dyn PhraseExtractor> {
    match client {
        Some(client) => Arc::new(LlmPhraseExtractor::new(client, cfg)),
        None => Arc::new(FrequencyExtractor::new(cfg)),
    }
}

/// Deterministic extraction with an explicit config.
pub fn extract_key_phrases(text: &str, cfg: &PhraseConfig) -> Vec<String> {
    rank_by_frequency(text, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assist::{AssistError, Prompt};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct FixedClient {
        answer: Result<String, AssistError>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CompletionClient for FixedClient {
        async fn complete(&self, _prompt: &Prompt) -> Result<String, AssistError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer.clone()
        }

        fn provider(&self) -> &str {
            "fixed"
        }
    }

    struct SlowClient;

    #[async_trait]
    impl CompletionClient for SlowClient {
        async fn complete(&self, _prompt: &Prompt) -> Result<String, AssistError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(r#"["late"]"#.into())
        }

        fn provider(&self) -> &str {
            "slow"
        }
    }

    const TEXT: &str = "Acme safety training and safety compliance audits";

    #[tokio::test]
    async fn llm_answer_is_used_when_valid() {
        let client = Arc::new(FixedClient {
            answer: Ok(r#"["Acme Safety", "compliance audits"]"#.into()),
            calls: AtomicUsize::new(0),
        });
        let extractor = LlmPhraseExtractor::new(client.clone(), PhraseConfig::default());

        let ranked = extractor.extract_ranked(TEXT).await;
        assert_eq!(ranked.phrases, vec!["Acme Safety", "compliance audits"]);
        assert_eq!(ranked.source, PhraseSource::Llm);
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn collaborator_error_falls_back_silently() {
        let client = Arc::new(FixedClient {
            answer: Err(AssistError::Status {
                status: 429,
                body: "quota".into(),
            }),
            calls: AtomicUsize::new(0),
        });
        let extractor = LlmPhraseExtractor::new(client, PhraseConfig::default());

        let ranked = extractor.extract_ranked(TEXT).await;
        assert_eq!(ranked.source, PhraseSource::Fallback);
        assert_eq!(ranked.phrases, rank_by_frequency(TEXT, &PhraseConfig::default()));
        assert_eq!(ranked.phrases[0], "safety");
    }

    #[tokio::test]
    async fn malformed_answer_falls_back() {
        let client = Arc::new(FixedClient {
            answer: Ok("I cannot help with that".into()),
            calls: AtomicUsize::new(0),
        });
        let extractor = LlmPhraseExtractor::new(client, PhraseConfig::default());
        assert_eq!(extractor.extract(TEXT).await[0], "safety");
    }

    #[tokio::test]
    async fn timeout_falls_back() {
        let cfg = PhraseConfig::default().with_llm_timeout(Duration::from_millis(20));
        let extractor = LlmPhraseExtractor::new(Arc::new(SlowClient), cfg);
        assert_eq!(extractor.extract(TEXT).await[0], "safety");
    }

    async fn unresponsive_provider() -> Arc<dyn CompletionClient> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut open = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                open.push(socket);
            }
        });

        let mut cfg = assist::AssistConfig::default()
            .with_provider("custom")
            .with_api_key("test-key")
            .with_api_url(format!("http://{addr}/complete"));
        cfg.circuit_breaker_config = Some(
            assist::CircuitBreakerConfig::default()
                .with_failure_threshold(1)
                .with_reset_timeout(Duration::from_secs(600)),
        );
        Arc::new(assist::HttpCompletionClient::new(cfg).unwrap())
    }

    #[tokio::test]
    async fn hung_provider_is_skipped_after_first_deadline() {
        let cfg = PhraseConfig::default().with_llm_timeout(Duration::from_millis(300));
        let extractor = LlmPhraseExtractor::new(unresponsive_provider().await, cfg);

        let started = std::time::Instant::now();
        let first = extractor.extract_ranked(TEXT).await;
        assert_eq!(first.source, PhraseSource::Fallback);
        assert!(started.elapsed() >= Duration::from_millis(250));

        for _ in 0..3 {
            let started = std::time::Instant::now();
            let ranked = extractor.extract_ranked(TEXT).await;
            assert_eq!(ranked.source, PhraseSource::Fallback);
            assert_eq!(ranked.phrases[0], "safety");
            assert!(
                started.elapsed() < Duration::from_millis(100),
                "open circuit should reject immediately, took {:?}",
                started.elapsed()
            );
        }
    }

    #[tokio::test]
    async fn empty_text_skips_collaborator() {
        let client = Arc::new(FixedClient {
            answer: Ok(r#"["x"]"#.into()),
            calls: AtomicUsize::new(0),
        });
        let extractor = LlmPhraseExtractor::new(client.clone(), PhraseConfig::default());
        assert!(extractor.extract("   ").await.is_empty());
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn select_extractor_without_client_is_frequency() {
        let extractor = select_extractor(None, PhraseConfig::default());
        assert_eq!(extractor.strategy(), "frequency");
    }

    #[tokio::test]
    async fn frequency_extractor_matches_free_function() {
        let extractor = FrequencyExtractor::default();
        assert_eq!(
            extractor.extract(TEXT).await,
            extract_key_phrases(TEXT, &PhraseConfig::default())
        );
    }
}
