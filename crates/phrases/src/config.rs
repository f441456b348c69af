//! Configuration and error types for key-phrase extraction.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tuning knobs shared by both extraction strategies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhraseConfig {
    /// Maximum number of phrases returned, most important first.
    pub max_phrases: usize,
    /// Tokens with this many characters or fewer are discarded.
    pub max_discarded_len: usize,
    /// How much body text (in characters) is sent to the language model.
    pub llm_input_chars: usize,
    /// Deadline for the language-model call, in milliseconds.
    pub llm_timeout_ms: u64,
}

impl Default for PhraseConfig {
    fn default() -> Self {
        Self {
            max_phrases: 20,
            max_discarded_len: 3,
            llm_input_chars: 3000,
            llm_timeout_ms: 10_000,
        }
    }
}

impl PhraseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_phrases(mut self, max_phrases: usize) -> Self {
        self.max_phrases = max_phrases;
        self
    }

    pub fn with_llm_input_chars(mut self, chars: usize) -> Self {
        self.llm_input_chars = chars;
        self
    }

    pub fn with_llm_timeout(mut self, timeout: Duration) -> Self {
        self.llm_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_millis(self.llm_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), PhraseError> {
        if self.max_phrases == 0 {
            return Err(PhraseError::InvalidConfig(
                "max_phrases must be greater than zero".into(),
            ));
        }
        if self.llm_input_chars == 0 {
            return Err(PhraseError::InvalidConfig(
                "llm_input_chars must be greater than zero".into(),
            ));
        }
        if self.llm_timeout_ms == 0 {
            return Err(PhraseError::InvalidConfig(
                "llm_timeout_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Errors from the key-phrase layer.
///
/// Extraction itself never fails; these only describe configuration problems
/// and the internal reasons an LLM answer was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PhraseError {
    #[error("invalid phrase config: {0}")]
    InvalidConfig(String),

    #[error("language model answer is not a JSON list of strings: {0}")]
    NotAList(String),

    #[error("language model returned no usable phrases")]
    EmptyList,
}
