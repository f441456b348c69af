//! Configuration and error types for fingerprint extraction.
//!
//! Extraction is a pure function of `(html, config)`; nothing here touches
//! the network or the clock.

use phrases::{PhraseConfig, PhraseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Colour names recognised in utility classes such as `bg-blue-500`.
pub const DEFAULT_PALETTE: &[&str] = &[
    "red", "blue", "green", "yellow", "purple", "pink", "gray", "black", "white", "orange",
    "teal", "cyan", "indigo",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FingerprintConfig {
    /// Maximum number of H1-H3 headings kept, in document order.
    pub max_headings: usize,
    /// Maximum number of distinct colour tokens kept, in discovery order.
    pub max_colors: usize,
    /// Colour names matched in `bg-*` / `text-*` classes.
    pub palette: Vec<String>,
    /// Settings for the key-phrase stage. Configured separately (see
    /// [`FingerprintConfig::with_phrases`]), so not part of this struct's
    /// serialized form.
    #[serde(skip)]
    pub phrases: PhraseConfig,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            max_headings: 10,
            max_colors: 10,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            phrases: PhraseConfig::default(),
        }
    }
}

impl FingerprintConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_headings(mut self, max_headings: usize) -> Self {
        self.max_headings = max_headings;
        self
    }

    pub fn with_max_colors(mut self, max_colors: usize) -> Self {
        self.max_colors = max_colors;
        self
    }

    /// Replace the colour palette.
    pub fn with_palette<I, S>(mut self, palette: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.palette = palette.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_phrases(mut self, phrases: PhraseConfig) -> Self {
        self.phrases = phrases;
        self
    }

    pub fn validate(&self) -> Result<(), FingerprintError> {
        if self.max_headings == 0 {
            return Err(FingerprintError::InvalidConfig(
                "max_headings must be greater than zero".into(),
            ));
        }
        if self.max_colors == 0 {
            return Err(FingerprintError::InvalidConfig(
                "max_colors must be greater than zero".into(),
            ));
        }
        if self.palette.is_empty() {
            return Err(FingerprintError::InvalidPalette(
                "palette must name at least one colour".into(),
            ));
        }
        if let Some(bad) = self
            .palette
            .iter()
            .find(|c| c.is_empty() || !c.chars().all(|ch| ch.is_ascii_alphanumeric()))
        {
            return Err(FingerprintError::InvalidPalette(format!(
                "colour name {bad:?} must be non-empty ASCII alphanumeric"
            )));
        }
        self.phrases.validate()?;
        Ok(())
    }
}

/// Errors from fingerprint configuration. Extraction itself never fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FingerprintError {
    #[error("invalid fingerprint config: {0}")]
    InvalidConfig(String),

    #[error("invalid colour palette: {0}")]
    InvalidPalette(String),

    #[error(transparent)]
    Phrases(#[from] PhraseError),
}
