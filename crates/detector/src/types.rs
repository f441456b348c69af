use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use fingerprint::{FingerprintError, WebsiteFingerprint};
use serde::{Deserialize, Serialize};
use similarity::{SimilarityAnalysis, SimilarityError};
use thiserror::Error;

/// Four-level verdict for a comparison.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    LowRisk,
    MediumRisk,
    HighRisk,
    PotentialClone,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::LowRisk => "low_risk",
            RiskLevel::MediumRisk => "medium_risk",
            RiskLevel::HighRisk => "high_risk",
            RiskLevel::PotentialClone => "potential_clone",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of comparing one suspect page against the reference.
///
/// Immutable once produced; the engine never stores it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CloneDetectionResult {
    /// Suspect URL as supplied by the caller.
    pub url: String,
    /// Weighted overall similarity, two decimals.
    pub similarity_score: f64,
    pub analysis: SimilarityAnalysis,
    /// Red flags in detection order.
    pub suspicious_elements: Vec<String>,
    pub recommendation: RiskLevel,
    /// Human-readable explanation; never empty.
    pub narrative: String,
    pub timestamp: DateTime<Utc>,
}

/// The reference site held by a [`crate::Detector`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReferenceSite {
    pub url: String,
    pub fingerprint: WebsiteFingerprint,
}

/// Strategy and deadline settings for the detection engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DetectorConfig {
    /// Ask the language-model collaborator for key phrases when one is
    /// configured.
    pub llm_phrases: bool,
    /// Ask the language-model collaborator for the narrative when one is
    /// configured.
    pub llm_narrative: bool,
    /// Deadline for the narrative call, in milliseconds.
    pub narrative_timeout_ms: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            llm_phrases: true,
            llm_narrative: true,
            narrative_timeout_ms: 15_000,
        }
    }
}

impl DetectorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_llm_phrases(mut self, enabled: bool) -> Self {
        self.llm_phrases = enabled;
        self
    }

    pub fn with_llm_narrative(mut self, enabled: bool) -> Self {
        self.llm_narrative = enabled;
        self
    }

    pub fn with_narrative_timeout(mut self, timeout: Duration) -> Self {
        self.narrative_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn narrative_timeout(&self) -> Duration {
        Duration::from_millis(self.narrative_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), DetectError> {
        if self.narrative_timeout_ms == 0 {
            return Err(DetectError::InvalidConfig(
                "narrative_timeout_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Errors surfaced by the detection layer.
///
/// Only [`DetectError::NoReference`] can come out of a comparison; the rest
/// are construction-time configuration problems.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DetectError {
    #[error("no reference set")]
    NoReference,

    #[error("invalid detector config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Fingerprint(#[from] FingerprintError),

    #[error(transparent)]
    Similarity(#[from] SimilarityError),
}
