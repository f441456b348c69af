//! YAML Configuration File Support for clonescan
//!
//! Loads every stage configuration (fingerprint, phrases, similarity,
//! detector, assist) from a single YAML document. Every section is optional
//! and falls back to its defaults.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "brand-protection"
//!
//! fingerprint:
//!   max_headings: 10
//!   max_colors: 10
//!   palette: ["red", "blue", "green"]
//!
//! phrases:
//!   max_phrases: 20
//!   llm_input_chars: 3000
//!   llm_timeout_ms: 10000
//!
//! similarity:
//!   content: { title: 0.30, description: 0.20, headings: 0.25, phrases: 0.25 }
//!   overall: { content: 0.30, structure: 0.20, design: 0.20, branding: 0.30 }
//!
//! detector:
//!   llm_phrases: true
//!   llm_narrative: true
//!   narrative_timeout_ms: 15000
//!
//! assist:
//!   provider: "openai"
//!   model: "gpt-4o-mini"
//!   timeout_secs: 3
//! ```
//!
//! Credentials never live in the file: an `api_key` entry is ignored and the
//! key is read from `CLONESCAN_LLM_API_KEY` (see
//! [`ClonescanConfig::assist_with_env`]).
//!
//! A collaborator call must give up before the stage waiting on it does, so
//! the worst-case `assist` latency (every attempt timing out, plus backoff)
//! may not exceed `phrases.llm_timeout_ms` or `detector.narrative_timeout_ms`
//! while the matching collaborator switch is on.

use std::fs;
use std::path::Path;

use assist::AssistConfig;
use detector::DetectorConfig;
use fingerprint::FingerprintConfig;
use phrases::PhraseConfig;
use serde::{Deserialize, Serialize};
use similarity::SimilarityConfig;
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration for the whole detection pipeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct ClonescanConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub fingerprint: FingerprintConfig,

    #[serde(default)]
    pub phrases: PhraseConfig,

    #[serde(default)]
    pub similarity: SimilarityConfig,

    #[serde(default)]
    pub detector: DetectorConfig,

    #[serde(default)]
    pub assist: AssistConfig,
}

impl ClonescanConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: ClonescanConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the version and every section.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.fingerprint_config()
            .validate()
            .map_err(|e| section_error("fingerprint", e))?;
        self.similarity
            .validate()
            .map_err(|e| section_error("similarity", e))?;
        self.detector
            .validate()
            .map_err(|e| section_error("detector", e))?;
        self.assist
            .validate()
            .map_err(|e| section_error("assist", e))?;
        self.validate_collaborator_budget()?;

        Ok(())
    }

    fn validate_collaborator_budget(&self) -> Result<(), ConfigLoadError> {
        let budget = self.assist.worst_case_latency();
        let stages = [
            (
                self.detector.llm_phrases,
                "phrases.llm_timeout_ms",
                self.phrases.llm_timeout(),
            ),
            (
                self.detector.llm_narrative,
                "detector.narrative_timeout_ms",
                self.detector.narrative_timeout(),
            ),
        ];
        for (enabled, name, deadline) in stages {
            if enabled && budget > deadline {
                return Err(section_error(
                    "assist",
                    format!(
                        "worst-case call time {budget:?} (timeout_secs x attempts + backoff) \
                         exceeds {name} ({deadline:?})"
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Fingerprint settings with the `phrases` section folded in.
    pub fn fingerprint_config(&self) -> FingerprintConfig {
        self.fingerprint.clone().with_phrases(self.phrases.clone())
    }

    /// The `assist` section with `CLONESCAN_LLM_*` environment overrides applied.
    pub fn assist_with_env(&self) -> AssistConfig {
        self.assist.clone().with_env_overrides()
    }
}

impl Default for ClonescanConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            fingerprint: FingerprintConfig::default(),
            phrases: PhraseConfig::default(),
            similarity: SimilarityConfig::default(),
            detector: DetectorConfig::default(),
            assist: AssistConfig::default(),
        }
    }
}

fn section_error(section: &str, err: impl std::fmt::Display) -> ConfigLoadError {
    ConfigLoadError::Validation(format!("{section}: {err}"))
}
