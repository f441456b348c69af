//! Workspace umbrella crate for clonescan, a website clone-detection engine.
//!
//! This crate re-exports the stage crates and wires them together from a
//! single [`ClonescanConfig`]:
//!
//! - `fingerprint`: HTML → [`WebsiteFingerprint`]
//! - `phrases`: body text → ranked key phrases (frequency or LLM strategy)
//! - `similarity`: fingerprint pair → [`SimilarityAnalysis`]
//! - `detector`: red flags, risk verdict, narrative, [`Detector`] lifecycle
//! - `assist`: optional language-model collaborator with retry and circuit
//!   breaking
//!
//! ```
//! use std::sync::Arc;
//! use clonescan::{build_engine, ClonescanConfig, Detector};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let engine = build_engine(&ClonescanConfig::default()).unwrap();
//! let mut detector = Detector::new(Arc::new(engine));
//! detector.set_original("<title>Acme</title>", "https://acme.example").await;
//! let result = detector
//!     .detect_clone("<title>Other</title>", "https://other.example")
//!     .await
//!     .unwrap();
//! assert!(!result.narrative.is_empty());
//! # });
//! ```

pub mod config;

use std::sync::Arc;

pub use assist::{AssistConfig, AssistError, CompletionClient, HttpCompletionClient, Prompt};
pub use detector::{
    classify, find_suspicious_elements, set_detect_metrics, CloneDetectionResult, CloneEngine,
    DetectError, DetectMetrics, Detector, DetectorConfig, FallbackStage, NarrativeGenerator,
    ReferenceSite, RiskLevel, TemplateNarrator,
};
pub use fingerprint::{
    extract_fingerprint, FingerprintConfig, FingerprintError, FingerprintExtractor,
    WebsiteFingerprint,
};
pub use phrases::{extract_key_phrases, PhraseConfig, PhraseExtractor};
pub use similarity::{score, Scorer, SimilarityAnalysis, SimilarityConfig, SimilarityError};

pub use crate::config::{ClonescanConfig, ConfigLoadError};

/// Build an engine from `cfg`, connecting the language-model collaborator
/// when `CLONESCAN_LLM_API_KEY` is set. Keys are never taken from the file.
pub fn build_engine(cfg: &ClonescanConfig) -> Result<CloneEngine, DetectError> {
    let client = assist::connect(&cfg.assist_with_env());
    build_engine_with_client(cfg, client)
}

/// Build an engine from `cfg` with an explicit collaborator (or none).
pub fn build_engine_with_client(
    cfg: &ClonescanConfig,
    client: Option<Arc<dyn CompletionClient>>,
) -> Result<CloneEngine, DetectError> {
    CloneEngine::new(
        cfg.fingerprint_config(),
        cfg.similarity,
        &cfg.detector,
        client,
    )
}
