//! # clonescan detector (`detector`)
//!
//! ## Purpose
//!
//! `detector` ties the fingerprint, similarity and key-phrase layers together.
//! Given a reference site and a suspect page it produces a
//! [`CloneDetectionResult`]: four sub-scores, a weighted overall score, binary
//! red flags, a four-level [`RiskLevel`] and a human-readable narrative.
//!
//! ## Core Types
//!
//! - [`CloneEngine`]: stateless, shareable comparison engine. Owns the
//!   fingerprint extractor, the scorer, and the two collaborator strategies
//!   ([`phrases::PhraseExtractor`] and [`NarrativeGenerator`]).
//! - [`Detector`]: one scan. Holds at most one [`ReferenceSite`];
//!   `set_original` replaces it, `detect_clone` compares against it.
//! - [`DetectorConfig`]: collaborator switches and narrative deadline.
//! - [`DetectMetrics`]: optional global observer, installed with
//!   [`set_detect_metrics`].
//!
//! Collaborator failures never surface: key phrases fall back to frequency
//! ranking and the narrative to a template. The only runtime error is
//! [`DetectError::NoReference`].
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use detector::{CloneEngine, Detector, RiskLevel};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let html = "<title>Acme Safety</title><h1>Forklift safety training</h1>";
//!
//! let mut detector = Detector::new(Arc::new(CloneEngine::default()));
//! detector.set_original(html, "https://acme.example").await;
//!
//! let result = detector.detect_clone(html, "https://acme-copy.example").await.unwrap();
//! assert_eq!(result.similarity_score, 1.0);
//! assert_eq!(result.recommendation, RiskLevel::PotentialClone);
//! # });
//! ```

mod engine;
mod metrics;
mod narrative;
mod risk;
mod suspicious;
mod types;

pub use crate::engine::{CloneEngine, Detector};
pub use crate::metrics::{set_detect_metrics, DetectMetrics, FallbackStage};
pub use crate::narrative::{
    LlmNarrator, Narrative, NarrativeGenerator, NarrativeSource, TemplateNarrator,
};
pub use crate::risk::classify;
pub use crate::suspicious::{
    detect_suspicious, find_suspicious_elements, shared_phrase_count, SuspiciousElement,
    BRANDING_THRESHOLD, SHARED_PHRASE_THRESHOLD,
};
pub use crate::types::{
    CloneDetectionResult, DetectError, DetectorConfig, ReferenceSite, RiskLevel,
};

pub use fingerprint::{FingerprintConfig, WebsiteFingerprint};
pub use similarity::{SimilarityAnalysis, SimilarityConfig};
