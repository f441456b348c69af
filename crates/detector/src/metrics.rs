// Metrics hooks for the detection layer.
//
// Callers install a global `DetectMetrics` implementation via
// [`set_detect_metrics`]; every `CloneEngine` then reports per-comparison
// latency, score and verdict, plus every collaborator fallback. No metrics
// backend is assumed.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

use crate::types::RiskLevel;

/// Stage whose collaborator failed and was replaced by its deterministic
/// strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackStage {
    KeyPhrases,
    Narrative,
}

impl FallbackStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackStage::KeyPhrases => "key_phrases",
            FallbackStage::Narrative => "narrative",
        }
    }
}

/// Metrics observer for detection.
pub trait DetectMetrics: Send + Sync {
    /// Record one finished comparison. `latency` covers suspect fingerprinting
    /// (when the engine did it), scoring and narrative generation.
    fn record_detection(&self, url: &str, latency: Duration, score: f64, recommendation: RiskLevel);

    /// Record that `stage` fell back to its deterministic strategy.
    fn record_fallback(&self, stage: FallbackStage);
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn DetectMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn DetectMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn DetectMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global detection metrics recorder.
pub fn set_detect_metrics(recorder: Option<Arc<dyn DetectMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
