use serde::{Deserialize, Serialize};

use crate::config::OverallWeights;

/// The four sub-scores of a comparison, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimilarityAnalysis {
    pub content_similarity: f64,
    pub structure_similarity: f64,
    pub design_similarity: f64,
    pub branding_similarity: f64,
}

impl SimilarityAnalysis {
    /// Unweighted mean of the sub-scores.
    pub fn mean(&self) -> f64 {
        (self.content_similarity
            + self.structure_similarity
            + self.design_similarity
            + self.branding_similarity)
            / 4.0
    }

    /// Weighted overall similarity, clamped to `[0, 1]` and rounded to two
    /// decimals.
    pub fn overall(&self, weights: &OverallWeights) -> f64 {
        let raw = weights.content * self.content_similarity
            + weights.structure * self.structure_similarity
            + weights.design * self.design_similarity
            + weights.branding * self.branding_similarity;
        round2(raw.clamp(0.0, 1.0))
    }
}

/// Round half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
