use serde::{Deserialize, Serialize};
use thiserror::Error;

const SUM_TOLERANCE: f64 = 1e-6;

/// Weights of the four content signals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContentWeights {
    pub title: f64,
    pub description: f64,
    pub headings: f64,
    pub phrases: f64,
}

impl Default for ContentWeights {
    fn default() -> Self {
        Self {
            title: 0.30,
            description: 0.20,
            headings: 0.25,
            phrases: 0.25,
        }
    }
}

/// Weights of the four sub-scores in the overall score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OverallWeights {
    pub content: f64,
    pub structure: f64,
    pub design: f64,
    pub branding: f64,
}

impl Default for OverallWeights {
    fn default() -> Self {
        Self {
            content: 0.30,
            structure: 0.20,
            design: 0.20,
            branding: 0.30,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimilarityConfig {
    pub content: ContentWeights,
    pub overall: OverallWeights,
}

impl SimilarityConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content_weights(mut self, content: ContentWeights) -> Self {
        self.content = content;
        self
    }

    pub fn with_overall_weights(mut self, overall: OverallWeights) -> Self {
        self.overall = overall;
        self
    }

    /// Every weight finite and non-negative; each group sums to 1.
    pub fn validate(&self) -> Result<(), SimilarityError> {
        check_group(
            "content",
            &[
                ("content.title", self.content.title),
                ("content.description", self.content.description),
                ("content.headings", self.content.headings),
                ("content.phrases", self.content.phrases),
            ],
        )?;
        check_group(
            "overall",
            &[
                ("overall.content", self.overall.content),
                ("overall.structure", self.overall.structure),
                ("overall.design", self.overall.design),
                ("overall.branding", self.overall.branding),
            ],
        )
    }
}

fn check_group(group: &'static str, weights: &[(&'static str, f64)]) -> Result<(), SimilarityError> {
    for &(name, value) in weights {
        if !value.is_finite() || value < 0.0 {
            return Err(SimilarityError::InvalidWeight { name, value });
        }
    }
    let sum: f64 = weights.iter().map(|(_, w)| w).sum();
    if (sum - 1.0).abs() > SUM_TOLERANCE {
        return Err(SimilarityError::WeightsDoNotSumToOne { group, sum });
    }
    Ok(())
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimilarityError {
    #[error("weight {name} must be finite and non-negative (got {value})")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("{group} weights must sum to 1.0 (got {sum})")]
    WeightsDoNotSumToOne { group: &'static str, sum: f64 },
}
