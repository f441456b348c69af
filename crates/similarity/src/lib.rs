//! clonescan similarity scoring.
//!
//! Compares two [`WebsiteFingerprint`]s along four axes:
//!
//! - **content**: weighted blend of title and description edit-distance
//!   similarity with heading and key-phrase overlap
//! - **structure**: overlap of the structural landmark tokens
//! - **design**: overlap of the colour schemes
//! - **branding**: case-insensitive overlap of the unique identifiers
//!
//! Scoring is pure and deterministic. Weights come from [`SimilarityConfig`].
//!
//! ```
//! use fingerprint::extract_fingerprint;
//! use similarity::{score, OverallWeights};
//!
//! let fp = extract_fingerprint("<title>Acme</title>");
//! let analysis = score(&fp, &fp);
//! assert_eq!(analysis.overall(&OverallWeights::default()), 1.0);
//! ```

mod analysis;
mod config;
mod measures;

use fingerprint::WebsiteFingerprint;

pub use crate::analysis::{round2, SimilarityAnalysis};
pub use crate::config::{ContentWeights, OverallWeights, SimilarityConfig, SimilarityError};
pub use crate::measures::{jaccard, jaccard_ignore_case, normalized_levenshtein};

/// Scores fingerprint pairs with a validated set of weights.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer {
    cfg: SimilarityConfig,
}

impl Scorer {
    pub fn new(cfg: SimilarityConfig) -> Result<Self, SimilarityError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &SimilarityConfig {
        &self.cfg
    }

    pub fn score(&self, original: &WebsiteFingerprint, suspect: &WebsiteFingerprint) -> SimilarityAnalysis {
        let analysis = SimilarityAnalysis {
            content_similarity: self.content_similarity(original, suspect),
            structure_similarity: jaccard(
                &original.structural_elements,
                &suspect.structural_elements,
            ),
            design_similarity: jaccard(&original.color_scheme, &suspect.color_scheme),
            branding_similarity: branding_similarity(original, suspect),
        };
        tracing::debug!(
            content = analysis.content_similarity,
            structure = analysis.structure_similarity,
            design = analysis.design_similarity,
            branding = analysis.branding_similarity,
            "similarity scored"
        );
        analysis
    }

    /// Weighted overall score of `analysis`, rounded to two decimals.
    pub fn overall(&self, analysis: &SimilarityAnalysis) -> f64 {
        analysis.overall(&self.cfg.overall)
    }

    fn content_similarity(&self, original: &WebsiteFingerprint, suspect: &WebsiteFingerprint) -> f64 {
        let w = &self.cfg.content;
        let title = normalized_levenshtein(&original.title, &suspect.title);
        let description =
            normalized_levenshtein(&original.meta_description, &suspect.meta_description);
        let headings = jaccard_ignore_case(&original.headings, &suspect.headings);
        let phrases = jaccard_ignore_case(&original.key_phrases, &suspect.key_phrases);

        (w.title * title + w.description * description + w.headings * headings + w.phrases * phrases)
            .clamp(0.0, 1.0)
    }
}

/// Score with the default weights.
pub fn score(original: &WebsiteFingerprint, suspect: &WebsiteFingerprint) -> SimilarityAnalysis {
    Scorer::default().score(original, suspect)
}

/// Case-insensitive Jaccard overlap of the unique identifiers.
pub fn branding_similarity(original: &WebsiteFingerprint, suspect: &WebsiteFingerprint) -> f64 {
    jaccard_ignore_case(&original.unique_identifiers, &suspect.unique_identifiers)
}
