//! Human-readable explanation of a comparison.
//!
//! [`TemplateNarrator`] is deterministic and always available.
//! [`LlmNarrator`] asks the collaborator for prose and falls back to the
//! template on any failure, so a narrative is never empty.

use std::sync::Arc;
use std::time::Duration;

use assist::{CompletionClient, Prompt};
use async_trait::async_trait;
use fingerprint::WebsiteFingerprint;
use similarity::SimilarityAnalysis;

/// Which strategy produced a narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrativeSource {
    Template,
    Llm,
    /// The collaborator was tried and failed; the template was used.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narrative {
    pub text: String,
    pub source: NarrativeSource,
}

#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    /// Narrative tagged with its source. Never fails, never empty.
    async fn generate(
        &self,
        original: &WebsiteFingerprint,
        suspect: &WebsiteFingerprint,
        analysis: &SimilarityAnalysis,
    ) -> Narrative;

    async fn explain(
        &self,
        original: &WebsiteFingerprint,
        suspect: &WebsiteFingerprint,
        analysis: &SimilarityAnalysis,
    ) -> String {
        self.generate(original, suspect, analysis).await.text
    }

    fn strategy(&self) -> &'static str;
}

/// Four bands over the mean of the sub-scores.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateNarrator;

impl TemplateNarrator {
    pub fn render(analysis: &SimilarityAnalysis) -> String {
        let mean = analysis.mean();
        let pct = format!("{:.1}%", mean * 100.0);
        if mean > 0.8 {
            format!(
                "High similarity detected ({pct}). The site closely resembles the original \
                 and may be a potential clone. This requires immediate investigation."
            )
        } else if mean > 0.6 {
            format!(
                "Moderate similarity detected ({pct}). Several elements resemble the original. \
                 This site is worth monitoring."
            )
        } else if mean > 0.4 {
            format!(
                "Low to moderate similarity ({pct}). Some shared elements, likely within \
                 industry norms."
            )
        } else {
            format!("Low similarity ({pct}). No immediate concern.")
        }
    }
}

#[async_trait]
impl NarrativeGenerator for TemplateNarrator {
    async fn generate(
        &self,
        _original: &WebsiteFingerprint,
        _suspect: &WebsiteFingerprint,
        analysis: &SimilarityAnalysis,
    ) -> Narrative {
        Narrative {
            text: Self::render(analysis),
            source: NarrativeSource::Template,
        }
    }

    fn strategy(&self) -> &'static str {
        "template"
    }
}

const SYSTEM_PROMPT: &str = "You are a brand-protection analyst. \
Explain website similarity findings to a non-technical reviewer in plain prose.";

fn join_or_none(items: &[String], limit: usize) -> String {
    if items.is_empty() {
        return "(none)".to_string();
    }
    items
        .iter()
        .take(limit)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn build_prompt(
    original: &WebsiteFingerprint,
    suspect: &WebsiteFingerprint,
    analysis: &SimilarityAnalysis,
) -> Prompt {
    let user = format!(
        "Compare an original website with a suspected copy and explain, in two or three \
         sentences, how similar they are and whether the copy looks like a clone.\n\n\
         Original title: {original_title}\n\
         Suspect title: {suspect_title}\n\
         Original identifiers: {original_ids}\n\
         Suspect identifiers: {suspect_ids}\n\
         Original key phrases: {original_phrases}\n\
         Suspect key phrases: {suspect_phrases}\n\n\
         Scores (0 to 1): content {content:.2}, structure {structure:.2}, \
         design {design:.2}, branding {branding:.2}.",
        original_title = original.title,
        suspect_title = suspect.title,
        original_ids = join_or_none(&original.unique_identifiers, 5),
        suspect_ids = join_or_none(&suspect.unique_identifiers, 5),
        original_phrases = join_or_none(&original.key_phrases, 10),
        suspect_phrases = join_or_none(&suspect.key_phrases, 10),
        content = analysis.content_similarity,
        structure = analysis.structure_similarity,
        design = analysis.design_similarity,
        branding = analysis.branding_similarity,
    );
    Prompt::new(user).with_system(SYSTEM_PROMPT)
}

/// Collaborator-backed narrator with template fallback.
pub struct LlmNarrator {
    client: Arc<dyn CompletionClient>,
    timeout: Duration,
}

impl LlmNarrator {
    pub fn new(client: Arc<dyn CompletionClient>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    fn fallback(&self, analysis: &SimilarityAnalysis, reason: &str) -> Narrative {
        tracing::warn!(
            provider = self.client.provider(),
            error = reason,
            "narrative collaborator failed; using template"
        );
        Narrative {
            text: TemplateNarrator::render(analysis),
            source: NarrativeSource::Fallback,
        }
    }
}

#[async_trait]
impl NarrativeGenerator for LlmNarrator {
    async fn generate(
        &self,
        original: &WebsiteFingerprint,
        suspect: &WebsiteFingerprint,
        analysis: &SimilarityAnalysis,
    ) -> Narrative {
        let prompt = build_prompt(original, suspect, analysis).with_deadline(self.timeout);
        match tokio::time::timeout(self.timeout, self.client.complete(&prompt)).await {
            Err(_) => self.fallback(analysis, "deadline exceeded"),
            Ok(Err(err)) => self.fallback(analysis, &err.to_string()),
            Ok(Ok(answer)) => {
                let text = answer.trim();
                if text.is_empty() {
                    self.fallback(analysis, "empty answer")
                } else {
                    Narrative {
                        text: text.to_string(),
                        source: NarrativeSource::Llm,
                    }
                }
            }
        }
    }

    fn strategy(&self) -> &'static str {
        "llm"
    }
}
