use std::sync::Arc;
use std::time::Instant;

use assist::CompletionClient;
use chrono::Utc;
use fingerprint::{FingerprintConfig, FingerprintExtractor, WebsiteFingerprint};
use phrases::{FrequencyExtractor, LlmPhraseExtractor, PhraseExtractor};
use similarity::{Scorer, SimilarityConfig};

use crate::metrics::{metrics_recorder, FallbackStage};
use crate::narrative::{LlmNarrator, NarrativeGenerator, NarrativeSource, TemplateNarrator};
use crate::risk::classify;
use crate::suspicious::find_suspicious_elements;
use crate::types::{CloneDetectionResult, DetectError, DetectorConfig, ReferenceSite};


fn report_fallback(stage: FallbackStage) {
    if let Some(recorder) = metrics_recorder() {
        recorder.record_fallback(stage);
    }
}

/// Stateless comparison engine.
///
/// Holds only configuration and the two collaborator strategies, so one
/// engine can be shared behind an `Arc` by any number of concurrent scans.
pub struct CloneEngine {
    extractor: FingerprintExtractor,
    scorer: Scorer,
    phrases: Arc<dyn PhraseExtractor>,
    narrator: Arc<dyn NarrativeGenerator>,
}

impl Default for CloneEngine {
    /// Default configuration with deterministic strategies only.
    fn default() -> Self {
        let extractor = FingerprintExtractor::default();
        let phrases = Arc::new(FrequencyExtractor::new(extractor.config().phrases.clone()));
        Self {
            extractor,
            scorer: Scorer::default(),
            phrases,
            narrator: Arc::new(TemplateNarrator),
        }
    }
}

impl CloneEngine {
    /// Build an engine. Collaborator strategies are used only when `client`
    /// is present and the matching [`DetectorConfig`] switch is on.
    pub fn new(
        fingerprint_cfg: FingerprintConfig,
        similarity_cfg: SimilarityConfig,
        detector_cfg: &DetectorConfig,
        client: Option<Arc<dyn CompletionClient>>,
    ) -> Result<Self, DetectError> {
        detector_cfg.validate()?;
        let extractor = FingerprintExtractor::new(fingerprint_cfg)?;
        let scorer = Scorer::new(similarity_cfg)?;
        let phrase_cfg = extractor.config().phrases.clone();

        let phrases: Arc<dyn PhraseExtractor> = match &client {
            Some(client) if detector_cfg.llm_phrases => {
                Arc::new(LlmPhraseExtractor::new(Arc::clone(client), phrase_cfg))
            }
            _ => Arc::new(FrequencyExtractor::new(phrase_cfg)),
        };
        let narrator: Arc<dyn NarrativeGenerator> = match client {
            Some(client) if detector_cfg.llm_narrative => Arc::new(LlmNarrator::new(
                client,
                detector_cfg.narrative_timeout(),
            )),
            _ => Arc::new(TemplateNarrator),
        };

        tracing::debug!(
            phrases = phrases.strategy(),
            narrative = narrator.strategy(),
            "clone engine ready"
        );

        Ok(Self {
            extractor,
            scorer,
            phrases,
            narrator,
        })
    }

    /// Replace the key-phrase strategy.
    pub fn with_phrase_extractor(mut self, phrases: Arc<dyn PhraseExtractor>) -> Self {
        self.phrases = phrases;
        self
    }

    /// Replace the narrative strategy.
    pub fn with_narrator(mut self, narrator: Arc<dyn NarrativeGenerator>) -> Self {
        self.narrator = narrator;
        self
    }

    pub fn phrase_strategy(&self) -> &'static str {
        self.phrases.strategy()
    }

    pub fn narrative_strategy(&self) -> &'static str {
        self.narrator.strategy()
    }

    /// Fingerprint `html` using the engine's key-phrase strategy.
    pub async fn fingerprint(&self, html: &str) -> WebsiteFingerprint {
        let (fingerprint, source) = self.extractor.extract_with(html, self.phrases.as_ref()).await;
        if source.fell_back() {
            report_fallback(FallbackStage::KeyPhrases);
        }
        fingerprint
    }

    /// Fingerprint `html` and compare it against `original`.
    pub async fn compare(
        &self,
        original: &WebsiteFingerprint,
        html: &str,
        url: &str,
    ) -> CloneDetectionResult {
        let start = Instant::now();
        let suspect = self.fingerprint(html).await;
        tracing::debug!(
            url,
            headings = suspect.headings.len(),
            key_phrases = suspect.key_phrases.len(),
            colors = suspect.color_scheme.len(),
            "suspect fingerprinted"
        );
        self.compare_timed(original, &suspect, url, start).await
    }

    /// Compare two precomputed fingerprints.
    pub async fn compare_fingerprints(
        &self,
        original: &WebsiteFingerprint,
        suspect: &WebsiteFingerprint,
        url: &str,
    ) -> CloneDetectionResult {
        self.compare_timed(original, suspect, url, Instant::now())
            .await
    }

    async fn compare_timed(
        &self,
        original: &WebsiteFingerprint,
        suspect: &WebsiteFingerprint,
        url: &str,
        start: Instant,
    ) -> CloneDetectionResult {
        let analysis = self.scorer.score(original, suspect);
        let similarity_score = self.scorer.overall(&analysis);
        let suspicious_elements = find_suspicious_elements(original, suspect);
        let recommendation = classify(similarity_score, suspicious_elements.len());

        let narrative = self.narrator.generate(original, suspect, &analysis).await;
        if narrative.source == NarrativeSource::Fallback {
            report_fallback(FallbackStage::Narrative);
        }

        let latency = start.elapsed();
        tracing::info!(
            url,
            score = similarity_score,
            recommendation = %recommendation,
            suspicious = suspicious_elements.len(),
            latency_ms = latency.as_millis() as u64,
            "comparison complete"
        );
        if let Some(recorder) = metrics_recorder() {
            recorder.record_detection(url, latency, similarity_score, recommendation);
        }

        CloneDetectionResult {
            url: url.to_string(),
            similarity_score,
            analysis,
            suspicious_elements,
            recommendation,
            narrative: narrative.text,
            timestamp: Utc::now(),
        }
    }
}

/// One scan: a shared engine plus at most one reference site.
///
/// `set_original` needs `&mut self` and `detect_clone` only `&self`, so a
/// reference cannot change while comparisons against it are in flight.
pub struct Detector {
    engine: Arc<CloneEngine>,
    reference: Option<ReferenceSite>,
}

impl Detector {
    pub fn new(engine: Arc<CloneEngine>) -> Self {
        Self {
            engine,
            reference: None,
        }
    }

    pub fn engine(&self) -> &Arc<CloneEngine> {
        &self.engine
    }

    /// Fingerprint `html` and store it as the reference, replacing any
    /// previous one. Unparseable or empty HTML yields a blank reference.
    pub async fn set_original(&mut self, html: &str, url: &str) -> &ReferenceSite {
        let fingerprint = self.engine.fingerprint(html).await;
        if fingerprint.is_blank() {
            tracing::warn!(url, "reference page produced an empty fingerprint");
        } else {
            tracing::info!(
                url,
                title = %fingerprint.title,
                key_phrases = fingerprint.key_phrases.len(),
                "reference set"
            );
        }
        self.set_original_fingerprint(fingerprint, url)
    }

    /// Store a precomputed reference fingerprint.
    pub fn set_original_fingerprint(
        &mut self,
        fingerprint: WebsiteFingerprint,
        url: &str,
    ) -> &ReferenceSite {
        self.reference.insert(ReferenceSite {
            url: url.to_string(),
            fingerprint,
        })
    }

    pub fn reference(&self) -> Option<&ReferenceSite> {
        self.reference.as_ref()
    }

    /// Compare `html` against the reference.
    pub async fn detect_clone(
        &self,
        html: &str,
        url: &str,
    ) -> Result<CloneDetectionResult, DetectError> {
        let reference = self.reference.as_ref().ok_or(DetectError::NoReference)?;
        Ok(self.engine.compare(&reference.fingerprint, html, url).await)
    }
}
