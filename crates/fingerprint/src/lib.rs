//! clonescan fingerprint layer.
//!
//! Turns one HTML document into a [`WebsiteFingerprint`]: title, meta
//! description, headings, key phrases, structural landmark counts, colour
//! scheme and brand identifiers.
//!
//! ## Guarantees
//!
//! - Never fails on malformed HTML; missing parts degrade to empty fields.
//! - Byte-identical input and config produce an identical fingerprint when the
//!   deterministic phrase strategy is used ([`FingerprintExtractor::extract`]).
//! - No I/O. The only await point is the optional key-phrase collaborator in
//!   [`FingerprintExtractor::extract_with`], and the parsed DOM is dropped
//!   before it.
//!
//! ```
//! use fingerprint::extract_fingerprint;
//!
//! let fp = extract_fingerprint("<title>Acme Safety</title><h1>Training</h1>");
//! assert_eq!(fp.title, "Acme Safety");
//! assert_eq!(fp.headings, vec!["Training"]);
//! assert_eq!(fp.structural_elements.len(), 5);
//! ```

mod colors;
mod config;
mod fingerprint;
mod html;

use once_cell::sync::Lazy;
use phrases::{FrequencyExtractor, PhraseExtractor, PhraseSource};
use regex::Regex;

pub use crate::config::{FingerprintConfig, FingerprintError, DEFAULT_PALETTE};
pub use crate::fingerprint::{StructuralCounts, WebsiteFingerprint};
pub use crate::html::{collapse_whitespace, PageSummary};

static DEFAULT_EXTRACTOR: Lazy<FingerprintExtractor> = Lazy::new(|| {
    FingerprintExtractor::new(FingerprintConfig::default())
        .expect("default fingerprint config is valid")
});

/// Fingerprint `html` with the default config and deterministic key phrases.
pub fn extract_fingerprint(html: &str) -> WebsiteFingerprint {
    DEFAULT_EXTRACTOR.extract(html)
}

/// Configured extractor. Cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct FingerprintExtractor {
    cfg: FingerprintConfig,
    class_color: Regex,
    frequency: FrequencyExtractor,
}

impl Default for FingerprintExtractor {
    fn default() -> Self {
        DEFAULT_EXTRACTOR.clone()
    }
}

impl FingerprintExtractor {
    pub fn new(cfg: FingerprintConfig) -> Result<Self, FingerprintError> {
        cfg.validate()?;
        let class_color = colors::class_color_regex(&cfg.palette)?;
        let frequency = FrequencyExtractor::new(cfg.phrases.clone());
        Ok(Self {
            cfg,
            class_color,
            frequency,
        })
    }

    pub fn config(&self) -> &FingerprintConfig {
        &self.cfg
    }

    /// Parse `html` into everything but key phrases.
    pub fn summarize(&self, html: &str) -> PageSummary {
        let summary = PageSummary::parse(
            html,
            &self.class_color,
            self.cfg.max_headings,
            self.cfg.max_colors,
        );
        tracing::debug!(
            title_len = summary.title.len(),
            headings = summary.headings.len(),
            colors = summary.color_scheme.len(),
            identifiers = summary.unique_identifiers.len(),
            body_chars = summary.body_text.len(),
            "page summarized"
        );
        summary
    }

    /// Fingerprint with deterministic frequency-ranked phrases.
    pub fn extract(&self, html: &str) -> WebsiteFingerprint {
        let summary = self.summarize(html);
        let key_phrases = self.frequency.extract_sync(&summary.body_text);
        summary.into_fingerprint(key_phrases)
    }

    /// Fingerprint with the given phrase strategy. Also reports which
    /// strategy produced the phrases.
    pub async fn extract_with(
        &self,
        html: &str,
        phrases: &dyn PhraseExtractor,
    ) -> (WebsiteFingerprint, PhraseSource) {
        let summary = self.summarize(html);
        let ranked = phrases.extract_ranked(&summary.body_text).await;
        (summary.into_fingerprint(ranked.phrases), ranked.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use phrases::KeyPhrases;

    const ACME: &str = r##"<!doctype html>
<html>
<head>
  <title>Acme Safety</title>
  <meta name="description" content="Workplace safety training and compliance">
  <meta property="og:site_name" content="Acme Safety Co">
</head>
<body>
  <nav><a class="logo" href="/">Acme</a><a href="/courses">Courses</a><a href="/contact">Contact</a></nav>
  <section class="hero bg-blue-600" style="color:#ffffff">
    <h1>Safety training that sticks</h1>
    <a class="btn text-white">Book a course</a>
  </section>
  <section>
    <h2>Courses</h2>
    <div class="card">Forklift safety training</div>
    <div class="card">Compliance audits and safety reviews</div>
  </section>
  <form><input type="submit" value="Subscribe"></form>
  <script>trackPageView("training")</script>
</body>
</html>"##;

    #[test]
    fn extracts_full_fingerprint() {
        let fp = extract_fingerprint(ACME);
        assert_eq!(fp.title, "Acme Safety");
        assert_eq!(
            fp.meta_description,
            "Workplace safety training and compliance"
        );
        assert_eq!(fp.headings, vec!["Safety training that sticks", "Courses"]);
        assert_eq!(
            fp.structural_elements,
            vec!["nav-items-3", "sections-2", "cards-2", "buttons-2", "forms-1"]
        );
        assert_eq!(fp.color_scheme, vec!["#ffffff", "bg-blue-600", "text-white"]);
        assert_eq!(
            fp.unique_identifiers,
            vec!["Acme Safety", "Acme Safety Co", "Acme"]
        );
        assert_eq!(fp.key_phrases[0], "safety");
        assert!(!fp.key_phrases.contains(&"trackpageview".to_string()));
    }

    #[test]
    fn deterministic() {
        assert_eq!(extract_fingerprint(ACME), extract_fingerprint(ACME));
    }

    #[test]
    fn empty_document() {
        let fp = extract_fingerprint("");
        assert!(fp.is_blank());
        assert_eq!(fp.structural_elements.len(), 5);
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = FingerprintConfig::new().with_max_colors(0);
        assert!(FingerprintExtractor::new(cfg).is_err());
    }

    struct CannedPhrases;

    #[async_trait]
    impl PhraseExtractor for CannedPhrases {
        async fn extract_ranked(&self, _text: &str) -> KeyPhrases {
            KeyPhrases {
                phrases: vec!["Acme Safety".into()],
                source: PhraseSource::Llm,
            }
        }

        fn strategy(&self) -> &'static str {
            "canned"
        }
    }

    #[tokio::test]
    async fn extract_with_uses_given_strategy() {
        let extractor = FingerprintExtractor::new(FingerprintConfig::default()).unwrap();
        let (fp, source) = extractor.extract_with(ACME, &CannedPhrases).await;
        assert_eq!(fp.key_phrases, vec!["Acme Safety"]);
        assert_eq!(source, PhraseSource::Llm);

        let deterministic = extractor.extract(ACME);
        assert_eq!(fp.title, deterministic.title);
        assert_eq!(fp.color_scheme, deterministic.color_scheme);
    }
}
