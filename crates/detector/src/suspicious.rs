//! Binary red flags, independent of the continuous score.

use std::fmt;

use fingerprint::WebsiteFingerprint;
use similarity::branding_similarity;

/// Branding overlap above this is flagged.
pub const BRANDING_THRESHOLD: f64 = 0.7;
/// More shared key phrases than this are flagged.
pub const SHARED_PHRASE_THRESHOLD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuspiciousElement {
    IdenticalTitle,
    IdenticalMetaDescription,
    HighBrandingSimilarity,
    IdenticalKeyPhrases(usize),
}

impl fmt::Display for SuspiciousElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuspiciousElement::IdenticalTitle => f.write_str("Identical page title"),
            SuspiciousElement::IdenticalMetaDescription => {
                f.write_str("Identical meta description")
            }
            SuspiciousElement::HighBrandingSimilarity => f.write_str("High branding similarity"),
            SuspiciousElement::IdenticalKeyPhrases(n) => write!(f, "{n} identical key phrases"),
        }
    }
}

fn same_non_empty(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && a.to_lowercase() == b.to_lowercase()
}

/// Original key phrases that appear, ignoring case, among the suspect's.
pub fn shared_phrase_count(original: &WebsiteFingerprint, suspect: &WebsiteFingerprint) -> usize {
    let suspect_phrases: Vec<String> = suspect
        .key_phrases
        .iter()
        .map(|p| p.to_lowercase())
        .collect();
    original
        .key_phrases
        .iter()
        .filter(|p| suspect_phrases.contains(&p.to_lowercase()))
        .count()
}

/// Flags in fixed order: title, description, branding, phrases.
pub fn detect_suspicious(
    original: &WebsiteFingerprint,
    suspect: &WebsiteFingerprint,
) -> Vec<SuspiciousElement> {
    let mut flags = Vec::new();

    if same_non_empty(&original.title, &suspect.title) {
        flags.push(SuspiciousElement::IdenticalTitle);
    }
    if same_non_empty(&original.meta_description, &suspect.meta_description) {
        flags.push(SuspiciousElement::IdenticalMetaDescription);
    }
    if branding_similarity(original, suspect) > BRANDING_THRESHOLD {
        flags.push(SuspiciousElement::HighBrandingSimilarity);
    }
    let shared = shared_phrase_count(original, suspect);
    if shared > SHARED_PHRASE_THRESHOLD {
        flags.push(SuspiciousElement::IdenticalKeyPhrases(shared));
    }

    flags
}

/// [`detect_suspicious`] rendered as the strings stored in results.
pub fn find_suspicious_elements(
    original: &WebsiteFingerprint,
    suspect: &WebsiteFingerprint,
) -> Vec<String> {
    detect_suspicious(original, suspect)
        .into_iter()
        .map(|flag| flag.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phrases(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn title_only_match_ignoring_case() {
        let original = WebsiteFingerprint {
            title: "Acme Safety".into(),
            unique_identifiers: phrases(&["Acme Safety", "Acme", "Acme Corp"]),
            ..Default::default()
        };
        let suspect = WebsiteFingerprint {
            title: "ACME SAFETY".into(),
            unique_identifiers: phrases(&["ACME SAFETY", "Other", "Else", "More"]),
            ..Default::default()
        };
        assert_eq!(
            find_suspicious_elements(&original, &suspect),
            vec!["Identical page title"]
        );
    }

    #[test]
    fn blank_pages_only_share_branding() {
        let empty = WebsiteFingerprint::default();
        let flags = detect_suspicious(&empty, &empty);
        // Both identifier lists empty counts as identical branding.
        assert_eq!(flags, vec![SuspiciousElement::HighBrandingSimilarity]);
    }

    #[test]
    fn all_flags_in_order() {
        let fp = WebsiteFingerprint {
            title: "Acme".into(),
            meta_description: "Safety training".into(),
            key_phrases: phrases(&["safety", "training", "forklift", "audits", "compliance"]),
            unique_identifiers: phrases(&["Acme"]),
            ..Default::default()
        };
        let mut suspect = fp.clone();
        suspect.key_phrases = phrases(&["SAFETY", "Training", "forklift", "audits", "other"]);
        assert_eq!(
            find_suspicious_elements(&fp, &suspect),
            vec![
                "Identical page title",
                "Identical meta description",
                "High branding similarity",
                "4 identical key phrases",
            ]
        );
    }

    #[test]
    fn three_shared_phrases_not_flagged() {
        let original = WebsiteFingerprint {
            key_phrases: phrases(&["alpha", "beta", "gamma", "delta"]),
            unique_identifiers: phrases(&["A"]),
            ..Default::default()
        };
        let suspect = WebsiteFingerprint {
            key_phrases: phrases(&["alpha", "beta", "gamma"]),
            unique_identifiers: phrases(&["B"]),
            ..Default::default()
        };
        assert_eq!(shared_phrase_count(&original, &suspect), 3);
        assert!(detect_suspicious(&original, &suspect).is_empty());
    }

    #[test]
    fn branding_overlap_above_threshold_flagged() {
        let original = WebsiteFingerprint {
            unique_identifiers: phrases(&["a", "b", "c", "d"]),
            ..Default::default()
        };
        let suspect = WebsiteFingerprint {
            unique_identifiers: phrases(&["A", "B", "C"]),
            ..Default::default()
        };
        assert_eq!(
            detect_suspicious(&original, &suspect),
            vec![SuspiciousElement::HighBrandingSimilarity]
        );
    }
}
