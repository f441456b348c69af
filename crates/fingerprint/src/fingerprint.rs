use serde::{Deserialize, Serialize};

/// Structured summary of one HTML page.
///
/// Produced by [`crate::extract_fingerprint`] or a
/// [`crate::FingerprintExtractor`]; never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteFingerprint {
    /// Text of the first `<title>`, empty if absent. Trimmed, and internal
    /// runs of whitespace collapsed to one space, so reflowed markup does
    /// not change the edit distance between two titles.
    pub title: String,
    /// `content` of `<meta name="description">`, empty if absent.
    pub meta_description: String,
    /// H1-H3 text in document order, whitespace collapsed like `title`.
    pub headings: Vec<String>,
    /// Most distinguishing phrases of the visible text, most important first.
    pub key_phrases: Vec<String>,
    /// Exactly five `<kind>-<count>` tokens, see [`StructuralCounts::tokens`].
    pub structural_elements: Vec<String>,
    /// Distinct colour tokens in discovery order.
    pub color_scheme: Vec<String>,
    /// Title, site name, logo text and brand text.
    pub unique_identifiers: Vec<String>,
}

impl WebsiteFingerprint {
    /// True when the page yielded no text, colours or identifiers and every
    /// structural count is zero.
    pub fn is_blank(&self) -> bool {
        self.title.is_empty()
            && self.meta_description.is_empty()
            && self.headings.is_empty()
            && self.key_phrases.is_empty()
            && self.color_scheme.is_empty()
            && self.unique_identifiers.is_empty()
            && self.structural_elements == StructuralCounts::default().tokens()
    }
}

/// Counts of layout landmarks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralCounts {
    pub nav_items: usize,
    pub sections: usize,
    pub cards: usize,
    pub buttons: usize,
    pub forms: usize,
}

impl StructuralCounts {
    /// Fixed-order tokens; zero counts are included so two pages always
    /// produce comparable sets.
    pub fn tokens(&self) -> Vec<String> {
        vec![
            format!("nav-items-{}", self.nav_items),
            format!("sections-{}", self.sections),
            format!("cards-{}", self.cards),
            format!("buttons-{}", self.buttons),
            format!("forms-{}", self.forms),
        ]
    }
}
