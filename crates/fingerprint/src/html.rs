//! HTML parsing into an owned [`PageSummary`].
//!
//! `scraper::Html` is not `Send`, so the parsed tree never leaves this module.
//! Everything downstream (including the async key-phrase stage) works on the
//! owned summary.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

use crate::colors::ColorCollector;
use crate::fingerprint::{StructuralCounts, WebsiteFingerprint};

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("static selector {css:?} is invalid: {e:?}"))
}

static TITLE: Lazy<Selector> = Lazy::new(|| selector("title"));
static META_DESCRIPTION: Lazy<Selector> = Lazy::new(|| selector(r#"meta[name="description"]"#));
static SITE_NAME: Lazy<Selector> = Lazy::new(|| {
    selector(r#"meta[property="og:site_name"], meta[name="og:site_name"]"#)
});
static HEADINGS: Lazy<Selector> = Lazy::new(|| selector("h1, h2, h3"));
static BODY: Lazy<Selector> = Lazy::new(|| selector("body"));

static NAV_ITEMS: Lazy<Selector> = Lazy::new(|| selector("nav a"));
static SECTIONS: Lazy<Selector> = Lazy::new(|| selector("section"));
static CARDS: Lazy<Selector> = Lazy::new(|| selector(r#"[class*="card"]"#));
static BUTTONS: Lazy<Selector> = Lazy::new(|| {
    selector(
        r#"button, .btn, [role="button"], input[type="submit"], input[type="button"]"#,
    )
});
static FORMS: Lazy<Selector> = Lazy::new(|| selector("form"));

static STYLED: Lazy<Selector> = Lazy::new(|| selector("[style], [class]"));
static LOGOS: Lazy<Selector> =
    Lazy::new(|| selector(r#".logo, #logo, [class*="logo"], [id*="logo"]"#));
static BRANDS: Lazy<Selector> =
    Lazy::new(|| selector(r#".brand, #brand, [class*="brand"], .navbar-brand"#));
static IMG: Lazy<Selector> = Lazy::new(|| selector("img[alt]"));

/// Elements whose text content is never rendered.
const HIDDEN_TEXT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Collapse runs of whitespace to single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for segment in text.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}

fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Everything the fingerprint needs except key phrases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSummary {
    pub title: String,
    pub meta_description: String,
    pub headings: Vec<String>,
    pub counts: StructuralCounts,
    pub color_scheme: Vec<String>,
    pub unique_identifiers: Vec<String>,
    /// Whitespace-collapsed visible body text, input to phrase extraction.
    pub body_text: String,
}

impl PageSummary {
    pub(crate) fn parse(
        html: &str,
        class_color: &Regex,
        max_headings: usize,
        max_colors: usize,
    ) -> Self {
        let doc = Html::parse_document(html);

        let title = doc
            .select(&TITLE)
            .next()
            .map(element_text)
            .unwrap_or_default();

        let meta_description = doc
            .select(&META_DESCRIPTION)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(|content| content.trim().to_string())
            .unwrap_or_default();

        let headings = doc
            .select(&HEADINGS)
            .map(element_text)
            .filter(|h| !h.is_empty())
            .take(max_headings)
            .collect();

        let counts = StructuralCounts {
            nav_items: doc.select(&NAV_ITEMS).count(),
            sections: doc.select(&SECTIONS).count(),
            cards: doc.select(&CARDS).count(),
            buttons: doc.select(&BUTTONS).count(),
            forms: doc.select(&FORMS).count(),
        };

        let mut colors = ColorCollector::new(class_color, max_colors);
        for el in doc.select(&STYLED) {
            if colors.is_full() {
                break;
            }
            if let Some(style) = el.value().attr("style") {
                colors.scan_style(style);
            }
            if let Some(class) = el.value().attr("class") {
                colors.scan_class(class);
            }
        }

        let unique_identifiers = identifiers(&doc, &title);
        let body_text = visible_text(&doc);

        Self {
            title,
            meta_description,
            headings,
            counts,
            color_scheme: colors.finish(),
            unique_identifiers,
            body_text,
        }
    }

    pub fn into_fingerprint(self, key_phrases: Vec<String>) -> WebsiteFingerprint {
        WebsiteFingerprint {
            title: self.title,
            meta_description: self.meta_description,
            headings: self.headings,
            key_phrases,
            structural_elements: self.counts.tokens(),
            color_scheme: self.color_scheme,
            unique_identifiers: self.unique_identifiers,
        }
    }
}

fn identifiers(doc: &Html, title: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    let mut push = |candidate: String| {
        if !candidate.is_empty() && !found.contains(&candidate) {
            found.push(candidate);
        }
    };

    push(title.to_string());

    if let Some(site_name) = doc
        .select(&SITE_NAME)
        .next()
        .and_then(|el| el.value().attr("content"))
    {
        push(collapse_whitespace(site_name));
    }

    for logo in doc.select(&LOGOS) {
        push(logo_text(logo));
    }

    for brand in doc.select(&BRANDS) {
        push(element_text(brand));
    }

    found
}

/// An `<img>` logo contributes its alt text; other logo elements their text,
/// or the alt of an image inside them when they have none.
fn logo_text(logo: ElementRef<'_>) -> String {
    if logo.value().name() == "img" {
        return collapse_whitespace(logo.value().attr("alt").unwrap_or_default());
    }
    let text = element_text(logo);
    if !text.is_empty() {
        return text;
    }
    logo.select(&IMG)
        .next()
        .and_then(|img| img.value().attr("alt"))
        .map(collapse_whitespace)
        .unwrap_or_default()
}

fn visible_text(doc: &Html) -> String {
    let root = doc
        .select(&BODY)
        .next()
        .unwrap_or_else(|| doc.root_element());

    let mut raw = String::new();
    for node in root.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            matches!(ancestor.value(), Node::Element(el) if HIDDEN_TEXT_TAGS.contains(&el.name()))
        });
        if !hidden {
            raw.push_str(text);
            raw.push(' ');
        }
    }
    collapse_whitespace(&raw)
}
