//! Colour-scheme discovery from inline styles and utility classes.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::FingerprintError;

/// `#rrggbb` or `#rgb`, word-bounded so `#abcd` is not read as `#abc`.
static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#(?:[0-9a-fA-F]{6}|[0-9a-fA-F]{3})\b").expect("hex colour pattern compiles")
});

/// Build the matcher for `bg-<colour>[-<shade>]` / `text-<colour>[-<shade>]`.
pub(crate) fn class_color_regex(palette: &[String]) -> Result<Regex, FingerprintError> {
    let names = palette
        .iter()
        .map(|name| regex::escape(name))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"^(?:bg|text)-(?:{names})(?:-\d+)?$"))
        .map_err(|e| FingerprintError::InvalidPalette(e.to_string()))
}

/// Ordered, de-duplicated, capped colour tokens.
pub(crate) struct ColorCollector<'a> {
    class_color: &'a Regex,
    cap: usize,
    tokens: Vec<String>,
}

impl<'a> ColorCollector<'a> {
    pub(crate) fn new(class_color: &'a Regex, cap: usize) -> Self {
        Self {
            class_color,
            cap,
            tokens: Vec::new(),
        }
    }

    pub(crate) fn is_full(&self) -> bool {
        self.tokens.len() >= self.cap
    }

    fn push(&mut self, token: String) {
        if !self.is_full() && !self.tokens.contains(&token) {
            self.tokens.push(token);
        }
    }

    /// Hex literals in a `style` attribute; case-folded so `#FFF` and `#fff`
    /// count once.
    pub(crate) fn scan_style(&mut self, style: &str) {
        for m in HEX_COLOR.find_iter(style) {
            self.push(m.as_str().to_ascii_lowercase());
        }
    }

    /// Palette utility classes in a `class` attribute.
    pub(crate) fn scan_class(&mut self, class: &str) {
        for token in class.split_whitespace() {
            if self.class_color.is_match(token) {
                self.push(token.to_string());
            }
        }
    }

    pub(crate) fn finish(self) -> Vec<String> {
        self.tokens
    }
}
