//! Deterministic frequency-ranked key phrases.
//!
//! Pipeline: lowercase, strip punctuation, split on whitespace, drop short
//! tokens and stop words, count, rank by descending count with ties broken by
//! first occurrence. Output depends only on the input text and config.

use fxhash::FxHashMap;

use crate::config::PhraseConfig;

/// Function words that carry no business meaning. Tokens of three characters
/// or fewer are already dropped by length, so only longer words are listed.
pub const STOP_WORDS: &[&str] = &[
    "about", "above", "after", "again", "against", "also", "because", "been", "before", "being",
    "below", "between", "both", "but", "came", "come", "could", "does", "doing", "down", "during",
    "each", "even", "every", "from", "further", "have", "having", "here", "into", "just", "like",
    "made", "make", "many", "more", "most", "much", "must", "only", "other", "over", "same",
    "should", "some", "such", "than", "that", "their", "them", "then", "there", "these", "they",
    "this", "those", "through", "under", "until", "upon", "very", "want", "well", "were", "what",
    "when", "where", "which", "while", "will", "with", "within", "without", "would", "your",
    "yours", "yourself",
];

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Lowercase `text` and remove every character that is not alphanumeric,
/// `_`, or whitespace.
pub fn strip_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Rank distinguishing tokens of `text` by frequency.
pub fn rank_by_frequency(text: &str, cfg: &PhraseConfig) -> Vec<String> {
    let cleaned = strip_punctuation(text);

    // token -> (count, first position)
    let mut counts: FxHashMap<&str, (usize, usize)> = FxHashMap::default();
    for (position, token) in cleaned.split_whitespace().enumerate() {
        if token.chars().count() <= cfg.max_discarded_len || is_stop_word(token) {
            continue;
        }
        counts
            .entry(token)
            .and_modify(|(count, _)| *count += 1)
            .or_insert((1, position));
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(token, (count, first))| (token, count, first))
        .collect();
    ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(cfg.max_phrases)
        .map(|(token, _, _)| token.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_by_count_then_first_occurrence() {
        let text = "Safety training. Compliance training! Safety audits, compliance, training";
        let phrases = rank_by_frequency(text, &PhraseConfig::default());
        assert_eq!(
            phrases,
            vec!["training", "safety", "compliance", "audits"]
        );
    }

    #[test]
    fn drops_short_tokens_and_stop_words() {
        let text = "This is the way that we have done it with care";
        let phrases = rank_by_frequency(text, &PhraseConfig::default());
        assert_eq!(phrases, vec!["done", "care"]);
    }

    #[test]
    fn strips_punctuation_inside_tokens() {
        assert_eq!(strip_punctuation("Don't STOP-believing!"), "dont stopbelieving");
    }

    #[test]
    fn caps_at_max_phrases() {
        let text = (0..50)
            .map(|i| format!("word{i:02}"))
            .collect::<Vec<_>>()
            .join(" ");
        let phrases = rank_by_frequency(&text, &PhraseConfig::default());
        assert_eq!(phrases.len(), 20);
        assert_eq!(phrases[0], "word00");
        assert_eq!(phrases[19], "word19");
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(rank_by_frequency("", &PhraseConfig::default()).is_empty());
        assert!(rank_by_frequency("  ... !!! ", &PhraseConfig::default()).is_empty());
    }

    #[test]
    fn length_uses_characters_not_bytes() {
        // "café" is 4 characters (5 bytes) and survives; "día" is 3 characters.
        let phrases = rank_by_frequency("café día", &PhraseConfig::default());
        assert_eq!(phrases, vec!["café"]);
    }

    #[test]
    fn deterministic_across_calls() {
        let text = "alpha beta gamma delta alpha beta gamma alpha epsilon zeta";
        let a = rank_by_frequency(text, &PhraseConfig::default());
        let b = rank_by_frequency(text, &PhraseConfig::default());
        assert_eq!(a, b);
        assert_eq!(a[0], "alpha");
    }
}
