//! Primitive similarity measures. All return values in `[0, 1]`.

use fxhash::FxHashSet;

/// `1 - levenshtein(a, b) / max(len(a), len(b))`, lengths in Unicode scalar
/// values. Both empty is a perfect match; exactly one empty is no match.
pub fn normalized_levenshtein(a: &str, b: &str) -> f64 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => 1.0,
        (true, false) | (false, true) => 0.0,
        (false, false) => strsim::normalized_levenshtein(a, b).clamp(0.0, 1.0),
    }
}

/// `|A ∩ B| / |A ∪ B|` over the distinct elements of each slice.
pub fn jaccard<S: AsRef<str>>(a: &[S], b: &[S]) -> f64 {
    let left: FxHashSet<&str> = a.iter().map(AsRef::as_ref).collect();
    let right: FxHashSet<&str> = b.iter().map(AsRef::as_ref).collect();
    set_jaccard(&left, &right)
}

/// [`jaccard`] after lowercasing every element.
pub fn jaccard_ignore_case<S: AsRef<str>>(a: &[S], b: &[S]) -> f64 {
    let left: FxHashSet<String> = a.iter().map(|s| s.as_ref().to_lowercase()).collect();
    let right: FxHashSet<String> = b.iter().map(|s| s.as_ref().to_lowercase()).collect();
    set_jaccard(&left, &right)
}

fn set_jaccard<T: Eq + std::hash::Hash>(left: &FxHashSet<T>, right: &FxHashSet<T>) -> f64 {
    match (left.is_empty(), right.is_empty()) {
        (true, true) => 1.0,
        (true, false) | (false, true) => 0.0,
        (false, false) => {
            let intersection = left.intersection(right).count();
            let union = left.len() + right.len() - intersection;
            intersection as f64 / union as f64
        }
    }
}
