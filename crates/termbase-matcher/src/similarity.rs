//! Normalized edit-distance similarity

/// Similarity of two field values in `[0, 1]`
///
/// Both inputs are trimmed and lower-cased. An empty value on either side
/// scores 0, even against another empty value. Otherwise the score is
/// `(max_len - distance) / max_len` with a character-level Levenshtein
/// distance, so the function is symmetric.
///
/// # Examples
///
/// ```
/// use termbase_matcher::similarity;
///
/// assert_eq!(similarity("HTTP", " http "), 1.0);
/// assert_eq!(similarity("", ""), 0.0);
/// assert_eq!(similarity("abcd", "abcx"), 0.75);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let max_len = a.chars().count().max(b.chars().count());
    let distance = strsim::levenshtein(&a, &b);

    (max_len - distance) as f64 / max_len as f64
}
