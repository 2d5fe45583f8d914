//! Normalization of scraped timing strings

use once_cell::sync::Lazy;
use regex::Regex;

static TIME_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid regex"));

/// Extract the numeric value from a scraped time string.
///
/// Sample pages report times as e.g. "12.34 ms" or "12ms"; only the
/// leading numeric token is kept. Returns an empty string when the
/// input contains no number.
pub fn format_time_result(raw: &str) -> String {
    TIME_VALUE
        .find(raw)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Truncate a string to at most `max` characters.
///
/// Character-based so a multi-byte code point is never split; the
/// configured error-message limit counts characters, not bytes.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
