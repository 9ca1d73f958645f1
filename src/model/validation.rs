use std::sync::LazyLock;

use regex::Regex;

static READING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d*\.?\d*$").expect("valid hardcoded regex"));

/// Returns `true` if `value` is acceptable text for a dimensional reading.
///
/// Acceptable values are the empty string or a non-negative decimal number:
/// digits with at most one decimal point. Partial entries such as `"1."` or
/// `"."` are accepted so the check can gate individual keystrokes.
pub fn is_reading_text(value: &str) -> bool {
    READING_RE.is_match(value)
}
