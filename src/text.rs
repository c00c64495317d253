//! Text normalization shared by the outline and persona pipelines.
//!
//! [`clean_text`] keeps case and is used for outline text.
//! [`clean_text_lower`] also folds case and is used for keyword matching.
//! Both apply NFKC first, so compatibility variants such as full-width forms
//! compare equal to their canonical spelling before any length or digit check.

use std::sync::OnceLock;

use regex::Regex;
use unicode_categories::UnicodeCategories;
use unicode_normalization::UnicodeNormalization;

/// NFKC-normalize, collapse whitespace runs to one space, and trim.
pub fn clean_text(text: &str) -> String {
    let folded: String = text.nfkc().collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// [`clean_text`] followed by lowercasing.
pub fn clean_text_lower(text: &str) -> String {
    clean_text(text).to_lowercase()
}

/// Whitespace tokens of the lowercased, normalized text.
pub fn tokenize(text: &str) -> Vec<String> {
    clean_text_lower(text)
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Check whether text starts like a bare `http://` or `https://` link.
pub fn is_bare_url(text: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^https?://").unwrap());
    re.is_match(text)
}

/// Check whether text is non-empty and made only of decimal digits (`Nd`).
///
/// Meant to run on normalized text, where full-width digits have already
/// been folded to ASCII. Letter-like numerals such as `〇` or `Ⅻ` are not
/// digits.
pub fn is_all_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_number_decimal_digit())
}

/// Split text into paragraphs at blank lines, trimming each and dropping empties.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\n\s*\n").unwrap());
    re.split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}
