//! Regex-based masking.
//!
//! Each pattern is applied in one left-to-right `replace_all` over the text
//! produced by the previous step. Replacements are built by a closure, which
//! the `regex` crate inserts literally: a `$` in the mask is never expanded
//! as a capture-group reference.

use regex::{Captures, Regex};

/// `mask` repeated `len` times.
pub(crate) fn mask_run(mask: char, len: usize) -> String {
    std::iter::repeat(mask).take(len).collect()
}

/// True if any pattern matches anywhere in the text.
pub fn matches_any_pattern(text: &str, patterns: &[Regex]) -> bool {
    patterns.iter().any(|pattern| pattern.is_match(text))
}

/// Masks all non-overlapping matches of every pattern, in catalog order.
pub fn mask_patterns(text: &str, patterns: &[Regex], mask: char) -> String {
    let mut result = text.to_string();
    for pattern in patterns {
        result = pattern
            .replace_all(&result, |caps: &Captures| {
                mask_run(mask, caps[0].chars().count())
            })
            .into_owned();
    }
    result
}
