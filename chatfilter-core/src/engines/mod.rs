// chatfilter-core/src/engines/mod.rs
//! The matching and censoring engine.
//!
//! Censoring runs in two passes. The word pass masks literal words in catalog
//! order; the pattern pass then runs each regex over the word-censored text.
//! Both passes are pure functions of `(text, catalog)`.
//!
//! # License
//! MIT OR APACHE 2.0

pub mod pattern_pass;
pub mod word_pass;

use log::debug;

use crate::catalog::PatternCatalog;
use crate::engine::{CensorEngine, Censored};

/// Returns true iff `text` violates the catalog.
pub fn contains_violation(text: &str, catalog: &PatternCatalog) -> bool {
    word_pass::contains_any_word(text, catalog.words())
        || pattern_pass::matches_any_pattern(text, catalog.patterns())
}

/// Censors `text` against the catalog.
pub fn censor(text: &str, catalog: &PatternCatalog) -> Censored {
    if catalog.is_empty() {
        return Censored::unchanged(text);
    }

    let words_masked = word_pass::mask_words(text, catalog.words(), catalog.mask());
    let fully_masked = pattern_pass::mask_patterns(&words_masked, catalog.patterns(), catalog.mask());
    let censored = Censored::compare(text, fully_masked);

    if censored.changed {
        debug!(
            target: "chatfilter_core::engine",
            "Censored {} characters of input.",
            censored.text.chars().filter(|&c| c == catalog.mask()).count()
        );
    }
    censored
}

impl CensorEngine for PatternCatalog {
    fn contains_violation(&self, text: &str) -> bool {
        contains_violation(text, self)
    }

    fn censor(&self, text: &str) -> Censored {
        censor(text, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::compiler::compile_pattern;

    fn catalog(words: &[&str], patterns: &[&str]) -> PatternCatalog {
        PatternCatalog::new(
            words.iter().map(|w| w.to_string()).collect(),
            patterns.iter().map(|p| compile_pattern(p).unwrap()).collect(),
            '*',
        )
    }

    #[test]
    fn word_filter_scenario() {
        let out = censor("What the heck!", &catalog(&["heck"], &[]));
        assert_eq!(out.text, "What the ****!");
        assert!(out.changed);
    }

    #[test]
    fn regex_filter_scenario() {
        let out = censor("This is baaaad", &catalog(&[], &["b+a+d"]));
        assert_eq!(out.text, "This is ******");
        assert!(out.changed);
    }

    #[test]
    fn words_run_before_patterns() {
        // The word masks "heck" first, so the pattern only sees the mask.
        let out = censor("heckler", &catalog(&["heck"], &["heckler"]));
        assert_eq!(out.text, "****ler");
    }

    #[test]
    fn detection_agrees_with_censoring() {
        let c = catalog(&["heck"], &["d[a4]rn"]);
        assert!(c.contains_violation("D4RN it"));
        assert!(c.contains_violation("HECK"));
        assert!(!c.contains_violation("clean text"));
        assert!(!c.censor("clean text").changed);
    }
}
