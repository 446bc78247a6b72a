//! compiler.rs - Turns configured word and regex sources into catalog entries.
//!
//! Every forbidden regex is compiled case-insensitive. A source that is too
//! long or fails to compile is rejected on its own: it is reported through the
//! `log` facade and returned in the rejection list, and the remaining sources
//! keep compiling.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};
use regex::{Regex, RegexBuilder};

use crate::config::MAX_PATTERN_LENGTH;
use crate::errors::ChatFilterError;

/// Upper bound on the compiled size of a single forbidden pattern.
const COMPILED_SIZE_LIMIT: usize = 10 * (1 << 20);

/// A configured source that did not make it into the catalog.
#[derive(Debug)]
pub struct RejectedPattern {
    /// The source text exactly as configured.
    pub source: String,
    /// Why it was rejected.
    pub reason: ChatFilterError,
}

/// The outcome of compiling a list of regex sources.
#[derive(Debug, Default)]
pub struct CompiledPatterns {
    /// Successfully compiled patterns, in configuration order.
    pub patterns: Vec<Regex>,
    /// Sources that were skipped.
    pub rejected: Vec<RejectedPattern>,
}

/// Compiles a single regex source the way the catalog stores it.
pub fn compile_pattern(source: &str) -> Result<Regex, ChatFilterError> {
    if source.len() > MAX_PATTERN_LENGTH {
        return Err(ChatFilterError::PatternLengthExceeded(
            source.to_string(),
            source.len(),
            MAX_PATTERN_LENGTH,
        ));
    }

    RegexBuilder::new(source)
        .case_insensitive(true)
        .size_limit(COMPILED_SIZE_LIMIT)
        .build()
        .map_err(|e| ChatFilterError::PatternCompilation(source.to_string(), e))
}

/// Compiles every source in order, skipping (and reporting) the ones that fail.
pub fn compile_patterns<S: AsRef<str>>(sources: &[S]) -> CompiledPatterns {
    debug!("Starting compilation of {} forbidden patterns.", sources.len());

    let mut compiled = CompiledPatterns::default();
    for source in sources {
        let source = source.as_ref();
        match compile_pattern(source) {
            Ok(regex) => {
                debug!(
                    target: "chatfilter_core::catalog",
                    "Pattern '{}' compiled successfully.",
                    source
                );
                compiled.patterns.push(regex);
            }
            Err(reason) => {
                warn!("{}", reason);
                compiled.rejected.push(RejectedPattern {
                    source: source.to_string(),
                    reason,
                });
            }
        }
    }

    debug!(
        "Finished compiling patterns. Compiled: {}, rejected: {}.",
        compiled.patterns.len(),
        compiled.rejected.len()
    );
    compiled
}

/// Copies the word list verbatim, dropping empty entries.
///
/// Case is preserved; folding happens at match time.
pub fn collect_words<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    words
        .iter()
        .map(AsRef::as_ref)
        .filter(|word| {
            if word.is_empty() {
                warn!("{}", ChatFilterError::EmptyWord);
                false
            } else {
                true
            }
        })
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_patterns_are_case_insensitive() {
        let regex = compile_pattern("b+ad").unwrap();
        assert!(regex.is_match("BAAD"));
    }

    #[test]
    fn invalid_sources_are_skipped_not_fatal() {
        let compiled = compile_patterns(&["ok", "(unclosed", "fine+"]);
        assert_eq!(compiled.patterns.len(), 2);
        assert_eq!(compiled.rejected.len(), 1);
        assert_eq!(compiled.rejected[0].source, "(unclosed");
        assert!(matches!(
            compiled.rejected[0].reason,
            ChatFilterError::PatternCompilation(_, _)
        ));
    }

    #[test]
    fn overlong_sources_are_rejected() {
        let long = "a".repeat(MAX_PATTERN_LENGTH + 1);
        let err = compile_pattern(&long).unwrap_err();
        assert!(matches!(err, ChatFilterError::PatternLengthExceeded(_, len, max) if len == MAX_PATTERN_LENGTH + 1 && max == MAX_PATTERN_LENGTH));
    }

    #[test]
    fn words_keep_case_and_order_and_duplicates() {
        let words = collect_words(&["Heck", "", "darn", "Heck"]);
        assert_eq!(words, vec!["Heck", "darn", "Heck"]);
    }
}
