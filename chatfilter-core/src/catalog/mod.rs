//! The compiled forbidden-word and forbidden-pattern catalog.
//!
//! A `PatternCatalog` is built in one go from a [`FilterConfig`] and never
//! mutated afterwards. Reloading means building a new catalog and swapping
//! the shared reference (see [`crate::settings`]).

pub mod compiler;

use regex::Regex;

use crate::config::FilterConfig;
use compiler::{collect_words, compile_patterns, RejectedPattern};

/// Words, compiled patterns and the mask character used to censor them.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    words: Vec<String>,
    patterns: Vec<Regex>,
    mask: char,
}

impl PatternCatalog {
    /// Builds a catalog from configuration, skipping patterns that fail to compile.
    ///
    /// Rejections are logged; use [`PatternCatalog::load_with_report`] to get them back.
    pub fn load(config: &FilterConfig) -> Self {
        Self::load_with_report(config).0
    }

    /// Like [`PatternCatalog::load`], also returning the rejected sources.
    pub fn load_with_report(config: &FilterConfig) -> (Self, Vec<RejectedPattern>) {
        let compiled = compile_patterns(&config.forbidden_regex);
        let catalog = Self {
            words: collect_words(&config.forbidden_words),
            patterns: compiled.patterns,
            mask: config.censor_char(),
        };
        (catalog, compiled.rejected)
    }

    /// Builds a catalog from already-prepared parts.
    pub fn new(words: Vec<String>, patterns: Vec<Regex>, mask: char) -> Self {
        Self {
            words: words.into_iter().filter(|w| !w.is_empty()).collect(),
            patterns,
            mask,
        }
    }

    /// A catalog that matches nothing.
    pub fn empty(mask: char) -> Self {
        Self::new(Vec::new(), Vec::new(), mask)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }

    pub fn mask(&self) -> char {
        self.mask
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty() && self.patterns.is_empty()
    }
}
