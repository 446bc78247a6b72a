// chatfilter-core/src/engine.rs
//! Defines the core `CensorEngine` trait and its result type.
//!
//! The trait is the seam between the moderation workflow and whatever does
//! the matching. The built-in implementation lives on
//! [`PatternCatalog`](crate::catalog::PatternCatalog) (see [`crate::engines`]).
//!
//! License: MIT OR APACHE 2.0

/// The result of censoring one piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Censored {
    /// The censored text. Equal to the input when nothing matched.
    pub text: String,
    /// True iff `text` differs from the input by value.
    pub changed: bool,
}

impl Censored {
    /// Builds a result, deriving `changed` by comparing against the original.
    pub fn compare(original: &str, text: String) -> Self {
        let changed = text != original;
        Self { text, changed }
    }

    /// A result for text that was left alone.
    pub fn unchanged(original: &str) -> Self {
        Self {
            text: original.to_string(),
            changed: false,
        }
    }
}

/// Detection and censoring over arbitrary text.
///
/// Implementations must be pure: no I/O, no interior mutation, so that the
/// same engine can be shared across threads handling unrelated submissions.
pub trait CensorEngine: Send + Sync {
    /// Returns true if the text contains any forbidden word or matches any
    /// forbidden pattern. Stops at the first hit.
    fn contains_violation(&self, text: &str) -> bool;

    /// Replaces every violating span with the mask character, keeping the
    /// character count of each span.
    fn censor(&self, text: &str) -> Censored;
}
