// chatfilter-core/tests/engine_tests.rs
//! Behavioural tests for detection and censoring against a `PatternCatalog`.

use chatfilter_core::{censor, compile_pattern, contains_violation, CensorEngine, PatternCatalog};

fn catalog(words: &[&str], patterns: &[&str], mask: char) -> PatternCatalog {
    PatternCatalog::new(
        words.iter().map(|w| w.to_string()).collect(),
        patterns
            .iter()
            .map(|p| compile_pattern(p).expect("test pattern compiles"))
            .collect(),
        mask,
    )
}

const SAMPLES: &[&str] = &[
    "",
    "plain text",
    "What the heck!",
    "HECK heck HeCk",
    "This is baaaad",
    "héck ünïcode ✓",
    "$1 and $2 and ${name}",
];

#[test]
fn test_empty_catalog_never_violates_or_changes() {
    let empty = PatternCatalog::empty('*');
    for sample in SAMPLES {
        assert!(!contains_violation(sample, &empty));
        let out = censor(sample, &empty);
        assert_eq!(out.text, *sample);
        assert!(!out.changed);
    }
}

#[test]
fn test_word_occurrences_are_masked_with_word_length() {
    let c = catalog(&["heck"], &[], '*');
    let input = "HECK, heck and HeCk.";
    assert!(contains_violation(input, &c));

    let out = censor(input, &c);
    assert_eq!(out.text, "****, **** and ****.");
    assert_eq!(out.text.chars().count(), input.chars().count());
    assert!(out.changed);
}

#[test]
fn test_word_filter_scenario() {
    let out = censor("What the heck!", &catalog(&["heck"], &[], '*'));
    assert_eq!(out.text, "What the ****!");
    assert!(out.changed);
}

#[test]
fn test_regex_filter_scenario() {
    let out = censor("This is baaaad", &catalog(&[], &["b+a+d"], '*'));
    assert_eq!(out.text, "This is ******");
    assert!(out.changed);
}

#[test]
fn test_censoring_is_idempotent() {
    let c = catalog(&["heck", "darn"], &["b+a+d", r"\bx{2,}\b"], '*');
    for sample in SAMPLES.iter().chain(["heckdarn baaad xx yy", "xx heck xxx"].iter()) {
        let once = censor(sample, &c);
        let twice = censor(&once.text, &c);
        assert_eq!(twice.text, once.text, "input: {sample}");
        assert!(!twice.changed, "input: {sample}");
    }
}

#[test]
fn test_catalog_order_resolves_overlaps() {
    // Whichever word is listed first claims the shared "cat" region.
    let first = censor("concatenate", &catalog(&["cat", "catenate"], &[], '*'));
    assert_eq!(first.text, "con***enate");

    let second = censor("concatenate", &catalog(&["catenate", "cat"], &[], '*'));
    assert_eq!(second.text, "con********");
}

#[test]
fn test_regex_pass_never_expands_backreferences() {
    let c = catalog(&[], &[r"(\w+)\$(\d+)"], '$');
    let out = censor("cost: abc$12 today", &c);
    assert_eq!(out.text, "cost: $$$$$$ today");

    let star = catalog(&[], &[r"\$\d+"], '*');
    assert_eq!(censor("pay $100 now", &star).text, "pay **** now");
}

#[test]
fn test_pattern_uses_unmodified_text_for_detection() {
    let c = catalog(&[], &["^Hello"], '*');
    assert!(contains_violation("hello there", &c));
    assert!(!contains_violation("say hello", &c));
}

#[test]
fn test_multibyte_text_keeps_character_count() {
    let c = catalog(&["ÄRGER"], &["ü+ber"], '•');
    let input = "ärger, Ärger, üüber";
    let out = censor(input, &c);
    assert_eq!(out.text, "•••••, •••••, •••••");
    assert_eq!(out.text.chars().count(), input.chars().count());
}

#[test]
fn test_trait_object_dispatch() {
    let c = catalog(&["heck"], &[], '*');
    let engine: &dyn CensorEngine = &c;
    assert!(engine.contains_violation("oh HECK"));
    assert_eq!(engine.censor("oh HECK").text, "oh ****");
}
