//! Colour-code handling for the warning message.
//!
//! Warning templates use `&` followed by a format code (`&c`, `&l`, ...).
//! Before a message is sent the `&` is replaced by the section sign `§` that
//! chat clients understand, and the code is lowercased. An `&` that is not
//! followed by a known code is left as it is.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// The section sign that introduces a format code in translated text.
pub const COLOR_CHAR: char = '\u{00A7}';

/// The character operators type in templates instead of `§`.
pub const ALT_COLOR_CHAR: char = '&';

lazy_static! {
    static ref ALT_CODE: Regex = Regex::new(r"&([0-9a-fk-orxA-FK-ORX])").expect("static regex");
    static ref SECTION_CODE: Regex = Regex::new("\u{00A7}[0-9a-fk-orxA-FK-ORX]").expect("static regex");
}

/// Rewrites `&x` codes to `§x`.
pub fn translate_color_codes(template: &str) -> String {
    ALT_CODE
        .replace_all(template, |caps: &Captures| {
            format!("{}{}", COLOR_CHAR, caps[1].to_lowercase())
        })
        .into_owned()
}

/// Removes translated `§x` codes, leaving plain text. A `§` without a code is kept.
pub fn strip_color_codes(text: &str) -> String {
    SECTION_CODE.replace_all(text, "").into_owned()
}
