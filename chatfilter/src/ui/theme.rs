//! Terminal rendering of `§` format codes.
//!
//! Warnings and command replies carry Minecraft-style format codes (`§c`,
//! `§a`, ...). On a colour-capable terminal the colour codes are rendered
//! with `owo_colors`; elsewhere every code is dropped and plain text remains.
//! Style codes (`k`-`o`) are dropped in both cases, `r` resets.

use owo_colors::{AnsiColors, OwoColorize};

use chatfilter_core::formatting::{strip_color_codes, COLOR_CHAR};

/// Maps a colour code to the nearest 16-colour ANSI colour.
pub fn code_to_ansi(code: char) -> Option<AnsiColors> {
    let color = match code.to_ascii_lowercase() {
        '0' => AnsiColors::Black,
        '1' => AnsiColors::Blue,
        '2' => AnsiColors::Green,
        '3' => AnsiColors::Cyan,
        '4' => AnsiColors::Red,
        '5' => AnsiColors::Magenta,
        '6' => AnsiColors::Yellow,
        '7' => AnsiColors::White,
        '8' => AnsiColors::BrightBlack,
        '9' => AnsiColors::BrightBlue,
        'a' => AnsiColors::BrightGreen,
        'b' => AnsiColors::BrightCyan,
        'c' => AnsiColors::BrightRed,
        'd' => AnsiColors::BrightMagenta,
        'e' => AnsiColors::BrightYellow,
        'f' => AnsiColors::BrightWhite,
        _ => return None,
    };
    Some(color)
}

fn is_format_code(code: char) -> bool {
    matches!(code.to_ascii_lowercase(), '0'..='9' | 'a'..='f' | 'k'..='o' | 'r' | 'x')
}

/// Renders `§`-coded text for the terminal.
pub fn render(text: &str, enable_colors: bool) -> String {
    if !enable_colors {
        return strip_color_codes(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut segment = String::new();
    let mut current: Option<AnsiColors> = None;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == COLOR_CHAR {
            if let Some(&code) = chars.peek() {
                if is_format_code(code) {
                    chars.next();
                    flush(&mut out, &mut segment, current);
                    if let Some(color) = code_to_ansi(code) {
                        current = Some(color);
                    } else if code.eq_ignore_ascii_case(&'r') {
                        current = None;
                    }
                    continue;
                }
            }
        }
        segment.push(c);
    }
    flush(&mut out, &mut segment, current);
    out
}

fn flush(out: &mut String, segment: &mut String, color: Option<AnsiColors>) {
    if segment.is_empty() {
        return;
    }
    match color {
        Some(color) => out.push_str(&segment.as_str().color(color).to_string()),
        None => out.push_str(segment),
    }
    segment.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_render_drops_codes() {
        assert_eq!(render("\u{00A7}cNo \u{00A7}lswearing\u{00A7}r!", false), "No swearing!");
    }

    #[test]
    fn plain_render_drops_upper_case_codes() {
        assert_eq!(render("\u{00A7}CNo \u{00A7}Rswearing", false), "No swearing");
    }

    #[test]
    fn coloured_render_drops_style_codes() {
        assert_eq!(render("\u{00A7}lplain\u{00A7}r", true), "plain");
    }

    #[test]
    fn coloured_render_wraps_segments() {
        let rendered = render("\u{00A7}cNo", true);
        assert_eq!(rendered, format!("{}", "No".color(AnsiColors::BrightRed)));
    }

    #[test]
    fn lone_section_sign_is_kept() {
        assert_eq!(render("50\u{00A7} off \u{00A7}", false), "50\u{00A7} off \u{00A7}");
    }

    #[test]
    fn known_codes_map_to_colors() {
        assert_eq!(code_to_ansi('a'), Some(AnsiColors::BrightGreen));
        assert_eq!(code_to_ansi('E'), Some(AnsiColors::BrightYellow));
        assert_eq!(code_to_ansi('l'), None);
    }
}
