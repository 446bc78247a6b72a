//! Status messages on stderr.

use anyhow::Result;
use owo_colors::{AnsiColors, OwoColorize};
use std::io::Write;

fn print_tagged<W: Write>(
    writer: &mut W,
    tag: &str,
    color: AnsiColors,
    message: &str,
    enable_colors: bool,
) -> Result<()> {
    if enable_colors {
        writeln!(writer, "{} {}", tag.color(color).bold(), message)?;
    } else {
        writeln!(writer, "{} {}", tag, message)?;
    }
    Ok(())
}

pub fn print_info_message<W: Write>(writer: &mut W, message: &str, enable_colors: bool) -> Result<()> {
    print_tagged(writer, "[info]", AnsiColors::Cyan, message, enable_colors)
}

pub fn print_success_message<W: Write>(writer: &mut W, message: &str, enable_colors: bool) -> Result<()> {
    print_tagged(writer, "[ok]", AnsiColors::Green, message, enable_colors)
}

pub fn print_warn_message<W: Write>(writer: &mut W, message: &str, enable_colors: bool) -> Result<()> {
    print_tagged(writer, "[warn]", AnsiColors::Yellow, message, enable_colors)
}

pub fn print_error_message<W: Write>(writer: &mut W, message: &str, enable_colors: bool) -> Result<()> {
    print_tagged(writer, "[error]", AnsiColors::Red, message, enable_colors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_output_has_no_escapes() {
        let mut buf = Vec::new();
        print_warn_message(&mut buf, "pattern rejected", false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "[warn] pattern rejected\n");
    }

    #[test]
    fn coloured_output_has_escapes() {
        let mut buf = Vec::new();
        print_error_message(&mut buf, "boom", true).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains('\u{1b}'));
        assert!(text.ends_with("boom\n"));
    }
}
