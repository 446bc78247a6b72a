//! `chatfilter validate`: compile the configuration and report what was dropped.

use anyhow::Result;
use std::io::Write;

use chatfilter_core::{translate_color_codes, FilterConfig, PatternCatalog};

use crate::ui::{output_format, theme};

/// Counts from one validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationReport {
    pub words: usize,
    pub patterns: usize,
    pub rejected: usize,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.rejected == 0
    }
}

/// Compiles `config`, writes one warning per rejected pattern, a preview of
/// the warning message and a summary line.
pub fn run_validate<W: Write>(config: &FilterConfig, out: &mut W, enable_colors: bool) -> Result<ValidationReport> {
    let (catalog, rejected) = PatternCatalog::load_with_report(config);

    for entry in &rejected {
        output_format::print_warn_message(out, &format!("'{}': {}", entry.source, entry.reason), enable_colors)?;
    }

    let preview = theme::render(&translate_color_codes(&config.warning_message), enable_colors);
    output_format::print_info_message(out, &format!("Warning message: {}", preview), enable_colors)?;

    let report = ValidationReport {
        words: catalog.words().len(),
        patterns: catalog.patterns().len(),
        rejected: rejected.len(),
    };
    let summary = format!(
        "{} forbidden word(s), {} pattern(s) compiled, {} rejected.",
        report.words, report.patterns, report.rejected
    );
    if report.is_clean() {
        output_format::print_success_message(out, &summary, enable_colors)?;
    } else {
        output_format::print_error_message(out, &summary, enable_colors)?;
    }
    Ok(report)
}
