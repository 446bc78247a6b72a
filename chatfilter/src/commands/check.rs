//! `chatfilter check`: censor text outside of any host.

use anyhow::Result;
use log::{debug, info};
use std::io::Write;

use chatfilter_core::{censor, Context, FilterSettings};

/// Options for a single `check` run.
pub struct CheckOptions {
    pub input: String,
    pub context: Context,
}

/// What a `check` run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckSummary {
    pub lines: usize,
    pub censored_lines: usize,
    /// True when the surface toggle was off and text passed through.
    pub passed_through: bool,
}

/// Censors `opts.input` line by line, each line treated as one submission,
/// and writes the result to `out`.
pub fn run_check<W: Write>(settings: &FilterSettings, opts: &CheckOptions, out: &mut W) -> Result<CheckSummary> {
    let mut summary = CheckSummary {
        passed_through: !settings.toggles.is_enabled(opts.context),
        ..CheckSummary::default()
    };
    if summary.passed_through {
        info!("Filtering for {} is disabled; passing text through.", opts.context);
    }

    for line in opts.input.lines() {
        summary.lines += 1;
        if summary.passed_through {
            writeln!(out, "{}", line)?;
            continue;
        }
        let result = censor(line, &settings.catalog);
        if result.changed {
            summary.censored_lines += 1;
        }
        writeln!(out, "{}", result.text)?;
    }

    debug!(
        "Checked {} line(s), censored {} (settings version {}).",
        summary.lines, summary.censored_lines, settings.version
    );
    Ok(summary)
}
