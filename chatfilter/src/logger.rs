//! Logger setup for the `chatfilter` binary.
//!
//! Logs go to stderr so that stdout stays reserved for censored text and
//! bridge replies. `RUST_LOG` is honoured unless a level is forced.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes `env_logger`. A forced level overrides `RUST_LOG`; otherwise
/// the default is `warn`. Calling it twice is harmless.
pub fn init_logger(forced: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = forced {
        builder.filter_level(level);
    }
    builder
        .target(env_logger::Target::Stderr)
        .format_timestamp_secs()
        .try_init()
        .ok();
}

/// Picks the forced level from the `--quiet` / `--debug` flags.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    match (quiet, debug) {
        (true, _) => Some(LevelFilter::Off),
        (false, true) => Some(LevelFilter::Debug),
        (false, false) => None,
    }
}
