// chatfilter-core/src/lib.rs
//! # ChatFilter Core Library
//!
//! `chatfilter-core` provides the host-independent logic of the ChatFilter
//! moderation engine: a catalog of forbidden literal words and forbidden
//! regular expressions, a length-preserving censoring engine, and the
//! per-submission workflow that decides whether to warn an actor and record
//! an offense.
//!
//! The matching path is pure. Everything that touches the outside world
//! (capability checks, message delivery, the offense log, configuration
//! storage) sits behind a trait so that any host can plug in.
//!
//! ## Modules
//!
//! * `config`: `FilterConfig`, its YAML form and defaults, and `ConfigSource`.
//! * `catalog`: `PatternCatalog` and the pattern `compiler`.
//! * `engine`: the `CensorEngine` trait and the `Censored` result.
//! * `engines`: the word pass, the pattern pass, and the catalog's engine impl.
//! * `settings`: the reloadable settings snapshot and its shared holder.
//! * `submission`: contexts, actors, fragments and the `SurfaceEvent` adapters.
//! * `workflow`: `ModerationWorkflow` and the capability/notification seams.
//! * `offense_log`: offense records and the file-backed sink.
//! * `formatting`: `&` colour-code translation for the warning message.
//! * `command`: the `/chatfilter reload` administrative command.
//!
//! ## Usage Example
//!
//! ```rust
//! use chatfilter_core::{censor, FilterConfig, PatternCatalog};
//!
//! let config = FilterConfig {
//!     forbidden_words: vec!["heck".to_string()],
//!     forbidden_regex: vec!["b+a+d".to_string()],
//!     ..FilterConfig::default()
//! };
//! let catalog = PatternCatalog::load(&config);
//!
//! let out = censor("What the heck, this is baaad", &catalog);
//! assert_eq!(out.text, "What the ****, this is *****");
//! assert!(out.changed);
//! ```
//!
//! ## Error Handling
//!
//! Loaders return `anyhow::Result` with context. Library-specific failures
//! are described by [`ChatFilterError`]. Invalid patterns and offense-log
//! failures are never fatal: they are reported through the `log` facade.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod catalog;
pub mod command;
pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod formatting;
pub mod offense_log;
pub mod settings;
pub mod submission;
pub mod workflow;

/// Re-exports the configuration types.
pub use config::{
    ConfigSource, FileConfigSource, FilterConfig, DEFAULT_CENSOR_CHAR, DEFAULT_WARNING_MESSAGE,
    MAX_PATTERN_LENGTH,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::ChatFilterError;

pub use catalog::compiler::{compile_pattern, compile_patterns, CompiledPatterns, RejectedPattern};
pub use catalog::PatternCatalog;

pub use engine::{CensorEngine, Censored};
pub use engines::{censor, contains_violation};

pub use settings::{FilterSettings, SharedSettings, SurfaceToggles};

pub use submission::{Actor, Context, Fragment, FragmentId, Submission, SurfaceEvent};

pub use workflow::{
    censor_submission, CapabilityOracle, CensorResult, FragmentResult, ModerationOutcome,
    ModerationWorkflow, Notifier, SkipReason, BYPASS_CAPABILITY, RELOAD_CAPABILITY,
};

pub use offense_log::{FileOffenseLog, OffenseRecord, OffenseSink, OFFENSE_LOG_FILE, UNKNOWN_ACTOR};

pub use formatting::{strip_color_codes, translate_color_codes};

pub use command::{AdminCommand, CommandReply, CommandSender, ReplyTone};
