// chatfilter/src/cli.rs
//! This file defines the command-line interface (CLI) for the chatfilter application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use chatfilter_core::Context;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "chatfilter",
    author,
    version = env!("CARGO_PKG_VERSION"),
    about = "Censor forbidden words and patterns in player text",
    long_about = "ChatFilter masks forbidden words and regular-expression matches in chat messages, sign lines, book pages and item names, replacing every offending character with a censor character. It can run one-off checks, validate a configuration, or serve a host over line-delimited JSON.",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Path to the filter configuration (YAML).
    #[arg(
        long = "config",
        short = 'c',
        value_name = "FILE",
        env = "CHATFILTER_CONFIG",
        global = true,
        help = "Path to the filter configuration file (YAML)."
    )]
    pub config: Option<PathBuf>,

    /// Directory that holds the offense log.
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        env = "CHATFILTER_DATA_DIR",
        global = true,
        help = "Directory where offenses.log is written."
    )]
    pub data_dir: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `chatfilter` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Censors text given as an argument, a file, or stdin.
    #[command(about = "Censor text from an argument, a file, or stdin.")]
    Check(CheckCommand),

    /// Compiles the configuration and reports rejected patterns.
    #[command(about = "Validate the configuration and report rejected patterns.")]
    Validate,

    /// Serves a host over line-delimited JSON on stdin/stdout.
    #[command(about = "Moderate host submissions read as JSON lines from stdin.")]
    Run(RunCommand),

    /// Writes the default configuration file.
    #[command(name = "init-config", about = "Write the default configuration file.")]
    InitConfig {
        /// Overwrite an existing file.
        #[arg(long, short = 'f', help = "Overwrite the configuration file if it already exists.")]
        force: bool,
    },
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Text to censor. Reads from --input-file or stdin if not provided.
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Path to an input file.
    #[arg(long, short = 'i', value_name = "FILE", conflicts_with = "text", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Surface whose toggle applies to this text.
    #[arg(long = "surface", value_enum, default_value = "chat", help = "Surface the text belongs to; disabled surfaces pass text through.")]
    pub surface: SurfaceChoice,

    /// Exit with a non-zero code if anything was censored.
    #[arg(long = "fail-on-violation", help = "Exit with a non-zero code if any text was censored.")]
    pub fail_on_violation: bool,
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunCommand {
    /// Never write the offense log, whatever the configuration says.
    #[arg(long = "no-offense-log", help = "Do not write offenses.log.")]
    pub no_offense_log: bool,
}

/// Surface selection for `check`.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SurfaceChoice {
    Chat,
    Sign,
    Book,
    Anvil,
}

impl From<SurfaceChoice> for Context {
    fn from(choice: SurfaceChoice) -> Self {
        match choice {
            SurfaceChoice::Chat => Context::Chat,
            SurfaceChoice::Sign => Context::Sign,
            SurfaceChoice::Book => Context::Book,
            SurfaceChoice::Anvil => Context::Anvil,
        }
    }
}
