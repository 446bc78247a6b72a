// chatfilter/src/main.rs
//! ChatFilter entry point.
//!
//! Parses the command line, loads the filter configuration and dispatches
//! to the selected subcommand.

use anyhow::{bail, Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;
use log::{info, warn};
use std::fs;
use std::io::{self, Read};
use std::sync::Arc;

use chatfilter::cli::{CheckCommand, Cli, Commands, RunCommand};
use chatfilter::commands::check::{run_check, CheckOptions};
use chatfilter::commands::init_config::write_default_config;
use chatfilter::commands::run::{run_bridge, Bridge};
use chatfilter::commands::validate::run_validate;
use chatfilter::commands::{config_source, data_dir, ConfigLookup};
use chatfilter::logger;
use chatfilter::ui::output_format;
use chatfilter_core::config::default_config_path;
use chatfilter_core::{ConfigSource, FileOffenseLog, OffenseSink, SharedSettings};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug));

    match cli.command {
        Commands::Check(ref cmd) => check(&cli, cmd),
        Commands::Validate => validate(&cli),
        Commands::Run(ref cmd) => run(&cli, cmd),
        Commands::InitConfig { force } => {
            let path = match cli.config.clone().or_else(default_config_path) {
                Some(path) => path,
                None => bail!("No configuration directory available; pass --config"),
            };
            write_default_config(&path, force)?;
            if !cli.quiet {
                let stderr = io::stderr();
                output_format::print_success_message(
                    &mut stderr.lock(),
                    &format!("Wrote default configuration to {}", path.display()),
                    stderr.is_terminal(),
                )?;
            }
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> Result<(ConfigLookup, chatfilter_core::FilterConfig)> {
    let source = config_source(cli.config.clone());
    let config = source.load()?;
    Ok((source, config))
}

fn check(cli: &Cli, cmd: &CheckCommand) -> Result<()> {
    let (_, config) = load_config(cli)?;
    let settings = SharedSettings::new(&config).snapshot();

    let input = match (&cmd.text, &cmd.input_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display()))?,
        (None, None) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            buffer
        }
    };

    let opts = CheckOptions {
        input,
        context: cmd.surface.into(),
    };
    let stdout = io::stdout();
    let summary = run_check(&settings, &opts, &mut stdout.lock())?;

    if !cli.quiet && summary.censored_lines > 0 {
        let stderr = io::stderr();
        output_format::print_info_message(
            &mut stderr.lock(),
            &format!("Censored {} of {} line(s).", summary.censored_lines, summary.lines),
            stderr.is_terminal(),
        )?;
    }
    if cmd.fail_on_violation && summary.censored_lines > 0 {
        bail!("{} line(s) contained forbidden content", summary.censored_lines);
    }
    Ok(())
}

fn validate(cli: &Cli) -> Result<()> {
    let (_, config) = load_config(cli)?;
    let stdout = io::stdout();
    let colors = stdout.is_terminal();
    let report = run_validate(&config, &mut stdout.lock(), colors)?;
    if !report.is_clean() {
        bail!("{} pattern(s) were rejected", report.rejected);
    }
    Ok(())
}

fn run(cli: &Cli, cmd: &RunCommand) -> Result<()> {
    let (source, config) = load_config(cli)?;
    let settings = Arc::new(SharedSettings::new(&config));

    let offense_log: Option<Arc<dyn OffenseSink>> = if cmd.no_offense_log {
        None
    } else {
        match data_dir(cli.data_dir.clone()) {
            Some(dir) => Some(Arc::new(FileOffenseLog::in_dir(&dir).with_context(|| {
                format!("Failed to prepare data directory {}", dir.display())
            })?)),
            None => {
                warn!("No data directory available; offenses will not be logged.");
                None
            }
        }
    };

    let bridge = Bridge::new(settings, Arc::new(source), offense_log);
    let stdout = io::stdout();
    let handled = run_bridge(&bridge, io::stdin().lock(), &mut stdout.lock())?;
    info!("Handled {} request(s).", handled);
    Ok(())
}
