//! Study browser CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use study_cli::logging::{LogConfig, init_logging};
use study_cli::state::StateLocation;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command};
use crate::commands::{run_export, run_inspect, run_payload, run_query, run_summary, run_view};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let location = StateLocation::resolve(cli.state_dir.as_deref(), cli.no_persist);
    let outcome = match &cli.command {
        Command::Summary(args) => run_summary(args),
        Command::Payload(args) => run_payload(args, &location),
        Command::Query(args) => run_query(args, &location),
        Command::Export(args) => run_export(args, &location),
        Command::Inspect(args) => run_inspect(args, &location),
        Command::View(command) => run_view(command, &location),
    };
    let exit_code = match outcome {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Logging configuration from the global flags.
///
/// An explicit `--log-level` beats `-v/-q`; either one disables `RUST_LOG`.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit_level = cli.log_level.map(LevelFilter::from);
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig {
        level_filter: explicit_level.unwrap_or_else(|| cli.verbosity.tracing_level_filter()),
        use_env_filter: explicit_level.is_none() && !cli.verbosity.is_present(),
        with_ansi,
        format: cli.log_format.into(),
        log_file: cli.log_file.clone(),
        log_data: cli.log_data,
        ..LogConfig::default()
    }
}
