//! Meter/topology reconciliation CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use recon_cli::config::ReconConfig;
use recon_cli::logging::{LogConfig, LogFormat, init_logging};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_channels, run_compare, run_counts, run_duplicates, run_fuzzy, run_homologate, run_match,
};
use crate::summary::{
    print_channels_summary, print_compare_summary, print_counts_summary,
    print_duplicates_summary, print_fuzzy_summary, print_homologate_summary, print_match_summary,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let config = match ReconConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    };
    let exit_code = match run(&cli.command, &config) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Runs one subcommand and returns its exit code.
fn run(command: &Command, config: &ReconConfig) -> anyhow::Result<i32> {
    let code = match command {
        Command::Match(args) => {
            let outcome = run_match(config, args)?;
            print_match_summary(&outcome, args.top);
            failure_code(args.fail_on_issues, !outcome.result.unmatched_left.is_empty())
        }
        Command::Fuzzy(args) => {
            let outcome = run_fuzzy(config, args)?;
            print_fuzzy_summary(&outcome);
            0
        }
        Command::Channels(args) => {
            let outcome = run_channels(config, args)?;
            print_channels_summary(&outcome);
            failure_code(args.fail_on_issues, outcome.has_issues())
        }
        Command::Compare(args) => {
            let outcome = run_compare(config, args)?;
            print_compare_summary(&outcome);
            failure_code(args.fail_on_issues, !outcome.diff.is_empty())
        }
        Command::Counts(args) => {
            let outcome = run_counts(config, args)?;
            print_counts_summary(&outcome);
            failure_code(args.fail_on_issues, outcome.report.has_issues())
        }
        Command::Duplicates(args) => {
            let outcome = run_duplicates(args)?;
            print_duplicates_summary(&outcome);
            failure_code(args.fail_on_issues, !outcome.values.is_empty())
        }
        Command::Homologate(args) => {
            let outcome = run_homologate(config, args)?;
            print_homologate_summary(&outcome);
            0
        }
    };
    Ok(code)
}

fn failure_code(fail_on_issues: bool, has_issues: bool) -> i32 {
    if fail_on_issues && has_issues { 1 } else { 0 }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
