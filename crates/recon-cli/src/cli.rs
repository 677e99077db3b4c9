//! CLI argument definitions for the reconciliation tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "recon",
    version,
    about = "Reconcile meter and topology registries",
    long_about = "Reconcile meter and topology registries.\n\n\
                  Matches entities across differently-keyed datasets, checks redundant\n\
                  recording channels for consistency, and compares timestamp sets."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Configuration file (default: ./recon.toml when present).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Match two entity registries and save the correspondence.
    Match(MatchArgs),

    /// Pair two name lists by string similarity.
    Fuzzy(FuzzyArgs),

    /// Check redundant channels of one or more sheets for consistency.
    Channels(ChannelsArgs),

    /// Compare the timestamps of two columns.
    Compare(CompareArgs),

    /// Pair channels across two sets of sheets and compare their counts.
    Counts(CountsArgs),

    /// Report values repeated within a column.
    Duplicates(DuplicatesArgs),

    /// Copy a field across a saved correspondence.
    Homologate(HomologateArgs),
}

#[derive(Args)]
pub struct MatchArgs {
    /// CSV whose identifiers key the correspondence.
    #[arg(value_name = "LEFT_CSV")]
    pub left: PathBuf,

    /// CSV searched for counterparts.
    #[arg(value_name = "RIGHT_CSV")]
    pub right: PathBuf,

    /// Directory for the match report and correspondence file.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Number of unmatched leading tokens to list.
    #[arg(long = "top", default_value_t = 10)]
    pub top: usize,

    /// Exit with status 1 when any left entity stays unmatched.
    #[arg(long = "fail-on-issues")]
    pub fail_on_issues: bool,
}

#[derive(Args)]
pub struct FuzzyArgs {
    /// Text file with one left name per line.
    #[arg(value_name = "LEFT_LIST")]
    pub left: PathBuf,

    /// Text file with one right name per line.
    #[arg(value_name = "RIGHT_LIST")]
    pub right: PathBuf,

    /// Acceptance threshold (0-100), overrides the config.
    #[arg(long = "threshold")]
    pub threshold: Option<f64>,

    /// Leading characters skipped on right names, overrides the config.
    #[arg(long = "skip-chars")]
    pub skip_chars: Option<usize>,

    /// Write a JSON report to this path.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ChannelsArgs {
    /// Channel sheets (CSV).
    #[arg(value_name = "SHEET", required = true)]
    pub sheets: Vec<PathBuf>,

    /// Directory for one JSON report per sheet.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Exit with status 1 when any channel is flagged.
    #[arg(long = "fail-on-issues")]
    pub fail_on_issues: bool,
}

#[derive(Args)]
pub struct CompareArgs {
    #[arg(value_name = "LEFT_CSV")]
    pub left: PathBuf,

    /// Timestamp column of the left CSV.
    #[arg(long = "left-column", value_name = "NAME")]
    pub left_column: String,

    #[arg(value_name = "RIGHT_CSV")]
    pub right: PathBuf,

    /// Timestamp column of the right CSV.
    #[arg(long = "right-column", value_name = "NAME")]
    pub right_column: String,

    /// Write a JSON report to this path.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Exit with status 1 when the sets differ.
    #[arg(long = "fail-on-issues")]
    pub fail_on_issues: bool,
}

#[derive(Args)]
pub struct CountsArgs {
    /// Left channel sheets.
    #[arg(long = "left", value_name = "SHEET", required = true, num_args = 1..)]
    pub left: Vec<PathBuf>,

    /// Right channel sheets.
    #[arg(long = "right", value_name = "SHEET", required = true, num_args = 1..)]
    pub right: Vec<PathBuf>,

    /// Write a JSON report to this path.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[arg(long = "fail-on-issues")]
    pub fail_on_issues: bool,
}

#[derive(Args)]
pub struct DuplicatesArgs {
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Column to inspect.
    #[arg(long = "column", value_name = "NAME")]
    pub column: String,

    /// Write a JSON report to this path.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[arg(long = "fail-on-issues")]
    pub fail_on_issues: bool,
}

#[derive(Args)]
pub struct HomologateArgs {
    /// CSV providing the copied field.
    #[arg(value_name = "LEFT_CSV")]
    pub left: PathBuf,

    /// CSV receiving the new column.
    #[arg(value_name = "RIGHT_CSV")]
    pub right: PathBuf,

    /// Correspondence file written by `match`.
    #[arg(long = "map", value_name = "PATH")]
    pub map: PathBuf,

    /// Output CSV path.
    #[arg(long = "output", value_name = "PATH")]
    pub output: PathBuf,

    #[arg(long = "left-key", value_name = "NAME")]
    pub left_key: Option<String>,

    #[arg(long = "left-field", value_name = "NAME")]
    pub left_field: Option<String>,

    #[arg(long = "right-key", value_name = "NAME")]
    pub right_key: Option<String>,

    /// Name of the appended column (default: the copied field's name).
    #[arg(long = "target-column", value_name = "NAME")]
    pub target_column: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
