use std::path::PathBuf;

use recon_match::{FuzzyMatch, MatchResult};
use recon_model::ChannelTable;
use recon_output::HomologationStats;
use recon_validate::{ChannelReport, CountReport, RepeatedValues, TimestampDiff};

#[derive(Debug)]
pub struct MatchOutcome {
    pub left_label: String,
    pub right_label: String,
    pub result: MatchResult,
    pub report: Option<PathBuf>,
    pub correspondence: Option<PathBuf>,
}

#[derive(Debug)]
pub struct FuzzyOutcome {
    pub threshold: f64,
    pub matches: Vec<FuzzyMatch>,
    pub report: Option<PathBuf>,
}

/// Validation of one channel sheet.
#[derive(Debug)]
pub struct SheetOutcome {
    pub sheet: String,
    pub table: ChannelTable,
    pub report: ChannelReport,
    pub report_path: Option<PathBuf>,
}

#[derive(Debug)]
pub struct ChannelsOutcome {
    pub sheets: Vec<SheetOutcome>,
}

impl ChannelsOutcome {
    pub fn has_issues(&self) -> bool {
        self.sheets.iter().any(|s| s.report.has_issues())
    }
}

#[derive(Debug)]
pub struct CompareOutcome {
    pub left_label: String,
    pub right_label: String,
    pub diff: TimestampDiff,
    pub report: Option<PathBuf>,
}

#[derive(Debug)]
pub struct CountsOutcome {
    pub left_channels: usize,
    pub right_channels: usize,
    pub report: CountReport,
    pub report_path: Option<PathBuf>,
}

#[derive(Debug)]
pub struct DuplicatesOutcome {
    pub source: String,
    pub column: String,
    pub values: RepeatedValues,
    pub report: Option<PathBuf>,
}

#[derive(Debug)]
pub struct HomologateOutcome {
    pub output: PathBuf,
    pub target_column: String,
    pub stats: HomologationStats,
}
