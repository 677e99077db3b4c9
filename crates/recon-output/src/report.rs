//! JSON report writers.
//!
//! Every report shares one envelope (`schema`, `schema_version`,
//! `generated_at`) with the report body flattened next to it.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use recon_match::{FuzzyMatch, MatchEvidence, MatchResult, MatchSummary};
use recon_model::{ChannelTable, CorrespondenceMap};
use recon_validate::{
    ChannelIssue, ChannelReport, CountReport, RepeatedValues, TimestampDiff, canonical,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{OutputError, Result};

pub const REPORT_SCHEMA_VERSION: u32 = 1;

pub const MATCH_REPORT_SCHEMA: &str = "recon.match-report";
pub const CHANNEL_REPORT_SCHEMA: &str = "recon.channel-report";
pub const COUNT_REPORT_SCHEMA: &str = "recon.count-report";
pub const FUZZY_REPORT_SCHEMA: &str = "recon.fuzzy-report";
pub const REPEATED_REPORT_SCHEMA: &str = "recon.repeated-values-report";
pub const TIMESTAMP_REPORT_SCHEMA: &str = "recon.timestamp-report";

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportPayload<T> {
    pub schema: String,
    pub schema_version: u32,
    pub generated_at: String,
    #[serde(flatten)]
    pub body: T,
}

impl<T> ReportPayload<T> {
    pub fn new(schema: &str, body: T) -> Self {
        Self {
            schema: schema.to_string(),
            schema_version: REPORT_SCHEMA_VERSION,
            generated_at: Utc::now().to_rfc3339(),
            body,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeadingTokenCount {
    pub token: String,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MatchReport {
    pub left: String,
    pub right: String,
    pub summary: MatchSummary,
    pub correspondence: CorrespondenceMap,
    pub unmatched_left: Vec<String>,
    pub unmatched_right: Vec<String>,
    pub excluded_left: Vec<String>,
    pub leading_tokens: Vec<LeadingTokenCount>,
    pub evidence: Vec<MatchEvidence>,
}

impl MatchReport {
    pub fn new(left: &str, right: &str, result: &MatchResult) -> Self {
        Self {
            left: left.to_string(),
            right: right.to_string(),
            summary: result.summary(),
            correspondence: result.correspondence.clone(),
            unmatched_left: result.unmatched_left.clone(),
            unmatched_right: result.unmatched_right.clone(),
            excluded_left: result.excluded_left.clone(),
            leading_tokens: result
                .top_leading_tokens(usize::MAX)
                .into_iter()
                .map(|(token, count)| LeadingTokenCount {
                    token: token.to_string(),
                    count,
                })
                .collect(),
            evidence: result.evidence.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FlaggedChannel {
    pub index: usize,
    pub identifier: Option<String>,
    pub missing_dates: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelIssueJson {
    pub channel: usize,
    pub partner: usize,
    pub message: String,
    #[serde(flatten)]
    pub issue: ChannelIssue,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelReportBody {
    pub sheet: String,
    pub tuples_checked: usize,
    pub flagged: Vec<usize>,
    pub missing_dates: std::collections::BTreeMap<usize, Vec<String>>,
    pub channels: Vec<FlaggedChannel>,
    pub issues: Vec<ChannelIssueJson>,
}

impl ChannelReportBody {
    /// Joins the report with identifier labels from `table`.
    pub fn new(sheet: &str, table: &ChannelTable, report: &ChannelReport) -> Self {
        Self {
            sheet: sheet.to_string(),
            tuples_checked: report.tuples_checked,
            flagged: report.flagged.clone(),
            missing_dates: report.missing_dates.clone(),
            channels: report
                .flagged
                .iter()
                .map(|&index| FlaggedChannel {
                    index,
                    identifier: table.identifier(index).map(str::to_string),
                    missing_dates: report.missing_dates.get(&index).cloned().unwrap_or_default(),
                })
                .collect(),
            issues: report
                .issues
                .iter()
                .map(|issue| ChannelIssueJson {
                    channel: issue.channel(),
                    partner: issue.tuple().second,
                    message: issue.format_message(),
                    issue: issue.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FuzzyReport {
    pub threshold: f64,
    pub matches: Vec<FuzzyMatch>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RepeatedValuesReport {
    pub source: String,
    pub column: String,
    #[serde(flatten)]
    pub values: RepeatedValues,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TimestampReport {
    pub left: String,
    pub right: String,
    pub only_left: Vec<String>,
    pub only_right: Vec<String>,
    pub symmetric_difference: Vec<String>,
    pub unparsed_left: usize,
    pub unparsed_right: usize,
}

impl TimestampReport {
    pub fn new(left: &str, right: &str, diff: &TimestampDiff) -> Self {
        Self {
            left: left.to_string(),
            right: right.to_string(),
            only_left: diff.only_left.iter().map(canonical).collect(),
            only_right: diff.only_right.iter().map(canonical).collect(),
            symmetric_difference: diff.symmetric_difference(),
            unparsed_left: diff.unparsed_left,
            unparsed_right: diff.unparsed_right,
        }
    }
}

/// Creates the parent directory of `path` when needed.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Writes `body` wrapped in the report envelope as pretty JSON.
pub fn write_json_report<T: Serialize>(path: &Path, schema: &str, body: T) -> Result<PathBuf> {
    ensure_parent_dir(path)?;
    let payload = ReportPayload::new(schema, body);
    let json = serde_json::to_string_pretty(&payload).map_err(|source| OutputError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, format!("{json}\n")).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), schema, "report written");
    Ok(path.to_path_buf())
}

pub fn write_match_report(
    path: &Path,
    left: &str,
    right: &str,
    result: &MatchResult,
) -> Result<PathBuf> {
    write_json_report(path, MATCH_REPORT_SCHEMA, MatchReport::new(left, right, result))
}

pub fn write_channel_report(
    path: &Path,
    sheet: &str,
    table: &ChannelTable,
    report: &ChannelReport,
) -> Result<PathBuf> {
    write_json_report(
        path,
        CHANNEL_REPORT_SCHEMA,
        ChannelReportBody::new(sheet, table, report),
    )
}

pub fn write_count_report(path: &Path, report: &CountReport) -> Result<PathBuf> {
    write_json_report(path, COUNT_REPORT_SCHEMA, report)
}

pub fn write_fuzzy_report(path: &Path, threshold: f64, matches: &[FuzzyMatch]) -> Result<PathBuf> {
    write_json_report(
        path,
        FUZZY_REPORT_SCHEMA,
        FuzzyReport {
            threshold,
            matches: matches.to_vec(),
        },
    )
}

pub fn write_repeated_values_report(
    path: &Path,
    source: &str,
    column: &str,
    values: &RepeatedValues,
) -> Result<PathBuf> {
    write_json_report(
        path,
        REPEATED_REPORT_SCHEMA,
        RepeatedValuesReport {
            source: source.to_string(),
            column: column.to_string(),
            values: values.clone(),
        },
    )
}

pub fn write_timestamp_report(
    path: &Path,
    left: &str,
    right: &str,
    diff: &TimestampDiff,
) -> Result<PathBuf> {
    write_json_report(
        path,
        TIMESTAMP_REPORT_SCHEMA,
        TimestampReport::new(left, right, diff),
    )
}
