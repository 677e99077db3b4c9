//! Channel-consistency validation over device tuples.
//!
//! For each tuple `(n, m)` the first observation of both channels is compared.
//! This is a cheap anchor probe, not a full series comparison: equal anchors
//! mean the pair is presumed consistent even when the date sets differ.

use std::collections::{BTreeMap, BTreeSet};

use recon_model::{Channel, ChannelTable, DeviceTuple};
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, trace};

use crate::error::{Result, ValidateError};
use crate::timestamp::TimestampFormats;

/// Problem found for one device tuple. Always attributed to `first`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChannelIssue {
    /// One or both anchors missing or unparseable; dates not compared.
    AnchorUnavailable {
        tuple: DeviceTuple,
        first_anchor: Option<f64>,
        second_anchor: Option<f64>,
    },
    /// Anchors present but different.
    AnchorMismatch {
        tuple: DeviceTuple,
        first_anchor: f64,
        second_anchor: f64,
        missing_dates: usize,
    },
}

impl ChannelIssue {
    pub fn tuple(&self) -> DeviceTuple {
        match self {
            ChannelIssue::AnchorUnavailable { tuple, .. } => *tuple,
            ChannelIssue::AnchorMismatch { tuple, .. } => *tuple,
        }
    }

    /// Flagged channel index.
    pub fn channel(&self) -> usize {
        self.tuple().first
    }

    pub fn format_message(&self) -> String {
        match self {
            ChannelIssue::AnchorUnavailable {
                tuple,
                first_anchor,
                second_anchor,
            } => {
                let side = match (first_anchor, second_anchor) {
                    (None, None) => "both channels",
                    (None, Some(_)) => "the first channel",
                    _ => "the second channel",
                };
                format!(
                    "channels {} and {}: first value missing on {}",
                    tuple.first, tuple.second, side
                )
            }
            ChannelIssue::AnchorMismatch {
                tuple,
                first_anchor,
                second_anchor,
                missing_dates,
            } => format!(
                "channels {} and {}: first values differ ({} vs {}), \
                 {} date(s) missing from channel {}",
                tuple.first, tuple.second, first_anchor, second_anchor, missing_dates, tuple.second
            ),
        }
    }
}

/// Result of validating one channel table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelReport {
    pub tuples_checked: usize,
    /// Flagged channel indices, de-duplicated, in first-flag order.
    pub flagged: Vec<usize>,
    /// Dates of a flagged channel absent from its partner. Omitted when empty.
    pub missing_dates: BTreeMap<usize, Vec<String>>,
    pub issues: Vec<ChannelIssue>,
}

impl ChannelReport {
    pub fn has_issues(&self) -> bool {
        !self.flagged.is_empty()
    }

    fn flag(&mut self, channel: usize) {
        if !self.flagged.contains(&channel) {
            self.flagged.push(channel);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChannelValidator {
    formats: TimestampFormats,
}

impl ChannelValidator {
    /// `formats` only affects how missing dates are ordered.
    pub fn new(formats: TimestampFormats) -> Self {
        Self { formats }
    }

    /// Validates every tuple against `table`.
    ///
    /// Fails before checking anything when a tuple points past the table.
    /// When several tuples flag the same channel, the last one with missing
    /// dates decides that channel's entry.
    pub fn validate(&self, table: &ChannelTable, tuples: &[DeviceTuple]) -> Result<ChannelReport> {
        let span = debug_span!(
            "validate_channels",
            channels = table.channel_count(),
            tuples = tuples.len()
        );
        let _guard = span.enter();

        let pairs = tuples
            .iter()
            .map(|tuple| {
                let first = lookup(table, *tuple, tuple.first)?;
                let second = lookup(table, *tuple, tuple.second)?;
                Ok((*tuple, first, second))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut report = ChannelReport {
            tuples_checked: pairs.len(),
            ..ChannelReport::default()
        };
        let mut missing: BTreeMap<usize, BTreeSet<String>> = BTreeMap::new();

        for (tuple, first, second) in pairs {
            let (Some(first_anchor), Some(second_anchor)) = (first.anchor(), second.anchor())
            else {
                trace!(first = tuple.first, second = tuple.second, "anchor unavailable");
                report.flag(tuple.first);
                report.issues.push(ChannelIssue::AnchorUnavailable {
                    tuple,
                    first_anchor: first.anchor(),
                    second_anchor: second.anchor(),
                });
                continue;
            };
            if first_anchor == second_anchor {
                continue;
            }

            let gaps = missing_dates(first, second);
            trace!(
                first = tuple.first,
                second = tuple.second,
                missing = gaps.len(),
                "anchor mismatch"
            );
            report.flag(tuple.first);
            report.issues.push(ChannelIssue::AnchorMismatch {
                tuple,
                first_anchor,
                second_anchor,
                missing_dates: gaps.len(),
            });
            if !gaps.is_empty() {
                missing.insert(tuple.first, gaps);
            }
        }

        report.missing_dates = missing
            .into_iter()
            .map(|(channel, dates)| {
                let mut dates: Vec<String> = dates.into_iter().collect();
                self.formats.sort_chronologically(&mut dates);
                (channel, dates)
            })
            .collect();

        debug!(
            flagged = report.flagged.len(),
            with_missing_dates = report.missing_dates.len(),
            "channel validation complete"
        );
        Ok(report)
    }
}

fn lookup(table: &ChannelTable, tuple: DeviceTuple, index: usize) -> Result<&Channel> {
    table.channel(index).ok_or(ValidateError::MissingChannel {
        first: tuple.first,
        second: tuple.second,
        missing: index,
        available: table.channel_count(),
    })
}

/// Non-empty dates of `first` that `second` lacks.
fn missing_dates(first: &Channel, second: &Channel) -> BTreeSet<String> {
    let present: BTreeSet<&str> = second.non_empty_dates().collect();
    first
        .non_empty_dates()
        .filter(|d| !present.contains(d))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(dates: &[&str], first_value: Option<f64>) -> Channel {
        let mut values = vec![first_value];
        values.resize(dates.len().max(1), Some(1.0));
        Channel::new(
            dates.iter().map(|d| Some((*d).to_string())).collect(),
            values,
        )
    }

    fn table(channels: Vec<Channel>) -> ChannelTable {
        let ids = (0..channels.len()).map(|i| format!("id{i}")).collect();
        ChannelTable::new(ids, channels).unwrap()
    }

    fn tuple(n: usize, m: usize) -> DeviceTuple {
        DeviceTuple::new(n, m).unwrap()
    }

    #[test]
    fn test_equal_anchors_report_nothing() {
        let t = table(vec![
            channel(&["d1", "d2", "d3"], Some(10.0)),
            channel(&["d1"], Some(10.0)),
        ]);
        let report = ChannelValidator::default().validate(&t, &[tuple(0, 1)]).unwrap();
        assert!(!report.has_issues());
        assert!(report.missing_dates.is_empty());
        assert_eq!(report.tuples_checked, 1);
    }

    #[test]
    fn test_different_anchors_flag_first_with_missing_dates() {
        let t = table(vec![
            channel(&["d1", "d2", "d3"], Some(10.0)),
            channel(&["d1", "d2"], Some(12.0)),
        ]);
        let report = ChannelValidator::default().validate(&t, &[tuple(0, 1)]).unwrap();
        assert_eq!(report.flagged, vec![0]);
        assert_eq!(report.missing_dates.get(&0), Some(&vec!["d3".to_string()]));
    }

    #[test]
    fn test_missing_anchor_flags_without_dates() {
        let t = table(vec![
            channel(&["d1", "d2"], None),
            channel(&["d1"], Some(3.0)),
        ]);
        let report = ChannelValidator::default().validate(&t, &[tuple(0, 1)]).unwrap();
        assert_eq!(report.flagged, vec![0]);
        assert!(report.missing_dates.is_empty());
        assert!(matches!(
            report.issues[0],
            ChannelIssue::AnchorUnavailable {
                first_anchor: None,
                ..
            }
        ));
    }

    #[test]
    fn test_mismatch_with_no_missing_dates_omits_entry() {
        let t = table(vec![
            channel(&["d1"], Some(1.0)),
            channel(&["d1", "d2"], Some(2.0)),
        ]);
        let report = ChannelValidator::default().validate(&t, &[tuple(0, 1)]).unwrap();
        assert_eq!(report.flagged, vec![0]);
        assert!(!report.missing_dates.contains_key(&0));
    }

    #[test]
    fn test_flagged_is_deduplicated_and_last_dates_kept() {
        let t = table(vec![
            channel(&["d1", "d2", "d3"], Some(1.0)),
            channel(&["d1", "d2"], Some(2.0)),
            channel(&["d1", "d3"], Some(3.0)),
        ]);
        let report = ChannelValidator::default()
            .validate(&t, &[tuple(0, 1), tuple(0, 2), tuple(1, 2)])
            .unwrap();
        assert_eq!(report.flagged, vec![0, 1]);
        assert_eq!(report.missing_dates.get(&0), Some(&vec!["d2".to_string()]));
        assert_eq!(report.missing_dates.get(&1), Some(&vec!["d2".to_string()]));
    }

    #[test]
    fn test_later_tuple_replaces_missing_dates() {
        let t = table(vec![
            channel(&["d1", "d2", "d3"], Some(1.0)),
            channel(&["d1", "d2"], Some(2.0)),
            channel(&["d1", "d3"], Some(3.0)),
        ]);
        let report = ChannelValidator::default()
            .validate(&t, &[tuple(0, 1), tuple(0, 2)])
            .unwrap();
        assert_eq!(report.flagged, vec![0]);
        assert_eq!(report.issues.len(), 2);
        assert_eq!(report.missing_dates.get(&0), Some(&vec!["d2".to_string()]));
    }

    #[test]
    fn test_empty_gaps_keep_earlier_missing_dates() {
        let t = table(vec![
            channel(&["d1", "d2"], Some(1.0)),
            channel(&["d1"], Some(2.0)),
            channel(&["d1", "d2"], Some(3.0)),
        ]);
        let report = ChannelValidator::default()
            .validate(&t, &[tuple(0, 1), tuple(0, 2)])
            .unwrap();
        assert_eq!(report.missing_dates.get(&0), Some(&vec!["d2".to_string()]));
    }

    #[test]
    fn test_missing_dates_sorted_chronologically() {
        let t = table(vec![
            channel(
                &["10-01-2024 00:00:00", "02-01-2024 00:00:00", "x"],
                Some(1.0),
            ),
            channel(&[], Some(2.0)),
        ]);
        let report = ChannelValidator::default().validate(&t, &[tuple(0, 1)]).unwrap();
        assert_eq!(
            report.missing_dates.get(&0),
            Some(&vec![
                "02-01-2024 00:00:00".to_string(),
                "10-01-2024 00:00:00".to_string(),
                "x".to_string(),
            ])
        );
    }

    #[test]
    fn test_tuple_past_table_is_fatal() {
        let t = table(vec![channel(&["d1"], Some(1.0))]);
        let err = ChannelValidator::default()
            .validate(&t, &[tuple(0, 4)])
            .unwrap_err();
        assert_eq!(
            err,
            ValidateError::MissingChannel {
                first: 0,
                second: 4,
                missing: 4,
                available: 1,
            }
        );
    }
}
