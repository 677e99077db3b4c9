//! Observation-count pairing across two channel tables.
//!
//! Two exports of the same devices should carry the same number of
//! observations per channel. Channels from both tables are paired when their
//! identifiers agree on the third and fourth segments; pairs whose counts
//! differ get a timestamp comparison.

use recon_model::{Channel, ChannelTable, segments};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::comparator::TimestampComparator;

/// Segment positions, counted from the front, that must agree.
const PAIRING_SEGMENTS: [usize; 2] = [2, 3];

/// Two channels describing the same device with different counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountMismatch {
    pub left: String,
    pub right: String,
    pub left_count: usize,
    pub right_count: usize,
    /// Timestamps present on one side only, canonical and ascending.
    pub differences: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountReport {
    /// Pairs found with agreeing segments, including equal counts.
    pub pairs_checked: usize,
    pub mismatches: Vec<CountMismatch>,
    /// Identifiers too short to pair.
    pub skipped_left: Vec<String>,
    pub skipped_right: Vec<String>,
}

impl CountReport {
    pub fn has_issues(&self) -> bool {
        !self.mismatches.is_empty()
    }
}

struct Keyed<'a> {
    identifier: &'a str,
    key: [&'a str; 2],
    channel: &'a Channel,
}

fn keyed<'a>(table: &'a ChannelTable, skipped: &mut Vec<String>) -> Vec<Keyed<'a>> {
    let mut out = Vec::new();
    for (identifier, channel) in table.labelled() {
        let parts = segments(identifier);
        let Some(key) = pairing_key(&parts) else {
            skipped.push(identifier.to_string());
            continue;
        };
        out.push(Keyed {
            identifier,
            key,
            channel,
        });
    }
    out
}

fn pairing_key<'a>(parts: &[&'a str]) -> Option<[&'a str; 2]> {
    Some([
        *parts.get(PAIRING_SEGMENTS[0])?,
        *parts.get(PAIRING_SEGMENTS[1])?,
    ])
}

/// Pairs channels across `left` and `right` and compares differing counts.
///
/// Every left channel is checked against every right channel, so one channel
/// can appear in several pairs.
pub fn pair_count_mismatches(
    left: &ChannelTable,
    right: &ChannelTable,
    comparator: &TimestampComparator,
) -> CountReport {
    let mut report = CountReport::default();
    let left_keyed = keyed(left, &mut report.skipped_left);
    let right_keyed = keyed(right, &mut report.skipped_right);

    if !report.skipped_left.is_empty() || !report.skipped_right.is_empty() {
        warn!(
            skipped_left = report.skipped_left.len(),
            skipped_right = report.skipped_right.len(),
            "identifiers with fewer than 4 segments skipped"
        );
    }

    for l in &left_keyed {
        let left_count = l.channel.observation_count();
        for r in right_keyed.iter().filter(|r| r.key == l.key) {
            report.pairs_checked += 1;
            let right_count = r.channel.observation_count();
            if left_count == right_count {
                continue;
            }
            let differences = comparator
                .symmetric_difference(l.channel.non_empty_dates(), r.channel.non_empty_dates());
            report.mismatches.push(CountMismatch {
                left: l.identifier.to_string(),
                right: r.identifier.to_string(),
                left_count,
                right_count,
                differences,
            });
        }
    }

    debug!(
        pairs = report.pairs_checked,
        mismatches = report.mismatches.len(),
        "count pairing complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(dates: &[&str]) -> Channel {
        Channel::new(
            dates.iter().map(|d| Some((*d).to_string())).collect(),
            dates.iter().map(|_| Some(1.0)).collect(),
        )
    }

    #[test]
    fn test_pairs_on_third_and_fourth_segment() {
        let left = ChannelTable::new(
            vec!["m:x:SE01:B1:p".to_string(), "m:x:SE02:B1:p".to_string()],
            vec![
                channel(&["01-01-2024 00:00:00", "02-01-2024 00:00:00"]),
                channel(&["01-01-2024 00:00:00"]),
            ],
        )
        .unwrap();
        let right = ChannelTable::new(
            vec!["c:y:SE01:B1:q".to_string(), "short:id".to_string()],
            vec![channel(&["01-01-2024 00:00:00"]), channel(&[])],
        )
        .unwrap();

        let report = pair_count_mismatches(&left, &right, &TimestampComparator::default());

        assert_eq!(report.pairs_checked, 1);
        assert_eq!(report.skipped_right, vec!["short:id".to_string()]);
        assert_eq!(report.mismatches.len(), 1);
        let mismatch = &report.mismatches[0];
        assert_eq!(mismatch.left, "m:x:SE01:B1:p");
        assert_eq!((mismatch.left_count, mismatch.right_count), (2, 1));
        assert_eq!(mismatch.differences, vec!["2024-01-02 00:00:00".to_string()]);
    }

    #[test]
    fn test_equal_counts_are_not_reported() {
        let ids = vec!["a:b:S:B".to_string()];
        let left = ChannelTable::new(ids.clone(), vec![channel(&["d1"])]).unwrap();
        let right = ChannelTable::new(ids, vec![channel(&["d2"])]).unwrap();

        let report = pair_count_mismatches(&left, &right, &TimestampComparator::default());

        assert_eq!(report.pairs_checked, 1);
        assert!(!report.has_issues());
    }
}
