//! Cross-dataset timestamp comparison.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::timestamp::{TimestampFormats, canonical};

/// Outcome of comparing two timestamp columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimestampDiff {
    /// Present only on the left side, ascending.
    pub only_left: Vec<NaiveDateTime>,
    /// Present only on the right side, ascending.
    pub only_right: Vec<NaiveDateTime>,
    /// Non-blank left entries that failed to parse.
    pub unparsed_left: usize,
    /// Non-blank right entries that failed to parse.
    pub unparsed_right: usize,
}

impl TimestampDiff {
    pub fn is_empty(&self) -> bool {
        self.only_left.is_empty() && self.only_right.is_empty()
    }

    /// Both one-sided sets merged, ascending, in canonical form.
    pub fn symmetric_difference(&self) -> Vec<String> {
        let merged: BTreeSet<&NaiveDateTime> =
            self.only_left.iter().chain(self.only_right.iter()).collect();
        merged.into_iter().map(canonical).collect()
    }
}

/// Compares timestamp columns from two sources.
#[derive(Debug, Clone, Default)]
pub struct TimestampComparator {
    formats: TimestampFormats,
}

impl TimestampComparator {
    pub fn new(formats: TimestampFormats) -> Self {
        Self { formats }
    }

    pub fn formats(&self) -> &TimestampFormats {
        &self.formats
    }

    /// Parses both columns and splits them into one-sided sets.
    ///
    /// Unparseable entries are dropped and counted, never raised. Duplicate
    /// timestamps within one column collapse.
    pub fn compare<'a, L, R>(&self, left: L, right: R) -> TimestampDiff
    where
        L: IntoIterator<Item = &'a str>,
        R: IntoIterator<Item = &'a str>,
    {
        let (left, unparsed_left) = self.parse_column(left);
        let (right, unparsed_right) = self.parse_column(right);
        let diff = TimestampDiff {
            only_left: left.difference(&right).copied().collect(),
            only_right: right.difference(&left).copied().collect(),
            unparsed_left,
            unparsed_right,
        };
        debug!(
            only_left = diff.only_left.len(),
            only_right = diff.only_right.len(),
            unparsed_left,
            unparsed_right,
            "timestamp comparison"
        );
        diff
    }

    /// Symmetric difference of two columns as canonical strings.
    pub fn symmetric_difference<'a, L, R>(&self, left: L, right: R) -> Vec<String>
    where
        L: IntoIterator<Item = &'a str>,
        R: IntoIterator<Item = &'a str>,
    {
        self.compare(left, right).symmetric_difference()
    }

    fn parse_column<'a, I>(&self, values: I) -> (BTreeSet<NaiveDateTime>, usize)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut parsed = BTreeSet::new();
        let mut unparsed = 0;
        for value in values {
            if value.trim().is_empty() {
                continue;
            }
            match self.formats.parse(value) {
                Some(ts) => {
                    parsed.insert(ts);
                }
                None => unparsed += 1,
            }
        }
        (parsed, unparsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_difference_is_sorted_and_canonical() {
        let comparator = TimestampComparator::default();
        let left = ["02-01-2024 00:00:00", "01-01-2024 00:00:00", "garbage"];
        let right = ["2024-01-01 00:00:00", "2023-12-31 23:00:00", ""];

        let diff = comparator.compare(left, right);

        assert_eq!(diff.unparsed_left, 1);
        assert_eq!(diff.unparsed_right, 0);
        assert_eq!(
            diff.symmetric_difference(),
            vec![
                "2023-12-31 23:00:00".to_string(),
                "2024-01-02 00:00:00".to_string(),
            ]
        );
    }

    #[test]
    fn test_equivalent_layouts_cancel_out() {
        let comparator = TimestampComparator::default();
        let diff = comparator.compare(["03-01-24 10:15:00"], ["2024-01-03T10:15:00"]);
        assert!(diff.is_empty());
    }

    #[test]
    fn test_symmetric_difference_is_commutative() {
        let comparator = TimestampComparator::default();
        let a = ["01-01-2024 00:00:00", "05-01-2024 00:00:00"];
        let b = ["01-01-2024 00:00:00", "07-01-2024 00:00:00"];
        assert_eq!(
            comparator.symmetric_difference(a, b),
            comparator.symmetric_difference(b, a)
        );
    }
}
