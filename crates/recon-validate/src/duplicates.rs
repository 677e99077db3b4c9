//! Repeated value report for a single column.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatedValue {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatedValues {
    /// Distinct non-blank values seen.
    pub distinct: usize,
    /// Values seen more than once, most frequent first, then alphabetical.
    pub repeated: Vec<RepeatedValue>,
}

impl RepeatedValues {
    pub fn is_empty(&self) -> bool {
        self.repeated.is_empty()
    }
}

/// Counts the non-blank values that occur more than once.
///
/// Values are trimmed before counting.
pub fn repeated_values<'a, I>(values: I) -> RepeatedValues
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        *counts.entry(value).or_insert(0) += 1;
    }

    let distinct = counts.len();
    let mut repeated: Vec<RepeatedValue> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(value, count)| RepeatedValue {
            value: value.to_string(),
            count,
        })
        .collect();
    repeated.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));

    RepeatedValues { distinct, repeated }
}
