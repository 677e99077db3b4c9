//! Timestamp parsing for channel dates.
//!
//! Exported sheets write dates day-first with either a two- or four-digit
//! year, while derived files use ISO 8601. All accepted layouts are listed in
//! [`TimestampFormats`] and tried in order. Two-digit years come first since
//! `%Y` would otherwise read `24` as the year 24.

use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Canonical rendering of a parsed timestamp.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Accepted `chrono` input layouts, tried in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimestampFormats {
    formats: Vec<String>,
}

impl Default for TimestampFormats {
    fn default() -> Self {
        Self::new([
            "%d-%m-%y %H:%M:%S",
            "%d-%m-%Y %H:%M:%S",
            "%Y-%m-%d %H:%M:%S%.f",
            "%Y-%m-%dT%H:%M:%S%.f",
            "%d/%m/%Y %H:%M:%S",
            "%Y-%m-%d",
        ])
    }
}

impl TimestampFormats {
    pub fn new<I, S>(formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            formats: formats.into_iter().map(Into::into).collect(),
        }
    }

    pub fn formats(&self) -> &[String] {
        &self.formats
    }

    /// Parses `value` with the first matching layout.
    ///
    /// Date-only layouts resolve to midnight. Blank input is `None`.
    pub fn parse(&self, value: &str) -> Option<NaiveDateTime> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        self.formats.iter().find_map(|format| {
            NaiveDateTime::parse_from_str(value, format)
                .ok()
                .or_else(|| {
                    NaiveDate::parse_from_str(value, format)
                        .ok()
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                })
        })
    }

    /// Orders raw date strings chronologically.
    ///
    /// Parseable values come first in time order; the rest follow in
    /// lexicographic order.
    pub fn sort_chronologically(&self, values: &mut [String]) {
        let mut keyed: Vec<(Option<NaiveDateTime>, String)> = values
            .iter()
            .map(|v| (self.parse(v), v.clone()))
            .collect();
        keyed.sort_by(|a, b| match (a.0, b.0) {
            (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.1.cmp(&b.1)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.1.cmp(&b.1),
        });
        for (slot, (_, value)) in values.iter_mut().zip(keyed) {
            *slot = value;
        }
    }
}

/// Renders a timestamp in [`CANONICAL_FORMAT`].
pub fn canonical(value: &NaiveDateTime) -> String {
    value.format(CANONICAL_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_day_first_and_iso() {
        let formats = TimestampFormats::default();
        let a = formats.parse("03-01-2024 10:15:00").unwrap();
        let b = formats.parse("03-01-24 10:15:00").unwrap();
        let c = formats.parse("2024-01-03 10:15:00").unwrap();
        let d = formats.parse("2024-01-03T10:15:00.000").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a, d);
        assert_eq!(canonical(&a), "2024-01-03 10:15:00");
    }

    #[test]
    fn test_date_only_is_midnight() {
        let formats = TimestampFormats::default();
        let parsed = formats.parse("2024-01-03").unwrap();
        assert_eq!(canonical(&parsed), "2024-01-03 00:00:00");
    }

    #[test]
    fn test_unparseable_and_blank() {
        let formats = TimestampFormats::default();
        assert_eq!(formats.parse("not a date"), None);
        assert_eq!(formats.parse("   "), None);
    }

    #[test]
    fn test_sort_chronologically_puts_unparseable_last() {
        let formats = TimestampFormats::default();
        let mut values = vec![
            "zzz".to_string(),
            "02-01-2024 00:00:00".to_string(),
            "31-12-2023 23:00:00".to_string(),
            "aaa".to_string(),
        ];
        formats.sort_chronologically(&mut values);
        assert_eq!(
            values,
            vec![
                "31-12-2023 23:00:00".to_string(),
                "02-01-2024 00:00:00".to_string(),
                "aaa".to_string(),
                "zzz".to_string(),
            ]
        );
    }

    #[test]
    fn test_custom_formats_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            timestamps: TimestampFormats,
        }
        let wrapper: Wrapper =
            toml::from_str(r#"timestamps = ["%Y/%m/%d %H:%M"]"#).unwrap();
        assert!(wrapper.timestamps.parse("2024/01/03 10:15").is_some());
        assert!(wrapper.timestamps.parse("03-01-2024 10:15:00").is_none());
    }
}
