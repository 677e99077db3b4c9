//! Channel-paired sheets.
//!
//! Layout: the first column lists channel identifiers (one per row, the list
//! ends at the first blank cell); the remaining columns alternate date and
//! value, one pair per channel. Channel `k` pairs with the `k`-th identifier.

use std::path::Path;

use polars::prelude::*;
use recon_model::{Channel, ChannelTable, any_to_f64, any_to_string_non_empty};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{IngestError, Result};
use crate::reader::read_csv;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetOptions {
    /// Text stripped from every identifier, e.g. a server route such as
    /// `\\server_name\`.
    pub route_prefix: Option<String>,
}

/// Splits the identifier column off a sheet.
///
/// Returns the identifiers, read until the first blank cell, and the frame
/// without its first column.
pub fn split_identifier_column(
    df: &DataFrame,
    options: &SheetOptions,
) -> Result<(Vec<String>, DataFrame)> {
    let first = df
        .get_columns()
        .first()
        .ok_or(IngestError::NoIdentifierColumn)?;

    let mut identifiers = Vec::new();
    for idx in 0..df.height() {
        let Some(raw) = any_to_string_non_empty(first.get(idx).unwrap_or(AnyValue::Null)) else {
            break;
        };
        let identifier = match options.route_prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => raw.replace(prefix, ""),
            _ => raw,
        };
        identifiers.push(identifier);
    }

    let data = df.drop(first.name().as_str())?;
    Ok((identifiers, data))
}

/// Column names for `width` data columns: `dates_1, values_1, dates_2, ...`.
///
/// An odd trailing column becomes a date-only `dates_k`.
pub fn channel_column_names(width: usize) -> Vec<String> {
    (0..width)
        .map(|i| {
            let channel = i / 2 + 1;
            if i % 2 == 0 {
                format!("dates_{channel}")
            } else {
                format!("values_{channel}")
            }
        })
        .collect()
}

/// Renames data columns in place using [`channel_column_names`].
pub fn rename_channel_columns(df: &mut DataFrame) -> Result<()> {
    let names = channel_column_names(df.width());
    df.set_column_names(names.iter().map(String::as_str))?;
    Ok(())
}

/// Builds channels from a renamed frame.
///
/// A date-only trailing channel gets an all-missing value series.
pub fn channels_from_frame(df: &DataFrame) -> Result<Vec<Channel>> {
    let height = df.height();
    let count = df.width().div_ceil(2);
    let mut channels = Vec::with_capacity(count);

    for k in 1..=count {
        let dates_col = df.column(&format!("dates_{k}"))?;
        let dates = (0..height)
            .map(|idx| any_to_string_non_empty(dates_col.get(idx).unwrap_or(AnyValue::Null)))
            .collect();
        let values = match df.column(&format!("values_{k}")) {
            Ok(values_col) => (0..height)
                .map(|idx| any_to_f64(values_col.get(idx).unwrap_or(AnyValue::Null)))
                .collect(),
            Err(_) => vec![None; height],
        };
        channels.push(Channel::new(dates, values));
    }
    Ok(channels)
}

/// Full pipeline from a raw sheet frame to a channel table.
pub fn channel_table_from_frame(df: &DataFrame, options: &SheetOptions) -> Result<ChannelTable> {
    let (identifiers, mut data) = split_identifier_column(df, options)?;
    if data.width() % 2 == 1 {
        warn!(
            columns = data.width(),
            "odd number of data columns, last channel has dates only"
        );
    }
    rename_channel_columns(&mut data)?;
    let channels = channels_from_frame(&data)?;
    debug!(
        identifiers = identifiers.len(),
        channels = channels.len(),
        rows = data.height(),
        "channel sheet parsed"
    );
    Ok(ChannelTable::new(identifiers, channels)?)
}

/// Reads a CSV channel sheet.
pub fn read_channel_sheet(path: &Path, options: &SheetOptions) -> Result<ChannelTable> {
    let df = read_csv(path)?;
    channel_table_from_frame(&df, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> DataFrame {
        DataFrame::new(vec![
            Series::new(
                "route".into(),
                &["\\\\server_name\\m1:g:S:B:x", "\\\\server_name\\m2:g:S:B:x", ""],
            )
            .into_column(),
            Series::new("d1".into(), &["01-01-24 00:00:00", "01-01-24 00:15:00", ""]).into_column(),
            Series::new("v1".into(), &["10", "11", ""]).into_column(),
            Series::new("d2".into(), &["01-01-24 00:00:00", "", ""]).into_column(),
            Series::new("v2".into(), &["12,5", "", ""]).into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn test_column_names_with_odd_trailing() {
        assert_eq!(
            channel_column_names(5),
            vec!["dates_1", "values_1", "dates_2", "values_2", "dates_3"]
        );
        assert!(channel_column_names(0).is_empty());
    }

    #[test]
    fn test_identifiers_strip_prefix_and_stop_at_blank() {
        let options = SheetOptions {
            route_prefix: Some("\\\\server_name\\".to_string()),
        };
        let (ids, data) = split_identifier_column(&sheet(), &options).unwrap();
        assert_eq!(ids, vec!["m1:g:S:B:x".to_string(), "m2:g:S:B:x".to_string()]);
        assert_eq!(data.width(), 4);
    }

    #[test]
    fn test_channel_table_from_frame() {
        let table = channel_table_from_frame(&sheet(), &SheetOptions::default()).unwrap();
        assert_eq!(table.channel_count(), 2);
        let first = table.channel(0).unwrap();
        assert_eq!(first.anchor(), Some(10.0));
        assert_eq!(first.non_empty_dates().count(), 2);
        let second = table.channel(1).unwrap();
        assert_eq!(second.anchor(), Some(12.5));
        assert_eq!(second.observation_count(), 1);
    }

    #[test]
    fn test_date_only_trailing_channel() {
        let df = DataFrame::new(vec![
            Series::new("id".into(), &["a:b:c", "d:e:f"]).into_column(),
            Series::new("d1".into(), &["x", "y"]).into_column(),
            Series::new("v1".into(), &["1", "2"]).into_column(),
            Series::new("d2".into(), &["z", ""]).into_column(),
        ])
        .unwrap();
        let table = channel_table_from_frame(&df, &SheetOptions::default()).unwrap();
        assert_eq!(table.channel_count(), 2);
        assert_eq!(table.channel(1).unwrap().anchor(), None);
    }

    #[test]
    fn test_more_identifiers_than_channels_is_fatal() {
        let df = DataFrame::new(vec![
            Series::new("id".into(), &["a:b:c", "d:e:f"]).into_column(),
            Series::new("d1".into(), &["x", "y"]).into_column(),
            Series::new("v1".into(), &["1", "2"]).into_column(),
        ])
        .unwrap();
        let err = channel_table_from_frame(&df, &SheetOptions::default()).unwrap_err();
        assert!(matches!(err, IngestError::Shape(_)));
    }
}
