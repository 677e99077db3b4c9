//! Homologation: carrying a field across a correspondence.
//!
//! Rows of the right-hand frame receive a new column holding the value of a
//! field from their matched left-hand row. Rows without a match get null.

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use recon_model::{CorrespondenceMap, any_to_string_non_empty};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{OutputError, Result};
use crate::report::ensure_parent_dir;

/// Column wiring for one homologation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomologationSpec {
    /// Key column of the left frame (correspondence keys).
    pub left_key: String,
    /// Field copied from the left frame.
    pub left_field: String,
    /// Key column of the right frame (correspondence values).
    pub right_key: String,
    /// Name of the column appended to the right frame.
    pub target_column: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomologationStats {
    pub rows: usize,
    pub filled: usize,
    /// Rows whose key has no correspondence.
    pub unmatched: usize,
    /// Matched rows whose left counterpart is absent or has a blank field.
    pub missing_source: usize,
}

fn column<'a>(df: &'a DataFrame, name: &str, frame: &'static str) -> Result<&'a Column> {
    df.column(name).map_err(|_| OutputError::MissingColumn {
        column: name.to_string(),
        frame,
    })
}

fn cell(col: &Column, idx: usize) -> Option<String> {
    any_to_string_non_empty(col.get(idx).unwrap_or(AnyValue::Null))
}

/// Appends `spec.target_column` to a copy of `right`.
pub fn apply_correspondence(
    left: &DataFrame,
    right: &DataFrame,
    map: &CorrespondenceMap,
    spec: &HomologationSpec,
) -> Result<(DataFrame, HomologationStats)> {
    let left_key = column(left, &spec.left_key, "left")?;
    let left_field = column(left, &spec.left_field, "left")?;
    let right_key = column(right, &spec.right_key, "right")?;

    let mut source: HashMap<String, String> = HashMap::with_capacity(left.height());
    for idx in 0..left.height() {
        if let (Some(key), Some(value)) = (cell(left_key, idx), cell(left_field, idx)) {
            source.entry(key).or_insert(value);
        }
    }

    let mut stats = HomologationStats {
        rows: right.height(),
        ..HomologationStats::default()
    };
    let values: Vec<Option<String>> = (0..right.height())
        .map(|idx| {
            let Some(left_id) =
                cell(right_key, idx).and_then(|key| map.left_for(&key).map(str::to_string))
            else {
                stats.unmatched += 1;
                return None;
            };
            match source.get(&left_id) {
                Some(value) => {
                    stats.filled += 1;
                    Some(value.clone())
                }
                None => {
                    stats.missing_source += 1;
                    None
                }
            }
        })
        .collect();

    if stats.missing_source > 0 {
        warn!(
            missing = stats.missing_source,
            field = %spec.left_field,
            "matched rows without a source value"
        );
    }

    let mut out = right.clone();
    out.with_column(Series::new(spec.target_column.as_str().into(), values))?;
    debug!(
        rows = stats.rows,
        filled = stats.filled,
        unmatched = stats.unmatched,
        "homologation applied"
    );
    Ok((out, stats))
}

/// Writes a frame as CSV with a header row.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<PathBuf> {
    ensure_parent_dir(path)?;
    let mut file = File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    Ok(path.to_path_buf())
}
