//! CSV file reading.
//!
//! Every column is read as a string. Codes such as `"010"` carry meaning in
//! their leading zeros, so no type inference is done at load time.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use polars::prelude::*;
use recon_model::any_to_string;
use tracing::{debug, warn};

use crate::error::{IngestError, Result};

/// Maximum file size accepted by [`read_csv`] (500 MB).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

fn open_error(path: &Path, e: std::io::Error) -> IngestError {
    if e.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

/// Fails early on missing or oversized files.
pub fn check_file(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;
    if metadata.len() > MAX_CSV_FILE_SIZE {
        warn!(
            path = %path.display(),
            size = metadata.len(),
            "file exceeds the size limit"
        );
        return Err(IngestError::CsvParse {
            path: path.to_path_buf(),
            message: format!(
                "file is {} bytes, limit is {MAX_CSV_FILE_SIZE}",
                metadata.len()
            ),
        });
    }
    Ok(())
}

/// Rejects frames without rows or with blank headers.
pub fn validate_frame_shape(df: &DataFrame, path: &Path) -> Result<()> {
    if df.height() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    if df
        .get_column_names()
        .iter()
        .any(|name| name.trim().is_empty())
    {
        return Err(IngestError::EmptyColumnName {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Reads a CSV file with a single header row into a string-typed frame.
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    check_file(path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    validate_frame_shape(&df, path)?;
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "csv loaded"
    );
    Ok(df)
}

/// Looks up a column, listing the available names on failure.
pub fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| IngestError::MissingColumn {
        column: name.to_string(),
        available: df
            .get_column_names()
            .iter()
            .map(|n| n.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// All cells of a column as strings; nulls become empty strings.
pub fn column_strings(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let column = require_column(df, name)?;
    Ok((0..df.height())
        .map(|idx| any_to_string(column.get(idx).unwrap_or(AnyValue::Null)))
        .collect())
}

/// Reads a plain list of names, one per line, trimmed, blank lines dropped.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let reader = BufReader::new(file);
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let cleaned = line.strip_prefix('\u{feff}').unwrap_or(&line).trim();
        if !cleaned.is_empty() {
            lines.push(cleaned.to_string());
        }
    }
    Ok(lines)
}
