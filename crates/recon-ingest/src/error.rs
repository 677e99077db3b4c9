//! Error types for data ingestion.

use std::path::PathBuf;

use recon_model::ModelError;
use thiserror::Error;

/// Errors that can occur while loading source data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV file has no data rows.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// A header cell is blank.
    #[error("CSV file has an empty column name: {path}")]
    EmptyColumnName { path: PathBuf },

    // === Shape Errors ===
    /// Bound column is absent from the frame.
    #[error("column '{column}' not found; available: {available}")]
    MissingColumn { column: String, available: String },

    /// Channel sheet has no identifier column.
    #[error("channel sheet has no columns")]
    NoIdentifierColumn,

    /// Identifiers and channels do not line up.
    #[error(transparent)]
    Shape(#[from] ModelError),

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/meters.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /data/meters.csv");
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("code".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }

    #[test]
    fn test_shape_error_is_transparent() {
        let err: IngestError = ModelError::ShapeMismatch {
            identifiers: 3,
            channels: 2,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "aligned table has 2 channel(s) but 3 identifier(s)"
        );
    }
}
