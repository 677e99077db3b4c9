//! Error types for output generation.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OutputError {
    /// Filesystem failure on a specific path.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding or decoding failed.
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Stored file was written by a different schema.
    #[error("{path} has schema '{found}' version {version}, expected '{expected}'")]
    UnsupportedSchema {
        path: PathBuf,
        found: String,
        version: u32,
        expected: &'static str,
    },

    /// Column required for homologation is absent.
    #[error("column '{column}' not found in {frame}")]
    MissingColumn { column: String, frame: &'static str },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for OutputError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OutputError>;
