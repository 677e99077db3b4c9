//! Error types for the reconciliation data model.

use thiserror::Error;

/// Errors raised while constructing model artifacts.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ModelError {
    /// Left identifier is already part of the correspondence.
    #[error("left identifier '{id}' is already matched")]
    DuplicateLeft {
        /// The identifier that was inserted twice.
        id: String,
    },

    /// Right identifier is already part of the correspondence.
    #[error("right identifier '{id}' is already matched")]
    DuplicateRight {
        /// The identifier that was inserted twice.
        id: String,
    },

    /// More identifiers than channels in an aligned table.
    #[error("aligned table has {channels} channel(s) but {identifiers} identifier(s)")]
    ShapeMismatch {
        /// Number of identifiers supplied.
        identifiers: usize,
        /// Number of date/value channels present.
        channels: usize,
    },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
