//! Error types for channel validation.

use thiserror::Error;

/// Fatal shape errors. Everything else is reported, not raised.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidateError {
    /// A device tuple points past the end of the channel table.
    #[error("device tuple ({first}, {second}) references channel {missing} of {available}")]
    MissingChannel {
        first: usize,
        second: usize,
        missing: usize,
        available: usize,
    },
}

pub type Result<T> = std::result::Result<T, ValidateError>;
