//! Error types for normalization.

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NormalizeError {
    /// The combined alias pattern could not be compiled.
    #[error("failed to compile alias pattern: {source}")]
    AliasPattern {
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, NormalizeError>;
