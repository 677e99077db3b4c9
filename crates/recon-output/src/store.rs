//! Correspondence persistence.
//!
//! A stored correspondence lets later runs (homologation, cross-dataset
//! timestamp checks) reuse a match without re-running the matcher. The file
//! is JSON with the pairs kept as an ordered object.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use recon_model::CorrespondenceMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{OutputError, Result};
use crate::report::{REPORT_SCHEMA_VERSION, ensure_parent_dir};

pub const CORRESPONDENCE_SCHEMA: &str = "recon.correspondence";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCorrespondence {
    pub schema: String,
    pub schema_version: u32,
    /// RFC 3339 timestamp of when the file was written.
    pub saved_at: Option<String>,
    /// Label of the dataset the keys come from.
    pub left: String,
    /// Label of the dataset the values come from.
    pub right: String,
    pub pairs: CorrespondenceMap,
}

impl StoredCorrespondence {
    pub fn new(
        left: impl Into<String>,
        right: impl Into<String>,
        pairs: CorrespondenceMap,
    ) -> Self {
        Self {
            schema: CORRESPONDENCE_SCHEMA.to_string(),
            schema_version: REPORT_SCHEMA_VERSION,
            saved_at: Some(Utc::now().to_rfc3339()),
            left: left.into(),
            right: right.into(),
            pairs,
        }
    }
}

pub fn save_correspondence(path: &Path, stored: &StoredCorrespondence) -> Result<PathBuf> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(stored).map_err(|source| OutputError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, format!("{json}\n")).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), pairs = stored.pairs.len(), "correspondence saved");
    Ok(path.to_path_buf())
}

/// Loads a stored correspondence, rejecting files of another schema.
///
/// Duplicate keys or values in the file are a decoding error.
pub fn load_correspondence(path: &Path) -> Result<StoredCorrespondence> {
    let contents = fs::read_to_string(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let stored: StoredCorrespondence =
        serde_json::from_str(&contents).map_err(|source| OutputError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    if stored.schema != CORRESPONDENCE_SCHEMA || stored.schema_version != REPORT_SCHEMA_VERSION {
        return Err(OutputError::UnsupportedSchema {
            path: path.to_path_buf(),
            found: stored.schema,
            version: stored.schema_version,
            expected: CORRESPONDENCE_SCHEMA,
        });
    }
    Ok(stored)
}
