//! `recon.toml` configuration.
//!
//! Every table the matcher and validators consult is configured here, so a
//! deployment can change aliases, exclusions or accepted date layouts without
//! a rebuild. Unset keys fall back to built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use recon_ingest::{ColumnBindings, SheetOptions};
use recon_match::{FuzzyConfig, MatcherConfig};
use recon_output::HomologationSpec;
use recon_validate::TimestampFormats;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "recon.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconConfig {
    /// Accepted timestamp layouts, tried in order.
    pub timestamps: TimestampFormats,
    /// Column bindings of the dataset whose identifiers key the correspondence.
    pub left: ColumnBindings,
    pub right: ColumnBindings,
    pub matcher: MatcherConfig,
    pub fuzzy: FuzzyConfig,
    pub sheet: SheetOptions,
    pub homologation: Option<HomologationSpec>,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            timestamps: TimestampFormats::default(),
            left: ColumnBindings::new("id", "code"),
            right: ColumnBindings::new("id", "code"),
            matcher: MatcherConfig::default(),
            fuzzy: FuzzyConfig::default(),
            sheet: SheetOptions::default(),
            homologation: None,
        }
    }
}

impl ReconConfig {
    /// Parses configuration text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads configuration.
    ///
    /// With an explicit `path` the file must exist and parse. Without one,
    /// `recon.toml` in the working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::read(&default)
                } else {
                    debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("parse config {}", path.display()))?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_gives_defaults() {
        let config = ReconConfig::from_toml_str("").unwrap();
        assert_eq!(config.left.id, "id");
        assert_eq!(config.right.code, "code");
        assert_eq!(config.matcher, MatcherConfig::default());
        assert!(config.homologation.is_none());
    }

    #[test]
    fn test_unknown_value_type_is_rejected() {
        assert!(ReconConfig::from_toml_str("[fuzzy]\nthreshold = \"high\"").is_err());
    }
}
