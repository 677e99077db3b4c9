//! Entity datasets from tabular sources.

use std::path::Path;

use polars::prelude::*;
use recon_model::{EntityDataset, EntityRecord, any_to_string, any_to_string_non_empty};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::reader::{read_csv, require_column};

/// Which source columns feed an [`EntityRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnBindings {
    /// Identifier column.
    pub id: String,
    /// Code column.
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl ColumnBindings {
    pub fn new(id: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: None,
            category: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, column: impl Into<String>) -> Self {
        self.name = Some(column.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, column: impl Into<String>) -> Self {
        self.category = Some(column.into());
        self
    }
}

/// Builds an entity dataset from a frame.
///
/// Rows with a blank identifier are skipped. Codes keep their surrounding
/// text since the matcher tests them as substrings.
pub fn entity_dataset_from_frame(
    df: &DataFrame,
    bindings: &ColumnBindings,
    label: &str,
) -> Result<EntityDataset> {
    let id_col = require_column(df, &bindings.id)?;
    let code_col = require_column(df, &bindings.code)?;
    let name_col = bindings
        .name
        .as_deref()
        .map(|n| require_column(df, n))
        .transpose()?;
    let category_col = bindings
        .category
        .as_deref()
        .map(|n| require_column(df, n))
        .transpose()?;

    fn cell(col: &Column, idx: usize) -> AnyValue<'_> {
        col.get(idx).unwrap_or(AnyValue::Null)
    }

    let mut records = Vec::with_capacity(df.height());
    let mut skipped = 0usize;
    for idx in 0..df.height() {
        let Some(id) = any_to_string_non_empty(cell(id_col, idx)) else {
            skipped += 1;
            continue;
        };
        let code = any_to_string(cell(code_col, idx)).trim().to_string();
        let mut record = EntityRecord::new(id, code);
        if let Some(col) = name_col
            && let Some(name) = any_to_string_non_empty(cell(col, idx))
        {
            record = record.with_name(name);
        }
        if let Some(col) = category_col
            && let Some(category) = any_to_string_non_empty(cell(col, idx))
        {
            record = record.with_category(category);
        }
        records.push(record);
    }

    debug!(
        label,
        records = records.len(),
        skipped_blank_ids = skipped,
        "entity dataset built"
    );
    Ok(EntityDataset::new(label, records))
}

/// Reads a CSV file into an entity dataset.
pub fn read_entity_dataset(
    path: &Path,
    bindings: &ColumnBindings,
    label: &str,
) -> Result<EntityDataset> {
    let df = read_csv(path)?;
    entity_dataset_from_frame(&df, bindings, label)
}
