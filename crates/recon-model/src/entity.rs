//! Entity records from a single source dataset.

use serde::{Deserialize, Serialize};

/// One row of a source registry, keyed by its identifier string.
///
/// Identity is the identifier alone. Two records from different datasets
/// are never assumed equal, even with identical identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Row key (domain identifier string).
    pub id: String,
    /// Code field; may mix letters, separators and digits.
    pub code: String,
    /// Optional free-text name.
    #[serde(default)]
    pub name: Option<String>,
    /// Optional category (e.g. substation name) used by sentinel rules.
    #[serde(default)]
    pub category: Option<String>,
}

impl EntityRecord {
    pub fn new(id: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: None,
            category: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// An ordered collection of entity records.
///
/// Row order is the dataset's natural order and is significant: the matcher
/// iterates it as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDataset {
    /// Human-readable source label used in logs and reports.
    pub label: String,
    pub records: Vec<EntityRecord>,
}

impl EntityDataset {
    pub fn new(label: impl Into<String>, records: Vec<EntityRecord>) -> Self {
        Self {
            label: label.into(),
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Identifiers in row order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.id.as_str())
    }

    /// First record with the given identifier.
    pub fn get(&self, id: &str) -> Option<&EntityRecord> {
        self.records.iter().find(|r| r.id == id)
    }
}
