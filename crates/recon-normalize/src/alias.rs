//! Exact-substitution alias table.
//!
//! All keys are joined into one alternation so a single left-to-right pass
//! rewrites the text. Replacement output is never rescanned, and when two
//! keys match at the same position the one configured first wins.

use std::borrow::Cow;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::error::{NormalizeError, Result};

/// One alias substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRule {
    /// Literal text to find.
    pub from: String,
    /// Replacement text.
    pub to: String,
}

impl AliasRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Ordered alias rules plus their compiled combined pattern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<AliasRule>", into = "Vec<AliasRule>")]
pub struct AliasTable {
    rules: Vec<AliasRule>,
    pattern: Option<Regex>,
}

impl AliasTable {
    /// Compiles a table. Rules with an empty `from` are ignored; a later rule
    /// repeating an earlier key never fires.
    pub fn new(rules: Vec<AliasRule>) -> Result<Self> {
        let rules: Vec<AliasRule> = rules.into_iter().filter(|r| !r.from.is_empty()).collect();
        if rules.is_empty() {
            return Ok(Self::default());
        }
        let alternation = rules
            .iter()
            .map(|r| regex::escape(&r.from))
            .collect::<Vec<_>>()
            .join("|");
        let pattern =
            Regex::new(&alternation).map_err(|source| NormalizeError::AliasPattern { source })?;
        Ok(Self {
            rules,
            pattern: Some(pattern),
        })
    }

    pub fn rules(&self) -> &[AliasRule] {
        &self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rewrites every alias occurrence in `text`.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let Some(pattern) = &self.pattern else {
            return Cow::Borrowed(text);
        };
        pattern.replace_all(text, |caps: &Captures<'_>| {
            let matched = &caps[0];
            self.rules
                .iter()
                .find(|r| r.from == matched)
                .map_or_else(|| matched.to_string(), |r| r.to.clone())
        })
    }
}

impl PartialEq for AliasTable {
    fn eq(&self, other: &Self) -> bool {
        self.rules == other.rules
    }
}

impl TryFrom<Vec<AliasRule>> for AliasTable {
    type Error = NormalizeError;

    fn try_from(rules: Vec<AliasRule>) -> Result<Self> {
        Self::new(rules)
    }
}

impl From<AliasTable> for Vec<AliasRule> {
    fn from(table: AliasTable) -> Self {
        table.rules
    }
}

/// Applies `table` to `text`; see [`AliasTable::apply`].
pub fn apply_alias_table<'t>(text: &'t str, table: &AliasTable) -> Cow<'t, str> {
    table.apply(text)
}
