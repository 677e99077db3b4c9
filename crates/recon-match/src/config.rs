//! Matcher configuration.
//!
//! Every fixed table the matcher consults is passed in here rather than
//! living in module constants.

use std::collections::BTreeSet;

use recon_normalize::AliasTable;
use serde::{Deserialize, Serialize};

/// Default length boundary between "long" and "short" numeric codes.
pub const DEFAULT_SHORT_CODE_LEN: usize = 2;

/// Default exclusive bound on the numeric proximity clause.
pub const DEFAULT_PROXIMITY: u64 = 3;

/// Single-token replacement for the prefix containment clause.
///
/// Applies only to left identifiers starting with `prefix`: the identifier
/// with `from` replaced by `to` must then occur inside the right identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRule {
    pub prefix: String,
    pub from: String,
    pub to: String,
}

impl TokenRule {
    pub fn new(prefix: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    /// Rewritten identifier, or `None` when the prefix does not apply.
    pub fn rewrite(&self, identifier: &str) -> Option<String> {
        if !identifier.starts_with(&self.prefix) {
            return None;
        }
        if self.from.is_empty() {
            return Some(identifier.to_string());
        }
        Some(identifier.replace(&self.from, &self.to))
    }
}

/// Fixed tables and thresholds for [`crate::EntityMatcher`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Exception overrides applied to right identifiers before the code
    /// containment test.
    pub aliases: AliasTable,
    /// Prefix-scoped token replacement for left identifiers.
    pub token_rule: Option<TokenRule>,
    /// Right-side category that passes the textual gate unconditionally.
    pub sentinel_category: Option<String>,
    /// Leading tokens of left identifiers expected to have no counterpart.
    pub excluded_leading_tokens: BTreeSet<String>,
    /// Codes up to this many digits use the prefix clause instead of the
    /// containment clause.
    pub short_code_len: usize,
    /// Numeric codes closer than this are considered the same.
    pub proximity: u64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            aliases: AliasTable::default(),
            token_rule: None,
            sentinel_category: None,
            excluded_leading_tokens: BTreeSet::new(),
            short_code_len: DEFAULT_SHORT_CODE_LEN,
            proximity: DEFAULT_PROXIMITY,
        }
    }
}

impl MatcherConfig {
    #[must_use]
    pub fn with_aliases(mut self, aliases: AliasTable) -> Self {
        self.aliases = aliases;
        self
    }

    #[must_use]
    pub fn with_token_rule(mut self, rule: TokenRule) -> Self {
        self.token_rule = Some(rule);
        self
    }

    #[must_use]
    pub fn with_sentinel_category(mut self, category: impl Into<String>) -> Self {
        self.sentinel_category = Some(category.into());
        self
    }

    #[must_use]
    pub fn with_excluded_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_leading_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_proximity(mut self, proximity: u64) -> Self {
        self.proximity = proximity;
        self
    }

    pub fn is_excluded(&self, leading_token: &str) -> bool {
        self.excluded_leading_tokens.contains(leading_token)
    }
}
