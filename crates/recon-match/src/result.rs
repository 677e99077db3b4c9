//! Matcher output.

use std::collections::BTreeMap;

use recon_model::CorrespondenceMap;
use serde::{Deserialize, Serialize};

use crate::gates::{NumericClause, TextualClause};

/// Which clauses admitted a matched pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvidence {
    pub left: String,
    pub right: String,
    pub textual: TextualClause,
    pub numeric: NumericClause,
}

/// Result of one matcher run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Left identifier → right identifier, in match order.
    pub correspondence: CorrespondenceMap,
    /// Clause breakdown for each pair, same order as the correspondence.
    pub evidence: Vec<MatchEvidence>,
    /// Left identifiers without a counterpart, minus excluded ones.
    pub unmatched_left: Vec<String>,
    /// Right identifiers never claimed.
    pub unmatched_right: Vec<String>,
    /// Left identifiers dropped from the report by leading-token exclusion.
    pub excluded_left: Vec<String>,
    /// Leading token frequency of `unmatched_left`, for triage.
    pub leading_token_counts: BTreeMap<String, usize>,
    pub left_total: usize,
    pub right_total: usize,
}

/// Headline counts of a [`MatchResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub left_total: usize,
    pub right_total: usize,
    pub matched: usize,
    pub unmatched_left: usize,
    pub unmatched_right: usize,
    pub excluded_left: usize,
}

impl MatchResult {
    pub fn matched_count(&self) -> usize {
        self.correspondence.len()
    }

    /// True when nothing was left unmatched on either side.
    pub fn is_complete(&self) -> bool {
        self.unmatched_left.is_empty() && self.unmatched_right.is_empty()
    }

    #[must_use]
    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            left_total: self.left_total,
            right_total: self.right_total,
            matched: self.matched_count(),
            unmatched_left: self.unmatched_left.len(),
            unmatched_right: self.unmatched_right.len(),
            excluded_left: self.excluded_left.len(),
        }
    }

    /// Leading tokens sorted by descending frequency, then alphabetically.
    pub fn top_leading_tokens(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut tokens: Vec<(&str, usize)> = self
            .leading_token_counts
            .iter()
            .map(|(token, count)| (token.as_str(), *count))
            .collect();
        tokens.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        tokens.truncate(limit);
        tokens
    }
}
