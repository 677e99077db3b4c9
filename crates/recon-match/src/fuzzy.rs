//! Fuzzy name-list matching.
//!
//! Used when two sources share no usable codes and only their display names
//! can be compared. Each left name takes the most similar right name that is
//! still unclaimed; the similarity is the indel ratio scaled to 0–100.

use std::collections::HashSet;

use rapidfuzz::distance::indel;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default number of leading characters ignored on right names.
pub const DEFAULT_SKIP_CHARS: usize = 2;

/// Default reporting threshold (0–100).
pub const DEFAULT_THRESHOLD: f64 = 80.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzyConfig {
    /// Leading characters dropped from every right name before scoring
    /// (right-hand sources prefix names with a fixed-width tag).
    pub skip_chars: usize,
    /// Scores at or above this are flagged as accepted.
    pub threshold: f64,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            skip_chars: DEFAULT_SKIP_CHARS,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Best right-hand candidate for one left name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyMatch {
    pub left: String,
    /// `None` when no unclaimed right name scored above zero.
    pub right: Option<String>,
    /// Similarity in 0–100.
    pub score: f64,
    pub accepted: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FuzzyMatcher {
    config: FuzzyConfig,
}

impl FuzzyMatcher {
    pub fn new(config: FuzzyConfig) -> Self {
        Self { config }
    }

    /// Similarity of `left` against `right` with the configured skip applied.
    ///
    /// Whole points only, rounded half to even, so near-equal candidates tie
    /// and the earlier one keeps the match.
    pub fn score(&self, left: &str, right: &str) -> f64 {
        let skipped: String = right.chars().skip(self.config.skip_chars).collect();
        (indel::normalized_similarity(left.chars(), skipped.chars()) * 100.0).round_ties_even()
    }

    /// Matches every left name, greedily and in input order.
    ///
    /// Lines are trimmed and blank lines dropped. The best candidate is
    /// claimed even when it falls below the threshold; among equal scores the
    /// earliest right name wins. Results are sorted by score, highest first.
    pub fn match_names<L, R>(&self, left: &[L], right: &[R]) -> Vec<FuzzyMatch>
    where
        L: AsRef<str>,
        R: AsRef<str>,
    {
        let left: Vec<&str> = non_blank(left);
        let right: Vec<&str> = non_blank(right);
        let mut claimed: HashSet<usize> = HashSet::new();
        let mut matches = Vec::with_capacity(left.len());

        for name in left {
            let mut best: Option<(usize, f64)> = None;
            for (idx, candidate) in right.iter().enumerate() {
                if claimed.contains(&idx) {
                    continue;
                }
                let score = self.score(name, candidate);
                let best_score = best.map_or(0.0, |(_, s)| s);
                if score > best_score {
                    best = Some((idx, score));
                }
            }
            if let Some((idx, _)) = best {
                claimed.insert(idx);
            }
            let score = best.map_or(0.0, |(_, s)| s);
            matches.push(FuzzyMatch {
                left: name.to_string(),
                right: best.map(|(idx, _)| right[idx].to_string()),
                score,
                accepted: score >= self.config.threshold,
            });
        }

        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        debug!(
            total = matches.len(),
            accepted = matches.iter().filter(|m| m.accepted).count(),
            "fuzzy match complete"
        );
        matches
    }
}

fn non_blank<S: AsRef<str>>(lines: &[S]) -> Vec<&str> {
    lines
        .iter()
        .map(|l| l.as_ref().trim())
        .filter(|l| !l.is_empty())
        .collect()
}
