//! Greedy entity matcher.

use std::collections::HashSet;

use recon_model::{EntityDataset, EntityRecord, leading_token};
use recon_normalize::extract_numeric;
use tracing::{debug, debug_span, trace};

use crate::config::MatcherConfig;
use crate::gates::{LeftCandidate, RightCandidate, numeric_gate, textual_gate};
use crate::result::{MatchEvidence, MatchResult};

/// Identifiers still eligible on one side of the match.
///
/// Claiming is by identifier, so duplicate identifiers within a dataset are
/// consumed together.
#[derive(Default)]
struct WorkingSet<'a> {
    claimed: HashSet<&'a str>,
}

impl<'a> WorkingSet<'a> {
    fn is_eligible(&self, id: &str) -> bool {
        !self.claimed.contains(id)
    }

    fn claim(&mut self, id: &'a str) {
        self.claimed.insert(id);
    }
}

/// Pairs dataset-A rows with dataset-B rows.
///
/// Iterates A in row order and, for each still-eligible A row, scans the
/// still-eligible B rows in row order; the first B row passing both gates is
/// taken and both identifiers leave the pool. Reordering B can therefore
/// change which candidate wins when several pass.
#[derive(Debug, Clone, Default)]
pub struct EntityMatcher {
    config: MatcherConfig,
}

impl EntityMatcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Evaluates a single candidate pair against both gates.
    ///
    /// Returns `None` when either gate fails.
    pub fn evaluate(&self, left: &EntityRecord, right: &EntityRecord) -> Option<MatchEvidence> {
        let left = self.left_candidate(left);
        let right = self.right_candidate(right);
        self.evaluate_prepared(&left, &right)
    }

    /// Runs the full greedy pass.
    pub fn run(&self, left: &EntityDataset, right: &EntityDataset) -> MatchResult {
        let span = debug_span!(
            "match",
            left = %left.label,
            right = %right.label,
            left_rows = left.len(),
            right_rows = right.len()
        );
        let _guard = span.enter();

        let right_candidates: Vec<RightCandidate<'_>> = right
            .records
            .iter()
            .map(|r| self.right_candidate(r))
            .collect();

        let mut left_pool = WorkingSet::default();
        let mut right_pool = WorkingSet::default();
        let mut result = MatchResult {
            left_total: left.len(),
            right_total: right.len(),
            ..MatchResult::default()
        };

        for record in &left.records {
            if !left_pool.is_eligible(&record.id) {
                continue;
            }
            let candidate = self.left_candidate(record);
            for right_candidate in &right_candidates {
                if !right_pool.is_eligible(right_candidate.id) {
                    continue;
                }
                let Some(evidence) = self.evaluate_prepared(&candidate, right_candidate) else {
                    continue;
                };
                if result
                    .correspondence
                    .insert(candidate.id, right_candidate.id)
                    .is_err()
                {
                    continue;
                }
                trace!(
                    left = candidate.id,
                    right = right_candidate.id,
                    textual = ?evidence.textual,
                    numeric = ?evidence.numeric,
                    "matched"
                );
                left_pool.claim(candidate.id);
                right_pool.claim(right_candidate.id);
                result.evidence.push(evidence);
                break;
            }
        }

        for record in &left.records {
            if !left_pool.is_eligible(&record.id) {
                continue;
            }
            let token = leading_token(&record.id);
            if self.config.is_excluded(token) {
                result.excluded_left.push(record.id.clone());
                continue;
            }
            *result
                .leading_token_counts
                .entry(token.to_string())
                .or_insert(0) += 1;
            result.unmatched_left.push(record.id.clone());
        }

        result.unmatched_right = right
            .records
            .iter()
            .filter(|r| right_pool.is_eligible(&r.id))
            .map(|r| r.id.clone())
            .collect();

        debug!(
            matched = result.matched_count(),
            unmatched_left = result.unmatched_left.len(),
            unmatched_right = result.unmatched_right.len(),
            excluded_left = result.excluded_left.len(),
            "match pass complete"
        );
        result
    }

    fn left_candidate<'a>(&self, record: &'a EntityRecord) -> LeftCandidate<'a> {
        LeftCandidate {
            id: &record.id,
            code: &record.code,
            digits: extract_numeric(&record.code),
        }
    }

    fn right_candidate<'a>(&self, record: &'a EntityRecord) -> RightCandidate<'a> {
        RightCandidate {
            id: &record.id,
            aliased_id: self.config.aliases.apply(&record.id).into_owned(),
            category: record.category.as_deref(),
            digits: extract_numeric(&record.code),
        }
    }

    fn evaluate_prepared(
        &self,
        left: &LeftCandidate<'_>,
        right: &RightCandidate<'_>,
    ) -> Option<MatchEvidence> {
        let textual = textual_gate(left, right, &self.config)?;
        let numeric = numeric_gate(&left.digits, &right.digits, &self.config)?;
        Some(MatchEvidence {
            left: left.id.to_string(),
            right: right.id.to_string(),
            textual,
            numeric,
        })
    }
}
