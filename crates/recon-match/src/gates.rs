//! Textual and numeric gates of the matching predicate.
//!
//! A candidate pair matches only when both gates pass. Each gate reports the
//! first clause that passed so results can be explained afterwards.

use serde::{Deserialize, Serialize};

use crate::config::MatcherConfig;

/// Textual clause that admitted a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextualClause {
    /// Left code occurs inside the alias-normalized right identifier.
    CodeContained,
    /// Token-rewritten left identifier occurs inside the right identifier.
    PrefixedIdentifierContained,
    /// Right category equals the configured sentinel.
    SentinelCategory,
}

/// Numeric clause that admitted a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericClause {
    /// Long left digits occur inside the right digits.
    LongCodeContained,
    /// Right digits start with the short left digits.
    ShortCodePrefix,
    /// Both codes parse as integers closer than the proximity bound.
    Proximity,
}

/// Left-hand side of a candidate, with its digit extraction precomputed.
pub(crate) struct LeftCandidate<'a> {
    pub id: &'a str,
    pub code: &'a str,
    pub digits: String,
}

/// Right-hand side of a candidate, with alias and digit forms precomputed.
pub(crate) struct RightCandidate<'a> {
    pub id: &'a str,
    pub aliased_id: String,
    pub category: Option<&'a str>,
    pub digits: String,
}

pub(crate) fn textual_gate(
    left: &LeftCandidate<'_>,
    right: &RightCandidate<'_>,
    config: &MatcherConfig,
) -> Option<TextualClause> {
    if right.aliased_id.contains(left.code) {
        return Some(TextualClause::CodeContained);
    }
    if let Some(rule) = &config.token_rule
        && let Some(rewritten) = rule.rewrite(left.id)
        && right.id.contains(rewritten.as_str())
    {
        return Some(TextualClause::PrefixedIdentifierContained);
    }
    match (&config.sentinel_category, right.category) {
        (Some(sentinel), Some(category)) if sentinel == category => {
            Some(TextualClause::SentinelCategory)
        }
        _ => None,
    }
}

/// Numeric gate over digit-only codes.
///
/// An empty left code satisfies the short-prefix clause, and codes that do not
/// fit an integer fail the proximity clause instead of erroring. Leading zeros
/// vanish when parsing, so `"010"` and `"9"` are within proximity of each
/// other even though their digit strings share nothing.
pub(crate) fn numeric_gate(
    left_digits: &str,
    right_digits: &str,
    config: &MatcherConfig,
) -> Option<NumericClause> {
    let short = left_digits.len() <= config.short_code_len;
    if !short && right_digits.contains(left_digits) {
        return Some(NumericClause::LongCodeContained);
    }
    if short && right_digits.starts_with(left_digits) {
        return Some(NumericClause::ShortCodePrefix);
    }
    match (left_digits.parse::<u128>(), right_digits.parse::<u128>()) {
        (Ok(l), Ok(r)) if l.abs_diff(r) < u128::from(config.proximity) => {
            Some(NumericClause::Proximity)
        }
        _ => None,
    }
}
