#![deny(unsafe_code)]

//! Entity matching between two differently-keyed registries.
//!
//! The [`EntityMatcher`] pairs dataset-A rows with dataset-B rows through a
//! textual gate and a numeric gate. Matching is greedy: rows are visited in
//! their natural order (A outer, B inner) and the first candidate passing both
//! gates is taken, removing both identifiers from further consideration. The
//! result is order-dependent and not a maximum-weight assignment; ties go to
//! the first candidate encountered.
//!
//! [`FuzzyMatcher`] is a separate name-list matcher built on character-level
//! similarity, for sources that share no codes at all.
//!
//! # Example
//!
//! ```
//! use recon_match::{EntityMatcher, MatcherConfig};
//! use recon_model::{EntityDataset, EntityRecord};
//!
//! let left = EntityDataset::new("collected", vec![EntityRecord::new("SE01:BAY:10:X", "010")]);
//! let right = EntityDataset::new(
//!     "registry",
//!     vec![EntityRecord::new("SE01-BAY-010-extra", "10").with_category("normal")],
//! );
//!
//! let result = EntityMatcher::new(MatcherConfig::default()).run(&left, &right);
//! assert_eq!(result.correspondence.get("SE01:BAY:10:X"), Some("SE01-BAY-010-extra"));
//! ```

mod config;
mod engine;
mod fuzzy;
mod gates;
mod result;

pub use config::{MatcherConfig, TokenRule};
pub use engine::EntityMatcher;
pub use fuzzy::{FuzzyConfig, FuzzyMatch, FuzzyMatcher};
pub use gates::{NumericClause, TextualClause};
pub use result::{MatchEvidence, MatchResult, MatchSummary};
