//! Code normalization applied before entity matching.
//!
//! - [`extract_numeric`]: digits of an identifier code, in order
//! - [`strip_diacritics`]: accent removal for Latin text
//! - [`AliasTable`]: simultaneous substring substitution of known aliases

mod alias;
mod error;
mod text;

pub use alias::{AliasRule, AliasTable, apply_alias_table};
pub use error::{NormalizeError, Result};
pub use text::{extract_numeric, has_accented_vowel, strip_diacritics};
