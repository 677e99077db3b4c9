//! Colon-delimited identifier helpers.
//!
//! Identifiers look like `"device:group:site:code:extra"`. Segment position is
//! significant, so every helper here works on trimmed positional segments.

use serde::{Deserialize, Serialize};

/// Identifier delimiter.
pub const SEGMENT_DELIMITER: char = ':';

/// Grouping key of a channel identifier: second-to-last (`a`) and
/// third-to-last (`b`) segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupKey {
    pub a: String,
    pub b: String,
}

impl GroupKey {
    /// Key shared by every identifier with fewer than three segments.
    pub fn sentinel() -> Self {
        Self {
            a: String::new(),
            b: String::new(),
        }
    }

    /// Derives the key of an identifier, degrading to [`GroupKey::sentinel`]
    /// when the identifier has fewer than three segments.
    pub fn from_identifier(identifier: &str) -> Self {
        let parts = segments(identifier);
        if parts.len() < 3 {
            return Self::sentinel();
        }
        Self {
            a: parts[parts.len() - 2].to_string(),
            b: parts[parts.len() - 3].to_string(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.a.is_empty() && self.b.is_empty()
    }
}

/// Splits an identifier on `:` and trims every segment.
pub fn segments(identifier: &str) -> Vec<&str> {
    identifier.split(SEGMENT_DELIMITER).map(str::trim).collect()
}

/// First whitespace-delimited token, or `""` for blank input.
pub fn leading_token(identifier: &str) -> &str {
    identifier.split_whitespace().next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_key_uses_second_and_third_to_last() {
        let key = GroupKey::from_identifier("device:group:site:code:extra");
        assert_eq!(key.a, "code");
        assert_eq!(key.b, "site");
    }

    #[test]
    fn test_group_key_trims_segments() {
        let key = GroupKey::from_identifier("dev : SE01 : B2 : x");
        assert_eq!(key.a, "B2");
        assert_eq!(key.b, "SE01");
    }

    #[test]
    fn test_group_key_short_identifier_is_sentinel() {
        assert!(GroupKey::from_identifier("a:b").is_sentinel());
        assert!(GroupKey::from_identifier("plain").is_sentinel());
        assert!(GroupKey::from_identifier("").is_sentinel());
    }

    #[test]
    fn test_exactly_three_segments() {
        let key = GroupKey::from_identifier("x:y:z");
        assert_eq!(key.a, "y");
        assert_eq!(key.b, "x");
    }

    #[test]
    fn test_leading_token() {
        assert_eq!(leading_token("CHIMBOTE 220 kV"), "CHIMBOTE");
        assert_eq!(leading_token("   padded name"), "padded");
        assert_eq!(leading_token("   "), "");
    }
}
