//! Ordered, injective correspondence between two datasets.

use std::collections::BTreeSet;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ModelError, Result};

/// Left identifier → right identifier pairs in insertion order.
///
/// Every left key and every right value appears at most once across the
/// whole map. Serializes as a JSON object whose key order is the match order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrespondenceMap {
    pairs: Vec<(String, String)>,
    left: BTreeSet<String>,
    right: BTreeSet<String>,
}

impl CorrespondenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a pair, rejecting identifiers already consumed on either side.
    pub fn insert(&mut self, left: impl Into<String>, right: impl Into<String>) -> Result<()> {
        let left = left.into();
        let right = right.into();
        if self.left.contains(&left) {
            return Err(ModelError::DuplicateLeft { id: left });
        }
        if self.right.contains(&right) {
            return Err(ModelError::DuplicateRight { id: right });
        }
        self.left.insert(left.clone());
        self.right.insert(right.clone());
        self.pairs.push((left, right));
        Ok(())
    }

    pub fn get(&self, left: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(l, _)| l == left)
            .map(|(_, r)| r.as_str())
    }

    /// Reverse lookup.
    pub fn left_for(&self, right: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(_, r)| r == right)
            .map(|(l, _)| l.as_str())
    }

    pub fn contains_left(&self, left: &str) -> bool {
        self.left.contains(left)
    }

    pub fn contains_right(&self, right: &str) -> bool {
        self.right.contains(right)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(l, r)| (l.as_str(), r.as_str()))
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }
}

impl Serialize for CorrespondenceMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for (left, right) in &self.pairs {
            map.serialize_entry(left, right)?;
        }
        map.end()
    }
}

struct CorrespondenceVisitor;

impl<'de> Visitor<'de> for CorrespondenceVisitor {
    type Value = CorrespondenceMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping left identifiers to right identifiers")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = CorrespondenceMap::new();
        while let Some((left, right)) = access.next_entry::<String, String>()? {
            map.insert(left, right).map_err(serde::de::Error::custom)?;
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for CorrespondenceMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(CorrespondenceVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut map = CorrespondenceMap::new();
        map.insert("SE01 B1", "SE01-B1-010").unwrap();
        map.insert("SE02 B4", "SE02-B4-040").unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("SE01 B1"), Some("SE01-B1-010"));
        assert_eq!(map.left_for("SE02-B4-040"), Some("SE02 B4"));
        assert!(map.contains_left("SE02 B4"));
        assert!(!map.contains_right("missing"));
    }

    #[test]
    fn test_rejects_reused_left() {
        let mut map = CorrespondenceMap::new();
        map.insert("a", "x").unwrap();
        assert_eq!(
            map.insert("a", "y"),
            Err(ModelError::DuplicateLeft { id: "a".to_string() })
        );
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_rejects_reused_right() {
        let mut map = CorrespondenceMap::new();
        map.insert("a", "x").unwrap();
        assert_eq!(
            map.insert("b", "x"),
            Err(ModelError::DuplicateRight { id: "x".to_string() })
        );
        assert!(!map.contains_left("b"));
    }

    #[test]
    fn test_serializes_in_insertion_order() {
        let mut map = CorrespondenceMap::new();
        map.insert("zeta", "1").unwrap();
        map.insert("alpha", "2").unwrap();

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"zeta":"1","alpha":"2"}"#);

        let parsed: CorrespondenceMap = serde_json::from_str(&json).unwrap();
        let keys: Vec<&str> = parsed.iter().map(|(l, _)| l).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_deserialize_rejects_shared_right_value() {
        let result: std::result::Result<CorrespondenceMap, _> =
            serde_json::from_str(r#"{"a":"x","b":"x"}"#);
        assert!(result.is_err());
    }
}
