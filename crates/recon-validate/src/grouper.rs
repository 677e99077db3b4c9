//! Device-tuple grouping.
//!
//! Channels whose identifiers share the `(A, B)` grouping key are redundant
//! recordings of the same device. Every unordered pair of positions inside a
//! group becomes a [`DeviceTuple`].

use std::collections::HashMap;

use recon_model::{DeviceTuple, GroupKey};
use tracing::{debug, warn};

/// Grouping keys in first-seen order, each with its member positions.
pub fn group_positions<S: AsRef<str>>(identifiers: &[S]) -> Vec<(GroupKey, Vec<usize>)> {
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<(GroupKey, Vec<usize>)> = Vec::new();
    let mut malformed = 0usize;

    for (position, identifier) in identifiers.iter().enumerate() {
        let key = GroupKey::from_identifier(identifier.as_ref());
        if key.is_sentinel() {
            malformed += 1;
        }
        match index.get(&key) {
            Some(&slot) => groups[slot].1.push(position),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![position]));
            }
        }
    }

    if malformed > 0 {
        warn!(
            malformed,
            "identifiers with fewer than 3 segments grouped under the empty key"
        );
    }
    groups
}

/// Builds every device tuple for an identifier list.
///
/// Output order follows the first appearance of each group, then position
/// order within it. A group of `k` members yields `k * (k - 1) / 2` tuples.
pub fn build_device_tuples<S: AsRef<str>>(identifiers: &[S]) -> Vec<DeviceTuple> {
    let groups = group_positions(identifiers);
    let mut tuples = Vec::new();
    for (_, positions) in &groups {
        for (i, &n) in positions.iter().enumerate() {
            for &m in &positions[i + 1..] {
                tuples.extend(DeviceTuple::new(n, m));
            }
        }
    }
    debug!(
        identifiers = identifiers.len(),
        groups = groups.len(),
        tuples = tuples.len(),
        "device tuples built"
    );
    tuples
}
