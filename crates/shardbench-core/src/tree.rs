// Shardbench - benchmark metrics aggregation toolkit
//
// Copyright (c) 2026 Shardbench contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Path-keyed metric tree.
//!
//! [`MetricTree`] is the canonical container for "a value identified by a
//! dotted path" used by every pipeline stage. Leaves are tagged with an
//! explicit [`TreeEntry::Leaf`] variant, so a leaf whose value is itself
//! mapping-shaped (e.g. a per-shard map) can never be mistaken for an
//! internal node during traversal or serialization.

use crate::error::{BenchError, BenchResult};
use crate::path::MetricPath;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// One entry in a [`MetricTree`]: either a leaf value or an internal node.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeEntry<T> {
    /// A stored value, possibly compound.
    Leaf(T),
    /// An internal node with named children.
    Node(BTreeMap<String, TreeEntry<T>>),
}

/// Generic mapping from a [`MetricPath`] to a leaf value.
///
/// A path resolves to exactly one of: nothing, an internal node, or a leaf.
/// Reading a path that ends at an internal node is reported as "not found";
/// inserting across a leaf/subtree boundary is a hard
/// [`BenchError::PathConflict`], never a silent overwrite.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricTree<T> {
    root: BTreeMap<String, TreeEntry<T>>,
}

impl<T> Default for MetricTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MetricTree<T> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            root: BTreeMap::new(),
        }
    }

    /// Build a tree from an already-shaped entry mapping.
    ///
    /// Used by the serialization layer when reconstructing a tree from its
    /// external representation.
    pub fn from_entries(root: BTreeMap<String, TreeEntry<T>>) -> Self {
        Self { root }
    }

    /// The underlying entry mapping, for serialization.
    pub fn entries(&self) -> &BTreeMap<String, TreeEntry<T>> {
        &self.root
    }

    /// Store `value` at `path`, creating intermediate nodes as needed.
    ///
    /// Overwrites an existing leaf at the same path (last write wins).
    /// Fails if a path prefix already holds a leaf, or if the full path
    /// holds a subtree.
    pub fn set(&mut self, path: &MetricPath, value: T) -> BenchResult<()> {
        let segments = path.segments();
        let last = segments.len() - 1;

        let mut current = &mut self.root;
        for segment in &segments[..last] {
            let entry = current
                .entry(segment.clone())
                .or_insert_with(|| TreeEntry::Node(BTreeMap::new()));
            match entry {
                TreeEntry::Node(children) => current = children,
                TreeEntry::Leaf(_) => {
                    return Err(BenchError::path_conflict(
                        path.metric_name(),
                        format!("segment '{}' is a leaf, expected subtree", segment),
                    ));
                }
            }
        }

        match current.entry(segments[last].clone()) {
            Entry::Vacant(vacant) => {
                vacant.insert(TreeEntry::Leaf(value));
                Ok(())
            }
            Entry::Occupied(mut occupied) => match occupied.get_mut() {
                TreeEntry::Leaf(existing) => {
                    *existing = value;
                    Ok(())
                }
                TreeEntry::Node(_) => Err(BenchError::path_conflict(
                    path.metric_name(),
                    "expected leaf, found subtree",
                )),
            },
        }
    }

    /// Look up the leaf value at `path` with exact segment equality.
    ///
    /// Returns `None` when the path is absent or ends at an internal node.
    pub fn get(&self, path: &MetricPath) -> Option<&T> {
        let mut current = &self.root;
        let segments = path.segments();
        let last = segments.len() - 1;

        for segment in &segments[..last] {
            match current.get(segment) {
                Some(TreeEntry::Node(children)) => current = children,
                _ => return None,
            }
        }

        match current.get(&segments[last]) {
            Some(TreeEntry::Leaf(value)) => Some(value),
            _ => None,
        }
    }

    /// Look up the leaf value at `path` using a pluggable per-segment
    /// equality predicate.
    ///
    /// The comparator receives `(stored_key, probe_segment)` for every key
    /// at the current level. Zero matches at any level is "not found"; more
    /// than one match at the same level is an [`BenchError::AmbiguousMatch`]
    /// error rather than an arbitrary pick. See [`wildcard_eq`] for the
    /// motivating comparator.
    pub fn get_with<F>(&self, path: &MetricPath, comparator: F) -> BenchResult<Option<&T>>
    where
        F: Fn(&str, &str) -> bool,
    {
        let mut current = &self.root;
        let segments = path.segments();
        let last = segments.len() - 1;

        for (depth, segment) in segments.iter().enumerate() {
            let matches: Vec<&String> = current
                .keys()
                .filter(|key| comparator(key, segment))
                .collect();

            let key = match matches.as_slice() {
                [] => return Ok(None),
                [single] => (*single).clone(),
                _ => {
                    return Err(BenchError::AmbiguousMatch {
                        segment: segment.clone(),
                        path: path.metric_name(),
                        candidates: matches.iter().map(|k| (*k).clone()).collect(),
                    });
                }
            };

            match current.get(&key) {
                Some(TreeEntry::Node(children)) if depth < last => current = children,
                Some(TreeEntry::Leaf(value)) if depth == last => return Ok(Some(value)),
                // Leaf met before the last segment, or node at the last
                // segment: the probe path does not address a leaf.
                _ => return Ok(None),
            }
        }

        Ok(None)
    }

    /// Insert `default` at `path` unless a leaf already exists there, and
    /// return a mutable reference to the stored value.
    ///
    /// Idempotent with respect to repeated calls with the same path: the
    /// second call returns the value inserted by the first, leaving the
    /// tree unchanged.
    pub fn setdefault(&mut self, path: &MetricPath, default: T) -> BenchResult<&mut T> {
        let segments = path.segments();
        let last = segments.len() - 1;

        let mut current = &mut self.root;
        for segment in &segments[..last] {
            let entry = current
                .entry(segment.clone())
                .or_insert_with(|| TreeEntry::Node(BTreeMap::new()));
            match entry {
                TreeEntry::Node(children) => current = children,
                TreeEntry::Leaf(_) => {
                    return Err(BenchError::path_conflict(
                        path.metric_name(),
                        format!("segment '{}' is a leaf, expected subtree", segment),
                    ));
                }
            }
        }

        let slot = match current.entry(segments[last].clone()) {
            Entry::Vacant(vacant) => vacant.insert(TreeEntry::Leaf(default)),
            Entry::Occupied(occupied) => occupied.into_mut(),
        };
        match slot {
            TreeEntry::Leaf(value) => Ok(value),
            TreeEntry::Node(_) => Err(BenchError::path_conflict(
                path.metric_name(),
                "expected leaf, found subtree",
            )),
        }
    }

    /// Whether `path` resolves to a leaf.
    pub fn contains(&self, path: &MetricPath) -> bool {
        self.get(path).is_some()
    }

    /// All `(path, value)` pairs reachable at a leaf, in depth-first order.
    ///
    /// The ordering follows the sorted key order of the internal maps;
    /// callers must not attach meaning to it.
    pub fn items(&self) -> Vec<(MetricPath, &T)> {
        let mut out = Vec::new();
        let mut prefix = Vec::new();
        collect_items(&self.root, &mut prefix, &mut out);
        out
    }

    /// Number of leaves in the tree.
    pub fn len(&self) -> usize {
        count_leaves(&self.root)
    }

    /// Whether the tree holds no leaves. A tree consisting only of empty
    /// internal nodes is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn collect_items<'a, T>(
    node: &'a BTreeMap<String, TreeEntry<T>>,
    prefix: &mut Vec<String>,
    out: &mut Vec<(MetricPath, &'a T)>,
) {
    for (key, entry) in node {
        prefix.push(key.clone());
        match entry {
            TreeEntry::Leaf(value) => out.push((MetricPath::from_vec(prefix.clone()), value)),
            TreeEntry::Node(children) => collect_items(children, prefix, out),
        }
        prefix.pop();
    }
}

fn count_leaves<T>(node: &BTreeMap<String, TreeEntry<T>>) -> usize {
    node.values()
        .map(|entry| match entry {
            TreeEntry::Leaf(_) => 1,
            TreeEntry::Node(children) => count_leaves(children),
        })
        .sum()
}

/// Segment comparator where a literal `*` in either the stored key or the
/// probe segment matches anything.
///
/// Used by metadata lookup only; the aggregation pipeline always matches
/// segments exactly.
pub fn wildcard_eq(stored: &str, probe: &str) -> bool {
    stored == "*" || probe == "*" || stored == probe
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(segments: &[&str]) -> MetricPath {
        MetricPath::from_segments(segments).unwrap()
    }

    // ==================== set / get ====================

    #[test]
    fn test_set_get_round_trip() {
        let mut tree = MetricTree::new();
        tree.set(&path(&["latency", "p99"]), 42).unwrap();
        assert_eq!(tree.get(&path(&["latency", "p99"])), Some(&42));
    }

    #[test]
    fn test_get_absent_path() {
        let tree: MetricTree<i32> = MetricTree::new();
        assert_eq!(tree.get(&path(&["missing"])), None);
    }

    #[test]
    fn test_get_internal_node_is_not_found() {
        let mut tree = MetricTree::new();
        tree.set(&path(&["a", "b"]), 1).unwrap();
        // "a" is an internal node, not a leaf
        assert_eq!(tree.get(&path(&["a"])), None);
        assert!(!tree.contains(&path(&["a"])));
    }

    #[test]
    fn test_get_past_leaf_is_not_found() {
        let mut tree = MetricTree::new();
        tree.set(&path(&["a"]), 1).unwrap();
        assert_eq!(tree.get(&path(&["a", "b"])), None);
    }

    #[test]
    fn test_set_overwrites_leaf() {
        let mut tree = MetricTree::new();
        tree.set(&path(&["m"]), 1).unwrap();
        tree.set(&path(&["m"]), 2).unwrap();
        assert_eq!(tree.get(&path(&["m"])), Some(&2));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_set_through_leaf_conflicts() {
        let mut tree = MetricTree::new();
        tree.set(&path(&["a"]), 1).unwrap();
        let err = tree.set(&path(&["a", "b"]), 2).unwrap_err();
        assert!(matches!(err, BenchError::PathConflict { .. }));
    }

    #[test]
    fn test_set_onto_subtree_conflicts() {
        let mut tree = MetricTree::new();
        tree.set(&path(&["a", "b"]), 1).unwrap();
        let err = tree.set(&path(&["a"]), 2).unwrap_err();
        assert!(matches!(err, BenchError::PathConflict { .. }));
        // The subtree is untouched by the failed insert
        assert_eq!(tree.get(&path(&["a", "b"])), Some(&1));
    }

    // ==================== setdefault ====================

    #[test]
    fn test_setdefault_inserts_new_value() {
        let mut tree = MetricTree::new();
        let value = tree.setdefault(&path(&["m", "n"]), 30).unwrap();
        assert_eq!(*value, 30);
        assert_eq!(tree.get(&path(&["m", "n"])), Some(&30));
    }

    #[test]
    fn test_setdefault_keeps_existing_value() {
        let mut tree = MetricTree::new();
        tree.set(&path(&["x", "y"]), 10).unwrap();
        let value = tree.setdefault(&path(&["x", "y"]), 20).unwrap();
        assert_eq!(*value, 10);
        assert_eq!(tree.get(&path(&["x", "y"])), Some(&10));
    }

    #[test]
    fn test_setdefault_is_idempotent() {
        let mut tree = MetricTree::new();
        tree.setdefault(&path(&["k"]), 1).unwrap();
        let second = tree.setdefault(&path(&["k"]), 99).unwrap();
        assert_eq!(*second, 1);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_setdefault_returns_mutable_reference() {
        let mut tree: MetricTree<Vec<i32>> = MetricTree::new();
        tree.setdefault(&path(&["samples"]), Vec::new())
            .unwrap()
            .push(5);
        tree.setdefault(&path(&["samples"]), Vec::new())
            .unwrap()
            .push(6);
        assert_eq!(tree.get(&path(&["samples"])), Some(&vec![5, 6]));
    }

    #[test]
    fn test_setdefault_on_subtree_conflicts() {
        let mut tree = MetricTree::new();
        tree.set(&path(&["a", "b"]), 1).unwrap();
        let err = tree.setdefault(&path(&["a"]), 2).unwrap_err();
        assert!(matches!(err, BenchError::PathConflict { .. }));
    }

    // ==================== get_with / wildcard ====================

    #[test]
    fn test_wildcard_in_stored_key_matches() {
        let mut tree = MetricTree::new();
        tree.set(&path(&["cpu", "*"]), 7).unwrap();
        let found = tree.get_with(&path(&["cpu", "load"]), wildcard_eq).unwrap();
        assert_eq!(found, Some(&7));
    }

    #[test]
    fn test_wildcard_in_probe_key_matches() {
        let mut tree = MetricTree::new();
        tree.set(&path(&["cpu", "load"]), 7).unwrap();
        let found = tree.get_with(&path(&["cpu", "*"]), wildcard_eq).unwrap();
        assert_eq!(found, Some(&7));
    }

    #[test]
    fn test_ambiguous_wildcard_match_fails_loudly() {
        let mut tree = MetricTree::new();
        tree.set(&path(&["cpu", "a"]), 1).unwrap();
        tree.set(&path(&["cpu", "*"]), 2).unwrap();
        let err = tree
            .get_with(&path(&["cpu", "a"]), wildcard_eq)
            .unwrap_err();
        assert!(matches!(err, BenchError::AmbiguousMatch { .. }));
    }

    #[test]
    fn test_get_with_zero_matches_is_not_found() {
        let mut tree = MetricTree::new();
        tree.set(&path(&["cpu", "a"]), 1).unwrap();
        let found = tree.get_with(&path(&["mem", "a"]), wildcard_eq).unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn test_get_with_default_equality() {
        let mut tree = MetricTree::new();
        tree.set(&path(&["a", "b"]), 3).unwrap();
        let found = tree.get_with(&path(&["a", "b"]), |k, p| k == p).unwrap();
        assert_eq!(found, Some(&3));
    }

    #[test]
    fn test_get_with_node_at_last_segment_is_not_found() {
        let mut tree = MetricTree::new();
        tree.set(&path(&["a", "b", "c"]), 1).unwrap();
        let found = tree.get_with(&path(&["a", "b"]), wildcard_eq).unwrap();
        assert_eq!(found, None);
    }

    // ==================== items / len ====================

    #[test]
    fn test_items_yields_all_leaves() {
        let mut tree = MetricTree::new();
        tree.set(&path(&["a", "b"]), 1).unwrap();
        tree.set(&path(&["a", "c"]), 2).unwrap();
        tree.set(&path(&["d"]), 3).unwrap();

        let items: std::collections::BTreeSet<(MetricPath, i32)> = tree
            .items()
            .into_iter()
            .map(|(p, v)| (p, *v))
            .collect();
        let expected: std::collections::BTreeSet<(MetricPath, i32)> = [
            (path(&["a", "b"]), 1),
            (path(&["a", "c"]), 2),
            (path(&["d"]), 3),
        ]
        .into_iter()
        .collect();
        assert_eq!(items, expected);
    }

    #[test]
    fn test_len_counts_leaves_not_nodes() {
        let mut tree = MetricTree::new();
        tree.set(&path(&["a", "b", "c"]), 1).unwrap();
        tree.set(&path(&["a", "b", "d"]), 2).unwrap();
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_empty_tree() {
        let tree: MetricTree<i32> = MetricTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.items().is_empty());
    }

    #[test]
    fn test_empty_internal_node_counts_as_empty() {
        let mut entries = BTreeMap::new();
        entries.insert("io".to_string(), TreeEntry::<i32>::Node(BTreeMap::new()));
        let tree = MetricTree::from_entries(entries);
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert!(tree.items().is_empty());
    }

    #[test]
    fn test_compound_leaf_value_is_not_a_node() {
        use std::collections::BTreeMap;
        let mut tree: MetricTree<BTreeMap<u32, i64>> = MetricTree::new();
        let mut shards = BTreeMap::new();
        shards.insert(0, 10);
        shards.insert(1, 20);
        tree.set(&path(&["m", "x"]), shards.clone()).unwrap();

        // The compound value lives at ("m","x"); the tree does not descend
        // into it.
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get(&path(&["m", "x"])), Some(&shards));
        assert_eq!(tree.get(&path(&["m", "x", "0"])), None);
    }

    // ==================== wildcard_eq ====================

    #[test]
    fn test_wildcard_eq() {
        assert!(wildcard_eq("*", "anything"));
        assert!(wildcard_eq("anything", "*"));
        assert!(wildcard_eq("same", "same"));
        assert!(!wildcard_eq("a", "b"));
    }
}
