//! Duplicate mnemonic detection
//!
//! The builder keeps sibling bindings that share a mnemonic (for example
//! `f` and `f-open`). A dispatcher can only ever reach the first of them,
//! so they are reported here for the user to resolve.
//!
//! Bindings are indexed by (parent path, mnemonic) in a HashMap; a conflict
//! exists when an index entry holds two or more bindings.

use std::collections::HashMap;
use std::fmt;

use crate::core::types::LeaderBinding;

/// Detects sibling bindings that share a mnemonic.
pub struct ConflictDetector {
    /// Maps (parent mnemonic path, key) to the descriptions bound there.
    bindings: HashMap<(String, char), Vec<String>>,
}

/// Two or more siblings bound to the same mnemonic.
#[derive(Clone, Debug, PartialEq)]
pub struct Conflict {
    /// Mnemonics leading to the sibling list; empty for the root level
    pub parent: String,

    /// The shared mnemonic
    pub key: char,

    /// Descriptions of every binding on this key, in display order
    pub descriptions: Vec<String>,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}: {}", self.parent, self.key, self.descriptions.join(" | "))
    }
}

impl ConflictDetector {
    /// Creates a new empty conflict detector.
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Indexes every binding of a tree.
    pub fn from_tree(bindings: &[LeaderBinding]) -> Self {
        let mut detector = Self::new();
        detector.add_level("", bindings);
        detector
    }

    fn add_level(&mut self, parent: &str, bindings: &[LeaderBinding]) {
        for binding in bindings {
            self.add_binding(parent, binding);

            if binding.is_group() {
                let path = format!("{}{}", parent, binding.key());
                self.add_level(&path, binding.children());
            }
        }
    }

    /// Adds a single binding under `parent` (children are not visited).
    pub fn add_binding(&mut self, parent: &str, binding: &LeaderBinding) {
        self.bindings
            .entry((parent.to_string(), binding.key()))
            .or_default()
            .push(binding.description().to_string());
    }

    /// Finds all conflicts, ordered by path.
    pub fn find_conflicts(&self) -> Vec<Conflict> {
        let mut conflicts: Vec<Conflict> = self
            .bindings
            .iter()
            .filter(|(_, descriptions)| descriptions.len() > 1)
            .map(|((parent, key), descriptions)| Conflict {
                parent: parent.clone(),
                key: *key,
                descriptions: descriptions.clone(),
            })
            .collect();

        conflicts.sort_by(|a, b| a.parent.cmp(&b.parent).then(a.key.cmp(&b.key)));
        conflicts
    }

    /// Returns true if `key` under `parent` has 2 or more bindings.
    pub fn has_conflict(&self, parent: &str, key: char) -> bool {
        self.bindings
            .get(&(parent.to_string(), key))
            .map(|descriptions| descriptions.len() > 1)
            .unwrap_or(false)
    }

    /// Returns the total number of bindings tracked.
    pub fn total_bindings(&self) -> usize {
        self.bindings.values().map(|v| v.len()).sum()
    }
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self::new()
    }
}
