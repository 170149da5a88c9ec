//! Insertion-ordered unique sequence.
//!
//! Every output category (components, pipelines, each file-type bucket) is
//! one `OrderedUniqueSet`: the position of a value is the position of the
//! first input path that produced it, and re-insertion is a no-op.

use std::collections::HashSet;
use std::hash::Hash;

use serde::ser::{Serialize, Serializer};

/// A sequence that preserves first-seen order and rejects re-insertion.
///
/// `insert` is the only mutator. Backed by a `Vec` for ordering plus a
/// `HashSet` membership index so insertion stays O(1).
#[derive(Debug, Clone)]
pub struct OrderedUniqueSet<T> {
    items: Vec<T>,
    seen: HashSet<T>,
}

impl<T> Default for OrderedUniqueSet<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
        }
    }
}

impl<T: Clone + Eq + Hash> OrderedUniqueSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value if absent. Returns `true` if the value was added,
    /// `false` if it was already present.
    pub fn insert(&mut self, value: T) -> bool {
        if self.seen.contains(&value) {
            return false;
        }
        self.seen.insert(value.clone());
        self.items.push(value);
        true
    }

    pub fn contains(&self, value: &T) -> bool {
        self.seen.contains(value)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Members in first-seen order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T: Serialize> Serialize for OrderedUniqueSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}

impl<T: Clone + Eq + Hash> FromIterator<T> for OrderedUniqueSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}
