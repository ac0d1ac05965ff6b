//! Key-checked entity tables.
//!
//! Each entity table has a uniqueness invariant, so insertion goes through
//! [`Table::insert_unique`] and duplicate keys are caught at the point of
//! insertion instead of silently overwriting an earlier record.

use std::borrow::Borrow;
use std::collections::btree_map::{Entry, Values};
use std::collections::BTreeMap;

/// An ordered map with insert-once semantics. Iteration is in key order,
/// which keeps report rows and derived listings deterministic.
#[derive(Debug, Clone)]
pub struct Table<K, V> {
    entries: BTreeMap<K, V>,
}

impl<K: Ord, V> Table<K, V> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Insert a new entry. Returns `false` and leaves the table untouched
    /// when the key is already registered.
    #[must_use]
    pub fn insert_unique(&mut self, key: K, value: V) -> bool {
        match self.entries.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.get(key)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.get_mut(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Fetch an existing entry or insert one built by `default`.
    ///
    /// For tables like courses where first sight of a key creates the
    /// entry; uniqueness-checked tables use [`Table::insert_unique`].
    pub fn get_or_insert_with(&mut self, key: K, default: impl FnOnce(&K) -> V) -> &mut V {
        match self.entries.entry(key) {
            Entry::Occupied(slot) => slot.into_mut(),
            Entry::Vacant(slot) => {
                let value = default(slot.key());
                slot.insert(value)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn values(&self) -> Values<'_, K, V> {
        self.entries.values()
    }

    pub fn iter(&self) -> std::collections::btree_map::Iter<'_, K, V> {
        self.entries.iter()
    }
}

impl<K: Ord, V> Default for Table<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
