//! DenseIndex: dense key order plus key→slot index, with O(1) swap-removal.
//!
//! Keys live in a gap-free `Vec<K>` so that any slot in `0..len` can be
//! addressed directly (random selection needs exactly that). A hash index
//! records each key's slot so removal does not need a linear search.
//! Removing a key moves the last key into the vacated slot and truncates,
//! so only one index entry is rewritten per removal.
//!
//! Invariants (between calls):
//! - `order.len() == position.len()`.
//! - For every slot `i`, `position[order[i]] == i`.
//! - No key appears twice in `order`.

use crate::error::{InsertError, InvariantError};
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use std::collections::hash_map::RandomState;

pub struct DenseIndex<K, S = RandomState> {
    order: Vec<K>,
    position: HashMap<K, usize, S>,
}

impl<K> DenseIndex<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<K> Default for DenseIndex<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S> DenseIndex<K, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(0, hasher)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            order: Vec::with_capacity(capacity),
            position: HashMap::with_capacity_and_hasher(capacity, hasher),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Key stored at `slot`, or `None` when `slot >= len`.
    #[inline]
    pub fn get(&self, slot: usize) -> Option<&K> {
        self.order.get(slot)
    }

    pub fn position<Q>(&self, q: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.position.get(q).copied()
    }

    pub fn contains<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.position.contains_key(q)
    }

    /// Appends `key` at slot `len` and returns that slot.
    ///
    /// A key that is already live is rejected and the index is left
    /// unchanged.
    pub fn push(&mut self, key: K) -> Result<usize, InsertError> {
        let slot = self.order.len();
        match self.position.entry(key) {
            Entry::Occupied(_) => return Err(InsertError::DuplicateKey),
            Entry::Vacant(v) => {
                self.order.push(v.key().clone());
                v.insert(slot);
            }
        }
        tracing::trace!(slot, len = self.order.len(), "dense index push");
        Ok(slot)
    }

    /// Removes `q` by moving the last key into its slot.
    ///
    /// Returns the slot the key occupied, or `None` if it was not present.
    /// When the removed key already held the last slot nothing moves.
    pub fn swap_remove<Q>(&mut self, q: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (_key, slot) = self.position.remove_entry(q)?;
        let _removed = self.order.swap_remove(slot);
        debug_assert!(_removed == _key);

        // `slot` is still in bounds only if a tail key was moved into it.
        if let Some(moved) = self.order.get(slot) {
            if let Some(p) = self.position.get_mut(moved) {
                *p = slot;
            }
            tracing::trace!(slot, len = self.order.len(), "dense index swap-remove");
        } else {
            tracing::trace!(slot, len = self.order.len(), "dense index pop");
        }
        Some(slot)
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.position.clear();
    }

    pub fn reserve(&mut self, additional: usize) {
        self.order.reserve(additional);
        self.position.reserve(additional);
    }

    /// Keys in slot order. The order is arbitrary and changes on removal.
    pub fn iter(&self) -> core::slice::Iter<'_, K> {
        self.order.iter()
    }

    /// Full O(n) consistency check of the order/position pair.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.order.len() != self.position.len() {
            return Err(InvariantError::new(format!(
                "order has {} slots but position has {} entries",
                self.order.len(),
                self.position.len()
            )));
        }
        for (i, k) in self.order.iter().enumerate() {
            match self.position.get(k) {
                Some(&p) if p == i => {}
                Some(&p) => {
                    return Err(InvariantError::new(format!(
                        "slot {} holds a key indexed at {}",
                        i, p
                    )))
                }
                None => {
                    return Err(InvariantError::new(format!(
                        "slot {} holds a key missing from position",
                        i
                    )))
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn index_of(keys: &[&'static str]) -> DenseIndex<&'static str> {
        let mut d = DenseIndex::new();
        for k in keys {
            d.push(*k).unwrap();
        }
        d
    }

    /// Invariant: `push` assigns consecutive slots starting at zero.
    #[test]
    fn push_assigns_dense_slots() {
        let d = index_of(&["a", "b", "c"]);
        assert_eq!(d.len(), 3);
        assert_eq!(d.position("a"), Some(0));
        assert_eq!(d.position("b"), Some(1));
        assert_eq!(d.position("c"), Some(2));
        assert_eq!(d.get(2), Some(&"c"));
        assert_eq!(d.get(3), None);
        d.check_invariants().unwrap();
    }

    /// Invariant: pushing a live key is rejected without adding a second
    /// slot, so a later removal leaves no stale copy behind.
    #[test]
    fn push_duplicate_rejected() {
        let mut d = index_of(&["a", "b"]);
        assert_eq!(d.push("a"), Err(InsertError::DuplicateKey));
        assert_eq!(d.len(), 2);
        assert_eq!(d.iter().copied().collect::<Vec<_>>(), vec!["a", "b"]);
        d.check_invariants().unwrap();

        assert_eq!(d.swap_remove("a"), Some(0));
        assert!(!d.contains("a"));
        assert_eq!(d.iter().copied().collect::<Vec<_>>(), vec!["b"]);
        d.check_invariants().unwrap();
    }

    /// Invariant: removing from the middle moves the last key into the gap
    /// and rewrites only that key's slot.
    #[test]
    fn swap_remove_middle_moves_last_key() {
        let mut d = index_of(&["a", "b", "c", "d"]);
        assert_eq!(d.swap_remove("b"), Some(1));
        assert_eq!(d.len(), 3);
        assert_eq!(d.get(1), Some(&"d"));
        assert_eq!(d.position("d"), Some(1));
        assert_eq!(d.position("a"), Some(0));
        assert_eq!(d.position("c"), Some(2));
        assert!(!d.contains("b"));
        d.check_invariants().unwrap();
    }

    /// Invariant: removing the key in the last slot moves nothing and does
    /// not re-index the removed key.
    #[test]
    fn swap_remove_last_slot_is_a_pop() {
        let mut d = index_of(&["a", "b"]);
        assert_eq!(d.swap_remove("b"), Some(1));
        assert_eq!(d.len(), 1);
        assert_eq!(d.position("a"), Some(0));
        assert_eq!(d.position("b"), None);
        d.check_invariants().unwrap();
    }

    /// Invariant: removing the only key leaves both collections empty.
    #[test]
    fn swap_remove_sole_key_empties() {
        let mut d = index_of(&["only"]);
        assert_eq!(d.swap_remove("only"), Some(0));
        assert!(d.is_empty());
        assert_eq!(d.position("only"), None);
        d.check_invariants().unwrap();
    }

    /// Invariant: removing an absent key is a no-op.
    #[test]
    fn swap_remove_absent_is_noop() {
        let mut d = index_of(&["a"]);
        assert_eq!(d.swap_remove("zz"), None);
        assert_eq!(d.len(), 1);
        let mut empty: DenseIndex<String> = DenseIndex::new();
        assert_eq!(empty.swap_remove("x"), None);
    }

    /// Invariant: after arbitrary removals every remaining key appears
    /// exactly once and removed keys can be pushed again.
    #[test]
    fn remove_all_then_reuse() {
        let keys: Vec<String> = (0..16).map(|i| format!("k{}", i)).collect();
        let mut d: DenseIndex<String> = DenseIndex::new();
        for k in &keys {
            d.push(k.clone()).unwrap();
        }
        for k in keys.iter().step_by(3) {
            assert!(d.swap_remove(k.as_str()).is_some());
            d.check_invariants().unwrap();
        }
        let left: BTreeSet<&String> = d.iter().collect();
        let expected: BTreeSet<&String> = keys
            .iter()
            .enumerate()
            .filter(|(i, _)| i % 3 != 0)
            .map(|(_, k)| k)
            .collect();
        assert_eq!(left, expected);

        let slot = d.push("k0".to_string()).unwrap();
        assert_eq!(slot, d.len() - 1);
        d.check_invariants().unwrap();

        d.clear();
        assert!(d.is_empty());
        d.check_invariants().unwrap();
    }
}
