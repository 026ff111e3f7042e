//! RandomMap: hash map with O(1) uniform selection of a live key.

use crate::dense_index::DenseIndex;
use crate::error::{InsertError, InvariantError};
use core::borrow::Borrow;
use core::cell::RefCell;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::HashMap;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::collections::hash_map::RandomState;

/// Key/value map that can also return a uniformly random live key.
///
/// Values are stored in a hash map; the live keys are mirrored in a
/// [`DenseIndex`] so a random slot can be drawn in constant time.
///
/// ```
/// use random_map::RandomMap;
///
/// let mut m = RandomMap::new();
/// m.insert("1".to_string(), "abc".to_string());
/// m.insert("2".to_string(), "def".to_string());
/// m.remove("1");
///
/// let k = m.random_key().unwrap();
/// assert_eq!(k, "2");
/// assert_eq!(m.get(k).map(String::as_str), Some("def"));
/// ```
pub struct RandomMap<K, V, S = RandomState, R = StdRng> {
    values: HashMap<K, V, S>,
    index: DenseIndex<K, S>,
    // Advanced by `random_key(&self)`; the map is single-threaded (!Sync).
    rng: RefCell<R>,
}

impl<K, V> RandomMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Empty map whose generator is seeded from OS entropy.
    ///
    /// # Panics
    ///
    /// Panics if the operating system's entropy source is unavailable.
    /// Use [`with_seed`](Self::with_seed) or [`with_rng`](Self::with_rng)
    /// where that can happen.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Empty map with room for `capacity` keys before reallocating.
    ///
    /// # Panics
    ///
    /// Panics if the operating system's entropy source is unavailable.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_hasher_and_rng(
            capacity,
            RandomState::new(),
            StdRng::from_os_rng(),
        )
    }

    /// Empty map with a deterministic generator. Random selections are
    /// reproducible for the same seed and the same sequence of calls.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<K, V> Default for RandomMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, R> RandomMap<K, V, RandomState, R>
where
    K: Eq + Hash + Clone,
    R: RngCore,
{
    pub fn with_rng(rng: R) -> Self {
        Self::with_hasher_and_rng(RandomState::new(), rng)
    }
}

impl<K, V, S, R> RandomMap<K, V, S, R>
where
    K: Eq + Hash + Clone,
    S: BuildHasher + Clone,
    R: RngCore,
{
    pub fn with_hasher_and_rng(hasher: S, rng: R) -> Self {
        Self::with_capacity_hasher_and_rng(0, hasher, rng)
    }

    pub fn with_capacity_hasher_and_rng(capacity: usize, hasher: S, rng: R) -> Self {
        Self {
            values: HashMap::with_capacity_and_hasher(capacity, hasher.clone()),
            index: DenseIndex::with_capacity_and_hasher(capacity, hasher),
            rng: RefCell::new(rng),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.values.get(q)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.values.get_mut(q)
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.values.contains_key(q)
    }

    /// Inserts or overwrites `key`.
    ///
    /// A new key is appended to the dense order. Overwriting a live key
    /// keeps its slot and returns the previous value.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.values.get_mut(&key) {
            return Some(core::mem::replace(slot, value));
        }
        let pushed = self.try_insert(key, value);
        debug_assert!(pushed.is_ok(), "dense index holds a key with no value");
        debug_assert_eq!(self.values.len(), self.index.len());
        None
    }

    /// Inserts `key` only if it is not already live.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(), InsertError> {
        // The dense index shares the value map's key set, so its duplicate
        // check covers both.
        self.index.push(key.clone())?;
        self.values.insert(key, value);
        Ok(())
    }

    /// Removes `q` and returns its value; `None` if it was not live.
    ///
    /// The key's slot is filled by the last key in the dense order.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let value = self.values.remove(q)?;
        let slot = self.index.swap_remove(q);
        debug_assert!(slot.is_some(), "live key missing from dense index");
        debug_assert_eq!(self.values.len(), self.index.len());
        Some(value)
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.index.clear();
    }

    pub fn reserve(&mut self, additional: usize) {
        self.values.reserve(additional);
        self.index.reserve(additional);
    }

    /// A live key chosen uniformly at random, or `None` if the map is empty.
    ///
    /// Draws from the map's own generator; each of the `len()` keys is
    /// returned with probability `1 / len()`.
    pub fn random_key(&self) -> Option<&K> {
        let len = self.index.len();
        if len == 0 {
            return None;
        }
        let slot = self.rng.borrow_mut().random_range(0..len);
        self.index.get(slot)
    }

    /// Same as [`random_key`](Self::random_key) but draws from `rng`.
    pub fn random_key_with<G: Rng>(&self, rng: &mut G) -> Option<&K> {
        let len = self.index.len();
        if len == 0 {
            return None;
        }
        self.index.get(rng.random_range(0..len))
    }

    /// A uniformly random live entry.
    pub fn random_entry(&self) -> Option<(&K, &V)> {
        let key = self.random_key()?;
        self.values.get_key_value(key)
    }

    /// Live keys in dense order. The order is arbitrary and changes on removal.
    pub fn keys(&self) -> core::slice::Iter<'_, K> {
        self.index.iter()
    }

    pub fn iter(&self) -> hashbrown::hash_map::Iter<'_, K, V> {
        self.values.iter()
    }

    /// Checks that the value map and the dense index describe the same key
    /// set and that every slot is indexed correctly. O(n).
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.index.check_invariants()?;
        if self.values.len() != self.index.len() {
            return Err(InvariantError::new(format!(
                "values has {} entries but the dense order has {} slots",
                self.values.len(),
                self.index.len()
            )));
        }
        if let Some(slot) = self.index.iter().position(|k| !self.values.contains_key(k)) {
            return Err(InvariantError::new(format!(
                "slot {} holds a key with no value",
                slot
            )));
        }
        Ok(())
    }
}

impl<K, V, S, R> fmt::Debug for RandomMap<K, V, S, R>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.values.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for RandomMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut m = Self::new();
        m.extend(iter);
        m
    }
}

impl<K, V, S, R> Extend<(K, V)> for RandomMap<K, V, S, R>
where
    K: Eq + Hash + Clone,
    S: BuildHasher + Clone,
    R: RngCore,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}
