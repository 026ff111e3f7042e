//! random-map: a single-threaded hash map that can also return a
//! uniformly random live key in O(1) expected time.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep ordinary map operations at hash-map cost while making
//!   "pick any live key, uniformly" constant time instead of O(n).
//! - Parts:
//!   - `values`: `HashMap<K, V, S>` holding the entries.
//!   - DenseIndex<K, S>: a gap-free `Vec<K>` of live keys plus a
//!     `HashMap<K, usize, S>` recording each key's slot. Random
//!     selection draws a slot in `0..len`; removal swaps the last key
//!     into the freed slot.
//!   - RandomMap<K, V, S, R>: public API tying the two together with an
//!     instance-owned generator `R`.
//!
//! Constraints
//! - Single-threaded: the generator sits in a `RefCell`, so `RandomMap`
//!   is `!Sync`. Callers that share a map supply their own lock.
//! - Unique keys; inserting a live key overwrites its value in place.
//! - `K: Clone`: each live key is held by `values`, the dense order and
//!   the slot index.
//! - All per-key operations are O(1) expected; `clear`, iteration and
//!   `check_invariants` are O(n).
//!
//! Invariants (between public calls)
//! - `values`, the dense order and the slot index hold the same key set
//!   and have the same length.
//! - For every slot `i`, the key in slot `i` is indexed at `i`.
//! - The dense order is arbitrary; removals reorder it.
//!
//! Absent keys and empty maps
//! - `get`, `remove`, `random_key` and friends return `None`; nothing
//!   in the map panics on a missing key.
//!
//! Randomness
//! - `RandomMap::new` seeds `StdRng` from OS entropy. `with_seed` and
//!   `with_rng` exist for reproducible tests and benches.
//!   `random_key_with` accepts a caller-owned generator instead.
//!
//! Logging
//! - Structural changes in the dense index emit `tracing` events at
//!   `TRACE` level carrying slots and lengths only. The crate never
//!   installs a subscriber.

pub mod dense_index;
pub mod error;
mod random_map;
mod random_map_proptest;

// Public surface
pub use dense_index::DenseIndex;
pub use error::{InsertError, InvariantError};
pub use random_map::RandomMap;
