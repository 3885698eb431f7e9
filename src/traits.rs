//! # Index Trait Hierarchy
//!
//! Trait hierarchy for ordered cache indexes, separating read-only probes,
//! core mutation, arbitrary removal, and recency-driven eviction so callers
//! can name exactly the capability they need.
//!
//! ## Architecture
//!
//! ```text
//!              ┌─────────────────────────────────────┐
//!              │        ReadOnlyIndex<K, V>          │
//!              │                                     │
//!              │  contains(&, &K) → bool             │
//!              │  len(&) → usize                     │
//!              │  is_empty(&) → bool                 │
//!              └──────────────────┬──────────────────┘
//!                                 │
//!                                 ▼
//!              ┌─────────────────────────────────────┐
//!              │          CoreIndex<K, V>            │
//!              │                                     │
//!              │  put(&mut, K, V) → bool             │
//!              │  get(&mut, &K) → Option<&V>         │
//!              │  clear(&mut)                        │
//!              └──────────────────┬──────────────────┘
//!                                 │
//!                                 ▼
//!              ┌─────────────────────────────────────┐
//!              │         MutableIndex<K, V>          │
//!              │                                     │
//!              │  remove(&mut, &K) → Option<V>       │
//!              └──────────────────┬──────────────────┘
//!                                 │
//!                                 ▼
//!              ┌─────────────────────────────────────┐
//!              │         EvictingIndex<K, V>         │
//!              │                                     │
//!              │  pop_lru(&mut) → Option<(K, V)>     │
//!              │  peek_lru_candidate(&) → (&K, &V)   │
//!              │  peek_mru(&) → (&K, &V)             │
//!              └─────────────────────────────────────┘
//! ```
//!
//! ## Trait Design Notes
//!
//! - `put` returns `bool` rather than the displaced value: the index never
//!   overwrites, so there is no displaced value to return. `true` means a
//!   new entry was stored.
//! - `get` takes `&mut self` because a hit restructures the tree and
//!   updates recency markers; `contains` is the `&self` probe.
//! - Eviction is *candidate* based, not exact: `pop_lru` evicts the entry
//!   the stale-side scan selects, which approximates the least recently
//!   used entry without maintaining an access-order list.
//! - There is no `capacity`; the index is uncapped and callers drive
//!   eviction themselves.
//!
//! ## Example Usage
//!
//! ```
//! use splaylru::prelude::*;
//!
//! fn shrink_to<I: EvictingIndex<u64, String>>(index: &mut I, limit: usize) {
//!     while index.len() > limit {
//!         if index.pop_lru().is_none() {
//!             break;
//!         }
//!     }
//! }
//!
//! let mut index = PseudoLruIndex::new();
//! for k in 0..10u64 {
//!     index.put(k, k.to_string());
//! }
//! shrink_to(&mut index, 4);
//! assert_eq!(index.len(), 4);
//! ```

/// Read-only probes that never restructure the index or touch its recency
/// state.
pub trait ReadOnlyIndex<K, V> {
    /// Returns `true` if `key` is present. Does not count as an access.
    fn contains(&self, key: &K) -> bool;

    /// Number of entries in the index.
    fn len(&self) -> usize;

    /// Returns `true` if the index holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Core operations every index supports.
pub trait CoreIndex<K, V>: ReadOnlyIndex<K, V> {
    /// Inserts `key`/`value` if the key is absent.
    ///
    /// Returns `true` when a new entry was stored. A duplicate key is a
    /// silent no-op that keeps the stored value, but still counts as an
    /// access to the existing entry.
    fn put(&mut self, key: K, value: V) -> bool;

    /// Looks up `key`, counting a hit as an access.
    ///
    /// A miss returns `None` and leaves the index completely untouched.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Drops every entry.
    fn clear(&mut self);
}

/// Adds arbitrary key-based removal.
pub trait MutableIndex<K, V>: CoreIndex<K, V> {
    /// Removes `key` and returns its value, or `None` if absent.
    fn remove(&mut self, key: &K) -> Option<V>;
}

/// Recency-driven eviction on top of arbitrary removal.
pub trait EvictingIndex<K, V>: MutableIndex<K, V> {
    /// Evicts the current eviction candidate and returns its entry, or
    /// `None` on an empty index.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the entry [`pop_lru`](EvictingIndex::pop_lru) would evict
    /// next, without evicting or counting an access.
    fn peek_lru_candidate(&self) -> Option<(&K, &V)>;

    /// Returns the most recently touched entry without counting an access.
    fn peek_mru(&self) -> Option<(&K, &V)>;
}
