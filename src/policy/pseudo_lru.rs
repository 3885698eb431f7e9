//! Pseudo-LRU cache index backed by a splay tree.
//!
//! Approximates LRU with one two-valued marker per entry instead of an
//! access-order list: every committed search splays its target to the root
//! and stamps each node on the path with the side the search did *not*
//! take. Eviction follows those markers from the root and removes the first
//! entry whose marked side has no child. Recently touched entries sit near
//! the root with markers pointing away from them, so the scan lands on a
//! cold entry with high probability.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     PseudoLruIndex<K, V> Layout                     │
//! │                                                                     │
//! │   tree: SplayTree<K, V>                                             │
//! │         └── arena: NodeArena<Node>     root: Option<NodeId>         │
//! │                                                                     │
//! │   put(k, v):   force-splay, attach new node as root   O(log n)*     │
//! │   get(&k):     splay hit to root, miss writes nothing O(log n)*     │
//! │   remove(&k):  splay hit to root, join subtrees       O(log n)*     │
//! │   pop_lru():   stale scan → splay → join              O(log n)*     │
//! │   peek():      read the root                          O(1)          │
//! │                                                       *amortized    │
//! │                                                                     │
//! │   Recency state = one StaleSide per node, updated only while a      │
//! │   committed splay descent passes through the node.                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Trade-offs
//!
//! | Aspect        | PseudoLruIndex           | Exact LRU list           |
//! |---------------|--------------------------|--------------------------|
//! | Access cost   | O(log n) amortized       | O(1)                     |
//! | Eviction pick | Approximate (cold-ish)   | Exact LRU entry          |
//! | Order queries | Sorted iteration free    | None                     |
//! | Overhead      | 1 marker + 2 links/entry | 2 links + map entry      |
//!
//! Use this index when keys are ordered, sorted traversal is worth having,
//! and "evict something cold" is acceptable in place of "evict the coldest".
//!
//! ## Example Usage
//!
//! ```
//! use splaylru::prelude::*;
//!
//! let mut index = PseudoLruIndex::new();
//! for k in [5, 1, 3, 10, 15, 0, 4] {
//!     index.put(k, k * 10);
//! }
//!
//! // hits promote entries and refresh the markers on their paths
//! assert_eq!(index.get(&3), Some(&30));
//! assert_eq!(index.get(&0), Some(&0));
//! assert_eq!(index.get(&4), Some(&40));
//!
//! // eviction lands on a cold entry, away from the recent touches
//! let (evicted, _) = index.pop_lru().unwrap();
//! assert_eq!(evicted, 15);
//! assert_eq!(index.len(), 6);
//! ```
//!
//! ## Thread Safety
//!
//! - [`PseudoLruIndex`]: not thread-safe, designed for single-threaded use.
//! - [`ConcurrentPseudoLruIndex`] (`concurrency` feature): `RwLock` wrapper.
//!   Note that even lookups take the write lock, because a hit restructures
//!   the tree.

use std::fmt::{Debug, Formatter};

use crate::ds::splay_tree::{Iter, SplayTree};
use crate::error::InvariantError;
use crate::traits::{CoreIndex, EvictingIndex, MutableIndex, ReadOnlyIndex};

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;

/// Uncapped ordered cache index with pseudo-LRU eviction.
///
/// Entries are keyed by `K: Ord`; keys are unique and a duplicate
/// [`put`](CoreIndex::put) never overwrites. The index does not enforce a
/// capacity: callers decide when to call [`pop_lru`](EvictingIndex::pop_lru).
///
/// # Type Parameters
///
/// - `K`: key type, must be `Ord`
/// - `V`: value type
///
/// # Example
///
/// ```
/// use splaylru::prelude::*;
///
/// let mut index = PseudoLruIndex::new();
/// assert!(index.put(10, 100));
/// assert!(!index.put(10, 999)); // duplicate: original value kept
/// assert_eq!(index.get(&10), Some(&100));
/// ```
pub struct PseudoLruIndex<K, V> {
    tree: SplayTree<K, V>,
}

impl<K, V> PseudoLruIndex<K, V> {
    /// Creates an empty index.
    #[inline]
    pub fn new() -> Self {
        Self {
            tree: SplayTree::new(),
        }
    }

    /// Creates an empty index with room for `capacity` entries before the
    /// node arena reallocates.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: SplayTree::with_capacity(capacity),
        }
    }

    /// Returns the most recently touched value without counting an access.
    ///
    /// Equivalent to [`peek_mru`](EvictingIndex::peek_mru) but value-only.
    pub fn peek(&self) -> Option<&V> {
        self.tree.peek().map(|(_, v)| v)
    }

    /// In-order iterator over `(&K, &V)`, smallest key first. Does not
    /// count as an access.
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.tree.iter()
    }
}

impl<K: Ord, V> PseudoLruIndex<K, V> {
    /// Verifies the structural invariants of the underlying tree.
    /// Intended for tests and debugging.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.tree.check_invariants()
    }

    /// Returns the keys in preorder for shape assertions in tests.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_preorder(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.tree.debug_preorder()
    }
}

impl<K: Ord, V> ReadOnlyIndex<K, V> for PseudoLruIndex<K, V> {
    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.tree.contains(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.tree.len()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

impl<K: Ord, V> CoreIndex<K, V> for PseudoLruIndex<K, V> {
    #[inline]
    fn put(&mut self, key: K, value: V) -> bool {
        self.tree.insert(key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        self.tree.get(key)
    }

    #[inline]
    fn clear(&mut self) {
        self.tree.clear();
    }
}

impl<K: Ord, V> MutableIndex<K, V> for PseudoLruIndex<K, V> {
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        self.tree.remove(key)
    }
}

impl<K: Ord, V> EvictingIndex<K, V> for PseudoLruIndex<K, V> {
    #[inline]
    fn pop_lru(&mut self) -> Option<(K, V)> {
        self.tree.pop_lru()
    }

    #[inline]
    fn peek_lru_candidate(&self) -> Option<(&K, &V)> {
        self.tree.peek_lru_candidate()
    }

    #[inline]
    fn peek_mru(&self) -> Option<(&K, &V)> {
        self.tree.peek()
    }
}

impl<K, V> Default for PseudoLruIndex<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Debug for PseudoLruIndex<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PseudoLruIndex")
            .field("len", &self.tree.len())
            .finish()
    }
}

/// Thread-safe wrapper around [`PseudoLruIndex`] using a
/// `parking_lot::RwLock`.
///
/// Lookups restructure the tree, so `get_with` takes the write lock; only
/// the pure probes (`contains`, `len`, `is_empty`, the peeks) read-lock.
/// `try_*` variants return `None` instead of blocking when the lock is
/// contended.
#[cfg(feature = "concurrency")]
#[derive(Debug)]
pub struct ConcurrentPseudoLruIndex<K, V> {
    inner: RwLock<PseudoLruIndex<K, V>>,
}

#[cfg(feature = "concurrency")]
impl<K: Ord, V> ConcurrentPseudoLruIndex<K, V> {
    /// Creates an empty concurrent index.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(PseudoLruIndex::new()),
        }
    }

    /// Creates an empty concurrent index with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(PseudoLruIndex::with_capacity(capacity)),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        let index = self.inner.read();
        index.len()
    }

    /// Returns `true` if the index holds no entries.
    pub fn is_empty(&self) -> bool {
        let index = self.inner.read();
        index.is_empty()
    }

    /// Returns `true` if `key` is present. Does not count as an access.
    pub fn contains(&self, key: &K) -> bool {
        let index = self.inner.read();
        index.contains(key)
    }

    /// Inserts `key`/`value` if absent; returns `true` when stored.
    pub fn put(&self, key: K, value: V) -> bool {
        let mut index = self.inner.write();
        index.put(key, value)
    }

    /// Tries to insert without blocking.
    pub fn try_put(&self, key: K, value: V) -> Option<bool> {
        let mut index = self.inner.try_write()?;
        Some(index.put(key, value))
    }

    /// Runs `f` on the value for `key` if present, counting the hit as an
    /// access. Takes the write lock: a hit restructures the tree.
    pub fn get_with<R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R> {
        let mut index = self.inner.write();
        index.get(key).map(f)
    }

    /// Tries to run `f` on the value for `key` without blocking.
    pub fn try_get_with<R>(&self, key: &K, f: impl FnOnce(&V) -> R) -> Option<R> {
        let mut index = self.inner.try_write()?;
        index.get(key).map(f)
    }

    /// Removes `key` and returns its value, if present.
    pub fn remove(&self, key: &K) -> Option<V> {
        let mut index = self.inner.write();
        index.remove(key)
    }

    /// Tries to remove `key` without blocking.
    pub fn try_remove(&self, key: &K) -> Option<Option<V>> {
        let mut index = self.inner.try_write()?;
        Some(index.remove(key))
    }

    /// Evicts the current eviction candidate.
    pub fn pop_lru(&self) -> Option<(K, V)> {
        let mut index = self.inner.write();
        index.pop_lru()
    }

    /// Tries to evict without blocking.
    pub fn try_pop_lru(&self) -> Option<Option<(K, V)>> {
        let mut index = self.inner.try_write()?;
        Some(index.pop_lru())
    }

    /// Runs `f` on the entry `pop_lru` would evict next, if any.
    pub fn peek_lru_candidate_with<R>(&self, f: impl FnOnce(&K, &V) -> R) -> Option<R> {
        let index = self.inner.read();
        index.peek_lru_candidate().map(|(k, v)| f(k, v))
    }

    /// Runs `f` on the most recently touched entry, if any.
    pub fn peek_mru_with<R>(&self, f: impl FnOnce(&K, &V) -> R) -> Option<R> {
        let index = self.inner.read();
        index.peek_mru().map(|(k, v)| f(k, v))
    }

    /// Drops every entry.
    pub fn clear(&self) {
        let mut index = self.inner.write();
        index.clear();
    }
}

#[cfg(feature = "concurrency")]
impl<K: Ord, V> Default for ConcurrentPseudoLruIndex<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
