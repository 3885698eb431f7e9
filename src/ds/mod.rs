//! Data structures backing the pseudo-LRU index.
//!
//! - [`node_arena`]: slab arena that owns tree nodes and hands out stable
//!   [`NodeId`] handles, so tree links are indices rather than pointers.
//! - [`splay_tree`]: the self-adjusting search tree with stale-side recency
//!   markers that the policy layer wraps.

pub mod node_arena;
pub mod splay_tree;

pub use node_arena::{NodeArena, NodeId};
pub use splay_tree::{Iter, SplayTree, StaleSide};
