//! Eviction policy layer.
//!
//! [`pseudo_lru`] wraps the splay tree in [`ds`](crate::ds) with the public
//! index API and the trait hierarchy from [`traits`](crate::traits).

pub mod pseudo_lru;

pub use pseudo_lru::PseudoLruIndex;

#[cfg(feature = "concurrency")]
pub use pseudo_lru::ConcurrentPseudoLruIndex;
