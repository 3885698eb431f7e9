//! Error types for the splaylru library.
//!
//! Operational misses (`get`/`remove` on an absent key, eviction from an
//! empty index) are communicated through `Option`, never through an error
//! type. The only error here is [`InvariantError`], returned by the
//! `check_invariants` methods when an internal structural invariant of the
//! tree has been violated.
//!
//! ## Example Usage
//!
//! ```
//! use splaylru::prelude::*;
//!
//! let mut index = PseudoLruIndex::new();
//! index.put(1, "one");
//! index.put(2, "two");
//! assert!(index.check_invariants().is_ok());
//! ```

use std::fmt;

/// Error returned when an internal tree invariant is violated.
///
/// Produced by `check_invariants` on [`SplayTree`](crate::ds::SplayTree) and
/// [`PseudoLruIndex`](crate::policy::pseudo_lru::PseudoLruIndex). Carries a
/// human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}
