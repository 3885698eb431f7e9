pub use crate::ds::{SplayTree, StaleSide};
pub use crate::error::InvariantError;
pub use crate::policy::pseudo_lru::PseudoLruIndex;
pub use crate::traits::{CoreIndex, EvictingIndex, MutableIndex, ReadOnlyIndex};

#[cfg(feature = "concurrency")]
pub use crate::policy::pseudo_lru::ConcurrentPseudoLruIndex;
