//! splaylru: pseudo-LRU cache index built on a splay tree.
//!
//! An ordered, uncapped cache index where every hit splays its entry to the
//! root and per-node stale-side markers steer an approximate
//! least-recently-used eviction scan, with no access-order list.
//!
//! ```
//! use splaylru::prelude::*;
//!
//! let mut index = PseudoLruIndex::new();
//! for (k, v) in [(5, 128), (1, 6), (3, 12), (10, 9), (15, 2), (2, 3), (4, 4)] {
//!     index.put(k, v);
//! }
//!
//! // eviction follows the stale markers down to a cold entry
//! assert_eq!(index.pop_lru(), Some((1, 6)));
//! assert_eq!(index.len(), 6);
//! ```

pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod traits;
