//! # stabtree
//! `stabtree` implements a static centered interval tree for stabbing
//! queries: given a point, report every stored interval containing it.
//!
//! The tree is built once from a set of end-inclusive integer intervals and
//! never modified afterwards. Construction splits the set recursively around
//! ninther-chosen centers with an in-place three-way partition, and stores
//! each node's bucket sorted both by start and by end (a radix sort for
//! large buckets), which lets point queries stop scanning a bucket at the
//! first miss.
//!
//! Coordinates are `i64` and must be non-negative with `start <= end`.
//! `IntervalTree::try_new` checks this; `IntervalTree::new` trusts the caller.
//!
//! ```
//! use stabtree::{Interval, IntervalTree};
//!
//! let tree: IntervalTree = (0..1000)
//!     .map(|i| Interval::new(i, i + 10, i))
//!     .collect();
//!
//! assert_eq!(tree.query_count(500), 11);
//! ```

mod error;
mod interval;
mod partition;
mod radix;
mod tree;

pub use error::BuildError;
pub use interval::Interval;
pub use partition::{find_center, split, NINTHER_CUTOFF};
pub use radix::{sort_by, sort_in_place, SortKey, RADIX_SORT_CUTOFF};
pub use tree::{IntervalTree, NodeRef, DEFAULT_LEAF_SIZE};
