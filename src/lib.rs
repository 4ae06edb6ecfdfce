//! An in-memory ordered set backed by a B-Tree.
//!
//! The tree order (maximum number of children per node) is chosen at construction
//! and elements are ordered either by their `Ord` implementation or by an injected
//! [`Comparator`]:
//!
//! ```
//! use ordered_btree::BTree;
//!
//! let mut tree = BTree::new(8);
//! for value in vec![8, 5, 6, 21, 0, 11, 112, 12, 1, 2] {
//!     tree.insert(value);
//! }
//! assert!(tree.contains(&21));
//! assert!(tree.remove(&21));
//! assert!(!tree.remove(&50));
//! assert_eq!(tree.iter().next(), Some(&0));
//!
//! // Keys grouped per node, one entry per depth
//! let root_level = tree.level_iter().next().unwrap();
//! assert_eq!(root_level.len(), 1);
//! ```
//!
//! Structural changes (splits, rotations, merges and root changes) are reported
//! through `tracing` at `trace` and `debug` level.

#[cfg(test)]
mod tests;

mod btree;
mod comparator;
mod error;

pub use btree::{BTree, Iter, Level, LevelIter, DEFAULT_ORDER, MIN_ORDER};
pub use comparator::{Comparator, NaturalOrder};
pub use error::{Error, Result};
