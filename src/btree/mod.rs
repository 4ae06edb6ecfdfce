mod level_iter;
mod levels;
mod node;
mod tree;
mod tree_iter;

pub use level_iter::{Level, LevelIter};
pub use tree::BTree;
pub use tree_iter::Iter;

/// Smallest order a tree accepts: nodes hold at least 2 keys before splitting
pub const MIN_ORDER: usize = 3;

/// Order used by `Default` and `FromIterator`
pub const DEFAULT_ORDER: usize = 12;

enum TryInsertResult<T> {
    NothingInserted,
    Inserted(InsertResult<T>),
}

enum InsertResult<T> {
    Inserted,
    PendingSplit(T, node::Node<T>),
}

/// Minimum number of keys in a non-root node: `ceil(order / 2) - 1`
fn min_key_count(order: usize) -> usize {
    (order + 1) / 2 - 1
}
