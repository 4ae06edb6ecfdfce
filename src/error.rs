use thiserror::Error;

/// Result alias used by the fallible constructors and iterator methods
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong when building or consuming a tree.
/// Lookups and removals of absent values are not errors: they report `false`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The order is below the minimum of 3
    #[error("invalid order {0}: a B-Tree needs an order of at least 3")]
    InvalidOrder(usize),

    /// The first level of a level description must hold exactly the root
    #[error("the root level must contain exactly one node, found {found}")]
    RootLevel { found: usize },

    /// The nodes of a level ask for a different number of children than the
    /// level below provides
    #[error("level {level} needs {expected} child nodes but the level below has {found}")]
    ChildCountMismatch {
        level: usize,
        expected: usize,
        found: usize,
    },

    /// A node holds too few or too many keys for the tree order
    #[error("node {node} at level {level} holds {len} keys, expected between {min} and {max}")]
    KeyCount {
        level: usize,
        node: usize,
        len: usize,
        min: usize,
        max: usize,
    },

    /// Keys are not strictly increasing in sorted traversal order
    #[error("keys are not strictly increasing at sorted position {position}")]
    Unordered { position: usize },

    /// The iterator has no more items
    #[error("iterator exhausted")]
    Exhausted,
}
