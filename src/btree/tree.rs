use super::level_iter::LevelIter;
use super::node::Node;
use super::tree_iter::Iter;
use super::*;
use crate::comparator::{Comparator, NaturalOrder};
use crate::error::{Error, Result};
use std::fmt;
use std::mem;
use tracing::debug;

/// An ordered set stored in a B-Tree of a configurable order.
///
/// Every node holds at most `order - 1` keys and every node but the root holds at
/// least `ceil(order / 2) - 1`. Elements are ordered by the comparator `C`, which
/// defaults to the `Ord` implementation of `T`
#[derive(Clone)]
pub struct BTree<T, C = NaturalOrder> {
    pub(super) root: Node<T>,
    len: usize,
    order: usize,
    min_key_count: usize,
    pub(super) comparator: C,
}

impl<T: Ord> BTree<T> {
    /// Create an empty tree ordered by `Ord`.
    /// Panics if `order` is smaller than 3
    pub fn new(order: usize) -> Self {
        Self::with_comparator(order, NaturalOrder)
    }

    /// Create an empty tree ordered by `Ord`, failing if `order` is smaller than 3
    pub fn try_new(order: usize) -> Result<Self> {
        Self::try_with_comparator(order, NaturalOrder)
    }

    /// Rebuild a tree from its level description, root level first.
    /// See `from_levels_with_comparator`
    pub fn from_levels(order: usize, levels: Vec<Vec<Vec<T>>>) -> Result<Self> {
        Self::from_levels_with_comparator(order, levels, NaturalOrder)
    }
}

impl<T, C: Comparator<T>> BTree<T, C> {
    /// Create an empty tree ordered by `comparator`.
    /// Panics if `order` is smaller than 3
    pub fn with_comparator(order: usize, comparator: C) -> Self {
        assert!(
            order >= MIN_ORDER,
            "Invalid order {}: must be at least {}",
            order,
            MIN_ORDER
        );
        BTree::from_root(Node::new(order), 0, order, comparator)
    }

    /// Create an empty tree ordered by `comparator`, failing if `order` is smaller than 3
    pub fn try_with_comparator(order: usize, comparator: C) -> Result<Self> {
        if order < MIN_ORDER {
            return Err(Error::InvalidOrder(order));
        }
        Ok(Self::with_comparator(order, comparator))
    }

    /// Wrap an already built root node. The caller guarantees `len` and the
    /// structure match
    pub(super) fn from_root(root: Node<T>, len: usize, order: usize, comparator: C) -> Self {
        BTree {
            root,
            len,
            order,
            min_key_count: min_key_count(order),
            comparator,
        }
    }

    /// Insert a new value into the tree.
    /// Return `false`, leaving the tree untouched, if an equal value is already present
    ///
    /// Even orders split full nodes on the way down. Odd orders split a node once it
    /// overflows, on the way back up: halving `order - 1` keys early would leave one
    /// side below the minimum key count
    pub fn insert(&mut self, value: T) -> bool {
        if self.order % 2 == 1 {
            return match self.root.insert(value, self.order, &self.comparator) {
                TryInsertResult::NothingInserted => false,
                TryInsertResult::Inserted(insert_result) => {
                    self.handle_insert_result(insert_result);
                    true
                }
            };
        }

        // Duplicates must not split anything on the way down
        if self.contains(&value) {
            return false;
        }
        if self.root.len() == self.order - 1 {
            let (median, right) = self.root.split();
            self.grow_root(median, right);
        }
        let inserted = self
            .root
            .insert_preemptive(value, self.order, &self.comparator);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Remove a value from the tree, returning whether it was present
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Remove a value from the tree, returning the stored element equal to it
    pub fn take(&mut self, value: &T) -> Option<T> {
        let removed = self
            .root
            .remove(value, self.min_key_count, &self.comparator)?;
        self.len -= 1;

        // Merging reached the root: its only child takes over
        if let Some(child) = self.root.take_only_child() {
            debug!(len = self.len, "collapsing root");
            self.root = child;
        }
        Some(removed)
    }

    /// Return whether an element equal to `value` is in the tree.
    /// An empty tree contains nothing
    pub fn contains(&self, value: &T) -> bool {
        self.root.contains(value, &self.comparator)
    }

    /// Return the smallest element
    pub fn first(&self) -> Option<&T> {
        self.root.first()
    }

    /// Return the largest element
    pub fn last(&self) -> Option<&T> {
        self.root.last()
    }

    /// Remove every element, keeping the order and the comparator
    pub fn clear(&mut self) {
        self.root = Node::new(self.order);
        self.len = 0;
    }

    /// Handle the result of an insertion
    fn handle_insert_result(&mut self, insert_result: InsertResult<T>) {
        self.len += 1;
        if let InsertResult::PendingSplit(median, right) = insert_result {
            // Splitting reached root tree: build new root node
            self.grow_root(median, right);
        }
    }

    /// Put a new root holding only `median` above the old root and its split-off half
    fn grow_root(&mut self, median: T, right: Node<T>) {
        let old_root = mem::replace(&mut self.root, Node::new(self.order));
        self.root = Node::with_keys_and_children(vec![median], vec![old_root, right]);
        debug!(len = self.len, "growing new root");
    }

    /// Assert every structural invariant of the tree
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        self.root
            .check(self.order, self.min_key_count, true, &self.comparator);
        assert_eq!(self.iter().count(), self.len);
        assert_eq!(self.is_empty(), self.len == 0);
        assert!(self.root.is_leaf() || !self.root.is_empty());
    }
}

impl<T, C> BTree<T, C> {
    /// Return the total number of values actually present in the tree
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return whether the tree holds no values, that is, the root has no keys
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Return the maximum number of children per node
    pub fn order(&self) -> usize {
        self.order
    }

    /// Return the minimum number of keys held by every node but the root
    pub fn min_key_count(&self) -> usize {
        self.min_key_count
    }

    /// Return a sorted iterator over references to elements in the tree
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root, self.len)
    }

    /// Return an iterator over the levels of the tree, root first.
    /// Each level lists the keys of its nodes, from left to right
    pub fn level_iter(&self) -> LevelIter<'_, T> {
        LevelIter::new(&self.root)
    }

    /// Return an owned copy of the level structure, in the shape accepted by
    /// `from_levels`
    pub fn levels(&self) -> Vec<Vec<Vec<T>>>
    where
        T: Clone,
    {
        self.level_iter()
            .map(|level| level.into_iter().map(<[T]>::to_vec).collect())
            .collect()
    }
}

impl<T: Ord> Default for BTree<T> {
    fn default() -> Self {
        BTree::new(DEFAULT_ORDER)
    }
}

impl<T: fmt::Debug, C> fmt::Debug for BTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T, C> IntoIterator for &'a BTree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C: Comparator<T>> Extend<T> for BTree<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord> std::iter::FromIterator<T> for BTree<T> {
    /// Create a tree of the default order from an iterator. Duplicates are dropped
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = BTree::default();
        tree.extend(iter);
        tree
    }
}
