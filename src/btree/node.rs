use super::*;
use crate::comparator::Comparator;
use std::cmp::Ordering;
use std::mem;
use tracing::trace;

#[derive(Clone, Debug)]
pub(super) struct Node<T> {
    keys: Vec<T>,
    children: Vec<Node<T>>,
}

impl<T> Node<T> {
    /// Build an empty leaf, with room for `order` keys
    pub(super) fn new(order: usize) -> Self {
        Node {
            keys: Vec::with_capacity(order),
            children: Vec::new(),
        }
    }

    /// Build a node from its parts.
    /// Panics if `children` is neither empty nor one longer than `keys`
    pub(super) fn with_keys_and_children(keys: Vec<T>, children: Vec<Node<T>>) -> Self {
        assert!(children.is_empty() || children.len() == keys.len() + 1);
        Node { keys, children }
    }

    /// Return the keys stored directly in this node
    pub(super) fn keys(&self) -> &[T] {
        &self.keys
    }

    /// Return the children of this node (empty for leaves)
    pub(super) fn children(&self) -> &[Node<T>] {
        &self.children
    }

    /// Return the total number of keys in this node
    pub(super) fn len(&self) -> usize {
        self.keys.len()
    }

    pub(super) fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Return whether the node is a leaf
    pub(super) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Locate `value` among the keys of this node.
    /// `Ok(i)` means `keys[i]` is equal to `value`. `Err(i)` means `value` is absent
    /// and `i` is the index of the first key greater than it (or `len()`), which
    /// is also the child to descend into
    pub(super) fn search<C: Comparator<T>>(&self, value: &T, cmp: &C) -> Result<usize, usize> {
        self.keys.binary_search_by(|key| cmp.compare(key, value))
    }

    /// Iterative membership test, walking down from this node
    pub(super) fn contains<C: Comparator<T>>(&self, value: &T, cmp: &C) -> bool {
        let mut node = self;
        loop {
            match node.search(value, cmp) {
                Ok(_) => return true,
                Err(_) if node.is_leaf() => return false,
                Err(index) => node = &node.children[index],
            }
        }
    }

    /// Return the smallest key in the subtree
    pub(super) fn first(&self) -> Option<&T> {
        let mut node = self;
        while let Some(child) = node.children.first() {
            node = child;
        }
        node.keys.first()
    }

    /// Return the largest key in the subtree
    pub(super) fn last(&self) -> Option<&T> {
        let mut node = self;
        while let Some(child) = node.children.last() {
            node = child;
        }
        node.keys.last()
    }

    /// Recursive implementation of `BTree::insert`.
    /// When this node overflows, it splits and returns the median and new right node
    pub(super) fn insert<C: Comparator<T>>(
        &mut self,
        value: T,
        order: usize,
        cmp: &C,
    ) -> TryInsertResult<T> {
        let index = match self.search(&value, cmp) {
            Ok(_) => return TryInsertResult::NothingInserted,
            Err(index) => index,
        };

        if !self.is_leaf() {
            // Recursively look into the child
            match self.children[index].insert(value, order, cmp) {
                // Insertion bubbled a split up
                TryInsertResult::Inserted(InsertResult::PendingSplit(median, right)) => {
                    self.keys.insert(index, median);
                    self.children.insert(index + 1, right);
                }
                x => return x,
            }
        } else {
            self.keys.insert(index, value);
        }

        if self.keys.len() < order {
            TryInsertResult::Inserted(InsertResult::Inserted)
        } else {
            let (median, right) = self.split();
            TryInsertResult::Inserted(InsertResult::PendingSplit(median, right))
        }
    }

    /// Top-down insertion: every full child is split before descending into it, so
    /// a promoted median always finds room in its parent.
    /// Only valid for even orders, and this node must not be full
    pub(super) fn insert_preemptive<C: Comparator<T>>(
        &mut self,
        value: T,
        order: usize,
        cmp: &C,
    ) -> bool {
        let mut node = self;
        loop {
            let mut index = match node.search(&value, cmp) {
                Ok(_) => return false,
                Err(index) => index,
            };
            if node.is_leaf() {
                node.keys.insert(index, value);
                return true;
            }

            if node.children[index].len() == order - 1 {
                let (median, right) = node.children[index].split();
                node.keys.insert(index, median);
                node.children.insert(index + 1, right);

                // The promoted median may now sit between `value` and its child
                match cmp.compare(&value, &node.keys[index]) {
                    Ordering::Less => {}
                    Ordering::Equal => return false,
                    Ordering::Greater => index += 1,
                }
            }
            node = &mut node.children[index];
        }
    }

    /// Split this node into (left, median, right).
    /// Self will become left and the other two values will be returned
    pub(super) fn split(&mut self) -> (T, Node<T>) {
        let med = median_index(self.keys.len());
        let right_keys = self.keys.split_off(med + 1);
        let right_children = if self.is_leaf() {
            Vec::new()
        } else {
            self.children.split_off(med + 1)
        };
        trace!(
            left = med,
            right = right_keys.len(),
            leaf = right_children.is_empty(),
            "splitting node"
        );

        // `split_off` left the median as the last key of the left half
        let median = match self.keys.pop() {
            Some(median) => median,
            None => unreachable!("a node is only split when it holds at least 3 keys"),
        };
        (median, Node::with_keys_and_children(right_keys, right_children))
    }

    /// Recursive implementation of `BTree::take`.
    /// The child visited on the way down is rebalanced on the way back up, so after
    /// returning only this node may hold fewer than `min_len` keys
    pub(super) fn remove<C: Comparator<T>>(
        &mut self,
        value: &T,
        min_len: usize,
        cmp: &C,
    ) -> Option<T> {
        let removed = match self.search(value, cmp) {
            Ok(index) if self.is_leaf() => self.keys.remove(index),
            Ok(index) => {
                // Replace with the predecessor, pulled out of the left subtree
                let predecessor = self.children[index].pop_last(min_len)?;
                let removed = mem::replace(&mut self.keys[index], predecessor);
                self.rebalance_child(index, min_len);
                removed
            }
            Err(_) if self.is_leaf() => return None,
            Err(index) => {
                let removed = self.children[index].remove(value, min_len, cmp)?;
                self.rebalance_child(index, min_len);
                removed
            }
        };
        Some(removed)
    }

    /// Remove and return the largest key in the subtree, rebalancing on the way up
    fn pop_last(&mut self, min_len: usize) -> Option<T> {
        if self.is_leaf() {
            return self.keys.pop();
        }
        let index = self.children.len() - 1;
        let last = self.children[index].pop_last(min_len)?;
        self.rebalance_child(index, min_len);
        Some(last)
    }

    /// Restore the minimum key count of the child at `index`, if needed, by
    /// stealing a key from a sibling or merging with one
    fn rebalance_child(&mut self, index: usize, min_len: usize) {
        if self.children[index].len() >= min_len || self.children.len() < 2 {
            return;
        }

        if index > 0 && self.children[index - 1].len() > min_len {
            self.steal_from_left(index);
        } else if index + 1 < self.children.len() && self.children[index + 1].len() > min_len {
            self.steal_from_right(index);
        } else if index + 1 < self.children.len() {
            self.merge_children(index);
        } else {
            // Last child: merge with the left neighbour
            self.merge_children(index - 1);
        }
    }

    /// Rotate the last key of the left sibling through the parent into the child at `index`
    fn steal_from_left(&mut self, index: usize) {
        trace!(index, "stealing from left sibling");
        let (before, after) = self.children.split_at_mut(index);
        let sibling = &mut before[index - 1];
        let node = &mut after[0];

        if let Some(stolen) = sibling.keys.pop() {
            let separator = mem::replace(&mut self.keys[index - 1], stolen);
            node.keys.insert(0, separator);
            if let Some(child) = sibling.children.pop() {
                node.children.insert(0, child);
            }
        }
    }

    /// Rotate the first key of the right sibling through the parent into the child at `index`
    fn steal_from_right(&mut self, index: usize) {
        trace!(index, "stealing from right sibling");
        let (before, after) = self.children.split_at_mut(index + 1);
        let node = &mut before[index];
        let sibling = &mut after[0];

        let stolen = sibling.keys.remove(0);
        let separator = mem::replace(&mut self.keys[index], stolen);
        node.keys.push(separator);
        if !sibling.is_leaf() {
            node.children.push(sibling.children.remove(0));
        }
    }

    /// Merge the child at `index + 1` and the separator key between them into the
    /// child at `index`
    fn merge_children(&mut self, index: usize) {
        trace!(index, "merging children");
        let separator = self.keys.remove(index);
        let right = self.children.remove(index + 1);
        let left = &mut self.children[index];
        left.keys.push(separator);
        left.keys.extend(right.keys);
        left.children.extend(right.children);
    }

    /// Detach the only child of a node left without keys
    pub(super) fn take_only_child(&mut self) -> Option<Node<T>> {
        if self.keys.is_empty() && self.children.len() == 1 {
            self.children.pop()
        } else {
            None
        }
    }

    /// Walk the subtree asserting every structural invariant, returning its height
    #[cfg(test)]
    pub(super) fn check<C: Comparator<T>>(
        &self,
        order: usize,
        min_len: usize,
        is_root: bool,
        cmp: &C,
    ) -> usize {
        assert!(self.len() < order, "node holds {} keys", self.len());
        if !is_root {
            assert!(self.len() >= min_len, "node holds {} keys", self.len());
        }
        for pair in self.keys.windows(2) {
            assert_eq!(cmp.compare(&pair[0], &pair[1]), Ordering::Less);
        }

        if self.is_leaf() {
            return 1;
        }
        assert_eq!(self.children.len(), self.len() + 1);
        let mut height = None;
        for (i, child) in self.children.iter().enumerate() {
            if let (Some(first), Some(separator)) = (child.first(), i.checked_sub(1)) {
                assert_eq!(cmp.compare(&self.keys[separator], first), Ordering::Less);
            }
            if let (Some(last), Some(separator)) = (child.last(), self.keys.get(i)) {
                assert_eq!(cmp.compare(last, separator), Ordering::Less);
            }
            let child_height = child.check(order, min_len, false, cmp);
            assert_eq!(*height.get_or_insert(child_height), child_height);
        }
        height.unwrap_or(0) + 1
    }
}

/// Index of the key promoted when splitting `len` keys: `round(len / 2) - 1`,
/// with halves rounded up
fn median_index(len: usize) -> usize {
    (len + 1) / 2 - 1
}
