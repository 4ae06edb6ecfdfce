use super::node::Node;
use crate::error::{Error, Result};
use std::collections::VecDeque;

/// The keys of every node at one depth, from left to right
pub type Level<'a, T> = Vec<&'a [T]>;

/// Iterator over the levels of a `BTree`, from the root down to the leaves.
/// The whole traversal is done when the iterator is created
pub struct LevelIter<'a, T> {
    levels: VecDeque<Level<'a, T>>,
}

impl<'a, T> LevelIter<'a, T> {
    pub(super) fn new(root: &'a Node<T>) -> Self {
        let mut levels = VecDeque::new();

        // An empty tree has no levels at all
        if !root.is_empty() {
            let mut current = vec![root];
            while !current.is_empty() {
                levels.push_back(current.iter().map(|&node| node.keys()).collect());
                current = current
                    .into_iter()
                    .flat_map(|node| node.children())
                    .collect();
            }
        }

        LevelIter { levels }
    }

    /// Like `next`, but reports exhaustion as an error
    pub fn try_next(&mut self) -> Result<Level<'a, T>> {
        self.next().ok_or(Error::Exhausted)
    }
}

impl<'a, T> Iterator for LevelIter<'a, T> {
    type Item = Level<'a, T>;
    fn next(&mut self) -> Option<Self::Item> {
        self.levels.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.levels.len(), Some(self.levels.len()))
    }
}

impl<'a, T> ExactSizeIterator for LevelIter<'a, T> {}
impl<'a, T> std::iter::FusedIterator for LevelIter<'a, T> {}
