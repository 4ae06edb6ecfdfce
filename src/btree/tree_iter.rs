use super::node::Node;
use crate::error::{Error, Result};

/// Sorted iterator over the elements of a `BTree`.
///
/// All references are collected when the iterator is created, so each call to
/// `next` is a simple pop
pub struct Iter<'a, T> {
    /// Elements in descending order: the next one to return is at the end
    stack: Vec<&'a T>,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(root: &'a Node<T>, len: usize) -> Self {
        let mut iter = Iter {
            stack: Vec::with_capacity(len),
        };
        iter.push_reversed(root);
        iter
    }

    /// Push the subtree from the largest to the smallest element
    fn push_reversed(&mut self, node: &'a Node<T>) {
        let children = node.children();
        for (i, key) in node.keys().iter().enumerate().rev() {
            if let Some(child) = children.get(i + 1) {
                self.push_reversed(child);
            }
            self.stack.push(key);
        }
        if let Some(child) = children.first() {
            self.push_reversed(child);
        }
    }

    /// Like `next`, but reports exhaustion as an error
    pub fn try_next(&mut self) -> Result<&'a T> {
        self.next().ok_or(Error::Exhausted)
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        self.stack.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), Some(self.stack.len()))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}
impl<'a, T> std::iter::FusedIterator for Iter<'a, T> {}
