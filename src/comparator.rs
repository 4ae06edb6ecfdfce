use std::cmp::Ordering;

/// A total order over `T`, injected into the tree at construction.
///
/// Any closure `Fn(&T, &T) -> Ordering` is a comparator, so a tree ordering
/// values in reverse can be built with
/// `BTree::with_comparator(8, |a: &i32, b: &i32| b.cmp(a))`
pub trait Comparator<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The ordering given by `Ord`
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
