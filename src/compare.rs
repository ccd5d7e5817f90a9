use core::cmp::Ordering;

/// A strict total order over `T`, bound to a tree once at construction.
///
/// `less(a, b)` must be irreflexive, transitive and antisymmetric for as long as the tree holds
/// values. Two values are *equivalent* when neither is less than the other; the tree stores at
/// most one value per equivalence class.
///
/// Any `Fn(&T, &T) -> bool` closure is a comparator:
///
/// ```
/// use rbtree_index::RbTree;
///
/// let mut by_len = RbTree::with_comparator(|a: &&str, b: &&str| a.len() < b.len());
/// by_len.insert("ccc");
/// by_len.insert("a");
/// assert!(!by_len.insert("b")); // same length as "a"
/// assert_eq!(by_len.iter().copied().collect::<Vec<_>>(), ["a", "ccc"]);
/// ```
pub trait Comparator<T: ?Sized> {
    /// Returns true if `a` is ordered strictly before `b`.
    fn less(&self, a: &T, b: &T) -> bool;

    /// Three-way comparison derived from [`less`](Comparator::less).
    fn compare(&self, a: &T, b: &T) -> Ordering {
        if self.less(a, b) {
            Ordering::Less
        } else if self.less(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

/// The [`Ord`] order of `T`. This is the default comparator of [`RbTree`](crate::RbTree).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct NaturalOrder;

impl<T: ?Sized + Ord> Comparator<T> for NaturalOrder {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        a < b
    }

    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// The reverse of the [`Ord`] order of `T`.
///
/// ```
/// use rbtree_index::{RbTree, ReverseOrder};
///
/// let tree = RbTree::from_iter_with([1, 3, 2], ReverseOrder);
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct ReverseOrder;

impl<T: ?Sized + Ord> Comparator<T> for ReverseOrder {
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        b < a
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Orders `(K, V)` entries by key alone.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct KeyOrder;

impl<K: Ord, V> Comparator<(K, V)> for KeyOrder {
    #[inline]
    fn less(&self, a: &(K, V), b: &(K, V)) -> bool {
        a.0 < b.0
    }
}
