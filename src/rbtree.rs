use core::fmt;
use core::iter::FusedIterator;

use crate::compare::{Comparator, NaturalOrder};
use crate::error::Error;
use crate::raw::{Handle, RawRbTree, SearchResult};

mod cursor;

pub use cursor::Cursor;

/// An ordered set based on a red-black tree.
///
/// Values are kept sorted by a [`Comparator`] chosen when the tree is built; by default that is
/// the value type's [`Ord`] order. Values the comparator considers equivalent (neither is less
/// than the other) are stored once: inserting a second one is rejected.
///
/// Besides the usual collection operations the tree hands out [`Cursor`]s: lightweight,
/// non-borrowing positions that can be stepped forwards and backwards, dereferenced, and used to
/// remove exactly the value they name.
///
/// Insertion, removal, search and the bound queries are O(log n). Stepping a cursor or an
/// iterator is amortized O(1).
///
/// It is a logic error for a value to be modified in such a way that its ordering relative to
/// any other value changes while it is in the tree. The behavior resulting from such a logic
/// error is not specified, but will be encapsulated to the `RbTree` that observed the logic error
/// and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use rbtree_index::RbTree;
///
/// let mut tree = RbTree::new();
/// tree.insert(15);
/// for i in (0..100).step_by(7) {
///     tree.insert(i);
/// }
///
/// // First value greater than 16, and the one after it.
/// let at = tree.lower_bound(&16);
/// assert_eq!(tree.get(at), Some(&21));
/// let next = tree.successor(at).unwrap();
/// assert_eq!(tree.get(next), Some(&28));
///
/// // Remove by cursor and by value.
/// assert_eq!(tree.remove_at(next), Some(28));
/// assert_eq!(tree.remove(&15), Some(15));
///
/// assert!(tree.search(&15).is_end());
/// assert!(!tree.search(&7).is_end());
/// assert!(tree.contains(&7));
/// ```
#[derive(Clone)]
pub struct RbTree<T, C = NaturalOrder> {
    raw: RawRbTree<T, C>,
}

/// An iterator over the values of an `RbTree`, in comparator order.
///
/// This `struct` is created by the [`iter`] method on [`RbTree`]. See its documentation for more.
///
/// # Examples
///
/// ```
/// use rbtree_index::RbTree;
///
/// let tree = RbTree::from([3, 1, 2]);
/// let mut iter = tree.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: RbTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T, C = NaturalOrder> {
    tree: &'a RawRbTree<T, C>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// An owning iterator over the values of an `RbTree`, in comparator order.
///
/// This `struct` is created by the [`into_iter`] method on [`RbTree`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: RbTree#method.into_iter
pub struct IntoIter<T> {
    inner: alloc::vec::IntoIter<T>,
}

impl<T: Ord> RbTree<T> {
    /// Makes a new, empty `RbTree` ordered by `T`'s [`Ord`] implementation.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// tree.insert("b");
    /// tree.insert("a");
    /// assert_eq!(tree.first(), Some(&"a"));
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        RbTree::with_comparator(NaturalOrder)
    }

    /// Makes a new, empty `RbTree` with room for at least `capacity` values.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::RbTree;
    ///
    /// let tree: RbTree<i32> = RbTree::with_capacity(32);
    /// assert!(tree.is_empty());
    /// assert!(tree.capacity() >= 32);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        RbTree::with_capacity_and_comparator(capacity, NaturalOrder)
    }
}

impl<T, C> RbTree<T, C> {
    /// Makes a new, empty `RbTree` ordered by `cmp`.
    ///
    /// The comparator is fixed for the lifetime of the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::RbTree;
    ///
    /// let mut tree = RbTree::with_comparator(|a: &i32, b: &i32| a > b);
    /// for v in [1, 3, 2] {
    ///     tree.insert(v);
    /// }
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [3, 2, 1]);
    /// ```
    pub const fn with_comparator(cmp: C) -> Self {
        RbTree {
            raw: RawRbTree::new(cmp),
        }
    }

    /// Makes a new, empty `RbTree` ordered by `cmp` with room for at least `capacity` values.
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        RbTree {
            raw: RawRbTree::with_capacity(capacity, cmp),
        }
    }

    /// Returns the comparator the tree was built with.
    pub const fn comparator(&self) -> &C {
        self.raw.comparator()
    }

    /// Returns the number of values in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// assert_eq!(tree.len(), 0);
    /// tree.insert(1);
    /// assert_eq!(tree.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no values.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of values the tree can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Reserves room for at least `additional` more values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if the node storage cannot grow. The tree is left
    /// unchanged.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
        self.raw.try_reserve(additional).map_err(|err| {
            log::debug!("RbTree::try_reserve({additional}) failed: {err}");
            Error::from(err)
        })
    }

    /// Removes every value. Every cursor into the tree becomes stale.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::RbTree;
    ///
    /// let mut tree = RbTree::from([1, 2]);
    /// let one = tree.begin();
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// assert!(tree.is_stale(one));
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    fn cursor_of(&self, handle: Option<Handle>) -> Cursor {
        handle.map_or(Cursor::END, |handle| Cursor::at(self.raw.node_ref(handle)))
    }

    /// Resolves a cursor to a live node.
    fn resolve(&self, cursor: Cursor) -> Result<Handle, Error> {
        let node = cursor.node().ok_or(Error::EndCursor)?;
        self.raw.resolve(node).ok_or(Error::StaleCursor)
    }

    /// Returns a cursor at the smallest value, or [`Cursor::END`] if the tree is empty.
    #[must_use]
    pub fn begin(&self) -> Cursor {
        self.cursor_of(self.raw.first())
    }

    /// Returns the end sentinel, one past the largest value.
    #[must_use]
    pub const fn end(&self) -> Cursor {
        Cursor::END
    }

    /// Returns the value at `cursor`, or `None` for the end sentinel or a stale cursor.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::RbTree;
    ///
    /// let tree = RbTree::from([4, 2]);
    /// assert_eq!(tree.get(tree.begin()), Some(&2));
    /// assert_eq!(tree.get(tree.end()), None);
    /// ```
    #[must_use]
    pub fn get(&self, cursor: Cursor) -> Option<&T> {
        self.resolve(cursor).ok().map(|handle| self.raw.value(handle))
    }

    /// Returns the value at `cursor`.
    ///
    /// # Errors
    ///
    /// [`Error::EndCursor`] for the end sentinel, [`Error::StaleCursor`] if the value the cursor
    /// named has been removed.
    pub fn try_get(&self, cursor: Cursor) -> Result<&T, Error> {
        self.resolve(cursor).map(|handle| self.raw.value(handle))
    }

    /// Returns `true` if `cursor` names a value that is no longer in the tree.
    ///
    /// The end sentinel is never stale.
    #[must_use]
    pub fn is_stale(&self, cursor: Cursor) -> bool {
        matches!(self.resolve(cursor), Err(Error::StaleCursor))
    }

    /// Steps `cursor` to the next value in order; stepping past the largest value gives
    /// [`Cursor::END`].
    ///
    /// # Errors
    ///
    /// [`Error::EndCursor`] if `cursor` is already the end sentinel, [`Error::StaleCursor`] if
    /// its value has been removed.
    ///
    /// # Complexity
    ///
    /// O(log n) worst case, amortized O(1) over a full traversal.
    pub fn successor(&self, cursor: Cursor) -> Result<Cursor, Error> {
        let handle = self.resolve(cursor)?;
        Ok(self.cursor_of(self.raw.successor(handle)))
    }

    /// Steps `cursor` to the previous value in order; stepping before the smallest value gives
    /// [`Cursor::END`].
    ///
    /// Stepping back from [`Cursor::END`] lands on the largest value, so a reverse walk can start
    /// from [`end`](RbTree::end).
    ///
    /// # Errors
    ///
    /// [`Error::StaleCursor`] if the value `cursor` named has been removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::RbTree;
    ///
    /// let tree = RbTree::from([1, 2, 3]);
    /// let mut cursor = tree.predecessor(tree.end()).unwrap();
    /// let mut seen = Vec::new();
    /// while let Some(&v) = tree.get(cursor) {
    ///     seen.push(v);
    ///     cursor = tree.predecessor(cursor).unwrap();
    /// }
    /// assert_eq!(seen, [3, 2, 1]);
    /// ```
    pub fn predecessor(&self, cursor: Cursor) -> Result<Cursor, Error> {
        match self.resolve(cursor) {
            Ok(handle) => Ok(self.cursor_of(self.raw.predecessor(handle))),
            Err(Error::EndCursor) => Ok(self.cursor_of(self.raw.last())),
            Err(err) => Err(err),
        }
    }

    /// Returns the smallest value.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.raw.first().map(|handle| self.raw.value(handle))
    }

    /// Returns the largest value.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.raw.last().map(|handle| self.raw.value(handle))
    }

    /// Removes and returns the smallest value.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::RbTree;
    ///
    /// let mut tree = RbTree::from([2, 1]);
    /// assert_eq!(tree.pop_first(), Some(1));
    /// assert_eq!(tree.pop_first(), Some(2));
    /// assert_eq!(tree.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<T> {
        let handle = self.raw.first()?;
        Some(self.raw.remove(handle))
    }

    /// Removes and returns the largest value.
    pub fn pop_last(&mut self) -> Option<T> {
        let handle = self.raw.last()?;
        Some(self.raw.remove(handle))
    }

    /// Removes the value `cursor` names and returns it.
    ///
    /// The end sentinel and stale cursors are a no-op returning `None`. Cursors to other values
    /// stay valid.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::RbTree;
    ///
    /// let mut tree = RbTree::from([1, 2, 3]);
    /// let two = tree.search(&2);
    /// let three = tree.search(&3);
    /// assert_eq!(tree.remove_at(two), Some(2));
    /// assert_eq!(tree.remove_at(two), None);
    /// assert_eq!(tree.remove_at(tree.end()), None);
    /// assert_eq!(tree.get(three), Some(&3));
    /// ```
    pub fn remove_at(&mut self, cursor: Cursor) -> Option<T> {
        let handle = self.resolve(cursor).ok()?;
        Some(self.raw.remove(handle))
    }

    /// Gets an iterator that visits the values in comparator order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::RbTree;
    ///
    /// let tree = RbTree::from([3, 1, 2]);
    /// let forward: Vec<_> = tree.iter().copied().collect();
    /// let backward: Vec<_> = tree.iter().rev().copied().collect();
    /// assert_eq!(forward, [1, 2, 3]);
    /// assert_eq!(backward, [3, 2, 1]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T, C> {
        Iter::new(&self.raw)
    }

    /// Returns `true` if the root, when present, is black and every path from the root to an
    /// empty child slot crosses the same number of black nodes.
    ///
    /// This walks the whole tree (O(n)) and is meant for tests and debugging.
    #[must_use]
    pub fn is_black_balanced(&self) -> bool {
        self.raw.is_black_balanced()
    }

    /// Returns `true` if no red node has a red child. O(n).
    #[must_use]
    pub fn reds_have_black_children(&self) -> bool {
        self.raw.reds_have_black_children()
    }
}

impl<T, C: Comparator<T>> RbTree<T, C> {
    /// Builds a tree ordered by `cmp` from the values of `iter`. Later values equivalent to an
    /// earlier one are dropped.
    pub fn from_iter_with<I: IntoIterator<Item = T>>(iter: I, cmp: C) -> Self {
        let mut tree = RbTree::with_comparator(cmp);
        tree.extend(iter);
        tree
    }

    /// Adds a value to the tree.
    ///
    /// Returns whether the value was newly inserted. That is:
    ///
    /// - If the tree did not previously contain an equivalent value, `true` is returned.
    /// - If the tree already contained an equivalent value, `false` is returned, and the tree is
    ///   not modified: the new value is dropped.
    ///
    /// # Panics
    ///
    /// Panics if node storage cannot grow; see [`try_insert`](RbTree::try_insert).
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// assert!(tree.insert(2));
    /// assert!(!tree.insert(2));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        match self.raw.locate(&value) {
            SearchResult::Found(_) => false,
            SearchResult::Vacant { parent, side } => {
                self.raw.insert_vacant(value, parent, side);
                true
            }
        }
    }

    /// Adds a value to the tree, reporting allocation failure instead of panicking.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailure`] if node storage cannot grow. Storage is reserved
    /// before any link is touched, so the tree is unchanged on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// assert_eq!(tree.try_insert(1), Ok(true));
    /// assert_eq!(tree.try_insert(1), Ok(false));
    /// ```
    pub fn try_insert(&mut self, value: T) -> Result<bool, Error> {
        match self.raw.locate(&value) {
            SearchResult::Found(_) => Ok(false),
            SearchResult::Vacant { parent, side } => {
                self.try_reserve(1)?;
                self.raw.insert_vacant(value, parent, side);
                Ok(true)
            }
        }
    }

    /// Removes the value equivalent to `value` and returns it, or `None` if there is none.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::RbTree;
    ///
    /// let mut tree = RbTree::from([1, 2]);
    /// assert_eq!(tree.remove(&2), Some(2));
    /// assert_eq!(tree.remove(&2), None);
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let handle = self.raw.search(value)?;
        Some(self.raw.remove(handle))
    }

    /// Returns a cursor at the value equivalent to `value`, or [`Cursor::END`] if there is none.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn search(&self, value: &T) -> Cursor {
        self.cursor_of(self.raw.search(value))
    }

    /// Returns `true` if the tree contains a value equivalent to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::RbTree;
    ///
    /// let tree = RbTree::from([1, 2, 3]);
    /// assert!(tree.contains(&1));
    /// assert!(!tree.contains(&4));
    /// ```
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.raw.search(value).is_some()
    }

    /// Returns a cursor at the first value ordered strictly after `value`, or [`Cursor::END`] if
    /// every value is ordered at or before it.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::RbTree;
    ///
    /// let tree = RbTree::from([10, 12, 14]);
    /// assert_eq!(tree.get(tree.lower_bound(&9)), Some(&10));
    /// assert_eq!(tree.get(tree.lower_bound(&10)), Some(&12));
    /// assert!(tree.lower_bound(&14).is_end());
    /// ```
    #[must_use]
    pub fn lower_bound(&self, value: &T) -> Cursor {
        self.cursor_of(self.raw.lower_bound(value))
    }

    /// Returns a cursor at the last value ordered strictly before `value`, or [`Cursor::END`] if
    /// every value is ordered at or after it.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::RbTree;
    ///
    /// let tree = RbTree::from([10, 12, 14]);
    /// assert_eq!(tree.get(tree.upper_bound(&15)), Some(&14));
    /// assert_eq!(tree.get(tree.upper_bound(&12)), Some(&10));
    /// assert!(tree.upper_bound(&10).is_end());
    /// ```
    #[must_use]
    pub fn upper_bound(&self, value: &T) -> Cursor {
        self.cursor_of(self.raw.upper_bound(value))
    }

    /// Returns `true` if every value lies strictly between the bounds set by its ancestors. O(n).
    #[must_use]
    pub fn is_binary_search_tree(&self) -> bool {
        self.raw.is_binary_search_tree()
    }
}

impl<T: fmt::Debug, C> fmt::Debug for RbTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C: Default> Default for RbTree<T, C> {
    fn default() -> Self {
        RbTree::with_comparator(C::default())
    }
}

impl<T: PartialEq, C> PartialEq for RbTree<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C> Eq for RbTree<T, C> {}

impl<T, C: Comparator<T> + Default> FromIterator<T> for RbTree<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        RbTree::from_iter_with(iter, C::default())
    }
}

impl<T, C: Comparator<T>> Extend<T> for RbTree<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: Copy + 'a, C: Comparator<T>> Extend<&'a T> for RbTree<T, C> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for &value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for RbTree<T> {
    fn from(arr: [T; N]) -> Self {
        RbTree::from_iter_with(arr, NaturalOrder)
    }
}

impl<'a, T, C> IntoIterator for &'a RbTree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, C>;

    fn into_iter(self) -> Iter<'a, T, C> {
        self.iter()
    }
}

impl<T, C> IntoIterator for RbTree<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an owning iterator over the values in comparator order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::RbTree;
    ///
    /// let tree = RbTree::from([2, 3, 1]);
    /// assert_eq!(tree.into_iter().collect::<Vec<_>>(), [1, 2, 3]);
    /// ```
    fn into_iter(self) -> IntoIter<T> {
        IntoIter::drain(self.raw)
    }
}

impl<'a, T, C> Iter<'a, T, C> {
    pub(crate) fn new(tree: &'a RawRbTree<T, C>) -> Self {
        Iter {
            tree,
            front: tree.first(),
            back: tree.last(),
            remaining: tree.len(),
        }
    }
}

impl<'a, T, C> Iterator for Iter<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.front = self.tree.successor(handle);
        self.remaining -= 1;
        Some(self.tree.value(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, C> DoubleEndedIterator for Iter<'a, T, C> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.back = self.tree.predecessor(handle);
        self.remaining -= 1;
        Some(self.tree.value(handle))
    }
}

impl<T, C> ExactSizeIterator for Iter<'_, T, C> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T, C> FusedIterator for Iter<'_, T, C> {}

impl<T, C> Clone for Iter<'_, T, C> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for Iter<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<T> IntoIter<T> {
    pub(crate) fn drain<C>(mut tree: RawRbTree<T, C>) -> Self {
        IntoIter {
            inner: tree.drain_to_vec().into_iter(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}
