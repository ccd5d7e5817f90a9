use crate::raw::NodeRef;

/// A position in an [`RbTree`](crate::RbTree): one stored value, or the end sentinel one past
/// the last value.
///
/// A cursor does not borrow the tree. It names a node by identity, so it keeps pointing at the
/// same value while other values are inserted or removed around it (rebalancing relinks nodes, it
/// never moves them). Once the named value itself is removed the cursor is *stale*: lookups
/// through it return `None` or [`Error::StaleCursor`](crate::Error::StaleCursor) instead of
/// reaching another value.
///
/// Two cursors are equal when they name the same node, or are both the end sentinel.
///
/// # Examples
///
/// ```
/// use rbtree_index::{Cursor, RbTree};
///
/// let mut tree = RbTree::from([10, 20, 30]);
/// let twenty = tree.search(&20);
///
/// tree.insert(25);
/// tree.remove(&10);
/// assert_eq!(tree.get(twenty), Some(&20));
///
/// tree.remove_at(twenty);
/// assert!(tree.is_stale(twenty));
/// assert_eq!(tree.get(twenty), None);
/// assert_eq!(tree.search(&99), Cursor::END);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Cursor {
    node: Option<NodeRef>,
}

impl Cursor {
    /// The end sentinel. Also the [`Default`] cursor.
    pub const END: Cursor = Cursor { node: None };

    pub(crate) const fn at(node: NodeRef) -> Self {
        Cursor { node: Some(node) }
    }

    pub(crate) const fn node(self) -> Option<NodeRef> {
        self.node
    }

    /// Returns true for the end sentinel.
    #[must_use]
    pub const fn is_end(self) -> bool {
        self.node.is_none()
    }
}
