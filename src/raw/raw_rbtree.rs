use core::cmp::Ordering;

use alloc::collections::TryReserveError;
use alloc::vec::Vec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Node, NodeRef, Side};
use crate::compare::Comparator;

/// The red-black tree engine backing `RbTree` and `RbMap`.
#[derive(Clone)]
pub(crate) struct RawRbTree<T, C> {
    /// Arena owning every node reachable from `root`.
    nodes: Arena<Node<T>>,
    root: Option<Handle>,
    cmp: C,
}

/// Result of descending the tree towards a value.
pub(crate) enum SearchResult {
    /// A node equivalent to the target.
    Found(Handle),
    /// The target is absent; it belongs in the `side` slot of `parent`, or at the root when
    /// `parent` is `None`.
    Vacant { parent: Option<Handle>, side: Side },
}

impl<T, C> RawRbTree<T, C> {
    /// Creates a new, empty tree ordered by `cmp`.
    pub(crate) const fn new(cmp: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            cmp,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize, cmp: C) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            cmp,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.nodes.try_reserve(additional)
    }

    pub(crate) const fn comparator(&self) -> &C {
        &self.cmp
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    /// Removes every node. Outstanding node references become stale.
    pub(crate) fn clear(&mut self) {
        log::trace!("clearing red-black tree of {} nodes", self.len());
        self.nodes.clear();
        self.root = None;
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<T> {
        self.nodes.get_mut(handle)
    }

    #[inline]
    pub(crate) fn value(&self, handle: Handle) -> &T {
        self.node(handle).value()
    }

    #[inline]
    pub(crate) fn value_mut(&mut self, handle: Handle) -> &mut T {
        self.node_mut(handle).value_mut()
    }

    /// Stamps `handle` with its current generation.
    pub(crate) fn node_ref(&self, handle: Handle) -> NodeRef {
        NodeRef {
            handle,
            generation: self.nodes.generation(handle),
        }
    }

    /// Returns the handle behind `node` if that node is still in the tree.
    pub(crate) fn resolve(&self, node: NodeRef) -> Option<Handle> {
        self.nodes.is_live(node.handle, node.generation).then_some(node.handle)
    }

    /// Side of `parent` that `child` hangs on.
    fn side_under(&self, parent: Handle, child: Handle) -> Side {
        self.node(parent).side_of(child).expect("parent link names a node that does not own the child")
    }

    // ─── Traversal ──────────────────────────────────────────────────────────

    /// Follows `side` links from `handle` until none remains.
    fn extreme(&self, mut handle: Handle, side: Side) -> Handle {
        while let Some(child) = self.node(handle).child(side) {
            handle = child;
        }
        handle
    }

    pub(crate) fn minimum(&self, handle: Handle) -> Handle {
        self.extreme(handle, Side::Left)
    }

    pub(crate) fn maximum(&self, handle: Handle) -> Handle {
        self.extreme(handle, Side::Right)
    }

    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.minimum(root))
    }

    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.maximum(root))
    }

    /// In-order neighbour of `handle` in direction `toward` (`Right` is the successor).
    fn step(&self, mut handle: Handle, toward: Side) -> Option<Handle> {
        if let Some(child) = self.node(handle).child(toward) {
            return Some(self.extreme(child, toward.opposite()));
        }
        // Climb until we arrive from the opposite side.
        while let Some(parent) = self.node(handle).parent() {
            if self.node(parent).child(toward) != Some(handle) {
                return Some(parent);
            }
            handle = parent;
        }
        None
    }

    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        self.step(handle, Side::Right)
    }

    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        self.step(handle, Side::Left)
    }

    /// Descends using `f`, which reports how a node's value orders against the target.
    pub(crate) fn search_by<F>(&self, mut f: F) -> SearchResult
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;

        while let Some(handle) = current {
            side = match f(self.value(handle)) {
                Ordering::Greater => Side::Left,
                Ordering::Less => Side::Right,
                Ordering::Equal => return SearchResult::Found(handle),
            };
            parent = Some(handle);
            current = self.node(handle).child(side);
        }

        SearchResult::Vacant { parent, side }
    }

    /// Moves every value out in ascending order, leaving the tree empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<T> {
        let mut order = Vec::with_capacity(self.len());
        let mut current = self.first();
        while let Some(handle) = current {
            order.push(handle);
            current = self.successor(handle);
        }

        let values = order.into_iter().map(|handle| self.nodes.take(handle).into_value()).collect();
        self.root = None;
        values
    }

    // ─── Rotations ──────────────────────────────────────────────────────────

    /// Points whatever owned `old` (its parent's child slot, or the root) at `new`.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self.side_under(parent, old);
                self.node_mut(parent).set_child(side, new);
            }
        }
    }

    /// Replaces the subtree rooted at `old` with the subtree rooted at `new`.
    fn transplant(&mut self, old: Handle, new: Option<Handle>) {
        let parent = self.node(old).parent();
        self.replace_child(parent, old, new);
        if let Some(new) = new {
            self.node_mut(new).set_parent(parent);
        }
    }

    /// Rotates at `x`, moving `x` down to its `dir` side.
    ///
    /// `Side::Left` is a left rotation: the right child of `x` takes its place and `x` becomes
    /// that child's left child. Preserves in-order sequence; colors are left alone.
    ///
    /// # Panics
    ///
    /// Panics if `x` has no child opposite `dir`.
    pub(crate) fn rotate(&mut self, x: Handle, dir: Side) {
        let rising = dir.opposite();
        let y = self.node(x).child(rising).expect("rotation needs a child on the rising side");

        let inner = self.node(y).child(dir);
        self.node_mut(x).set_child(rising, inner);
        if let Some(inner) = inner {
            self.node_mut(inner).set_parent(Some(x));
        }

        let parent = self.node(x).parent();
        self.replace_child(parent, x, Some(y));
        self.node_mut(y).set_parent(parent);

        self.node_mut(y).set_child(dir, Some(x));
        self.node_mut(x).set_parent(Some(y));
    }

    // ─── Insertion ──────────────────────────────────────────────────────────

    /// Links `value` as a red leaf into a vacant slot found by a search, then rebalances.
    pub(crate) fn insert_vacant(&mut self, value: T, parent: Option<Handle>, side: Side) -> Handle {
        debug_assert!(
            parent.map_or(self.root.is_none(), |p| self.node(p).child(side).is_none()),
            "insert_vacant() - slot is occupied"
        );

        let handle = self.nodes.alloc(Node::new_red(value, parent));
        match parent {
            None => self.root = Some(handle),
            Some(parent) => self.node_mut(parent).set_child(side, Some(handle)),
        }
        self.insert_fixup(handle);
        handle
    }

    fn insert_fixup(&mut self, mut n: Handle) {
        loop {
            let Some(parent) = self.node(n).parent() else {
                self.node_mut(n).set_color(Color::Black);
                return;
            };
            if self.node(parent).is_black() {
                return;
            }

            let grandparent = self.node(parent).parent().expect("a red node is never the root");
            let parent_side = self.side_under(grandparent, parent);

            if let Some(uncle) = self.node(grandparent).child(parent_side.opposite())
                && self.node(uncle).is_red()
            {
                self.node_mut(parent).set_color(Color::Black);
                self.node_mut(uncle).set_color(Color::Black);
                self.node_mut(grandparent).set_color(Color::Red);
                n = grandparent;
                continue;
            }

            // Inner grandchild: rotate it outward first; it then stands where `parent` was.
            let mut parent = parent;
            if self.side_under(parent, n) != parent_side {
                self.rotate(parent, parent_side);
                parent = n;
            }

            self.node_mut(parent).set_color(Color::Black);
            self.node_mut(grandparent).set_color(Color::Red);
            self.rotate(grandparent, parent_side.opposite());
            return;
        }
    }

    // ─── Deletion ───────────────────────────────────────────────────────────

    /// Unlinks and frees the node at `z`, returning its value.
    pub(crate) fn remove(&mut self, z: Handle) -> T {
        let (left, right, parent) = {
            let node = self.node(z);
            (node.left(), node.right(), node.parent())
        };
        let mut removed_color = self.node(z).color();

        // Where a node went missing: the node above the gap and the side the gap is on.
        let hole = match (left, right) {
            (None, child) | (child, None) => {
                let hole = parent.map(|parent| (parent, self.side_under(parent, z)));
                self.transplant(z, child);
                hole
            }
            (Some(left), Some(right)) => {
                let y = self.minimum(right);
                removed_color = self.node(y).color();

                let hole = if y == right {
                    (y, Side::Right)
                } else {
                    let y_parent = self.node(y).parent().expect("a subtree minimum below `right` has a parent");
                    let y_right = self.node(y).right();
                    self.transplant(y, y_right);
                    self.node_mut(y).set_child(Side::Right, Some(right));
                    self.node_mut(right).set_parent(Some(y));
                    (y_parent, Side::Left)
                };

                self.transplant(z, Some(y));
                self.node_mut(y).set_child(Side::Left, Some(left));
                self.node_mut(left).set_parent(Some(y));
                let color = self.node(z).color();
                self.node_mut(y).set_color(color);
                Some(hole)
            }
        };

        let value = self.nodes.take(z).into_value();

        if removed_color == Color::Black
            && let Some((x, side)) = hole
        {
            self.remove_fixup(x, side);
        }
        if let Some(root) = self.root {
            self.node_mut(root).set_color(Color::Black);
        }

        value
    }

    /// Returns the sibling across from a black-deficient position.
    fn deficit_sibling(&self, x: Handle, far: Side) -> Option<Handle> {
        let sibling = self.node(x).child(far);
        debug_assert!(sibling.is_some(), "black-deficient subtree has no sibling");
        if sibling.is_none() {
            log::warn!("remove_fixup() - no sibling opposite the deficient side; stopping early");
        }
        sibling
    }

    fn red_child(&self, handle: Handle, side: Side) -> Option<Handle> {
        self.node(handle).child(side).filter(|&child| self.node(child).is_red())
    }

    /// Restores the black height after a black node left the `side` subtree of `x`.
    fn remove_fixup(&mut self, mut x: Handle, mut side: Side) {
        loop {
            let far = side.opposite();
            let Some(mut sibling) = self.deficit_sibling(x, far) else {
                return;
            };

            if self.node(sibling).is_red() {
                self.rotate(x, side);
                self.node_mut(x).set_color(Color::Red);
                self.node_mut(sibling).set_color(Color::Black);
                let Some(next) = self.deficit_sibling(x, far) else {
                    return;
                };
                sibling = next;
            }

            if let Some(nephew) = self.red_child(sibling, far) {
                let color = self.node(x).color();
                self.node_mut(nephew).set_color(Color::Black);
                self.node_mut(sibling).set_color(color);
                self.node_mut(x).set_color(Color::Black);
                self.rotate(x, side);
                return;
            }

            if let Some(nephew) = self.red_child(sibling, side) {
                let color = self.node(x).color();
                self.node_mut(nephew).set_color(color);
                self.node_mut(x).set_color(Color::Black);
                self.rotate(sibling, far);
                self.rotate(x, side);
                return;
            }

            self.node_mut(sibling).set_color(Color::Red);
            if self.node(x).is_red() {
                self.node_mut(x).set_color(Color::Black);
                return;
            }

            // The whole subtree at `x` is now one black short; push the deficit up.
            let Some(parent) = self.node(x).parent() else {
                return;
            };
            side = self.side_under(parent, x);
            x = parent;
        }
    }
}

impl<T, C: Comparator<T>> RawRbTree<T, C> {
    /// Descends towards `value`. Values the comparator orders neither before nor after a node
    /// are `Found`; otherwise the first empty slot on the path is returned.
    pub(crate) fn locate(&self, value: &T) -> SearchResult {
        let cmp = &self.cmp;
        self.search_by(|node| {
            if cmp.less(value, node) {
                Ordering::Greater
            } else if cmp.less(node, value) {
                Ordering::Less
            } else {
                Ordering::Equal
            }
        })
    }

    pub(crate) fn search(&self, value: &T) -> Option<Handle> {
        match self.locate(value) {
            SearchResult::Found(handle) => Some(handle),
            SearchResult::Vacant { .. } => None,
        }
    }

    /// Leftmost node that `value` is ordered before.
    pub(crate) fn lower_bound(&self, value: &T) -> Option<Handle> {
        let mut best = None;
        let mut current = self.root;
        while let Some(handle) = current {
            if self.cmp.less(value, self.value(handle)) {
                best = Some(handle);
                current = self.node(handle).left();
            } else {
                current = self.node(handle).right();
            }
        }
        best
    }

    /// Rightmost node that is ordered before `value`.
    pub(crate) fn upper_bound(&self, value: &T) -> Option<Handle> {
        let mut best = None;
        let mut current = self.root;
        while let Some(handle) = current {
            if self.cmp.less(self.value(handle), value) {
                best = Some(handle);
                current = self.node(handle).right();
            } else {
                current = self.node(handle).left();
            }
        }
        best
    }
}
