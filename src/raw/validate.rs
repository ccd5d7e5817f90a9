//! Read-only structural checks over the whole tree. The mutating engine never calls these; they
//! exist so tests can assert the red-black invariants after every operation.
//!
//! Each check walks the tree with an explicit stack, so a degenerate (broken) tree cannot
//! overflow the call stack.

use smallvec::SmallVec;

use super::handle::Handle;
use super::raw_rbtree::RawRbTree;
use crate::compare::Comparator;

/// Inline stack depth; a valid tree of 2^31 nodes is at most 62 levels deep.
const STACK: usize = 64;

impl<T, C> RawRbTree<T, C> {
    /// Black nodes on every path from the root to an empty child slot, or `None` if two paths
    /// disagree anywhere in the tree.
    pub(crate) fn black_height(&self) -> Option<usize> {
        // (subtree, children already visited)
        let mut pending: SmallVec<[(Option<Handle>, bool); STACK]> = SmallVec::new();
        let mut heights: SmallVec<[usize; STACK]> = SmallVec::new();
        pending.push((self.root(), false));

        while let Some((subtree, visited)) = pending.pop() {
            let Some(handle) = subtree else {
                heights.push(0);
                continue;
            };
            let node = self.node(handle);
            if visited {
                // The left child finished first, so its height sits below the right one.
                let right = heights.pop()?;
                let left = heights.pop()?;
                if left != right {
                    return None;
                }
                heights.push(left + usize::from(node.is_black()));
            } else {
                pending.push((Some(handle), true));
                pending.push((node.right(), false));
                pending.push((node.left(), false));
            }
        }

        heights.pop()
    }

    /// Root (if any) is black and every path has the same black height.
    pub(crate) fn is_black_balanced(&self) -> bool {
        self.root().is_none_or(|root| self.node(root).is_black()) && self.black_height().is_some()
    }

    /// Every red node's present children are black.
    pub(crate) fn reds_have_black_children(&self) -> bool {
        let mut pending: SmallVec<[Handle; STACK]> = SmallVec::new();
        pending.extend(self.root());

        while let Some(handle) = pending.pop() {
            let node = self.node(handle);
            for child in [node.left(), node.right()].into_iter().flatten() {
                if node.is_red() && self.node(child).is_red() {
                    return false;
                }
                pending.push(child);
            }
        }
        true
    }
}

impl<T, C: Comparator<T>> RawRbTree<T, C> {
    /// Every node lies strictly between the tightest bounds inherited from its ancestors.
    pub(crate) fn is_binary_search_tree(&self) -> bool {
        let cmp = self.comparator();
        // (node, lower bound, upper bound)
        let mut pending: SmallVec<[(Handle, Option<Handle>, Option<Handle>); STACK]> = SmallVec::new();
        pending.extend(self.root().map(|root| (root, None, None)));

        while let Some((handle, low, high)) = pending.pop() {
            let value = self.value(handle);
            if low.is_some_and(|low| !cmp.less(self.value(low), value)) {
                return false;
            }
            if high.is_some_and(|high| !cmp.less(value, self.value(high))) {
                return false;
            }

            let node = self.node(handle);
            if let Some(left) = node.left() {
                pending.push((left, low, Some(handle)));
            }
            if let Some(right) = node.right() {
                pending.push((right, Some(handle), high));
            }
        }
        true
    }
}
