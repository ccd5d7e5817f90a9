//! Red-black tree ordered index for Rust.
//!
//! This crate provides [`RbTree`], an ordered set kept balanced with the classic red-black
//! coloring rules, and [`RbMap`], a key-value map built on the same engine.
//!
//! Besides iteration, an `RbTree` hands out [`Cursor`]s: `Copy` positions that do not borrow the
//! tree. A cursor can be stepped with [`successor`](RbTree::successor) and
//! [`predecessor`](RbTree::predecessor), dereferenced with [`get`](RbTree::get), and passed to
//! [`remove_at`](RbTree::remove_at). Cursors survive unrelated insertions and removals; a cursor
//! whose own value was removed is reported as stale instead of silently reaching another value.
//!
//! # Example
//!
//! ```
//! use rbtree_index::RbTree;
//!
//! let mut tree = RbTree::new();
//! tree.insert(15);
//! for i in (0..100).step_by(7) {
//!     tree.insert(i);
//! }
//!
//! // `lower_bound` finds the first value strictly greater than its argument.
//! let mut at = tree.lower_bound(&16);
//! assert_eq!(tree.get(at), Some(&21));
//! at = tree.successor(at)?;
//! assert_eq!(tree.get(at), Some(&28));
//!
//! tree.remove_at(at);
//! tree.remove(&15);
//! assert!(tree.search(&15).is_end());
//! assert!(tree.contains(&7));
//!
//! // The structural invariants can be checked at any time.
//! assert!(tree.is_binary_search_tree());
//! assert!(tree.is_black_balanced());
//! assert!(tree.reds_have_black_children());
//! # Ok::<(), rbtree_index::Error>(())
//! ```
//!
//! # Ordering
//!
//! A tree is ordered by a [`Comparator`] bound at construction. [`NaturalOrder`] (the default)
//! uses [`Ord`], [`ReverseOrder`] flips it, and any `Fn(&T, &T) -> bool` closure works as a
//! strict "less than" predicate. Values the comparator cannot tell apart are stored once.
//!
//! # Implementation
//!
//! Nodes live in a contiguous arena and link to each other by index, so no `unsafe` code is
//! needed. Every arena slot carries a generation counter that is bumped when its node is freed;
//! cursors record that generation, which is how stale cursors are detected after the slot is
//! reused.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod compare;
mod error;
mod raw;

pub mod rbmap;
pub mod rbtree;

pub use compare::{Comparator, NaturalOrder, ReverseOrder};
pub use error::Error;
pub use rbmap::RbMap;
pub use rbtree::{Cursor, RbTree};
