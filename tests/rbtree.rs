use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rbtree_index::rbtree;
use rbtree_index::{Cursor, Error, RbTree, ReverseOrder};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Values drawn from a range narrow enough to collide often.
fn value_strategy() -> impl Strategy<Value = i64> {
    -500i64..500i64
}

/// Asserts every structural property the tree promises.
fn assert_well_formed<T, C: rbtree_index::Comparator<T>>(tree: &RbTree<T, C>) {
    assert!(tree.is_binary_search_tree(), "order violated");
    assert!(tree.is_black_balanced(), "black height violated");
    assert!(tree.reds_have_black_children(), "red node with red child");
}

fn collect(tree: &RbTree<i64>) -> Vec<i64> {
    tree.iter().copied().collect()
}

/// Walks cursors from `begin` to `end`.
fn walk(tree: &RbTree<i64>) -> Vec<i64> {
    let mut out = Vec::new();
    let mut cursor = tree.begin();
    while let Some(&v) = tree.get(cursor) {
        out.push(v);
        cursor = tree.successor(cursor).unwrap();
    }
    assert_eq!(cursor, tree.end());
    out
}

/// Every permutation of `values`, in lexicographic order of positions.
fn permutations(values: &[i64]) -> Vec<Vec<i64>> {
    if values.len() <= 1 {
        return vec![values.to_vec()];
    }
    let mut out = Vec::new();
    for (i, &head) in values.iter().enumerate() {
        let mut rest = values.to_vec();
        rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head);
            out.push(tail);
        }
    }
    out
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum TreeOp {
    Insert(i64),
    Remove(i64),
    RemoveLowerBound(i64),
    Contains(i64),
    PopFirst,
    PopLast,
}

fn tree_op_strategy() -> impl Strategy<Value = TreeOp> {
    prop_oneof![
        6 => value_strategy().prop_map(TreeOp::Insert),
        3 => value_strategy().prop_map(TreeOp::Remove),
        1 => value_strategy().prop_map(TreeOp::RemoveLowerBound),
        2 => value_strategy().prop_map(TreeOp::Contains),
        1 => Just(TreeOp::PopFirst),
        1 => Just(TreeOp::PopLast),
    ]
}

// ─── Randomized properties ───────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Replays a random sequence of operations on both RbTree and BTreeSet, checking results
    /// and the red-black properties after every step.
    #[test]
    fn tree_ops_match_btreeset(ops in proptest::collection::vec(tree_op_strategy(), TEST_SIZE)) {
        let mut tree: RbTree<i64> = RbTree::new();
        let mut model: BTreeSet<i64> = BTreeSet::new();

        for op in &ops {
            match *op {
                TreeOp::Insert(v) => prop_assert_eq!(tree.insert(v), model.insert(v), "insert({})", v),
                TreeOp::Remove(v) => prop_assert_eq!(tree.remove(&v), model.take(&v), "remove({})", v),
                TreeOp::RemoveLowerBound(v) => {
                    let expected = model.range(v + 1..).next().copied();
                    if let Some(e) = expected {
                        model.remove(&e);
                    }
                    let cursor = tree.lower_bound(&v);
                    prop_assert_eq!(tree.remove_at(cursor), expected, "remove_at(lower_bound({}))", v);
                }
                TreeOp::Contains(v) => prop_assert_eq!(tree.contains(&v), model.contains(&v), "contains({})", v),
                TreeOp::PopFirst => prop_assert_eq!(tree.pop_first(), model.pop_first()),
                TreeOp::PopLast => prop_assert_eq!(tree.pop_last(), model.pop_last()),
            }
            prop_assert_eq!(tree.len(), model.len());
            prop_assert!(tree.is_binary_search_tree());
            prop_assert!(tree.is_black_balanced());
            prop_assert!(tree.reds_have_black_children());
        }

        let expected: Vec<i64> = model.into_iter().collect();
        prop_assert_eq!(walk(&tree), expected.clone());
        prop_assert_eq!(collect(&tree), expected);
    }

    /// Inserting distinct values and removing all of them in any order leaves a tree equal to
    /// a fresh one.
    #[test]
    fn round_trip_to_empty(values in proptest::collection::btree_set(value_strategy(), 0..300), seed in any::<u64>()) {
        let mut tree = RbTree::new();
        for &v in &values {
            tree.insert(v);
        }

        let mut order: Vec<i64> = values.iter().copied().collect();
        let mut x = seed;
        for i in (1..order.len()).rev() {
            x = x.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            order.swap(i, (x >> 33) as usize % (i + 1));
        }

        for v in order {
            prop_assert_eq!(tree.remove(&v), Some(v));
            prop_assert!(tree.is_black_balanced());
        }

        prop_assert!(tree.is_empty());
        prop_assert_eq!(tree.begin(), tree.end());
        prop_assert_eq!(tree.first(), None);
        prop_assert_eq!(&tree, &RbTree::new());
    }

    /// Bound queries agree with BTreeSet ranges.
    #[test]
    fn bounds_match_btreeset(values in proptest::collection::btree_set(value_strategy(), 0..200), probe in -600i64..600) {
        let tree: RbTree<i64> = values.iter().copied().collect();

        let lower = tree.get(tree.lower_bound(&probe)).copied();
        prop_assert_eq!(lower, values.range(probe + 1..).next().copied());

        let upper = tree.get(tree.upper_bound(&probe)).copied();
        prop_assert_eq!(upper, values.range(..probe).next_back().copied());

        let found = tree.get(tree.search(&probe)).copied();
        prop_assert_eq!(found, values.get(&probe).copied());
    }
}

// ─── Fixed scenarios ─────────────────────────────────────────────────────────

#[test]
fn bounds_on_three_values() {
    let tree = RbTree::from([10i64, 12, 14]);
    let lower = |v: i64| tree.get(tree.lower_bound(&v)).copied();
    let upper = |v: i64| tree.get(tree.upper_bound(&v)).copied();

    assert_eq!(lower(9), Some(10));
    assert_eq!(lower(10), Some(12));
    assert_eq!(lower(11), Some(12));
    assert_eq!(lower(12), Some(14));
    assert_eq!(lower(15), None);
    assert!(tree.lower_bound(&15).is_end());

    assert_eq!(upper(15), Some(14));
    assert_eq!(upper(13), Some(12));
    assert_eq!(upper(12), Some(10));
    assert_eq!(upper(11), Some(10));
    assert_eq!(upper(0), None);
    assert!(tree.upper_bound(&0).is_end());
}

#[test]
fn delete_each_position_of_perfect_tree() {
    let values = [8i64, 4, 12, 2, 6, 10, 14, 1, 3, 5, 7, 9, 11, 13, 15];

    for position in 0..values.len() {
        let mut tree = RbTree::from(values);
        assert_well_formed(&tree);

        let mut cursor = tree.begin();
        for _ in 0..position {
            cursor = tree.successor(cursor).unwrap();
        }
        let removed = tree.remove_at(cursor).unwrap();
        assert_eq!(removed, position as i64 + 1);

        assert_well_formed(&tree);
        let expected: Vec<i64> = (1..=15).filter(|&v| v != removed).collect();
        assert_eq!(collect(&tree), expected);
    }
}

#[test]
fn every_insert_order_with_every_delete_order() {
    let orders = permutations(&[0, 1, 2, 3]);
    assert_eq!(orders.len(), 24);

    for inserts in &orders {
        for deletes in &orders {
            let mut tree = RbTree::new();
            for &v in inserts {
                tree.insert(v);
            }
            assert!(tree.is_binary_search_tree(), "inserts {inserts:?}");

            for &v in deletes {
                assert_eq!(tree.remove(&v), Some(v));
                assert!(tree.is_black_balanced(), "inserts {inserts:?}, deletes {deletes:?} at {v}");
            }
            assert!(tree.is_empty());
        }
    }
}

#[test]
fn removing_absent_value_changes_nothing() {
    let mut tree: RbTree<i64> = (0..64).map(|v| v * 2).collect();
    let before = tree.clone();
    let cursors: Vec<Cursor> = (0..64).map(|v| tree.search(&(v * 2))).collect();

    assert_eq!(tree.remove(&7), None);
    assert_eq!(tree.remove(&-1), None);
    assert_eq!(tree.remove(&1_000), None);
    assert_eq!(tree.remove_at(tree.end()), None);

    assert_eq!(tree, before);
    for (i, cursor) in cursors.into_iter().enumerate() {
        assert_eq!(tree.get(cursor), Some(&(i as i64 * 2)));
    }
    assert_well_formed(&tree);
}

#[test]
fn ascending_and_descending_fills_stay_balanced() {
    let up: RbTree<i64> = (0..4096).collect();
    let down: RbTree<i64> = (0..4096).rev().collect();
    assert_well_formed(&up);
    assert_well_formed(&down);
    assert_eq!(up, down);
    assert_eq!(up.len(), 4096);
}

// ─── Cursors ─────────────────────────────────────────────────────────────────

#[test]
fn cursors_survive_unrelated_mutation() {
    let mut tree: RbTree<i64> = (0..100).collect();
    let fifty = tree.search(&50);

    for v in (0..100).filter(|v| v % 3 == 0 && *v != 50) {
        tree.remove(&v);
    }
    for v in 100..200 {
        tree.insert(v);
    }
    assert_well_formed(&tree);

    assert_eq!(tree.get(fifty), Some(&50));
    assert_eq!(tree.get(tree.successor(fifty).unwrap()), Some(&52));
    assert_eq!(tree.get(tree.predecessor(fifty).unwrap()), Some(&49));
}

#[test]
fn removed_value_makes_only_its_cursor_stale() {
    let mut tree: RbTree<i64> = (0..10).collect();
    let three = tree.search(&3);
    let four = tree.search(&4);

    assert_eq!(tree.remove_at(three), Some(3));
    // The freed slot is reused by the next insert; the old cursor must not see it.
    tree.insert(42);

    assert!(tree.is_stale(three));
    assert_eq!(tree.get(three), None);
    assert_eq!(tree.try_get(three), Err(Error::StaleCursor));
    assert_eq!(tree.remove_at(three), None);
    assert!(!tree.is_stale(four));
    assert_eq!(tree.try_get(four), Ok(&4));
    assert_eq!(tree.len(), 10);
}

#[test]
fn end_cursor_errors() {
    let tree = RbTree::from([1i64, 2]);
    assert_eq!(tree.successor(tree.end()), Err(Error::EndCursor));
    assert_eq!(tree.try_get(Cursor::END), Err(Error::EndCursor));
    assert_eq!(Cursor::default(), tree.end());
    assert_eq!(Error::EndCursor.to_string(), "cursor is at the end position");
}

#[test]
fn predecessor_of_end_is_the_maximum() {
    let tree: RbTree<i64> = (1..=5).collect();
    let last = tree.predecessor(tree.end()).unwrap();
    assert_eq!(tree.get(last), Some(&5));

    let mut backward = Vec::new();
    let mut cursor = last;
    while !cursor.is_end() {
        backward.push(*tree.get(cursor).unwrap());
        cursor = tree.predecessor(cursor).unwrap();
    }
    assert_eq!(backward, [5, 4, 3, 2, 1]);
}

#[test]
fn demo_walkthrough() {
    let mut tree = RbTree::new();
    tree.insert(15i64);
    for i in (0..100).step_by(7) {
        tree.insert(i);
    }
    assert_well_formed(&tree);

    let mut at = tree.lower_bound(&16);
    assert_eq!(tree.get(at), Some(&21));
    at = tree.successor(at).unwrap();
    assert_eq!(tree.get(at), Some(&28));

    assert_eq!(tree.remove_at(at), Some(28));
    assert_eq!(tree.remove(&15), Some(15));
    assert_well_formed(&tree);

    assert_eq!(tree.search(&15), tree.end());
    assert_ne!(tree.search(&7), tree.end());
    assert!(tree.contains(&7));
    assert!(!tree.contains(&28));
}

// ─── Construction and comparators ────────────────────────────────────────────

#[test]
fn duplicates_are_rejected() {
    let mut tree = RbTree::new();
    assert!(tree.insert(5i64));
    assert!(!tree.insert(5));
    assert_eq!(tree.try_insert(5), Ok(false));
    assert_eq!(tree.try_insert(6), Ok(true));
    assert_eq!(collect(&tree), [5, 6]);
}

#[test]
fn closure_comparator_defines_equivalence() {
    let mut tree = RbTree::with_comparator(|a: &(u8, &str), b: &(u8, &str)| a.0 < b.0);
    assert!(tree.insert((2, "two")));
    assert!(tree.insert((1, "one")));
    assert!(!tree.insert((2, "deux")));
    assert_well_formed(&tree);

    let found = tree.search(&(2, ""));
    assert_eq!(tree.get(found), Some(&(2, "two")));
    assert_eq!(tree.remove(&(1, "")), Some((1, "one")));
}

#[test]
fn reverse_order_flips_everything() {
    let tree = RbTree::from_iter_with([3i64, 1, 4, 1, 5, 9, 2, 6], ReverseOrder);
    assert_well_formed(&tree);
    assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [9, 6, 5, 4, 3, 2, 1]);
    assert_eq!(tree.first(), Some(&9));
    // "Greater" under the reversed order means numerically smaller.
    assert_eq!(tree.get(tree.lower_bound(&5)), Some(&4));
    assert_eq!(tree.get(tree.upper_bound(&5)), Some(&6));
}

#[test]
fn capacity_and_reserve() {
    let mut tree: RbTree<i64> = RbTree::with_capacity(16);
    assert!(tree.capacity() >= 16);
    tree.try_reserve(100).unwrap();
    assert!(tree.capacity() >= 100);
    assert!(matches!(tree.try_reserve(usize::MAX), Err(Error::AllocationFailure(_))));
    assert!(tree.is_empty());
}

#[test]
fn clear_resets_and_stales_cursors() {
    let mut tree: RbTree<i64> = (0..32).collect();
    let cursors: Vec<Cursor> = (0..32).map(|v| tree.search(&v)).collect();
    tree.clear();
    assert!(tree.is_empty());
    assert!(cursors.iter().all(|&c| tree.is_stale(c)));

    tree.extend([3, 1, 2]);
    assert_well_formed(&tree);
    assert_eq!(collect(&tree), [1, 2, 3]);
    assert!(cursors.iter().all(|&c| tree.get(c).is_none()));
}

// ─── Iterators and traits ────────────────────────────────────────────────────

#[test]
fn iterators_are_exact_and_double_ended() {
    let tree: RbTree<i64> = (0..10).collect();
    let mut iter: rbtree::Iter<'_, i64> = tree.iter();
    assert_eq!(iter.len(), 10);
    assert_eq!(iter.next(), Some(&0));
    assert_eq!(iter.next_back(), Some(&9));
    assert_eq!(iter.len(), 8);
    assert_eq!(iter.clone().count(), 8);

    let owned: rbtree::IntoIter<i64> = tree.clone().into_iter();
    assert_eq!(owned.rev().collect::<Vec<_>>(), (0..10).rev().collect::<Vec<_>>());

    let by_ref: Vec<i64> = (&tree).into_iter().copied().collect();
    assert_eq!(by_ref, collect(&tree));
}

#[test]
fn debug_and_extend_by_reference() {
    let mut tree = RbTree::from([2i64, 1]);
    tree.extend(&[3, 1]);
    assert_eq!(format!("{tree:?}"), "{1, 2, 3}");
    assert_eq!(format!("{:?}", RbTree::<i64>::default()), "{}");
}
