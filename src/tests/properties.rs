use super::assert_levels_consistent;
use crate::BTree;
use proptest::prelude::*;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
enum Op {
    Insert(i16),
    Remove(i16),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    // A narrow key range makes duplicates and misses frequent
    prop_oneof![
        3 => (-100i16..100).prop_map(Op::Insert),
        2 => (-100i16..100).prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn behaves_like_a_set(
        order in 3usize..12,
        ops in prop::collection::vec(op_strategy(), 0..400),
    ) {
        let mut tree = BTree::new(order);
        let mut model = BTreeSet::new();
        for op in ops {
            match op {
                Op::Insert(v) => {
                    prop_assert_eq!(tree.insert(v), model.insert(v));
                }
                Op::Remove(v) => {
                    prop_assert_eq!(tree.remove(&v), model.remove(&v));
                }
            }
        }
        tree.check_invariants();
        assert_levels_consistent(&tree);
        prop_assert_eq!(tree.len(), model.len());
        prop_assert!(tree.iter().eq(model.iter()));
    }

    #[test]
    fn iteration_is_strictly_ascending(
        order in 3usize..12,
        values in prop::collection::vec(any::<i32>(), 0..300),
    ) {
        let mut tree = BTree::new(order);
        tree.extend(values);
        let sorted = tree.iter().collect::<Vec<_>>();
        prop_assert!(sorted.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert_eq!(sorted.len(), tree.len());
    }

    #[test]
    fn second_insert_changes_nothing(
        order in 3usize..12,
        values in prop::collection::vec(-50i32..50, 1..100),
    ) {
        let mut tree = BTree::new(order);
        tree.extend(values.iter().cloned());
        let before = tree.levels();
        for value in values.iter() {
            prop_assert!(!tree.insert(*value));
        }
        prop_assert_eq!(tree.levels(), before);
    }

    #[test]
    fn removed_values_are_gone(
        order in 3usize..12,
        values in prop::collection::btree_set(any::<i32>(), 1..200)
            .prop_map(|set| set.into_iter().collect::<Vec<_>>())
            .prop_shuffle(),
        split in any::<prop::sample::Index>(),
    ) {
        let mut tree = BTree::new(order);
        tree.extend(values.iter().cloned());
        let (removed, kept) = values.split_at(split.index(values.len()));
        for value in removed {
            prop_assert!(tree.remove(value));
        }
        tree.check_invariants();
        assert_levels_consistent(&tree);
        for value in removed {
            prop_assert!(!tree.contains(value));
        }
        for value in kept {
            prop_assert!(tree.contains(value));
        }
    }

    #[test]
    fn removing_absent_values_is_a_no_op(
        order in 3usize..12,
        values in prop::collection::vec(0i32..1000, 0..200),
        absent in prop::collection::vec(1000i32..2000, 1..20),
    ) {
        let mut tree = BTree::new(order);
        tree.extend(values);
        let before = tree.levels();
        for value in absent.iter() {
            prop_assert!(!tree.remove(value));
        }
        prop_assert_eq!(tree.levels(), before);
    }

    #[test]
    fn levels_rebuild_the_same_tree(
        order in 3usize..12,
        values in prop::collection::vec(any::<i16>(), 0..300),
    ) {
        let mut tree = BTree::new(order);
        tree.extend(values);
        let rebuilt = BTree::from_levels(order, tree.levels()).unwrap();
        rebuilt.check_invariants();
        prop_assert_eq!(rebuilt.levels(), tree.levels());
        prop_assert_eq!(rebuilt.len(), tree.len());
    }
}
