mod properties;

use crate::{BTree, Comparator};

/// Check the balance invariant using only what the level iterator exposes:
/// every node above the leaves has one child per key plus one, and every node
/// but the root holds between `min_key_count` and `order - 1` keys
fn assert_levels_consistent<T, C: Comparator<T>>(tree: &BTree<T, C>) {
    let levels = tree.level_iter().collect::<Vec<_>>();
    if tree.is_empty() {
        assert!(levels.is_empty());
        return;
    }

    assert_eq!(levels[0].len(), 1);
    for (depth, level) in levels.iter().enumerate() {
        for keys in level {
            assert!(keys.len() < tree.order());
            if depth > 0 {
                assert!(keys.len() >= tree.min_key_count());
            } else {
                assert!(!keys.is_empty());
            }
        }
        if let Some(next) = levels.get(depth + 1) {
            let children: usize = level.iter().map(|keys| keys.len() + 1).sum();
            assert_eq!(children, next.len(), "depth {}", depth);
        }
    }
    let total: usize = levels.iter().flatten().map(|keys| keys.len()).sum();
    assert_eq!(total, tree.len());
}
