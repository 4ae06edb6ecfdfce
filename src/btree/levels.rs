use super::node::Node;
use super::*;
use crate::comparator::Comparator;
use crate::error::{Error, Result};
use std::cmp::Ordering;
use tracing::debug;

impl<T, C: Comparator<T>> BTree<T, C> {
    /// Rebuild a tree from an explicit description of its levels.
    ///
    /// `levels[0]` is the root level and the last entry holds the leaves. Each level
    /// lists its nodes from left to right and each node lists its keys, the same
    /// shape `BTree::levels` produces. Nodes are assembled from the leaves up: every
    /// node adopts the next `keys.len() + 1` nodes of the level below.
    ///
    /// The description is validated (child counts, key counts for `order` and key
    /// ordering under `comparator`) and rejected with an `Error` if malformed.
    /// Both `[]` and `[[[]]]` describe the empty tree
    pub fn from_levels_with_comparator(
        order: usize,
        levels: Vec<Vec<Vec<T>>>,
        comparator: C,
    ) -> Result<Self> {
        if order < MIN_ORDER {
            return Err(Error::InvalidOrder(order));
        }
        if is_empty_description(&levels) {
            return Ok(BTree::with_comparator(order, comparator));
        }
        if levels[0].len() != 1 {
            return Err(Error::RootLevel {
                found: levels[0].len(),
            });
        }

        let min_len = min_key_count(order);
        let depth = levels.len();
        let mut len = 0;
        let mut below: Option<Vec<Node<T>>> = None;
        for (level_index, level) in levels.into_iter().enumerate().rev() {
            let mut children = match below.take() {
                Some(children) => {
                    let expected: usize = level.iter().map(|keys| keys.len() + 1).sum();
                    if children.len() != expected {
                        return Err(Error::ChildCountMismatch {
                            level: level_index,
                            expected,
                            found: children.len(),
                        });
                    }
                    Some(children.into_iter())
                }
                None => None,
            };

            let min = if level_index == 0 { 1 } else { min_len };
            let mut nodes = Vec::with_capacity(level.len());
            for (node_index, keys) in level.into_iter().enumerate() {
                if keys.len() < min || keys.len() >= order {
                    return Err(Error::KeyCount {
                        level: level_index,
                        node: node_index,
                        len: keys.len(),
                        min,
                        max: order - 1,
                    });
                }
                len += keys.len();
                let node_children = match &mut children {
                    Some(children) => children.by_ref().take(keys.len() + 1).collect(),
                    None => Vec::new(),
                };
                nodes.push(Node::with_keys_and_children(keys, node_children));
            }
            below = Some(nodes);
        }

        let root = match below.and_then(|mut nodes| nodes.pop()) {
            Some(root) => root,
            None => unreachable!("the root level holds exactly one node"),
        };
        let tree = BTree::from_root(root, len, order, comparator);

        // Separators and node contents must agree with the comparator
        let unordered = tree
            .iter()
            .zip(tree.iter().skip(1))
            .position(|(a, b)| tree.comparator.compare(a, b) != Ordering::Less);
        if let Some(position) = unordered {
            return Err(Error::Unordered {
                position: position + 1,
            });
        }

        debug!(order, len, depth, "built tree from levels");
        Ok(tree)
    }
}

fn is_empty_description<T>(levels: &[Vec<Vec<T>>]) -> bool {
    match levels {
        [] => true,
        [root_level] => root_level.len() == 1 && root_level[0].is_empty(),
        _ => false,
    }
}
