use std::collections::{BTreeMap, HashSet};

use proptest::prelude::*;
use treegrid::{NodeId, Tree, compute_layout};

/// Node `i` (for `i >= 1`) hangs under node `choices[i - 1] % i`, so every
/// sequence describes a valid tree with a deterministic insertion order.
fn tree_from_choices(choices: &[usize]) -> Tree<usize> {
    let mut tree = Tree::new(0);
    let mut ids = vec![tree.root()];
    for (offset, choice) in choices.iter().enumerate() {
        let index = offset + 1;
        let parent = ids[choice % index];
        ids.push(tree.create_node(index, parent));
    }
    tree
}

fn coordinates<T>(tree: &Tree<T>) -> Vec<(i32, i32, i32, i32)> {
    tree.iter()
        .map(|id| {
            let node = tree.node(id);
            (node.x(), node.y(), node.subtree_width(), node.subtree_height())
        })
        .collect()
}

fn laid_out(choices: &[usize]) -> Tree<usize> {
    let mut tree = tree_from_choices(choices);
    compute_layout(&mut tree);
    tree
}

fn choices() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(any::<usize>(), 0..120)
}

proptest! {
    #[test]
    fn no_two_nodes_share_a_slot_at_one_depth(choices in choices()) {
        let tree = laid_out(&choices);
        let mut seen: HashSet<(i32, i32)> = HashSet::new();
        for id in tree.iter() {
            let node = tree.node(id);
            prop_assert!(seen.insert((node.x(), node.y())), "duplicate slot for {}", id);
        }
    }

    #[test]
    fn leaf_slots_are_contiguous_in_order(choices in choices()) {
        let tree = laid_out(&choices);
        let xs: Vec<i32> = tree.leaves().map(|id| tree.node(id).x()).collect();
        let expected: Vec<i32> = (0..xs.len() as i32).collect();
        prop_assert_eq!(xs, expected);
    }

    #[test]
    fn parents_sit_over_their_children(choices in choices()) {
        let tree = laid_out(&choices);
        for id in tree.iter() {
            let children = tree.children(id);
            if children.is_empty() {
                continue;
            }
            let xs: Vec<i32> = children.iter().map(|c| tree.node(*c).x()).collect();
            prop_assert!(xs.windows(2).all(|pair| pair[0] < pair[1]));
            let first = xs[0];
            let last = xs[xs.len() - 1];
            prop_assert_eq!(tree.node(id).x(), (first + last).div_euclid(2));
        }
    }

    #[test]
    fn spans_are_unions_of_child_spans(choices in choices()) {
        let tree = laid_out(&choices);
        let span = |id: NodeId| {
            (
                tree.node(tree.leftmost_descendant_leaf(id)).x(),
                tree.node(tree.rightmost_descendant_leaf(id)).x(),
            )
        };
        for id in tree.iter() {
            let (left, right) = span(id);
            prop_assert_eq!(tree.node(id).subtree_width(), right - left);
            if let (Some(first), Some(last)) = (tree.first_child(id), tree.last_child(id)) {
                prop_assert_eq!(left, span(first).0);
                prop_assert_eq!(right, span(last).1);
            } else {
                prop_assert_eq!(tree.node(id).subtree_width(), 0);
                prop_assert_eq!(tree.node(id).subtree_height(), 0);
            }
        }
    }

    #[test]
    fn depth_matches_parent_links(choices in choices()) {
        let tree = laid_out(&choices);
        for id in tree.iter() {
            prop_assert_eq!(tree.node(id).y() as usize, tree.depth_of(id));
            let deepest = tree.descendants(id).map(|d| tree.node(d).y()).max().unwrap_or(0);
            prop_assert_eq!(tree.node(id).subtree_height(), deepest - tree.node(id).y());
        }
    }

    #[test]
    fn layout_is_idempotent(choices in choices()) {
        let mut tree = laid_out(&choices);
        let before = coordinates(&tree);
        compute_layout(&mut tree);
        prop_assert_eq!(before, coordinates(&tree));
    }

    #[test]
    fn payload_does_not_affect_layout(choices in choices()) {
        let tree = laid_out(&choices);
        let mut relabeled = tree.map(|index| format!("node with a much longer label {index}"));
        compute_layout(&mut relabeled);
        prop_assert_eq!(coordinates(&tree), coordinates(&relabeled));
    }

    #[test]
    fn every_depth_is_ordered_left_to_right(choices in choices()) {
        // pre-order visits each depth's nodes left to right
        let tree = laid_out(&choices);
        let mut rows: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
        for id in tree.iter() {
            let node = tree.node(id);
            rows.entry(node.y()).or_default().push(node.x());
        }
        for xs in rows.values() {
            prop_assert!(xs.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }
}
