//! Grid layout for trees.
//!
//! Leaves take consecutive slots from left to right in a post-order walk and
//! every internal node sits over the midpoint of its first and last child.
//! Because a parent's span is exactly the union of its children's spans, two
//! sibling subtrees can never claim the same slot at any depth.

mod types;

pub use types::{Extent, LayoutStats};

use crate::tree::{NodeId, Tree, UNPOSITIONED};

enum Frame {
    Enter(NodeId),
    Exit { id: NodeId, first_slot: i32 },
}

/// Assigns grid coordinates and subtree extents to every node of `tree`.
///
/// The root lands at depth 0 and the leftmost leaf at slot 0. Running it again
/// on an unchanged tree yields the same coordinates; after nodes are added it
/// repositions every node.
pub fn compute_layout<T>(tree: &mut Tree<T>) -> Extent {
    let top = tree.root();
    let _span = tracing::trace_span!("compute_layout", nodes = tree.len()).entered();

    tree.node_mut(top).y = 0;
    let mut next_slot = 0i32;
    let mut visited = 0usize;
    let mut stack = vec![Frame::Enter(top)];

    while let Some(frame) = stack.pop() {
        match frame {
            Frame::Enter(id) => {
                visited += 1;
                stack.push(Frame::Exit {
                    id,
                    first_slot: next_slot,
                });
                let depth = tree.node(id).y + 1;
                for index in (0..tree.children(id).len()).rev() {
                    let child = tree.children(id)[index];
                    tree.node_mut(child).y = depth;
                    stack.push(Frame::Enter(child));
                }
            }
            Frame::Exit { id, first_slot } => {
                next_slot = place(tree, id, first_slot, next_slot);
            }
        }
    }

    let node = tree.node(top);
    let extent = Extent {
        width: node.subtree_width,
        height: node.subtree_height,
    };
    tracing::debug!(
        nodes = visited,
        leaves = next_slot,
        width = extent.width,
        height = extent.height,
        "tree layout computed"
    );
    extent
}

/// Places `id` once all of its children are placed and returns the next free
/// slot. Leaves below `id` occupy `first_slot..next_slot`.
fn place<T>(tree: &mut Tree<T>, id: NodeId, first_slot: i32, next_slot: i32) -> i32 {
    let (first, last) = match (tree.first_child(id), tree.last_child(id)) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            let node = tree.node_mut(id);
            node.x = next_slot;
            node.subtree_width = 0;
            node.subtree_height = 0;
            return next_slot + 1;
        }
    };

    let first_x = tree.node(first).x;
    let last_x = tree.node(last).x;
    let height = tree
        .children(id)
        .iter()
        .map(|child| tree.node(*child).subtree_height)
        .max()
        .unwrap_or(0)
        + 1;
    // equals rightmost leaf x minus leftmost leaf x, since leaf slots are contiguous
    let width = next_slot - 1 - first_slot;

    let node = tree.node_mut(id);
    // slots are never negative, so this is the floor of the midpoint
    node.x = (first_x + last_x) / 2;
    node.subtree_width = width;
    node.subtree_height = height;
    next_slot
}

/// Bounding box of an already laid-out tree, `None` before layout.
pub fn extent<T>(tree: &Tree<T>) -> Option<Extent> {
    let root = tree.node(tree.root());
    if root.subtree_width() == UNPOSITIONED {
        return None;
    }
    Some(Extent {
        width: root.subtree_width(),
        height: root.subtree_height(),
    })
}

/// Structural counts for `tree`; does not require layout.
pub fn layout_stats<T>(tree: &Tree<T>) -> LayoutStats {
    let mut stats = LayoutStats::default();
    let mut stack = vec![(tree.root(), 0usize)];
    while let Some((id, depth)) = stack.pop() {
        stats.nodes += 1;
        stats.depth = stats.depth.max(depth);
        let children = tree.children(id);
        if children.is_empty() {
            stats.leaves += 1;
        }
        stack.extend(children.iter().map(|child| (*child, depth + 1)));
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::GridPos;

    fn pos(tree: &Tree<&str>, id: NodeId) -> (i32, i32) {
        let GridPos { x, y } = tree.position(id).unwrap();
        (x, y)
    }

    #[test]
    fn single_root() {
        let mut tree = Tree::new("root");
        let extent = compute_layout(&mut tree);
        assert_eq!(pos(&tree, tree.root()), (0, 0));
        assert_eq!(extent, Extent { width: 0, height: 0 });
        assert_eq!(extent.columns(), 1);
        assert_eq!(extent.rows(), 1);
    }

    #[test]
    fn root_with_three_leaves() {
        let mut tree = Tree::new("root");
        let root = tree.root();
        let a = tree.create_node("A", root);
        let b = tree.create_node("B", root);
        let c = tree.create_node("C", root);
        let extent = compute_layout(&mut tree);
        assert_eq!(pos(&tree, a), (0, 1));
        assert_eq!(pos(&tree, b), (1, 1));
        assert_eq!(pos(&tree, c), (2, 1));
        assert_eq!(pos(&tree, root), (1, 0));
        assert_eq!(extent, Extent { width: 2, height: 1 });
    }

    #[test]
    fn even_child_count_rounds_toward_first_child() {
        let mut tree = Tree::new("root");
        let root = tree.root();
        for label in ["A", "B", "C", "D"] {
            tree.create_node(label, root);
        }
        compute_layout(&mut tree);
        // floor((0 + 3) / 2)
        assert_eq!(tree.node(root).x(), 1);
    }

    #[test]
    fn leaves_report_zero_extents() {
        let mut tree = Tree::new("root");
        let root = tree.root();
        let leaf = tree.create_node("leaf", root);
        compute_layout(&mut tree);
        assert_eq!(tree.node(leaf).subtree_width(), 0);
        assert_eq!(tree.node(leaf).subtree_height(), 0);
    }

    #[test]
    fn extent_is_none_before_layout() {
        let mut tree = Tree::new("root");
        assert_eq!(extent(&tree), None);
        let computed = compute_layout(&mut tree);
        assert_eq!(extent(&tree), Some(computed));
    }

    #[test]
    fn relayout_after_growth_repositions_whole_tree() {
        let mut tree = Tree::new("root");
        let root = tree.root();
        let a = tree.create_node("a", root);
        let b = tree.create_node("b", root);
        let b1 = tree.create_node("b1", b);
        compute_layout(&mut tree);
        assert_eq!(pos(&tree, b1), (1, 2));

        let b2 = tree.create_node("b2", b);
        let a1 = tree.create_node("a1", a);
        let extent = compute_layout(&mut tree);
        assert_eq!(extent, Extent { width: 2, height: 2 });
        assert_eq!(extent, super::extent(&tree).unwrap());
        assert_eq!(pos(&tree, a1), (0, 2));
        assert_eq!(pos(&tree, b1), (1, 2));
        assert_eq!(pos(&tree, b2), (2, 2));
        assert_eq!(pos(&tree, a), (0, 1));
        assert_eq!(pos(&tree, b), (1, 1));
        assert_eq!(pos(&tree, root), (0, 0));

        let mut slots: Vec<(i32, i32)> = tree.iter().map(|id| pos(&tree, id)).collect();
        slots.sort_unstable();
        slots.dedup();
        assert_eq!(slots.len(), tree.len());
        for id in tree.iter() {
            assert_eq!(tree.node(id).y() as usize, tree.depth_of(id));
        }
    }

    #[test]
    fn stats_count_nodes_leaves_and_depth() {
        let mut tree = Tree::new("root");
        let root = tree.root();
        let m = tree.create_node("M", root);
        tree.create_node("x", m);
        tree.create_node("y", m);
        tree.create_node("z", root);
        assert_eq!(
            layout_stats(&tree),
            LayoutStats {
                nodes: 5,
                leaves: 3,
                depth: 2
            }
        );
    }
}
