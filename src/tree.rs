//! Arena-backed tree model.
//!
//! Nodes are stored in a flat arena owned by [`Tree`] and refer to each other
//! through [`NodeId`] indices. The children list is the only ownership edge;
//! `parent` is a plain back-link. A tree is created together with its root and
//! nodes can only ever be appended under an existing node, so shared children,
//! cycles and multiple roots cannot be expressed.

use std::fmt;

/// Value of every coordinate and extent before layout has run.
pub const UNPOSITIONED: i32 = -1;

/// Identifier of a node inside one [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Grid coordinate assigned by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone)]
pub struct Node<T> {
    pub payload: T,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) subtree_width: i32,
    pub(crate) subtree_height: i32,
}

impl<T> Node<T> {
    fn new(payload: T, parent: Option<NodeId>) -> Self {
        Self {
            payload,
            parent,
            children: Vec::new(),
            x: UNPOSITIONED,
            y: UNPOSITIONED,
            subtree_width: UNPOSITIONED,
            subtree_height: UNPOSITIONED,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Horizontal slot, or [`UNPOSITIONED`].
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Depth from the layout root, or [`UNPOSITIONED`].
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Number of slots spanned by the subtree minus one.
    pub fn subtree_width(&self) -> i32 {
        self.subtree_width
    }

    /// Number of depth levels in the subtree minus one.
    pub fn subtree_height(&self) -> i32 {
        self.subtree_height
    }

    pub fn position(&self) -> Option<GridPos> {
        if self.x == UNPOSITIONED || self.y == UNPOSITIONED {
            return None;
        }
        Some(GridPos {
            x: self.x,
            y: self.y,
        })
    }
}

/// A rooted tree with ordered children, generic over the node payload.
///
/// ```
/// use treegrid::tree::Tree;
///
/// let mut tree = Tree::new("root");
/// let a = tree.create_node("a", tree.root());
/// let b = tree.create_node("b", tree.root());
/// assert_eq!(tree.children(tree.root()), &[a, b]);
/// assert_eq!(tree.leftmost_descendant_leaf(tree.root()), a);
/// ```
#[derive(Debug, Clone)]
pub struct Tree<T> {
    nodes: Vec<Node<T>>,
}

impl<T> Tree<T> {
    /// Creates a tree holding a single, unpositioned root.
    pub fn new(root: T) -> Self {
        Self {
            nodes: vec![Node::new(root, None)],
        }
    }

    /// Allocates a node and appends it as the last child of `parent`.
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn create_node(&mut self, payload: T, parent: NodeId) -> NodeId {
        assert!(
            parent.0 < self.nodes.len(),
            "parent {parent} is not a node of this tree"
        );
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(payload, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree owns at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0)
    }

    pub fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.nodes[id.0]
    }

    pub fn payload(&self, id: NodeId) -> &T {
        &self.nodes[id.0].payload
    }

    pub fn payload_mut(&mut self, id: NodeId) -> &mut T {
        &mut self.nodes[id.0].payload
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].children.first().copied()
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].children.last().copied()
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.nodes[id.0].is_leaf()
    }

    pub fn position(&self, id: NodeId) -> Option<GridPos> {
        self.nodes[id.0].position()
    }

    /// Follows first children down to a leaf. A leaf returns itself.
    pub fn leftmost_descendant_leaf(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(first) = self.first_child(current) {
            current = first;
        }
        current
    }

    /// Follows last children down to a leaf. A leaf returns itself.
    pub fn rightmost_descendant_leaf(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(last) = self.last_child(current) {
            current = last;
        }
        current
    }

    /// Parent chain from `id` (exclusive) up to the root (inclusive).
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_, T> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Number of parent links between `id` and the root.
    pub fn depth_of(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    /// Pre-order walk of the whole tree, children in insertion order.
    pub fn iter(&self) -> PreOrder<'_, T> {
        self.descendants(self.root())
    }

    /// Pre-order walk of the subtree rooted at `id`, including `id`.
    pub fn descendants(&self, id: NodeId) -> PreOrder<'_, T> {
        PreOrder {
            tree: self,
            stack: vec![id],
        }
    }

    /// Leaves from left to right.
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.iter().filter(move |id| self.is_leaf(*id))
    }

    /// Builds a tree of the same shape, with unpositioned coordinates and
    /// payloads converted by `f`.
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Tree<U> {
        Tree {
            nodes: self
                .nodes
                .iter()
                .map(|node| Node {
                    payload: f(&node.payload),
                    parent: node.parent,
                    children: node.children.clone(),
                    x: UNPOSITIONED,
                    y: UNPOSITIONED,
                    subtree_width: UNPOSITIONED,
                    subtree_height: UNPOSITIONED,
                })
                .collect(),
        }
    }
}

pub struct Ancestors<'a, T> {
    tree: &'a Tree<T>,
    next: Option<NodeId>,
}

impl<T> Iterator for Ancestors<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

pub struct PreOrder<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<NodeId>,
}

impl<T> Iterator for PreOrder<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        // reversed so the first child is popped first
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Tree<&'static str>, [NodeId; 5]) {
        let mut tree = Tree::new("root");
        let root = tree.root();
        let a = tree.create_node("a", root);
        let b = tree.create_node("b", root);
        let a1 = tree.create_node("a1", a);
        let a2 = tree.create_node("a2", a);
        (tree, [a, b, a1, a2, root])
    }

    #[test]
    fn create_node_appends_in_order() {
        let (tree, [a, b, a1, a2, root]) = sample();
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.children(a), &[a1, a2]);
        assert_eq!(tree.parent(a1), Some(a));
        assert_eq!(tree.parent(root), None);
        assert!(tree.node(root).is_root());
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn new_nodes_are_unpositioned() {
        let (tree, [a, ..]) = sample();
        let node = tree.node(a);
        assert_eq!(node.x(), UNPOSITIONED);
        assert_eq!(node.y(), UNPOSITIONED);
        assert_eq!(node.subtree_width(), UNPOSITIONED);
        assert_eq!(node.subtree_height(), UNPOSITIONED);
        assert!(tree.position(a).is_none());
    }

    #[test]
    fn leaf_detection() {
        let (tree, [a, b, a1, _, root]) = sample();
        assert!(!tree.is_leaf(root));
        assert!(!tree.is_leaf(a));
        assert!(tree.is_leaf(b));
        assert!(tree.is_leaf(a1));
    }

    #[test]
    fn descendant_leaves_follow_first_and_last_children() {
        let (tree, [a, b, a1, a2, root]) = sample();
        assert_eq!(tree.leftmost_descendant_leaf(root), a1);
        assert_eq!(tree.rightmost_descendant_leaf(root), b);
        assert_eq!(tree.rightmost_descendant_leaf(a), a2);
        assert_eq!(tree.leftmost_descendant_leaf(b), b);
        assert_eq!(tree.rightmost_descendant_leaf(b), b);
    }

    #[test]
    fn pre_order_and_leaves() {
        let (tree, [a, b, a1, a2, root]) = sample();
        assert_eq!(tree.iter().collect::<Vec<_>>(), vec![root, a, a1, a2, b]);
        assert_eq!(tree.leaves().collect::<Vec<_>>(), vec![a1, a2, b]);
        assert_eq!(tree.descendants(a).collect::<Vec<_>>(), vec![a, a1, a2]);
    }

    #[test]
    fn ancestors_reach_root() {
        let (tree, [a, _, a1, _, root]) = sample();
        assert_eq!(tree.ancestors(a1).collect::<Vec<_>>(), vec![a, root]);
        assert_eq!(tree.depth_of(a1), 2);
        assert_eq!(tree.depth_of(root), 0);
    }

    #[test]
    fn map_keeps_shape() {
        let (tree, [a, ..]) = sample();
        let lengths = tree.map(|label| label.len());
        assert_eq!(lengths.len(), tree.len());
        assert_eq!(*lengths.payload(a), 1);
        assert_eq!(lengths.children(lengths.root()), tree.children(tree.root()));
    }

    #[test]
    #[should_panic(expected = "is not a node of this tree")]
    fn create_node_rejects_foreign_parent() {
        let mut tree = Tree::new(());
        let mut other = Tree::new(());
        let foreign = other.create_node((), other.root());
        tree.create_node((), foreign);
    }
}
