//! The expression tree.
//!
//! A [`Tree`] is an arena of [`Node`]s addressed by [`NodeId`] handles. Each node stores optional
//! handles to its left and right children and to its parent. Every mutation of the links goes
//! through [`Tree::set_child`] (or a method built on it), which keeps the parent and child links of
//! both ends consistent: a node has at most one parent, and that parent's corresponding slot
//! always refers back to it.
//!
//! Nodes that are unlinked from the tree stay in the arena until the tree is dropped. They are
//! simply unreachable from the root.

pub mod eval;
pub mod fmt;
mod kind;

use std::{cell::Cell, ops::{ControlFlow, Range}};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use eval::Bindings;
pub use kind::{Function, NodeKind, Priority};

/// A handle to a node in a [`Tree`].
///
/// Handles are only meaningful for the tree that created them, and for clones of that tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the index of the node in its tree's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// One of the two child slots of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Returns the other side.
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// The order in which nodes are visited by [`Tree::visit`] and listed by [`Tree::to_list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Node, left, right.
    Pre,

    /// Left, node, right.
    In,

    /// Left, right, node.
    Post,
}

/// A single node in an expression [`Tree`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node {
    /// The kind of the node.
    pub kind: NodeKind,

    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Option<NodeId>,

    /// Debugging identifier, unique within the tree that created the node.
    id: u32,

    /// The region of the source text this node was parsed from, if any.
    pub span: Option<Range<usize>>,

    /// The index of this node in the last inorder traversal that searched for rule matches.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub r_index: Cell<Option<usize>>,

    /// Horizontal position, written by tree layout algorithms.
    pub x: f64,

    /// Vertical position, written by tree layout algorithms.
    pub y: f64,

    /// Horizontal offset relative to the parent, written by tree layout algorithms.
    pub offset: f64,
}

impl Node {
    fn new(kind: NodeKind, id: u32) -> Self {
        Self {
            kind,
            left: None,
            right: None,
            parent: None,
            id,
            span: None,
            r_index: Cell::new(None),
            x: 0.0,
            y: 0.0,
            offset: 0.0,
        }
    }

    /// Returns the left child of the node.
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Returns the right child of the node.
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Returns the parent of the node.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns the child of a unary node, which is always stored in the right slot.
    pub fn child(&self) -> Option<NodeId> {
        self.right
    }

    /// Returns the debugging identifier of the node.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the child in the given slot.
    pub fn get(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Returns true if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// An expression tree, stored as an arena of [`Node`]s.
///
/// Cloning a tree produces an independent copy in which every [`NodeId`] still refers to the same
/// node as in the original. This lets a caller find a node in a tree, clone the tree, and modify
/// the clone at the same position.
///
/// Nodes are never removed from the arena. Unlinked nodes, such as the old equation left behind
/// when Balanced Move installs its rewritten copy, stay in the arena until the tree is dropped or
/// [`Tree::compact`] is called.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    next_id: u32,
}

impl Tree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the root of the tree, or [`None`] if the tree is empty.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Makes the given node the root of the tree, detaching it from its parent first.
    pub fn set_root(&mut self, id: NodeId) {
        self.detach(id);
        self.root = Some(id);
    }

    /// Returns the number of nodes in the arena, including nodes that are no longer reachable
    /// from the root.
    pub fn arena_len(&self) -> usize {
        self.nodes.len()
    }

    /// Drops every node that is not reachable from the root, renumbering the rest.
    ///
    /// Every [`NodeId`] taken from the tree before compacting is invalid afterwards.
    pub fn compact(&mut self) {
        let Some(root) = self.root else {
            *self = Tree::new();
            return;
        };
        if self.to_list(Order::Pre).len() < self.nodes.len() {
            *self = self.extract(root);
        }
    }

    /// Returns the node with the given handle.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Returns the node with the given handle, mutably.
    ///
    /// Links cannot be changed through the returned reference; use [`Tree::set_child`] for that.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Returns the kind of the node.
    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    /// Returns the left child of the node.
    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].left
    }

    /// Returns the right child of the node.
    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].right
    }

    /// Returns the parent of the node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Returns the child of a unary node.
    pub fn child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].child()
    }

    /// Returns the child of the node in the given slot.
    pub fn get(&self, id: NodeId, side: Side) -> Option<NodeId> {
        self.nodes[id.0].get(side)
    }

    /// Returns the value of the node if it is a constant.
    pub fn constant_value(&self, id: NodeId) -> Option<f64> {
        self.kind(id).as_constant()
    }

    /// Returns the identifier of the node if it is a variable.
    pub fn variable_name(&self, id: NodeId) -> Option<char> {
        self.kind(id).as_variable()
    }

    /// Adds an unlinked node of the given kind to the arena.
    pub fn add(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind, self.next_id));
        self.next_id += 1;
        id
    }

    /// Adds a constant node.
    pub fn constant(&mut self, value: f64) -> NodeId {
        self.add(NodeKind::Constant(value))
    }

    /// Adds a variable node.
    pub fn variable(&mut self, name: char) -> NodeId {
        self.add(NodeKind::Variable(name))
    }

    /// Adds a unary node with the given child.
    pub fn unary(&mut self, kind: NodeKind, child: NodeId) -> NodeId {
        let id = self.add(kind);
        self.set_child(id, Side::Right, Some(child));
        id
    }

    /// Adds a binary node with the given children.
    pub fn binary(&mut self, kind: NodeKind, left: NodeId, right: NodeId) -> NodeId {
        let id = self.add(kind);
        self.set_child(id, Side::Left, Some(left));
        self.set_child(id, Side::Right, Some(right));
        id
    }

    /// Sets the child of `parent` in the given slot, keeping every affected link consistent:
    ///
    /// - the previous occupant of the slot loses its parent link,
    /// - the new child is removed from the slot of its previous parent,
    /// - if the new child was the root of the tree, the root moves up to the top of the subtree it
    ///   now belongs to.
    ///
    /// # Panics
    ///
    /// Panics if `child` is `parent` or one of its ancestors, since the link would make a cycle.
    pub fn set_child(&mut self, parent: NodeId, side: Side, child: Option<NodeId>) {
        if let Some(child) = child {
            assert!(!self.is_ancestor(child, parent), "a node cannot be linked under itself");
        }

        if let Some(old) = self.get(parent, side) {
            if Some(old) != child && self.nodes[old.0].parent == Some(parent) {
                self.nodes[old.0].parent = None;
            }
        }

        if let Some(child) = child {
            self.detach(child);
            self.nodes[child.0].parent = Some(parent);
        }

        match side {
            Side::Left => self.nodes[parent.0].left = child,
            Side::Right => self.nodes[parent.0].right = child,
        }

        if let Some(child) = child {
            if self.root == Some(child) {
                self.root = Some(self.root_of(child));
            }
        }
    }

    /// Sets the left child of `parent`. See [`Tree::set_child`].
    pub fn set_left(&mut self, parent: NodeId, child: Option<NodeId>) {
        self.set_child(parent, Side::Left, child);
    }

    /// Sets the right child of `parent`. See [`Tree::set_child`].
    pub fn set_right(&mut self, parent: NodeId, child: Option<NodeId>) {
        self.set_child(parent, Side::Right, child);
    }

    /// Removes the node from the slot of its parent, without touching the tree's root.
    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes[id.0].parent.take() else {
            return;
        };
        let parent = &mut self.nodes[parent.0];
        if parent.left == Some(id) {
            parent.left = None;
        } else if parent.right == Some(id) {
            parent.right = None;
        }
    }

    /// Removes the node from its parent and returns it. The root of the tree is unchanged, even if
    /// the node was part of the tree.
    pub fn unlink(&mut self, id: NodeId) -> NodeId {
        self.detach(id);
        id
    }

    /// Puts `new` in the place of `old`: in the slot of `old`'s parent, or as the root of the tree
    /// if `old` was the root. `old` is left unlinked.
    pub fn replace(&mut self, old: NodeId, new: NodeId) {
        if old == new {
            return;
        }

        match self.parent(old).zip(self.side(old)) {
            Some((parent, side)) => self.set_child(parent, side, Some(new)),
            None => {
                self.detach(new);
                if self.root == Some(old) {
                    self.root = Some(new);
                }
            },
        }
    }

    /// Returns true if `ancestor` is `id`, or is reached by following the parent links up from
    /// `id`.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Returns the slot of `parent` that holds `child`.
    pub fn side_of(&self, parent: NodeId, child: NodeId) -> Option<Side> {
        let node = &self.nodes[parent.0];
        if node.left == Some(child) {
            Some(Side::Left)
        } else if node.right == Some(child) {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// Returns the slot of the node's parent that holds the node.
    pub fn side(&self, id: NodeId) -> Option<Side> {
        self.parent(id).and_then(|parent| self.side_of(parent, id))
    }

    /// Returns the other child of the node's parent.
    pub fn sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let side = self.side_of(parent, id)?;
        self.get(parent, side.opposite())
    }

    /// Follows parent links up from the node and returns the topmost node.
    pub fn root_of(&self, mut id: NodeId) -> NodeId {
        while let Some(parent) = self.parent(id) {
            id = parent;
        }
        id
    }

    /// Returns the side of the topmost node that the given node is under, or [`None`] if the node
    /// is the topmost node itself.
    pub fn root_side(&self, id: NodeId) -> Option<Side> {
        let path = self.path_to_root(id);
        let [.., below, top] = path.as_slice() else {
            return None;
        };
        self.side_of(*top, *below)
    }

    /// Returns the node followed by each of its ancestors, ending with the topmost node.
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }
        path
    }

    /// Returns true if the node has no children.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.nodes[id.0].is_leaf()
    }

    /// Returns the children of the node, left first.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let node = &self.nodes[id.0];
        node.left.into_iter().chain(node.right).collect()
    }

    /// Rotates the node into the place of its parent, without changing the inorder sequence of
    /// the tree:
    ///
    /// ```text
    ///       p            n
    ///      / \          / \
    ///     n   c   =>   a   p
    ///    / \              / \
    ///   a   b            b   c
    /// ```
    ///
    /// The mirrored rotation is used when the node is its parent's right child. If the parent was
    /// the root, the node becomes the root. Does nothing if the node has no parent.
    pub fn rotate(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        let Some(side) = self.side_of(parent, id) else {
            return;
        };

        match self.parent(parent).zip(self.side(parent)) {
            Some((grand_parent, parent_side)) => {
                self.set_child(grand_parent, parent_side, Some(id));
            },
            None => {
                self.detach(id);
                if self.root == Some(parent) {
                    self.root = Some(id);
                }
            },
        }

        // the inner child of the node moves across to the parent
        let inner = self.get(id, side.opposite());
        self.set_child(parent, side, inner);
        self.set_child(id, side.opposite(), Some(parent));
    }

    /// Visits the subtree under `start` in the given order. The callback receives each node and
    /// its depth below `start`, and may stop the traversal early by returning
    /// [`ControlFlow::Break`].
    pub fn visit<F>(&self, start: NodeId, order: Order, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(NodeId, usize) -> ControlFlow<()>,
    {
        self.visit_inner(start, order, 0, &mut f)
    }

    fn visit_inner(
        &self,
        id: NodeId,
        order: Order,
        depth: usize,
        f: &mut dyn FnMut(NodeId, usize) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        let node = &self.nodes[id.0];
        if order == Order::Pre {
            f(id, depth)?;
        }
        if let Some(left) = node.left {
            self.visit_inner(left, order, depth + 1, f)?;
        }
        if order == Order::In {
            f(id, depth)?;
        }
        if let Some(right) = node.right {
            self.visit_inner(right, order, depth + 1, f)?;
        }
        if order == Order::Post {
            f(id, depth)?;
        }
        ControlFlow::Continue(())
    }

    /// Returns the nodes of the subtree under `start` in the given order.
    pub fn to_list_from(&self, start: NodeId, order: Order) -> Vec<NodeId> {
        let mut list = Vec::new();
        let _ = self.visit(start, order, |id, _| {
            list.push(id);
            ControlFlow::Continue(())
        });
        list
    }

    /// Returns the nodes reachable from the root in the given order.
    pub fn to_list(&self, order: Order) -> Vec<NodeId> {
        self.root
            .map(|root| self.to_list_from(root, order))
            .unwrap_or_default()
    }

    /// Returns, in preorder, every node reachable from the root whose kind is the same variant as
    /// `kind`. Values carried by the kind are ignored.
    pub fn find_kind(&self, kind: &NodeKind) -> Vec<NodeId> {
        self.to_list(Order::Pre)
            .into_iter()
            .filter(|&id| self.kind(id).same_variant(kind))
            .collect()
    }

    /// Finds the node reachable from the root with the given debugging identifier.
    pub fn find_id(&self, debug_id: u32) -> Option<NodeId> {
        self.to_list(Order::Pre)
            .into_iter()
            .find(|&id| self.nodes[id.0].id == debug_id)
    }

    /// Returns true if the subtree under `start` contains a node of the same variant as `kind`.
    pub fn contains_kind(&self, start: NodeId, kind: &NodeKind) -> bool {
        self.visit(start, Order::Pre, |id, _| {
            if self.kind(id).same_variant(kind) {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .is_break()
    }

    /// Copies the subtree under `id` in `other` into this tree, returning the unlinked root of the
    /// copy. Copied nodes get fresh debugging identifiers and keep their source spans.
    pub fn graft(&mut self, other: &Tree, id: NodeId) -> NodeId {
        let source = other.node(id);
        let copy = self.add(source.kind);
        self.nodes[copy.0].span = source.span.clone();

        if let Some(left) = source.left {
            let left = self.graft(other, left);
            self.set_child(copy, Side::Left, Some(left));
        }
        if let Some(right) = source.right {
            let right = self.graft(other, right);
            self.set_child(copy, Side::Right, Some(right));
        }
        copy
    }

    /// Copies the subtree under `id` into a new tree of its own.
    pub fn extract(&self, id: NodeId) -> Tree {
        let mut tree = Tree::new();
        let root = tree.graft(self, id);
        tree.root = Some(root);
        tree
    }

    /// Deep-copies the subtree under `id` within this tree, returning the unlinked root of the
    /// copy.
    pub fn copy_subtree(&mut self, id: NodeId) -> NodeId {
        let subtree = self.extract(id);
        match subtree.root {
            Some(root) => self.graft(&subtree, root),
            None => id,
        }
    }

    /// Returns true if the subtree under `a` in this tree has the same shape and node kinds as the
    /// subtree under `b` in `other`.
    pub fn subtree_eq(&self, a: NodeId, other: &Tree, b: NodeId) -> bool {
        let (left, right) = (self.node(a), other.node(b));
        if left.kind != right.kind {
            return false;
        }

        let same_slot = |x: Option<NodeId>, y: Option<NodeId>| match (x, y) {
            (Some(x), Some(y)) => self.subtree_eq(x, other, y),
            (None, None) => true,
            _ => false,
        };
        same_slot(left.left, right.left) && same_slot(left.right, right.right)
    }
}

/// Trees are equal if their reachable structure is equal, regardless of how their arenas are laid
/// out.
impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        match (self.root, other.root) {
            (Some(a), Some(b)) => self.subtree_eq(a, other, b),
            (None, None) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Builds `(a + b) * c`.
    fn sample() -> (Tree, [NodeId; 5]) {
        let mut tree = Tree::new();
        let a = tree.variable('a');
        let b = tree.variable('b');
        let c = tree.variable('c');
        let add = tree.binary(NodeKind::Add, a, b);
        let mul = tree.binary(NodeKind::Multiply, add, c);
        tree.set_root(mul);
        (tree, [a, b, c, add, mul])
    }

    fn names(tree: &Tree, order: Order) -> String {
        tree.to_list(order)
            .into_iter()
            .map(|id| match tree.kind(id) {
                NodeKind::Variable(c) => c.to_string(),
                kind => kind.symbol().to_string(),
            })
            .collect()
    }

    #[test]
    fn traversal_orders() {
        let (tree, _) = sample();
        assert_eq!(names(&tree, Order::Pre), "*+abc");
        assert_eq!(names(&tree, Order::In), "a+b*c");
        assert_eq!(names(&tree, Order::Post), "ab+c*");
    }

    #[test]
    fn visit_stops_early_and_tracks_depth() {
        let (tree, [a, ..]) = sample();
        let mut seen = Vec::new();
        let flow = tree.visit(tree.root().unwrap(), Order::Pre, |id, depth| {
            seen.push(depth);
            if id == a {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert!(flow.is_break());
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn links_stay_consistent() {
        let (mut tree, [a, b, c, add, mul]) = sample();
        assert_eq!(tree.parent(a), Some(add));
        assert_eq!(tree.sibling(a), Some(b));
        assert_eq!(tree.side(c), Some(Side::Right));
        assert_eq!(tree.root_of(b), mul);
        assert_eq!(tree.root_side(b), Some(Side::Left));
        assert_eq!(tree.root_side(mul), None);
        assert_eq!(tree.path_to_root(a), vec![a, add, mul]);

        // moving `c` into the add node removes it from the multiply node
        tree.set_child(add, Side::Right, Some(c));
        assert_eq!(tree.right(mul), None);
        assert_eq!(tree.parent(c), Some(add));
        assert_eq!(tree.parent(b), None);
    }

    #[test]
    #[should_panic]
    fn node_cannot_be_own_child() {
        let (mut tree, [.., add, _]) = sample();
        tree.set_child(add, Side::Left, Some(add));
    }

    #[test]
    #[should_panic(expected = "a node cannot be linked under itself")]
    fn node_cannot_be_linked_under_its_descendant() {
        let (mut tree, [a, .., mul]) = sample();
        tree.set_child(a, Side::Left, Some(mul));
    }

    #[test]
    fn ancestors() {
        let (tree, [a, _, c, add, mul]) = sample();
        assert!(tree.is_ancestor(mul, a));
        assert!(tree.is_ancestor(add, a));
        assert!(tree.is_ancestor(a, a));
        assert!(!tree.is_ancestor(a, mul));
        assert!(!tree.is_ancestor(add, c));
    }

    #[test]
    fn compact_drops_unlinked_nodes() {
        let (mut tree, [a, b, c, add, mul]) = sample();
        let copy = tree.copy_subtree(mul);
        tree.set_root(copy);
        assert_eq!(tree.arena_len(), 10);

        let before = tree.clone();
        tree.compact();
        assert_eq!(tree.arena_len(), 5);
        assert_eq!(tree, before);
        assert_eq!(names(&tree, Order::In), "a+b*c");

        // already compact
        let (mut tree, _) = sample();
        tree.compact();
        assert_eq!(tree.root(), Some(mul));
        assert_eq!(tree.to_list(Order::Pre), vec![mul, add, a, b, c]);

        let mut empty = Tree::new();
        empty.constant(1.0);
        empty.compact();
        assert_eq!(empty.arena_len(), 0);
    }

    #[test]
    fn replace_root() {
        let (mut tree, [.., add, mul]) = sample();
        tree.replace(mul, add);
        assert_eq!(tree.root(), Some(add));
        assert_eq!(tree.parent(add), None);
        assert_eq!(names(&tree, Order::In), "a+b");
    }

    #[test]
    fn rotate_keeps_inorder() {
        let (mut tree, [_, _, _, add, mul]) = sample();
        tree.rotate(add);
        assert_eq!(tree.root(), Some(add));
        assert_eq!(tree.parent(mul), Some(add));
        assert_eq!(names(&tree, Order::In), "a+b*c");
        assert_eq!(names(&tree, Order::Pre), "+a*bc");
    }

    #[test]
    fn clone_is_independent() {
        let (tree, [a, ..]) = sample();
        let mut copy = tree.clone();
        assert_eq!(copy, tree);

        // handles address the same node in the clone
        copy.node_mut(a).kind = NodeKind::Variable('z');
        assert_eq!(tree.variable_name(a), Some('a'));
        assert_eq!(copy.variable_name(a), Some('z'));
        assert_ne!(copy, tree);
    }

    #[test]
    fn subtree_copies() {
        let (mut tree, [_, _, c, add, _]) = sample();
        let extracted = tree.extract(add);
        assert_eq!(names(&extracted, Order::In), "a+b");

        let copy = tree.copy_subtree(add);
        assert_ne!(copy, add);
        assert_eq!(tree.parent(copy), None);
        assert!(tree.subtree_eq(copy, &tree, add));
        assert!(!tree.subtree_eq(copy, &tree, c));
    }

    #[test]
    fn find_nodes() {
        let (tree, [a, b, c, ..]) = sample();
        assert_eq!(tree.find_kind(&NodeKind::Variable('?')), vec![a, b, c]);
        assert_eq!(tree.find_id(tree.node(b).id()), Some(b));
        assert!(tree.contains_kind(tree.root().unwrap(), &NodeKind::Add));
        assert!(!tree.contains_kind(tree.root().unwrap(), &NodeKind::Power));
        assert_eq!(tree.children(tree.root().unwrap()).len(), 2);
        assert!(tree.is_leaf(c));
    }
}
