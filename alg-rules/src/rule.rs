use alg_parser::{tree::Order, NodeId, Side, Tree};
use log::{debug, trace};
use std::ops::ControlFlow;
use crate::config::config;

/// Where the result of a rule is re-attached once it has been built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attach {
    /// The rule changes the matched node in place; nothing needs re-attaching.
    InPlace,

    /// The matched node was the root of the tree; the result becomes the new root.
    Root,

    /// The matched node was in the given slot of the given parent.
    Child(NodeId, Side),
}

/// The record of a single rule application: the node the rule was applied to, and the node that
/// took its place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    /// The code of the rule that made the change.
    pub rule: &'static str,

    /// The node the rule was applied to.
    pub node: NodeId,

    /// The node that replaced [`ChangeRecord::node`], or the node itself if the rule changed it in
    /// place. [`None`] until [`ChangeRecord::done`] is called.
    pub result: Option<NodeId>,

    attach: Attach,
}

impl ChangeRecord {
    /// Starts a record for applying the given rule to the node.
    pub fn new(rule: &'static str, node: NodeId) -> Self {
        Self { rule, node, result: None, attach: Attach::InPlace }
    }

    /// Returns a finished record of a rule that did not change the node.
    pub fn unchanged(rule: &'static str, node: NodeId) -> Self {
        Self { rule, node, result: Some(node), attach: Attach::InPlace }
    }

    /// Returns true if the rule replaced the matched node with a different node.
    pub fn replaced(&self) -> bool {
        self.result.is_some_and(|result| result != self.node)
    }

    /// Remembers where the matched node currently sits in the tree, so that [`ChangeRecord::done`]
    /// can put the result in the same place. Must be called before the rule restructures the
    /// tree.
    pub fn save_parent(mut self, tree: &Tree) -> Self {
        self.attach = match tree.parent(self.node).zip(tree.side(self.node)) {
            Some((parent, side)) => Attach::Child(parent, side),
            None => Attach::Root,
        };
        self
    }

    /// Returns the parent and slot saved by [`ChangeRecord::save_parent`].
    pub fn saved_parent(&self) -> Option<(NodeId, Side)> {
        match self.attach {
            Attach::Child(parent, side) => Some((parent, side)),
            _ => None,
        }
    }

    /// Finishes the record with the result of the rule, attaching the result where the matched
    /// node was if the parent was saved.
    pub fn done(mut self, tree: &mut Tree, result: NodeId) -> Self {
        match self.attach {
            Attach::Child(parent, side) => tree.set_child(parent, side, Some(result)),
            Attach::Root => tree.set_root(result),
            Attach::InPlace => (),
        }
        self.result = Some(result);
        self
    }
}

/// A rewrite rule that changes the shape of an expression tree without changing its value.
///
/// Rules are searched for by calling [`Rule::can_apply_to`] against every node of a tree, so that
/// method must be cheap and must not change the tree.
pub trait Rule {
    /// The name of the rule, such as `Commutative Swap`.
    fn name(&self) -> &'static str;

    /// The short code of the rule, such as `CS`.
    fn code(&self) -> &'static str;

    /// Returns true if the rule can be applied to the node.
    fn can_apply_to(&self, tree: &Tree, node: NodeId) -> bool;

    /// Applies the rule to the node without checking that it can be applied. Use
    /// [`Rule::apply_to`] instead.
    fn apply(&self, tree: &mut Tree, node: NodeId) -> ChangeRecord;

    /// Returns the first node, in inorder, that the rule can be applied to.
    fn find_node(&self, tree: &Tree) -> Option<NodeId> {
        let root = tree.root()?;
        let mut found = None;
        let _ = tree.visit(root, Order::In, |id, _| {
            if self.can_apply_to(tree, id) {
                found = Some(id);
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        found
    }

    /// Returns every node, in inorder, that the rule can be applied to. Every node visited is
    /// stamped with its inorder index in [`Node::r_index`](alg_parser::tree::Node::r_index).
    fn find_nodes(&self, tree: &Tree) -> Vec<NodeId> {
        let Some(root) = tree.root() else {
            return Vec::new();
        };

        let mut found = Vec::new();
        let mut index = 0;
        let _ = tree.visit(root, Order::In, |id, _| {
            tree.node(id).r_index.set(Some(index));
            index += 1;
            if self.can_apply_to(tree, id) {
                found.push(id);
            }
            ControlFlow::Continue(())
        });
        trace!("{} matches {} of {} nodes", self.code(), found.len(), index);
        found
    }

    /// Applies the rule to the node and returns the record of the change.
    ///
    /// # Panics
    ///
    /// When debugging is enabled (see [`RuleConfig`](crate::RuleConfig)), panics if the rule
    /// cannot be applied to the node. Otherwise, a rule applied to a node it does not match leaves
    /// the tree unchanged, and the record's result is the node itself.
    fn apply_to(&self, tree: &mut Tree, node: NodeId) -> ChangeRecord {
        if config().debug {
            assert!(
                self.can_apply_to(tree, node),
                "{} cannot be applied to `{}`",
                self.name(),
                tree.text(node),
            );
        }

        debug!("{}: applying to `{}`", self.code(), tree.text(node));
        let change = self.apply(tree, node);
        debug!("{}: result `{}`", self.code(), tree);
        change
    }
}

#[cfg(test)]
mod tests {
    use alg_parser::{parse, tree::NodeKind};
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn done_reattaches_to_saved_parent() {
        let mut tree = parse("x + 2 * 3").unwrap();
        let root = tree.root().unwrap();
        let product = tree.right(root).unwrap();

        let change = ChangeRecord::new("CA", product).save_parent(&tree);
        assert_eq!(change.saved_parent(), Some((root, Side::Right)));

        let six = tree.constant(6.0);
        let change = change.done(&mut tree, six);
        assert!(change.replaced());
        assert_eq!(tree.to_string(), "x + 6");
        assert_eq!(tree.parent(six), Some(root));
        assert_eq!(tree.parent(product), None);
    }

    #[test]
    fn done_replaces_root() {
        let mut tree = parse("2 * 3").unwrap();
        let root = tree.root().unwrap();

        let change = ChangeRecord::new("CA", root).save_parent(&tree);
        assert_eq!(change.saved_parent(), None);

        let six = tree.constant(6.0);
        change.done(&mut tree, six);
        assert_eq!(tree.root(), Some(six));
        assert_eq!(tree.kind(six), &NodeKind::Constant(6.0));
    }

    #[test]
    fn in_place_changes_keep_links() {
        let mut tree = parse("x + 1").unwrap();
        let root = tree.root().unwrap();
        let change = ChangeRecord::new("CS", root).done(&mut tree, root);
        assert!(!change.replaced());
        assert_eq!(tree.root(), Some(root));
        assert_eq!(ChangeRecord::unchanged("CS", root), change);
    }
}
