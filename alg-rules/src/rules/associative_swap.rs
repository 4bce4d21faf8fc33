//! Associative property: `(a + b) + c = a + (b + c)`, and the same for multiplication.
//!
//! The matched node must be an operand of an operation of its own kind. The node is rotated into
//! the place of its parent, which regroups the operands without changing their order.
//!
//! ```text
//!         +                 +
//!        / \               / \
//!       +   c     =>      a   +
//!      / \                   / \
//!     a   b                 b   c
//! ```

use alg_parser::{tree::NodeKind, NodeId, Tree};
use crate::rule::{ChangeRecord, Rule};

/// Regroups a chain of additions or multiplications.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssociativeSwap;

impl Rule for AssociativeSwap {
    fn name(&self) -> &'static str {
        "Associative Swap"
    }

    fn code(&self) -> &'static str {
        "AS"
    }

    fn can_apply_to(&self, tree: &Tree, node: NodeId) -> bool {
        let kind = tree.kind(node);
        if !matches!(kind, NodeKind::Add | NodeKind::Multiply) {
            return false;
        }
        tree.parent(node).is_some_and(|parent| tree.kind(parent) == kind)
    }

    fn apply(&self, tree: &mut Tree, node: NodeId) -> ChangeRecord {
        if !self.can_apply_to(tree, node) {
            return ChangeRecord::unchanged(self.code(), node);
        }
        tree.rotate(node);
        ChangeRecord::new(self.code(), node).done(tree, node)
    }
}
