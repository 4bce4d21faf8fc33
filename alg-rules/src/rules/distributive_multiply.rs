//! Distributive property: `a(b + c) = ab + ac`.

use alg_parser::{tree::NodeKind, NodeId, Tree};
use crate::rule::{ChangeRecord, Rule};

/// Distributes a multiplication across an addition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DistributiveMultiply;

impl DistributiveMultiply {
    /// Returns the factor to distribute and the addition it is distributed across.
    fn operands(tree: &Tree, node: NodeId) -> Option<(NodeId, NodeId)> {
        if *tree.kind(node) != NodeKind::Multiply {
            return None;
        }
        let (left, right) = (tree.left(node)?, tree.right(node)?);
        if *tree.kind(left) == NodeKind::Add {
            Some((right, left))
        } else if *tree.kind(right) == NodeKind::Add {
            Some((left, right))
        } else {
            None
        }
    }

    /// Returns true if the node is a variable or a power of a variable.
    fn is_variable(tree: &Tree, id: NodeId) -> bool {
        match tree.kind(id) {
            NodeKind::Variable(_) => true,
            NodeKind::Power => tree.left(id).is_some_and(|base| tree.variable_name(base).is_some()),
            _ => false,
        }
    }

    /// Multiplies the factor with the operand, putting a constant operand first so that the
    /// product reads as `4x`.
    fn product(tree: &mut Tree, factor: NodeId, operand: NodeId, factor_is_variable: bool) -> NodeId {
        if factor_is_variable && tree.constant_value(operand).is_some() {
            tree.binary(NodeKind::Multiply, operand, factor)
        } else {
            tree.binary(NodeKind::Multiply, factor, operand)
        }
    }
}

impl Rule for DistributiveMultiply {
    fn name(&self) -> &'static str {
        "Distributive Multiply Across"
    }

    fn code(&self) -> &'static str {
        "DM"
    }

    fn can_apply_to(&self, tree: &Tree, node: NodeId) -> bool {
        Self::operands(tree, node)
            .is_some_and(|(_, sum)| tree.left(sum).is_some() && tree.right(sum).is_some())
    }

    fn apply(&self, tree: &mut Tree, node: NodeId) -> ChangeRecord {
        let Some((factor, sum)) = Self::operands(tree, node) else {
            return ChangeRecord::unchanged(self.code(), node);
        };
        let (Some(b), Some(c)) = (tree.left(sum), tree.right(sum)) else {
            return ChangeRecord::unchanged(self.code(), node);
        };
        let change = ChangeRecord::new(self.code(), node).save_parent(tree);

        let factor_is_variable = Self::is_variable(tree, factor);
        let factor_copy = tree.copy_subtree(factor);
        let ab = Self::product(tree, factor, b, factor_is_variable);
        let ac = Self::product(tree, factor_copy, c, factor_is_variable);
        let result = tree.binary(NodeKind::Add, ab, ac);

        change.done(tree, result)
    }
}
