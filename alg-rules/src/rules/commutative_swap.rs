//! Commutative property: `a + b = b + a` and `a * b = b * a`.
//!
//! ```text
//!       +              +
//!      / \     =>     / \
//!     a   b          b   a
//! ```
//!
//! When the left operand continues a chain of the same operation, as in `(a + b) + c`, the inner
//! right operand is swapped with the outer one instead, giving `(a + c) + b`. This keeps the depth
//! of the tree from growing as terms are moved around.

use alg_parser::{tree::NodeKind, NodeId, Tree};
use crate::rule::{ChangeRecord, Rule};

/// Swaps the operands of an addition, multiplication or equation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommutativeSwap {
    /// If true, multiplications that are already written in the preferred order (`4x`, or a
    /// power of a variable on the right such as `y * x^2`) are not swapped, unless they are a
    /// factor of a larger product.
    pub keep_preferred_order: bool,
}

impl CommutativeSwap {
    /// Creates the rule, which refuses to swap multiplications already in the preferred order.
    pub fn keeping_preferred_order() -> Self {
        Self { keep_preferred_order: true }
    }

    /// Returns true if the multiplication is `4x` or `_ * x^2`.
    fn in_preferred_order(tree: &Tree, left: NodeId, right: NodeId) -> bool {
        let constant_variable = tree.constant_value(left).is_some() && tree.variable_name(right).is_some();
        let power_of_variable = *tree.kind(right) == NodeKind::Power
            && tree.left(right).is_some_and(|base| tree.variable_name(base).is_some())
            && tree.right(right).is_some_and(|exp| tree.constant_value(exp).is_some());
        constant_variable || power_of_variable
    }

    /// Returns true if the node is one factor of a product of larger terms, like the `4x` in
    /// `4x * 2y`.
    fn in_larger_product(tree: &Tree, node: NodeId) -> bool {
        tree.parent(node).is_some_and(|parent| *tree.kind(parent) == NodeKind::Multiply)
            && tree.sibling(node).is_some_and(|sibling| *tree.kind(sibling) == NodeKind::Multiply)
    }
}

impl Rule for CommutativeSwap {
    fn name(&self) -> &'static str {
        "Commutative Swap"
    }

    fn code(&self) -> &'static str {
        "CS"
    }

    fn can_apply_to(&self, tree: &Tree, node: NodeId) -> bool {
        let (Some(left), Some(right)) = (tree.left(node), tree.right(node)) else {
            return false;
        };

        match tree.kind(node) {
            NodeKind::Add | NodeKind::Equal => true,
            NodeKind::Multiply => {
                !self.keep_preferred_order
                    || !Self::in_preferred_order(tree, left, right)
                    || Self::in_larger_product(tree, node)
            },
            _ => false,
        }
    }

    fn apply(&self, tree: &mut Tree, node: NodeId) -> ChangeRecord {
        let (Some(a), Some(b)) = (tree.left(node), tree.right(node)) else {
            return ChangeRecord::unchanged(self.code(), node);
        };
        let change = ChangeRecord::new(self.code(), node);

        let kind = *tree.kind(node);
        let chain = matches!(kind, NodeKind::Add | NodeKind::Multiply) && *tree.kind(a) == kind;
        if chain {
            // (a1 + a2) + b => (a1 + b) + a2
            let inner = tree.right(a);
            tree.set_right(a, Some(b));
            tree.set_right(node, inner);
        } else {
            tree.set_left(node, Some(b));
            tree.set_right(node, Some(a));
        }

        change.done(tree, node)
    }
}
