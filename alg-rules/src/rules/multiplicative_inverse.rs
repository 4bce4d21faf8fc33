//! Restates division as multiplication by the reciprocal: `a / b = a * (1 / b)`.
//!
//! When the divisor is a negation, the sign moves into the reciprocal instead, giving
//! `a / -b = a * (-1 / b)`.

use alg_parser::{tree::NodeKind, NodeId, Tree};
use crate::rule::{ChangeRecord, Rule};

/// Turns a division into a multiplication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MultiplicativeInverse;

impl Rule for MultiplicativeInverse {
    fn name(&self) -> &'static str {
        "Multiplicative Inverse"
    }

    fn code(&self) -> &'static str {
        "MI"
    }

    fn can_apply_to(&self, tree: &Tree, node: NodeId) -> bool {
        *tree.kind(node) == NodeKind::Divide && tree.left(node).is_some() && tree.right(node).is_some()
    }

    fn apply(&self, tree: &mut Tree, node: NodeId) -> ChangeRecord {
        let (NodeKind::Divide, Some(left), Some(right)) = (*tree.kind(node), tree.left(node), tree.right(node)) else {
            return ChangeRecord::unchanged(self.code(), node);
        };
        let change = ChangeRecord::new(self.code(), node).save_parent(tree);

        let negated = (*tree.kind(right) == NodeKind::Negate)
            .then(|| tree.child(right))
            .flatten();
        let reciprocal = match negated {
            Some(child) => {
                let one = tree.constant(-1.0);
                tree.binary(NodeKind::Divide, one, child)
            },
            None => {
                let one = tree.constant(1.0);
                tree.binary(NodeKind::Divide, one, right)
            },
        };

        let result = tree.binary(NodeKind::Multiply, left, reciprocal);
        change.done(tree, result)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::rules::test_util::*;
    use super::*;

    #[test]
    fn division_to_reciprocal() {
        assert_eq!(apply_first(&MultiplicativeInverse, "x / 2"), "x * (1 / 2)");
        assert_eq!(apply_first(&MultiplicativeInverse, "4 / (x + 1)"), "4 * (1 / (x + 1))");
        assert_eq!(apply_first(&MultiplicativeInverse, "y + 6 / x"), "y + 6 * (1 / x)");
    }

    #[test]
    fn negative_divisor() {
        assert_eq!(apply_first(&MultiplicativeInverse, "(2 + 3z) / -z"), "(2 + 3z) * (-1 / z)");
    }

    #[test]
    fn only_division() {
        assert!(!matches(&MultiplicativeInverse, "x * 2"));
        assert!(!matches(&MultiplicativeInverse, "x - 2"));
    }
}
