//! Converts between subtraction and addition of a negated value: `a - b = a + -b`, and back.

use alg_parser::{tree::NodeKind, NodeId, Tree};
use crate::rule::{ChangeRecord, Rule};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// `a - b => a + -b`, only at the top of an addition chain.
    SubtractToAdd,

    /// `a - -b => a + b`
    SubtractNegation { child: NodeId },

    /// `a - (-3) => a + 3` and `a - (-3)x^2 => a + 3x^2`. Holds the negative constant.
    SubtractNegative { constant: NodeId },

    /// `a + (-3) => a - 3` and `a + (-3)x^2 => a - 3x^2`. Holds the negative constant.
    AddNegative { constant: NodeId },

    /// `a + -b => a - b`
    AddNegation { child: NodeId },
}

/// Restates subtraction as addition, and addition of negative values as subtraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestateSubtraction;

impl RestateSubtraction {
    /// Returns the negative constant of `-3`, `-3x` or `-3x^2`.
    fn negative_constant(tree: &Tree, id: NodeId) -> Option<NodeId> {
        let constant = match tree.kind(id) {
            NodeKind::Constant(_) => id,
            NodeKind::Multiply => {
                let right = tree.right(id)?;
                if !matches!(tree.kind(right), NodeKind::Variable(_) | NodeKind::Power) {
                    return None;
                }
                tree.left(id)?
            },
            _ => return None,
        };
        tree.constant_value(constant)
            .filter(|value| *value < 0.0)
            .map(|_| constant)
    }

    fn classify(tree: &Tree, node: NodeId) -> Option<Shape> {
        let kind = *tree.kind(node);
        if !matches!(kind, NodeKind::Add | NodeKind::Subtract) {
            return None;
        }
        tree.left(node)?;
        let right = tree.right(node)?;

        let negation = (*tree.kind(right) == NodeKind::Negate)
            .then(|| tree.child(right))
            .flatten();
        let negative = Self::negative_constant(tree, right);

        match kind {
            NodeKind::Subtract => {
                if let Some(child) = negation {
                    return Some(Shape::SubtractNegation { child });
                }
                if let Some(constant) = negative {
                    return Some(Shape::SubtractNegative { constant });
                }
                let top = tree.parent(node)
                    .map_or(true, |parent| *tree.kind(parent) == NodeKind::Add);
                top.then_some(Shape::SubtractToAdd)
            },
            _ => {
                if let Some(constant) = negative {
                    return Some(Shape::AddNegative { constant });
                }
                negation.map(|child| Shape::AddNegation { child })
            },
        }
    }

    /// Flips the sign of the constant in place.
    fn flip(tree: &mut Tree, constant: NodeId) {
        if let Some(value) = tree.constant_value(constant) {
            tree.node_mut(constant).kind = NodeKind::Constant(-value);
        }
    }
}

impl Rule for RestateSubtraction {
    fn name(&self) -> &'static str {
        "Restate Subtraction"
    }

    fn code(&self) -> &'static str {
        "RS"
    }

    fn can_apply_to(&self, tree: &Tree, node: NodeId) -> bool {
        Self::classify(tree, node).is_some()
    }

    fn apply(&self, tree: &mut Tree, node: NodeId) -> ChangeRecord {
        let (Some(shape), Some(left), Some(right)) = (
            Self::classify(tree, node),
            tree.left(node),
            tree.right(node),
        ) else {
            return ChangeRecord::unchanged(self.code(), node);
        };
        let change = ChangeRecord::new(self.code(), node).save_parent(tree);

        let result = match shape {
            Shape::SubtractToAdd => {
                let negated = tree.unary(NodeKind::Negate, right);
                tree.binary(NodeKind::Add, left, negated)
            },
            Shape::SubtractNegation { child } => tree.binary(NodeKind::Add, left, child),
            Shape::SubtractNegative { constant } => {
                Self::flip(tree, constant);
                tree.binary(NodeKind::Add, left, right)
            },
            Shape::AddNegative { constant } => {
                Self::flip(tree, constant);
                tree.binary(NodeKind::Subtract, left, right)
            },
            Shape::AddNegation { child } => tree.binary(NodeKind::Subtract, left, child),
        };

        change.done(tree, result)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::rules::test_util::*;
    use super::*;

    #[test]
    fn subtraction_to_addition() {
        assert_eq!(apply_first(&RestateSubtraction, "4x - 3y"), "4x + -3y");
        assert_eq!(apply_first(&RestateSubtraction, "x - 2 - 3"), "x - 2 + -3");
        assert_eq!(apply_first(&RestateSubtraction, "4x - 3y + 3x"), "4x + -3y + 3x");
    }

    #[test]
    fn subtraction_of_negative_values() {
        assert_eq!(apply_first(&RestateSubtraction, "x - -y"), "x + y");
        assert_eq!(apply_first(&RestateSubtraction, "x - -3"), "x + 3");
        assert_eq!(apply_first(&RestateSubtraction, "x - -3y"), "x + 3y");
        assert_eq!(apply_first(&RestateSubtraction, "x - -3y^2"), "x + 3y^2");
    }

    #[test]
    fn addition_of_negative_values() {
        assert_eq!(apply_first(&RestateSubtraction, "x + -2"), "x - 2");
        assert_eq!(apply_first(&RestateSubtraction, "x + -2y"), "x - 2y");
        assert_eq!(apply_first(&RestateSubtraction, "x + -2y^2"), "x - 2y^2");
        assert_eq!(apply_first(&RestateSubtraction, "x + -y"), "x - y");
    }

    #[test]
    fn no_match() {
        for input in ["x + 2", "x + 2y", "2 * (x - 3)", "x + 3 * -2"] {
            assert!(!matches(&RestateSubtraction, input), "{}", input);
        }
    }

    #[test]
    fn restating_twice_restores_text() {
        let once = apply_first(&RestateSubtraction, "4x - 3y");
        assert_eq!(apply_first(&RestateSubtraction, &once), "4x - 3y");
    }
}
