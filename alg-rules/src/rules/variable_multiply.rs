//! Combines repeated variable factors into a power: `x^b * x^d = x^(b + d)`.
//!
//! A bare variable counts as a power of 1. The exponents are added, not folded, so `x * x` gives
//! `x^(1 + 1)`.

use alg_parser::{tree::NodeKind, NodeId, Tree};
use crate::rule::{ChangeRecord, Rule};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// `x^b * x^d`
    Simple,

    /// `(rest * x^b) * x^d`
    Chained { rest: NodeId },
}

/// A variable raised to a constant power.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Factor {
    name: char,
    exponent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Matched {
    shape: Shape,
    left: Factor,
    right: Factor,
}

/// Multiplies powers of the same variable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VariableMultiply;

impl VariableMultiply {
    /// Reads `x` or `x^2`.
    fn factor(tree: &Tree, id: NodeId) -> Option<Factor> {
        match tree.kind(id) {
            NodeKind::Variable(name) => Some(Factor { name: *name, exponent: 1.0 }),
            NodeKind::Power => Some(Factor {
                name: tree.variable_name(tree.left(id)?)?,
                exponent: tree.constant_value(tree.right(id)?)?,
            }),
            _ => None,
        }
    }

    fn classify(tree: &Tree, node: NodeId) -> Option<Matched> {
        if *tree.kind(node) != NodeKind::Multiply {
            return None;
        }
        let (left, right) = (tree.left(node)?, tree.right(node)?);
        let right_factor = Self::factor(tree, right)?;

        if let Some(left_factor) = Self::factor(tree, left) {
            return (left_factor.name == right_factor.name).then_some(Matched {
                shape: Shape::Simple,
                left: left_factor,
                right: right_factor,
            });
        }

        if *tree.kind(left) != NodeKind::Multiply {
            return None;
        }
        let left_factor = Self::factor(tree, tree.right(left)?)?;
        (left_factor.name == right_factor.name).then_some(Matched {
            shape: Shape::Chained { rest: tree.left(left)? },
            left: left_factor,
            right: right_factor,
        })
    }
}

impl Rule for VariableMultiply {
    fn name(&self) -> &'static str {
        "Variable Multiply"
    }

    fn code(&self) -> &'static str {
        "VM"
    }

    fn can_apply_to(&self, tree: &Tree, node: NodeId) -> bool {
        Self::classify(tree, node).is_some()
    }

    fn apply(&self, tree: &mut Tree, node: NodeId) -> ChangeRecord {
        let Some(Matched { shape, left, right }) = Self::classify(tree, node) else {
            return ChangeRecord::unchanged(self.code(), node);
        };
        let change = ChangeRecord::new(self.code(), node).save_parent(tree);

        let variable = tree.variable(left.name);
        let b = tree.constant(left.exponent);
        let d = tree.constant(right.exponent);
        let exponent = tree.binary(NodeKind::Add, b, d);
        let power = tree.binary(NodeKind::Power, variable, exponent);

        let result = match shape {
            Shape::Simple => power,
            Shape::Chained { rest } => tree.binary(NodeKind::Multiply, rest, power),
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
    fn simple_products() {
        assert_eq!(apply_first(&VariableMultiply, "x * x"), "x^(1 + 1)");
        assert_eq!(apply_first(&VariableMultiply, "x^2 * x^3"), "x^(2 + 3)");
        assert_eq!(apply_first(&VariableMultiply, "y * y^4 + 1"), "y^(1 + 4) + 1");
    }

    #[test]
    fn chained_products() {
        assert_eq!(apply_first(&VariableMultiply, "4x * x"), "4x^(1 + 1)");
        assert_eq!(apply_first(&VariableMultiply, "(z * y^2) * y"), "z * y^(2 + 1)");
    }

    #[test]
    fn different_variables() {
        assert!(!matches(&VariableMultiply, "x * y"));
        assert!(!matches(&VariableMultiply, "x^y * x"));
        assert!(!matches(&VariableMultiply, "x + x"));
    }
}
