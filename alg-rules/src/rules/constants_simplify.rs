//! Folds two constants joined by an operation into a single constant, as in `4 * 2 = 8`.
//!
//! Besides the operands of a single operation, the two constants may be further apart in a chain
//! of additions or multiplications, such as `5 * (8h * t) = 40h * t`.

use alg_parser::{
    tree::{Bindings, NodeKind},
    NodeId,
    Tree,
};
use crate::rule::{ChangeRecord, Rule};

/// The arrangement of the two constants around the matched node. Each variant holds the handles
/// the rewrite needs.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Shape {
    /// `-(3 + 2)`
    Negated { op: NodeKind },

    /// `4 * 2`
    Simple,

    /// `(4n) * 2`
    VariableMultiply { variable: NodeId },

    /// `5 * ((8 * h) * t)`, where all three operations are additions, or all multiplications.
    ChainedRightDeep { middle: NodeId, last: NodeId },

    /// `7 * (10 * y)`, where both operations are additions, or both multiplications.
    ChainedRight { rest: NodeId },

    /// `(7q) * (10y)`
    ChainedRightLeft { left: NodeId, right: NodeId },

    /// `(792z) * ((490f) * q)`
    ChainedRightLeftLeft { left: NodeId, middle: NodeId, last: NodeId },

    /// `(u * 36c) * (7u)`
    ChainedLeftLeftRight { first: NodeId, middle: NodeId, last: NodeId },
}

/// The result of a classification: the shape and the values of the two constants.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matched {
    shape: Shape,
    left: f64,
    right: f64,
}

impl Shape {
    /// Returns the operation that joins the two constants, given the kind of the matched node.
    fn op(self, kind: NodeKind) -> NodeKind {
        match self {
            Shape::Negated { op } => op,
            Shape::Simple | Shape::ChainedRightDeep { .. } | Shape::ChainedRight { .. } => kind,
            Shape::VariableMultiply { .. }
                | Shape::ChainedRightLeft { .. }
                | Shape::ChainedRightLeftLeft { .. }
                | Shape::ChainedLeftLeftRight { .. } => NodeKind::Multiply,
        }
    }
}

/// Folds adjacent constants into one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstantsSimplify;

/// Evaluates `left op right` with the tree evaluator.
fn fold(op: NodeKind, left: f64, right: f64) -> f64 {
    let mut scratch = Tree::new();
    let left = scratch.constant(left);
    let right = scratch.constant(right);
    let node = scratch.binary(op, left, right);
    scratch.evaluate_node(node, &Bindings::new()).unwrap_or(f64::NAN)
}

/// Returns true for the operations whose constant operands can be folded.
fn foldable(kind: &NodeKind) -> bool {
    kind.is_binary() && *kind != NodeKind::Equal
}

impl ConstantsSimplify {
    fn constant(tree: &Tree, id: Option<NodeId>) -> Option<f64> {
        id.and_then(|id| tree.constant_value(id))
    }

    fn is(tree: &Tree, id: Option<NodeId>, kind: NodeKind) -> bool {
        id.is_some_and(|id| *tree.kind(id) == kind)
    }

    /// Classifies the node and folds its two constants. A fold that overflows or divides by zero
    /// is refused, since its result has no text that parses back to a number.
    fn fold_at(tree: &Tree, node: NodeId) -> Option<(Shape, f64)> {
        let Matched { shape, left, right } = Self::classify(tree, node)?;
        let value = match shape {
            Shape::Negated { op } => -fold(op, left, right),
            _ => fold(shape.op(*tree.kind(node)), left, right),
        };
        value.is_finite().then_some((shape, value))
    }

    fn classify(tree: &Tree, node: NodeId) -> Option<Matched> {
        let kind = *tree.kind(node);
        let (left, right) = (tree.left(node), tree.right(node));

        if kind == NodeKind::Negate {
            let child = tree.child(node)?;
            if !foldable(tree.kind(child)) {
                return None;
            }
            let a = Self::constant(tree, tree.left(child))?;
            let b = Self::constant(tree, tree.right(child))?;
            let op = *tree.kind(child);
            return Some(Matched { shape: Shape::Negated { op }, left: a, right: b });
        }

        if !foldable(&kind) {
            return None;
        }

        if let (Some(a), Some(b)) = (Self::constant(tree, left), Self::constant(tree, right)) {
            return Some(Matched { shape: Shape::Simple, left: a, right: b });
        }

        let left = left?;
        let right = right?;
        let multiply = kind == NodeKind::Multiply;
        let chain = matches!(kind, NodeKind::Add | NodeKind::Multiply);

        // (4n) * 2
        if multiply && *tree.kind(left) == NodeKind::Multiply {
            if let (Some(a), Some(variable), Some(b)) = (
                Self::constant(tree, tree.left(left)),
                tree.right(left).filter(|id| tree.variable_name(*id).is_some()),
                tree.constant_value(right),
            ) {
                return Some(Matched { shape: Shape::VariableMultiply { variable }, left: a, right: b });
            }
        }

        if let Some(a) = tree.constant_value(left) {
            let right_left = tree.left(right);

            // 5 * ((8 * h) * t)
            if chain && *tree.kind(right) == kind && Self::is(tree, right_left, kind) {
                let inner = right_left?;
                if let (Some(b), Some(middle), Some(last)) = (
                    Self::constant(tree, tree.left(inner)),
                    tree.right(inner),
                    tree.right(right),
                ) {
                    return Some(Matched { shape: Shape::ChainedRightDeep { middle, last }, left: a, right: b });
                }
            }

            // 7 * (10 * y)
            if chain && *tree.kind(right) == kind {
                if let (Some(b), Some(rest)) = (Self::constant(tree, right_left), tree.right(right)) {
                    return Some(Matched { shape: Shape::ChainedRight { rest }, left: a, right: b });
                }
            }
        }

        if !multiply
            || *tree.kind(left) != NodeKind::Multiply
            || *tree.kind(right) != NodeKind::Multiply
        {
            return None;
        }

        // (7q) * (10y)
        if let (Some(a), Some(b), Some(x), Some(y)) = (
            Self::constant(tree, tree.left(left)),
            Self::constant(tree, tree.left(right)),
            tree.right(left),
            tree.right(right),
        ) {
            return Some(Matched { shape: Shape::ChainedRightLeft { left: x, right: y }, left: a, right: b });
        }

        // (792z) * ((490f) * q)
        if let Some(a) = Self::constant(tree, tree.left(left)) {
            let inner = tree.left(right).filter(|id| *tree.kind(*id) == NodeKind::Multiply);
            if let Some(inner) = inner {
                if let (Some(b), Some(x), Some(middle), Some(last)) = (
                    Self::constant(tree, tree.left(inner)),
                    tree.right(left),
                    tree.right(inner),
                    tree.right(right),
                ) {
                    return Some(Matched {
                        shape: Shape::ChainedRightLeftLeft { left: x, middle, last },
                        left: a,
                        right: b,
                    });
                }
            }
        }

        // (u * 36c) * (7u)
        let inner = tree.right(left).filter(|id| *tree.kind(*id) == NodeKind::Multiply)?;
        let a = Self::constant(tree, tree.left(inner))?;
        let b = Self::constant(tree, tree.left(right))?;
        Some(Matched {
            shape: Shape::ChainedLeftLeftRight {
                first: tree.left(left)?,
                middle: tree.right(inner)?,
                last: tree.right(right)?,
            },
            left: a,
            right: b,
        })
    }
}

impl Rule for ConstantsSimplify {
    fn name(&self) -> &'static str {
        "Constants Simplify"
    }

    fn code(&self) -> &'static str {
        "CA"
    }

    fn can_apply_to(&self, tree: &Tree, node: NodeId) -> bool {
        Self::fold_at(tree, node).is_some()
    }

    fn apply(&self, tree: &mut Tree, node: NodeId) -> ChangeRecord {
        let Some((shape, value)) = Self::fold_at(tree, node) else {
            return ChangeRecord::unchanged(self.code(), node);
        };
        let change = ChangeRecord::new(self.code(), node).save_parent(tree);

        let kind = *tree.kind(node);
        let value = tree.constant(value);
        let result = match shape {
            Shape::Negated { .. } | Shape::Simple => value,
            Shape::VariableMultiply { variable } => tree.binary(NodeKind::Multiply, value, variable),
            Shape::ChainedRightDeep { middle, last } => {
                let inner = tree.binary(kind, value, middle);
                tree.binary(kind, inner, last)
            },
            Shape::ChainedRight { rest } => tree.binary(kind, value, rest),
            Shape::ChainedRightLeft { left: x, right: y } => {
                let inner = tree.binary(NodeKind::Multiply, value, x);
                tree.binary(NodeKind::Multiply, inner, y)
            },
            Shape::ChainedRightLeftLeft { left: x, middle, last } => {
                let first = tree.binary(NodeKind::Multiply, value, x);
                let rest = tree.binary(NodeKind::Multiply, middle, last);
                tree.binary(NodeKind::Multiply, first, rest)
            },
            Shape::ChainedLeftLeftRight { first, middle, last } => {
                let inner = tree.binary(NodeKind::Multiply, value, middle);
                let rest = tree.binary(NodeKind::Multiply, inner, last);
                tree.binary(NodeKind::Multiply, first, rest)
            },
        };

        change.done(tree, result)
    }
}
