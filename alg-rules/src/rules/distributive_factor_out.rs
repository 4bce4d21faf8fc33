//! Distributive property in reverse: `ab + ac = (b + c) * a`.
//!
//! The two terms may be the operands of the matched addition, or one level further into an
//! addition chain on either side, in which case the rest of the chain is kept around the
//! factored result. The common factor is written last so that a result like `(4 + 3) * x` can
//! later be read as a coefficient of `x`.

use alg_parser::{tree::NodeKind, NodeId, Tree};
use crate::{
    rule::{ChangeRecord, Rule},
    term::{extract_term, factor_common, make_term, Term},
};

/// Where the two terms sit relative to the matched addition, and the parts of the chain around
/// them that must be kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// `4x + 2x`
    Simple,

    /// `4x + (2x + rest)`
    ChainedRight { rest: NodeId },

    /// `4x + ((2x + middle) + last)`
    ChainedRightLeft { middle: NodeId, last: NodeId },

    /// `(first + 4x) + 2x`
    ChainedLeft { first: NodeId },

    /// `(first + (middle + 4x)) + 2x`
    ChainedLeftRight { first: NodeId, middle: NodeId },

    /// `(first + 4x) + (2x + last)`
    ChainedBoth { first: NodeId, last: NodeId },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Matched {
    shape: Shape,
    left: Term,
    right: Term,
}

/// Factors the common part out of two terms of a sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DistributiveFactorOut {
    /// If true, the common factor of two plain constants is factored out as well, such as
    /// `4 + 2 = (2 + 1) * 2`.
    pub constants: bool,
}

impl DistributiveFactorOut {
    /// Creates the rule, which also factors plain constants.
    pub fn with_constants() -> Self {
        Self { constants: true }
    }

    fn is_add(tree: &Tree, id: Option<NodeId>) -> Option<NodeId> {
        id.filter(|id| *tree.kind(*id) == NodeKind::Add)
    }

    /// Returns the term under the node if it has a variable.
    fn variable_term(tree: &Tree, id: Option<NodeId>) -> Option<Term> {
        id.and_then(|id| extract_term(tree, id))
            .filter(|term| term.variable.is_some())
    }

    fn classify(tree: &Tree, node: NodeId) -> Option<Matched> {
        if *tree.kind(node) != NodeKind::Add {
            return None;
        }
        let (left, right) = (tree.left(node)?, tree.right(node)?);
        let left_add = Self::is_add(tree, Some(left));
        let right_add = Self::is_add(tree, Some(right));

        match (extract_term(tree, left), extract_term(tree, right)) {
            (Some(l), Some(r)) => Some(Matched { shape: Shape::Simple, left: l, right: r }),
            (None, None) => {
                let (left_add, right_add) = (left_add?, right_add?);
                let r = Self::variable_term(tree, tree.left(right_add))?;
                let l = Self::variable_term(tree, tree.right(left_add))?;
                let shape = Shape::ChainedBoth {
                    first: tree.left(left_add)?,
                    last: tree.right(right_add)?,
                };
                Some(Matched { shape, left: l, right: r })
            },
            (Some(l), None) => {
                let right_add = right_add?;
                let near = tree.left(right_add)?;
                if let Some(r) = extract_term(tree, near) {
                    r.variable?;
                    let shape = Shape::ChainedRight { rest: tree.right(right_add)? };
                    return Some(Matched { shape, left: l, right: r });
                }

                let inner = Self::is_add(tree, Some(near))?;
                let r = Self::variable_term(tree, tree.left(inner))?;
                let shape = Shape::ChainedRightLeft {
                    middle: tree.right(inner)?,
                    last: tree.right(right_add)?,
                };
                Some(Matched { shape, left: l, right: r })
            },
            (None, Some(r)) => {
                let left_add = left_add?;
                let near = tree.right(left_add)?;
                if let Some(l) = extract_term(tree, near) {
                    l.variable?;
                    let shape = Shape::ChainedLeft { first: tree.left(left_add)? };
                    return Some(Matched { shape, left: l, right: r });
                }

                let inner = Self::is_add(tree, Some(near))?;
                let l = Self::variable_term(tree, tree.right(inner))?;
                let shape = Shape::ChainedLeftRight {
                    first: tree.left(left_add)?,
                    middle: tree.left(inner)?,
                };
                Some(Matched { shape, left: l, right: r })
            },
        }
    }
}

impl Rule for DistributiveFactorOut {
    fn name(&self) -> &'static str {
        "Distributive Factor Out"
    }

    fn code(&self) -> &'static str {
        "DF"
    }

    fn can_apply_to(&self, tree: &Tree, node: NodeId) -> bool {
        let Some(Matched { left, right, .. }) = Self::classify(tree, node) else {
            return false;
        };

        // `4 + 84`
        if !self.constants && left.variable.is_none() && right.variable.is_none() {
            return false;
        }
        factor_common(&left, &right).is_some()
    }

    fn apply(&self, tree: &mut Tree, node: NodeId) -> ChangeRecord {
        let Some(Matched { shape, left, right }) = Self::classify(tree, node) else {
            return ChangeRecord::unchanged(self.code(), node);
        };
        let Some(factor) = factor_common(&left, &right) else {
            return ChangeRecord::unchanged(self.code(), node);
        };
        let change = ChangeRecord::new(self.code(), node).save_parent(tree);

        let common = make_term(tree, &factor.term());
        let b = make_term(tree, &factor.left);
        let c = make_term(tree, &factor.right);
        let inside = tree.binary(NodeKind::Add, b, c);
        let factored = tree.binary(NodeKind::Multiply, inside, common);

        let result = match shape {
            Shape::Simple => factored,
            Shape::ChainedRight { rest } => tree.binary(NodeKind::Add, factored, rest),
            Shape::ChainedRightLeft { middle, last } => {
                let kept = tree.binary(NodeKind::Add, middle, last);
                tree.binary(NodeKind::Add, factored, kept)
            },
            Shape::ChainedLeft { first } => tree.binary(NodeKind::Add, first, factored),
            Shape::ChainedLeftRight { first, middle } => {
                let kept = tree.binary(NodeKind::Add, first, middle);
                tree.binary(NodeKind::Add, kept, factored)
            },
            Shape::ChainedBoth { first, last } => {
                let inner = tree.binary(NodeKind::Add, first, factored);
                tree.binary(NodeKind::Add, inner, last)
            },
        };

        change.done(tree, result)
    }
}
