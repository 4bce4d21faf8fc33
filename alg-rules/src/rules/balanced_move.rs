//! Moves a term across an equation by applying the same operation to both sides.
//!
//! - A term added on one side is subtracted from both: `x + 2 = 15` becomes `x = 15 - 2`.
//! - A constant coefficient divides both sides: `4x = 52` becomes `4x / 4 = 52 / 4`. This is only
//!   done when the side has no additions left, since dividing just one of the added terms would
//!   not be a move.
//!
//! The rule only applies to trees whose root is an equation. It rewrites a copy of the whole
//! equation, which then becomes the root of the tree.

use alg_parser::{tree::NodeKind, NodeId, Side, Tree};
use crate::{
    rule::{ChangeRecord, Rule},
    term::extract_term,
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Shape {
    /// Divide both sides by the constant.
    Divide { value: f64 },

    /// Remove the term from its addition and subtract it from the other side.
    Subtract { sum: NodeId },
}

/// Balances an equation by moving a term to the other side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BalancedMove;

impl BalancedMove {
    /// Returns true if every operation between the addition and the root adds the addition's
    /// value to its side, rather than subtracting it or scaling it.
    fn additive_path(tree: &Tree, sum: NodeId, root: NodeId) -> bool {
        let mut child = sum;
        while let Some(up) = tree.parent(child) {
            if up == root {
                return true;
            }
            match tree.kind(up) {
                NodeKind::Add => (),
                NodeKind::Subtract if tree.side_of(up, child) == Some(Side::Left) => (),
                _ => return false,
            }
            child = up;
        }
        false
    }

    /// Returns the node at the same position under `copy` as `node` is under its topmost node.
    fn counterpart(tree: &Tree, copy: NodeId, node: NodeId) -> Option<NodeId> {
        let path = tree.path_to_root(node);
        path.windows(2)
            .rev()
            .try_fold(copy, |at, pair| tree.get(at, tree.side_of(pair[1], pair[0])?))
    }

    fn classify(tree: &Tree, root: NodeId, node: NodeId) -> Option<Shape> {
        if *tree.kind(root) != NodeKind::Equal || tree.root_of(node) != root {
            return None;
        }
        let parent = tree.parent(node)?;
        if parent == root {
            return None;
        }

        match tree.kind(parent) {
            NodeKind::Add => {
                extract_term(tree, node)?;
                Self::additive_path(tree, parent, root).then_some(Shape::Subtract { sum: parent })
            },
            NodeKind::Multiply => {
                let value = tree.constant_value(node).filter(|value| *value != 0.0)?;
                let side = tree.get(root, tree.root_side(node)?)?;
                (!tree.contains_kind(side, &NodeKind::Add)).then_some(Shape::Divide { value })
            },
            _ => None,
        }
    }
}

impl Rule for BalancedMove {
    fn name(&self) -> &'static str {
        "Balanced Move"
    }

    fn code(&self) -> &'static str {
        "BM"
    }

    fn can_apply_to(&self, tree: &Tree, node: NodeId) -> bool {
        tree.root().is_some_and(|root| Self::classify(tree, root, node).is_some())
    }

    fn apply(&self, tree: &mut Tree, node: NodeId) -> ChangeRecord {
        if !self.can_apply_to(tree, node) {
            return ChangeRecord::unchanged(self.code(), node);
        }
        let change = ChangeRecord::new(self.code(), node);

        let Some(original) = tree.root() else {
            return ChangeRecord::unchanged(self.code(), node);
        };
        let root = tree.copy_subtree(original);
        let Some(moved) = Self::counterpart(tree, root, node) else {
            return ChangeRecord::unchanged(self.code(), node);
        };
        let (Some(shape), Some(node_side)) = (
            Self::classify(tree, root, moved),
            tree.root_side(moved),
        ) else {
            return ChangeRecord::unchanged(self.code(), node);
        };

        match shape {
            Shape::Divide { value } => {
                for side in [Side::Left, Side::Right] {
                    let Some(operand) = tree.get(root, side) else {
                        continue;
                    };
                    let divisor = tree.constant(value);
                    let divided = tree.binary(NodeKind::Divide, operand, divisor);
                    tree.set_child(root, side, Some(divided));
                }
            },
            Shape::Subtract { sum } => {
                let other_side = node_side.opposite();
                if let (Some(sibling), Some(other)) = (tree.sibling(moved), tree.get(root, other_side)) {
                    tree.replace(sum, sibling);
                    let difference = tree.binary(NodeKind::Subtract, other, moved);
                    tree.set_child(root, other_side, Some(difference));
                }
            },
        }

        tree.set_root(root);
        change.done(tree, root)
    }
}

#[cfg(test)]
mod tests {
    use alg_parser::parse;
    use pretty_assertions::assert_eq;
    use crate::rules::test_util::*;
    use super::*;

    /// Applies the rule to the picked node, and checks that the equation still holds under the
    /// test bindings.
    fn move_at(input: &str, pick: impl Fn(&Tree) -> NodeId) -> String {
        let mut tree = parse(input).unwrap();
        tree.evaluate(&bindings()).unwrap();

        let node = pick(&tree);
        assert!(BalancedMove.can_apply_to(&tree, node));
        let change = BalancedMove.apply_to(&mut tree, node);
        assert_eq!(change.result, tree.root());
        tree.evaluate(&bindings()).unwrap();
        tree.to_string()
    }

    fn first_match(tree: &Tree) -> NodeId {
        BalancedMove.find_node(tree).unwrap()
    }

    #[test]
    fn subtract_added_term() {
        // x = 13
        let right_of_sum = |tree: &Tree| tree.right(tree.left(root(tree)).unwrap()).unwrap();
        assert_eq!(move_at("x + 2 = 15", right_of_sum), "x = 15 - 2");
        assert_eq!(move_at("x + 2 = 15", first_match), "2 = 15 - x");
        assert_eq!(move_at("4x + 1 = 53", first_match), "1 = 53 - 4x");
    }

    #[test]
    fn move_from_right_side() {
        let right_of_sum = |tree: &Tree| tree.right(tree.right(root(tree)).unwrap()).unwrap();
        assert_eq!(move_at("15 = 2 + x", right_of_sum), "15 - x = 2");
    }

    #[test]
    fn subtraction_on_the_left_keeps_sign() {
        // y = 13.5
        let pick = |tree: &Tree| {
            let difference = tree.left(root(tree)).unwrap();
            let sum = tree.left(difference).unwrap();
            tree.right(sum).unwrap()
        };
        assert_eq!(move_at("(x + 2) - y = 1.5", pick), "x - y = 1.5 - 2");
    }

    #[test]
    fn divide_by_coefficient() {
        assert_eq!(move_at("4x = 52", first_match), "4x / 4 = 52 / 4");
    }

    #[test]
    fn moves_a_copy() {
        let mut tree = parse("x + 2 = 15").unwrap();
        let old_root = root(&tree);
        let two = tree.right(tree.left(old_root).unwrap()).unwrap();

        let change = BalancedMove.apply_to(&mut tree, two);
        assert_eq!(change.node, two);
        assert_ne!(tree.root(), Some(old_root));
        assert_eq!(tree.text(old_root), "x + 2 = 15");
        assert_eq!(tree.to_string(), "x = 15 - 2");
    }

    #[test]
    fn refused_moves() {
        // the coefficient cannot be divided out while `+ 1` remains
        let tree = parse("4x + 1 = 53").unwrap();
        let four = tree.left(tree.left(root(&tree)).unwrap()).unwrap();
        assert!(!BalancedMove.can_apply_to(&tree, four));

        // the sum is subtracted, so its terms cannot be moved by subtraction
        assert!(!matches(&BalancedMove, "y - (x + 2) = 5"));

        // not an equation
        assert!(!matches(&BalancedMove, "x + 2"));

        // no coefficient of zero
        assert!(!matches(&BalancedMove, "0x = 0"));
    }
}
