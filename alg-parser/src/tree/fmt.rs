//! Canonical text rendering of expression trees.
//!
//! The rendered text uses as few parentheses as possible while keeping the order of operations of
//! the tree, so that parsing the text again gives an equivalent tree.

use std::fmt::{self, Display, Formatter};
use super::{NodeId, NodeKind, Side, Tree};

/// Formats a number the way it is written in expressions: integral values have no fractional
/// part, and negative zero is written as `0`.
pub fn fmt_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// Borrowed view of a subtree that implements [`Display`].
#[derive(Debug, Clone, Copy)]
pub struct NodeDisplay<'a> {
    tree: &'a Tree,
    id: NodeId,
}

impl Tree {
    /// Returns a value that renders the subtree under the given node.
    pub fn display(&self, id: NodeId) -> NodeDisplay<'_> {
        NodeDisplay { tree: self, id }
    }

    /// Renders the subtree under the given node as text.
    pub fn text(&self, id: NodeId) -> String {
        self.display(id).to_string()
    }

    /// Returns true if the node is a multiplication written by juxtaposition, such as `4x` or
    /// `4x^2`.
    pub fn is_implicit_mult(&self, id: NodeId) -> bool {
        if *self.kind(id) != NodeKind::Multiply {
            return false;
        }
        let (Some(left), Some(right)) = (self.left(id), self.right(id)) else {
            return false;
        };
        if self.constant_value(left).is_none() {
            return false;
        }
        match self.kind(right) {
            NodeKind::Variable(_) => true,
            NodeKind::Power => self.left(right)
                .is_some_and(|base| self.variable_name(base).is_some()),
            _ => false,
        }
    }

    /// Returns true if the binary node must be wrapped in parentheses to keep its place in the
    /// order of operations of its parent.
    pub fn self_parens(&self, id: NodeId) -> bool {
        let Some(parent) = self.parent(id) else {
            return false;
        };
        let parent_kind = self.kind(parent);
        let own_kind = self.kind(id);
        if !parent_kind.is_binary() || !own_kind.is_binary() {
            return false;
        }

        // `2^3^4` does not parse, so nested powers are always grouped
        if *parent_kind == NodeKind::Power && *own_kind == NodeKind::Power {
            return true;
        }

        let own = own_kind.priority();
        let theirs = parent_kind.priority();
        if theirs > own {
            return true;
        }
        if theirs != own || self.is_implicit_mult(id) {
            return false;
        }

        match self.side_of(parent, id) {
            // `2 * (x * y)` and `2 * (3 / 4)` keep their grouping, so the text parses back to the
            // same tree
            Some(Side::Right) => {
                (own_kind.is_add_sub() && parent_kind.is_add_sub())
                    || (own_kind.is_mult_div() && parent_kind.is_mult_div())
            },
            Some(Side::Left) => own_kind.is_mult_div() && parent_kind.is_mult_div(),
            None => false,
        }
    }

    /// Returns true if the operand of a negation must be grouped.
    fn negation_groups(&self, child: NodeId) -> bool {
        match self.kind(child) {
            NodeKind::Add | NodeKind::Subtract | NodeKind::Negate | NodeKind::Equal => true,
            NodeKind::Constant(value) => *value < 0.0,
            _ => self.absorbs_sign(child),
        }
    }

    /// Returns true if a `-` written directly before the subtree would be read as the sign of a
    /// constant that is then raised to a power or passed to a factorial, as in `-2^2`.
    fn absorbs_sign(&self, id: NodeId) -> bool {
        match self.kind(id) {
            NodeKind::Factorial => true,
            NodeKind::Power | NodeKind::Multiply | NodeKind::Divide => {
                let Some(left) = self.left(id) else {
                    return false;
                };
                match self.kind(left) {
                    NodeKind::Constant(_) => *self.kind(id) == NodeKind::Power,
                    _ => self.absorbs_sign(left),
                }
            },
            _ => false,
        }
    }

    fn write_node(&self, id: NodeId, f: &mut Formatter<'_>) -> fmt::Result {
        let node = self.node(id);
        match node.kind {
            NodeKind::Constant(value) => write!(f, "{}", fmt_number(value)),
            NodeKind::Variable(name) => write!(f, "{}", name),
            NodeKind::Negate => {
                let child = node.child().ok_or(fmt::Error)?;
                if self.negation_groups(child) {
                    write!(f, "-({})", self.display(child))
                } else {
                    write!(f, "-{}", self.display(child))
                }
            },
            NodeKind::Factorial => {
                let child = node.child().ok_or(fmt::Error)?;
                if self.kind(child).is_binary() {
                    write!(f, "({})!", self.display(child))
                } else {
                    write!(f, "{}!", self.display(child))
                }
            },
            NodeKind::Function(func) => {
                let child = node.child().ok_or(fmt::Error)?;
                write!(f, "{}({})", func.name(), self.display(child))
            },
            NodeKind::Add
            | NodeKind::Subtract
            | NodeKind::Multiply
            | NodeKind::Divide
            | NodeKind::Power
            | NodeKind::Equal => {
                let left = node.left().ok_or(fmt::Error)?;
                let right = node.right().ok_or(fmt::Error)?;
                let parens = self.self_parens(id);
                if parens {
                    write!(f, "(")?;
                }

                if self.is_implicit_mult(id) {
                    write!(f, "{}{}", self.display(left), self.display(right))?;
                } else if node.kind == NodeKind::Power {
                    if *self.kind(left) == NodeKind::Negate {
                        write!(f, "({})", self.display(left))?;
                    } else {
                        write!(f, "{}", self.display(left))?;
                    }
                    write!(f, "^{}", self.display(right))?;
                } else {
                    write!(
                        f,
                        "{} {} {}",
                        self.display(left),
                        node.kind.symbol(),
                        self.display(right),
                    )?;
                }

                if parens {
                    write!(f, ")")?;
                }
                Ok(())
            },
        }
    }
}

impl Display for NodeDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.tree.write_node(self.id, f)
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => self.write_node(root, f),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn round_trip(input: &str) -> String {
        parse(input).unwrap().to_string()
    }

    #[test]
    fn numbers() {
        assert_eq!(fmt_number(4.0), "4");
        assert_eq!(fmt_number(-0.0), "0");
        assert_eq!(fmt_number(0.5), "0.5");
        assert_eq!(fmt_number(-2.25), "-2.25");
        assert_eq!(fmt_number(1e-7), "0.0000001");
    }

    #[test]
    fn meaningful_parens_are_kept() {
        let cases = [
            ("(-2.257893300159429e+16h^2 * v) * j^4", "(-2.257893300159429e + 16h^2 * v) * j^4"),
            ("1f + 98i + 3f + 14t", "1f + 98i + 3f + 14t"),
            ("4x * p^(1 + 3) * 12x^2", "(4x * p^(1 + 3)) * 12x^2"),
            ("(5 * 3) * (32 / 7)", "(5 * 3) * (32 / 7)"),
            ("7 - 5 * 3 * (2^7)", "7 - (5 * 3) * 2^7"),
            ("(8x^2 * 9b) * 7", "(8x^2 * 9b) * 7"),
            ("(8 * 9b) * 7", "(8 * 9b) * 7"),
            ("7 - (5 * 3) * (32 / 7)", "7 - (5 * 3) * (32 / 7)"),
            ("7 - (5 - 3) * (32 - 7)", "7 - (5 - 3) * (32 - 7)"),
            ("(7 - (5 * 3)) * (32 - 7)", "(7 - 5 * 3) * (32 - 7)"),
        ];
        for (input, expected) in cases {
            assert_eq!(round_trip(input), expected);
        }
    }

    #[test]
    fn unary_nodes() {
        assert_eq!(round_trip("-x"), "-x");
        assert_eq!(round_trip("-(x + 2)"), "-(x + 2)");
        assert_eq!(round_trip("-(-3)"), "-(-3)");
        assert_eq!(round_trip("5!"), "5!");
        assert_eq!(round_trip("sgn(x - 2)"), "sgn(x - 2)");
        assert_eq!(round_trip("abs(-4)"), "abs(-4)");
        assert_eq!(round_trip("(-x)^2"), "(-x)^2");
        assert_eq!(round_trip("-(2^2)"), "-(2^2)");
        assert_eq!(round_trip("-(2x)"), "-2x");
    }

    #[test]
    fn equations_and_implicit_multiplication() {
        assert_eq!(round_trip("4x + 2 = 10"), "4x + 2 = 10");
        assert_eq!(round_trip("x^(2y)"), "x^(2y)");
        assert_eq!(round_trip("2 * x^(3^y)"), "2x^(3^y)");
        assert_eq!(round_trip("2x / 4"), "2x / 4");
        assert_eq!(round_trip("2 / (3 / 4)"), "2 / (3 / 4)");
        assert_eq!(round_trip("2 * (3 / 4)"), "2 * (3 / 4)");
        assert_eq!(round_trip("2xy"), "2 * (x * y)");
        assert_eq!(round_trip("2 * (3x * y)"), "2 * (3x * y)");
        assert_eq!(round_trip("2 * 3x"), "2 * 3x");
    }

    #[test]
    fn text_is_stable() {
        let inputs = [
            "4x^2 - 3y + 3x",
            "(8x^2 * 9b) * 7",
            "7 - (5 - 3) * (32 - 7)",
            "-(x + 2) * sgn(y)",
            "x - (y - z)",
            "2 / (3 / 4)",
            "3 = 4x - 2 + 1",
            "2xy^2",
            "2xy",
            "3(x)(y)",
            "a * (b * c)",
            "(5 * 3) * (32 / 7)",
            "x * (1 / 2)",
        ];
        for input in inputs {
            let once = round_trip(input);
            assert_eq!(round_trip(&once), once);
        }
    }

    #[test]
    fn text_keeps_value() {
        let inputs = ["7 - 5 * 3 * (2^7)", "2 / (3 / 4)", "10 - (4 - 1)", "-(2 + 3) * 4", "(2^3)^2"];
        for input in inputs {
            let before = parse(input).unwrap().eval_default().unwrap();
            let after = parse(&round_trip(input)).unwrap().eval_default().unwrap();
            assert_eq!(before, after);
        }
    }
}
