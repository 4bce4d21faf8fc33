//! Numerical evaluation of expression trees.

use alg_attrs::ErrorKind;
use alg_error::Error;
use std::collections::HashMap;
use super::{NodeId, NodeKind, Tree};

/// Values bound to variables during evaluation.
pub type Bindings = HashMap<char, f64>;

/// The variable has no value in the bindings used for evaluation.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not defined", self.name),
    labels = ["this variable"],
    help = format!("give `{}` a value before evaluating, such as `{}=2`", self.name, self.name),
)]
pub struct UnboundVariable {
    /// The name of the variable.
    pub name: char,
}

/// An operator node is missing one of its operands.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the {} node is missing an operand", self.kind),
    labels = ["this operator"],
    help = "this is a bug in the code that built the tree",
)]
pub struct MissingChild {
    /// The name of the node kind.
    pub kind: &'static str,
}

/// Both sides of an equation evaluated to different values.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the equation does not hold",
    labels = [format!("the left side is {}, but the right side is {}", self.left, self.right)],
)]
pub struct UnequalSides {
    /// The value of the left side.
    pub left: f64,

    /// The value of the right side.
    pub right: f64,
}

/// The tree has no root.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = "cannot evaluate an empty tree", labels = [""])]
pub struct EmptyTree;

/// Computes the factorial of the value after truncating it toward zero. Negative values have no
/// factorial.
fn factorial(value: f64) -> f64 {
    let n = value.trunc();
    if n.is_nan() || n < 0.0 {
        return f64::NAN;
    }
    if n > 170.0 {
        return f64::INFINITY;
    }
    (2..=n as u64).fold(1.0, |acc, k| acc * k as f64)
}

impl Tree {
    /// Returns the source spans of the node, for error reporting.
    fn spans_of(&self, id: NodeId) -> Vec<std::ops::Range<usize>> {
        self.node(id).span.iter().cloned().collect()
    }

    /// Returns the child of the node in the given slot, or a [`MissingChild`] error.
    fn operand(&self, id: NodeId, child: Option<NodeId>) -> Result<NodeId, Error> {
        child.ok_or_else(|| Error::new(self.spans_of(id), MissingChild { kind: self.kind(id).name() }))
    }

    /// Evaluates the whole tree with the given variable bindings.
    pub fn evaluate(&self, bindings: &Bindings) -> Result<f64, Error> {
        let root = self.root().ok_or_else(|| Error::new(Vec::new(), EmptyTree))?;
        self.evaluate_node(root, bindings)
    }

    /// Evaluates the whole tree with no variables bound.
    pub fn eval_default(&self) -> Result<f64, Error> {
        self.evaluate(&Bindings::new())
    }

    /// Evaluates the subtree under the given node.
    ///
    /// Division by exactly zero produces NaN rather than an error.
    pub fn evaluate_node(&self, id: NodeId, bindings: &Bindings) -> Result<f64, Error> {
        let node = self.node(id);
        match node.kind {
            NodeKind::Constant(value) => Ok(value),
            NodeKind::Variable(name) => bindings.get(&name)
                .copied()
                .ok_or_else(|| Error::new(self.spans_of(id), UnboundVariable { name })),
            NodeKind::Negate | NodeKind::Factorial | NodeKind::Function(_) => {
                let child = self.operand(id, node.child())?;
                let value = self.evaluate_node(child, bindings)?;
                Ok(match node.kind {
                    NodeKind::Negate => -value,
                    NodeKind::Factorial => factorial(value),
                    NodeKind::Function(func) => func.apply(value),
                    _ => value,
                })
            },
            NodeKind::Add
            | NodeKind::Subtract
            | NodeKind::Multiply
            | NodeKind::Divide
            | NodeKind::Power
            | NodeKind::Equal => {
                let left = self.operand(id, node.left())?;
                let right = self.operand(id, node.right())?;
                let left = self.evaluate_node(left, bindings)?;
                let right = self.evaluate_node(right, bindings)?;
                match node.kind {
                    NodeKind::Add => Ok(left + right),
                    NodeKind::Subtract => Ok(left - right),
                    NodeKind::Multiply => Ok(left * right),
                    NodeKind::Divide if right == 0.0 => Ok(f64::NAN),
                    NodeKind::Divide => Ok(left / right),
                    NodeKind::Power => Ok(left.powf(right)),
                    _ if left != right => Err(Error::new(
                        self.spans_of(id),
                        UnequalSides { left, right },
                    )),
                    _ => Ok(left),
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_relative_error_msg,
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use crate::parse;
    use crate::tree::Side;
    use super::*;

    fn eval(input: &str) -> f64 {
        parse(input).unwrap().eval_default().unwrap()
    }

    #[test]
    fn implicit_multiplication_binds_tighter_than_power() {
        let tree = parse("4x^2").unwrap();
        let bindings = Bindings::from([('x', 2.0)]);
        assert_float_relative_eq!(tree.evaluate(&bindings).unwrap(), 16.0);
    }

    #[test]
    fn factorials() {
        assert_float_relative_eq!(eval("5!"), 120.0);
        assert_float_relative_eq!(eval("0!"), 1.0);

        // the operand is truncated first
        assert_float_relative_eq!(eval("5.9!"), 120.0);
        assert!(eval("-3!").is_nan());
    }

    #[test]
    fn operator_precedence() {
        assert_float_relative_eq!(eval("9 / 8 * 9"), 10.125);
        assert_float_relative_eq!(eval("4 + 9 / 8 * 9"), 14.125);
        assert_float_relative_eq!(eval("2 - 3 - 4"), -5.0);
        assert_float_relative_eq!(eval("2^0.5"), std::f64::consts::SQRT_2);
    }

    #[test]
    fn divide_by_zero_is_nan() {
        assert!(eval("1/0").is_nan());
        assert!(eval("0/0").is_nan());
    }

    #[test]
    fn functions() {
        assert_float_relative_eq!(eval("sgn(-7)"), -1.0);
        assert_eq!(eval("sgn(0)"), 0.0);
        assert_float_relative_eq!(eval("abs(3 - 10)"), 7.0);
        assert_float_relative_eq!(eval("-(2 + 3)"), -5.0);
    }

    #[test]
    fn equations() {
        assert_float_relative_eq!(eval("2 + 2 = 4"), 4.0);

        let err = parse("2 + 2 = 5").unwrap().eval_default().unwrap_err();
        assert_eq!(err.downcast_ref::<UnequalSides>(), Some(&UnequalSides { left: 4.0, right: 5.0 }));
        assert_eq!(err.spans, vec![0..9]);
    }

    #[test]
    fn unbound_variable() {
        let err = parse("4x + y").unwrap()
            .evaluate(&Bindings::from([('x', 1.0)]))
            .unwrap_err();
        assert_eq!(err.downcast_ref::<UnboundVariable>(), Some(&UnboundVariable { name: 'y' }));
        assert_eq!(err.spans, vec![5..6]);
    }

    #[test]
    fn missing_child() {
        let mut tree = parse("1 + 2").unwrap();
        let root = tree.root().unwrap();
        tree.set_child(root, Side::Right, None);
        let err = tree.eval_default().unwrap_err();
        assert!(err.is::<MissingChild>());
    }

    #[test]
    fn empty_tree() {
        assert!(Tree::new().eval_default().unwrap_err().is::<EmptyTree>());
    }
}
