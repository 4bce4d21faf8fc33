//! The closed set of node kinds that make up an expression tree.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A built-in function that can be called by name, such as `sgn(x)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Function {
    /// Absolute value, `abs(x)`.
    Abs,

    /// Sign of a value, `sgn(x)`: `-1` if negative, `1` if positive, `0` otherwise.
    Sgn,
}

impl Function {
    /// All registered functions.
    pub const ALL: [Function; 2] = [Function::Abs, Function::Sgn];

    /// Returns the function registered under the given name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|func| func.name() == name)
    }

    /// Returns the name the function is called by.
    pub fn name(self) -> &'static str {
        match self {
            Self::Abs => "abs",
            Self::Sgn => "sgn",
        }
    }

    /// Applies the function to a value.
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::Abs => value.abs(),
            Self::Sgn => {
                if value < 0.0 {
                    -1.0
                } else if value > 0.0 {
                    1.0
                } else {
                    0.0
                }
            },
        }
    }
}

/// Order-of-operations buckets used to decide where parentheses are needed when an expression is
/// written out as text. They play no role in evaluation.
///
/// The variants are listed from lowest to highest priority. Nodes without a bucket (such as
/// [`NodeKind::Equal`]) sort below all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    /// Addition and subtraction.
    AddSub,

    /// Multiplication and division.
    MultDiv,

    /// Exponentiation.
    Exponent,

    /// Reserved for explicit grouping. No node kind is assigned to it.
    Parens,

    /// Function calls.
    Function,
}

/// The kind of a node in an expression tree.
///
/// Leaf kinds carry their value. Unary kinds have a single child, which is stored in the right
/// slot of the node. Binary kinds have both a left and right child.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeKind {
    /// A numeric constant, such as `4` or `0.5`.
    Constant(f64),

    /// A single-letter variable, such as `x`.
    Variable(char),

    /// Negation of the child, `-x`.
    Negate,

    /// Factorial of the child, `x!`.
    Factorial,

    /// A function applied to the child, `sgn(x)`.
    Function(Function),

    /// `a + b`
    Add,

    /// `a - b`
    Subtract,

    /// `a * b`
    Multiply,

    /// `a / b`
    Divide,

    /// `a ^ b`
    Power,

    /// `a = b`
    Equal,
}

impl NodeKind {
    /// Returns true if nodes of this kind have no children.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Constant(_) | Self::Variable(_))
    }

    /// Returns true if nodes of this kind have exactly one child.
    pub fn is_unary(&self) -> bool {
        matches!(self, Self::Negate | Self::Factorial | Self::Function(_))
    }

    /// Returns true if nodes of this kind have two children.
    pub fn is_binary(&self) -> bool {
        matches!(
            self,
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide | Self::Power | Self::Equal
        )
    }

    /// Returns true for [`NodeKind::Add`] and [`NodeKind::Subtract`].
    pub fn is_add_sub(&self) -> bool {
        matches!(self, Self::Add | Self::Subtract)
    }

    /// Returns true for [`NodeKind::Multiply`] and [`NodeKind::Divide`].
    pub fn is_mult_div(&self) -> bool {
        matches!(self, Self::Multiply | Self::Divide)
    }

    /// Returns the value of a [`NodeKind::Constant`].
    pub fn as_constant(&self) -> Option<f64> {
        match self {
            Self::Constant(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the identifier of a [`NodeKind::Variable`].
    pub fn as_variable(&self) -> Option<char> {
        match self {
            Self::Variable(name) => Some(*name),
            _ => None,
        }
    }

    /// Returns the priority bucket of this kind, used to decide parenthesization.
    pub fn priority(&self) -> Option<Priority> {
        match self {
            Self::Add | Self::Subtract => Some(Priority::AddSub),
            Self::Multiply | Self::Divide => Some(Priority::MultDiv),
            Self::Power => Some(Priority::Exponent),
            Self::Function(_) => Some(Priority::Function),
            Self::Equal | Self::Constant(_) | Self::Variable(_) | Self::Negate | Self::Factorial => None,
        }
    }

    /// Returns the operator symbol of an operator kind.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Negate | Self::Subtract => "-",
            Self::Factorial => "!",
            Self::Function(func) => func.name(),
            Self::Add => "+",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Power => "^",
            Self::Equal => "=",
            Self::Constant(_) | Self::Variable(_) => "",
        }
    }

    /// Returns a short, human-readable name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Constant(_) => "constant",
            Self::Variable(_) => "variable",
            Self::Negate => "negate",
            Self::Factorial => "factorial",
            Self::Function(Function::Abs) => "abs",
            Self::Function(Function::Sgn) => "sgn",
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Power => "power",
            Self::Equal => "equal",
        }
    }

    /// Returns true if both kinds are the same variant, ignoring any value they carry.
    pub fn same_variant(&self, other: &NodeKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_order() {
        assert!(Priority::AddSub < Priority::MultDiv);
        assert!(Priority::MultDiv < Priority::Exponent);
        assert!(Priority::Exponent < Priority::Function);

        // equations have no bucket, which sorts below every bucket
        assert!(NodeKind::Equal.priority() < NodeKind::Add.priority());
    }

    #[test]
    fn functions_by_name() {
        assert_eq!(Function::from_name("sgn"), Some(Function::Sgn));
        assert_eq!(Function::from_name("abs"), Some(Function::Abs));
        assert_eq!(Function::from_name("sin"), None);
        assert_eq!(Function::Sgn.apply(-4.5), -1.0);
        assert_eq!(Function::Sgn.apply(0.0), 0.0);
        assert_eq!(Function::Abs.apply(-4.5), 4.5);
    }
}
