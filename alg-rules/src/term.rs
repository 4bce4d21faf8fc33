//! Recognition of algebraic terms such as `4x^2` inside expression trees.
//!
//! A [`Term`] is a coefficient multiplied by a variable raised to an exponent, where any of the
//! three parts may be absent. Only these shapes are recognized:
//!
//! - a constant, `4`
//! - a variable, `x`
//! - a variable raised to a constant power, `x^2`
//! - a constant multiplied by either of the previous two, `4x` or `4x^2`

use alg_parser::{tree::NodeKind, NodeId, Tree};

/// The parts of a term.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Term {
    /// The constant factor, such as the `4` in `4x^2`.
    pub coefficient: Option<f64>,

    /// The variable, such as the `x` in `4x^2`.
    pub variable: Option<char>,

    /// The constant exponent of the variable, such as the `2` in `4x^2`.
    pub exponent: Option<f64>,
}

impl Term {
    /// Returns the coefficient of the term, or 1 if it has none.
    pub fn coefficient_or_one(&self) -> f64 {
        self.coefficient.unwrap_or(1.0)
    }

    /// Returns true if both terms have the same variable and exponent. Two absent variables (or
    /// exponents) count as the same.
    pub fn is_like(&self, other: &Term) -> bool {
        self.variable == other.variable && self.exponent == other.exponent
    }
}

/// The common factor of two terms, and what remains of each term once it is factored out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommonFactor {
    /// The greatest common factor of the two coefficients.
    pub best: f64,

    /// The variable shared by both terms, if any.
    pub variable: Option<char>,

    /// The exponent shared by both terms, if they share a variable raised to the same power.
    pub exponent: Option<f64>,

    /// What remains of the left term.
    pub left: Term,

    /// What remains of the right term.
    pub right: Term,
}

impl CommonFactor {
    /// Returns the common factor as a term.
    pub fn term(&self) -> Term {
        Term {
            coefficient: Some(self.best),
            variable: self.variable,
            exponent: self.exponent,
        }
    }
}

/// Returns the variable and optional constant exponent of `x` or `x^2`.
fn variable_part(tree: &Tree, id: NodeId) -> Option<(char, Option<f64>)> {
    match tree.kind(id) {
        NodeKind::Variable(name) => Some((*name, None)),
        NodeKind::Power => {
            let name = tree.variable_name(tree.left(id)?)?;
            let exponent = tree.constant_value(tree.right(id)?)?;
            Some((name, Some(exponent)))
        },
        _ => None,
    }
}

/// Extracts the term under the given node, or [`None`] if the node is not a term.
pub fn extract_term(tree: &Tree, id: NodeId) -> Option<Term> {
    match tree.kind(id) {
        NodeKind::Constant(value) => Some(Term {
            coefficient: Some(*value),
            ..Term::default()
        }),
        NodeKind::Variable(_) | NodeKind::Power => {
            let (variable, exponent) = variable_part(tree, id)?;
            Some(Term { coefficient: None, variable: Some(variable), exponent })
        },
        NodeKind::Multiply => {
            let coefficient = tree.constant_value(tree.left(id)?)?;
            let (variable, exponent) = variable_part(tree, tree.right(id)?)?;
            Some(Term { coefficient: Some(coefficient), variable: Some(variable), exponent })
        },
        // `-x` and `-x^2`
        NodeKind::Negate => {
            let (variable, exponent) = variable_part(tree, tree.child(id)?)?;
            Some(Term { coefficient: Some(-1.0), variable: Some(variable), exponent })
        },
        _ => None,
    }
}

/// Returns true if both nodes are terms with the same variable and exponent.
pub fn terms_are_like(tree: &Tree, a: NodeId, b: NodeId) -> bool {
    match (extract_term(tree, a), extract_term(tree, b)) {
        (Some(a), Some(b)) => a.is_like(&b),
        _ => false,
    }
}

/// Returns the greatest common divisor of the two values if both are integers, and 1 otherwise.
fn gcd(a: f64, b: f64) -> f64 {
    if a.fract() != 0.0 || b.fract() != 0.0 || !a.is_finite() || !b.is_finite() {
        return 1.0;
    }

    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0.0 {
        (a, b) = (b, a % b);
    }

    if a == 0.0 {
        1.0
    } else {
        a
    }
}

/// Finds the common factor of the two terms: the greatest common divisor of their coefficients
/// (a missing coefficient counts as 1), along with their variable and exponent if both terms
/// share them.
///
/// Returns [`None`] if there is nothing to factor out, that is, if the common divisor is 1 and
/// the terms share no variable.
pub fn factor_common(left: &Term, right: &Term) -> Option<CommonFactor> {
    let (left_coefficient, right_coefficient) = (left.coefficient_or_one(), right.coefficient_or_one());
    let best = gcd(left_coefficient, right_coefficient);
    let shared = left.variable.is_some() && left.is_like(right);
    if best == 1.0 && !shared {
        return None;
    }

    let residual = |term: &Term, coefficient: f64| {
        if shared {
            Term { coefficient: Some(coefficient / best), variable: None, exponent: None }
        } else {
            Term { coefficient: Some(coefficient / best), ..*term }
        }
    };

    Some(CommonFactor {
        best,
        variable: if shared { left.variable } else { None },
        exponent: if shared { left.exponent } else { None },
        left: residual(left, left_coefficient),
        right: residual(right, right_coefficient),
    })
}

/// Builds the nodes of the given term and returns the unlinked root. A coefficient of 1 is left
/// out when the term has a variable, and a term with no parts at all is the constant 1.
pub fn make_term(tree: &mut Tree, term: &Term) -> NodeId {
    let Some(name) = term.variable else {
        return tree.constant(term.coefficient_or_one());
    };

    let variable = tree.variable(name);
    let base = match term.exponent {
        Some(exponent) => {
            let exponent = tree.constant(exponent);
            tree.binary(NodeKind::Power, variable, exponent)
        },
        None => variable,
    };

    match term.coefficient {
        Some(coefficient) if coefficient != 1.0 => {
            let coefficient = tree.constant(coefficient);
            tree.binary(NodeKind::Multiply, coefficient, base)
        },
        _ => base,
    }
}

/// Splits the expression under the given node into the operands of its addition, subtraction and
/// equality chain, left to right. Each operand is the largest subtree that is not one of those
/// operations. The operands are not necessarily terms.
pub fn get_terms(tree: &Tree, id: NodeId) -> Vec<NodeId> {
    fn collect(tree: &Tree, id: NodeId, out: &mut Vec<NodeId>) {
        match tree.kind(id) {
            NodeKind::Add | NodeKind::Subtract | NodeKind::Equal => {
                for child in tree.children(id) {
                    collect(tree, child, out);
                }
            },
            _ => out.push(id),
        }
    }

    let mut terms = Vec::new();
    collect(tree, id, &mut terms);
    terms
}

/// Splits a product such as `4x^2 * z^6 * y` into the terms being multiplied, left to right. A
/// constant followed by a variable with no coefficient is read as one term, so the example gives
/// `4x^2`, `z^6` and `y`. A leading negation is ignored.
///
/// Returns [`None`] if any factor of the product is not a term.
pub fn get_sub_terms(tree: &Tree, id: NodeId) -> Option<Vec<Term>> {
    fn flatten(tree: &Tree, id: NodeId, out: &mut Vec<Term>) -> Option<()> {
        if *tree.kind(id) == NodeKind::Multiply {
            flatten(tree, tree.left(id)?, out)?;
            return flatten(tree, tree.right(id)?, out);
        }
        out.push(extract_term(tree, id)?);
        Some(())
    }

    let id = match tree.kind(id) {
        NodeKind::Negate => tree.child(id)?,
        _ => id,
    };

    let mut factors = Vec::new();
    flatten(tree, id, &mut factors)?;

    let mut terms: Vec<Term> = Vec::with_capacity(factors.len());
    for factor in factors {
        match terms.last_mut() {
            Some(last) if last.variable.is_none() && factor.variable.is_some() && factor.coefficient.is_none() => {
                last.variable = factor.variable;
                last.exponent = factor.exponent;
            },
            _ => terms.push(factor),
        }
    }
    Some(terms)
}

/// Returns true if the expression under the given node is a product written in the preferred
/// form: terms of distinct variables, each coefficient leading its variable, like `4x^2 * y` or
/// `z * 4x`. A product with a bare constant factor, such as `z * 10`, is not preferred.
pub fn is_preferred_term_form(tree: &Tree, id: NodeId) -> bool {
    let Some(terms) = get_sub_terms(tree, id) else {
        return false;
    };

    if terms.len() > 1 && terms.iter().any(|term| term.variable.is_none()) {
        return false;
    }

    let mut seen = Vec::with_capacity(terms.len());
    for name in terms.iter().filter_map(|term| term.variable) {
        if seen.contains(&name) {
            return false;
        }
        seen.push(name);
    }
    true
}

/// Returns true if any two operands of the addition chain under the given node are like terms.
pub fn has_like_terms(tree: &Tree, id: NodeId) -> bool {
    let terms = get_terms(tree, id)
        .into_iter()
        .filter_map(|id| extract_term(tree, id))
        .collect::<Vec<_>>();

    terms.iter()
        .enumerate()
        .any(|(i, a)| terms[i + 1..].iter().any(|b| a.is_like(b)))
}

#[cfg(test)]
mod tests {
    use alg_parser::parse;
    use pretty_assertions::assert_eq;
    use super::*;

    fn term(input: &str) -> Option<Term> {
        let tree = parse(input).unwrap();
        extract_term(&tree, tree.root().unwrap())
    }

    fn sub_terms(input: &str) -> Option<Vec<Term>> {
        let tree = parse(input).unwrap();
        get_sub_terms(&tree, tree.root().unwrap())
    }

    fn like(a: &str, b: &str) -> bool {
        let tree = parse(&format!("{} + {}", a, b)).unwrap();
        let root = tree.root().unwrap();
        terms_are_like(&tree, tree.left(root).unwrap(), tree.right(root).unwrap())
    }

    #[test]
    fn extract() {
        assert_eq!(term("4"), Some(Term { coefficient: Some(4.0), variable: None, exponent: None }));
        assert_eq!(term("x"), Some(Term { coefficient: None, variable: Some('x'), exponent: None }));
        assert_eq!(term("x^2"), Some(Term { coefficient: None, variable: Some('x'), exponent: Some(2.0) }));
        assert_eq!(term("4x"), Some(Term { coefficient: Some(4.0), variable: Some('x'), exponent: None }));
        assert_eq!(term("4x^2"), Some(Term { coefficient: Some(4.0), variable: Some('x'), exponent: Some(2.0) }));
    }

    #[test]
    fn negated_terms() {
        assert_eq!(term("-y"), Some(Term { coefficient: Some(-1.0), variable: Some('y'), exponent: None }));
        assert_eq!(term("-x^3"), Some(Term { coefficient: Some(-1.0), variable: Some('x'), exponent: Some(3.0) }));
        assert_eq!(term("-2x^3"), Some(Term { coefficient: Some(-2.0), variable: Some('x'), exponent: Some(3.0) }));
        assert_eq!(term("-(x + 1)"), None);
        assert_eq!(term("-(2x)"), None);
    }

    #[test]
    fn not_terms() {
        for input in ["x * 4", "x^y", "4 + x", "2^3", "4x * y", "(x + 1)^2"] {
            assert_eq!(term(input), None, "{}", input);
        }
    }

    #[test]
    fn like_terms() {
        assert!(like("4x", "3x"));
        assert!(like("x^2", "10x^2"));
        assert!(like("4", "7"));
        assert!(!like("4x", "3y"));
        assert!(!like("x^2", "x"));
        assert!(!like("x", "x * y"));
    }

    #[test]
    fn common_factors() {
        let four_x = Term { coefficient: Some(4.0), variable: Some('x'), exponent: None };
        let six_x = Term { coefficient: Some(6.0), variable: Some('x'), exponent: None };
        let factor = factor_common(&four_x, &six_x).unwrap();
        assert_eq!(factor.best, 2.0);
        assert_eq!(factor.variable, Some('x'));
        assert_eq!(factor.left, Term { coefficient: Some(2.0), variable: None, exponent: None });
        assert_eq!(factor.right, Term { coefficient: Some(3.0), variable: None, exponent: None });
    }

    #[test]
    fn common_factor_without_shared_variable() {
        let a = Term { coefficient: Some(4.0), variable: Some('x'), exponent: None };
        let b = Term { coefficient: Some(8.0), variable: Some('y'), exponent: Some(2.0) };
        let factor = factor_common(&a, &b).unwrap();
        assert_eq!(factor.best, 4.0);
        assert_eq!(factor.variable, None);
        assert_eq!(factor.left, Term { coefficient: Some(1.0), variable: Some('x'), exponent: None });
        assert_eq!(factor.right, Term { coefficient: Some(2.0), variable: Some('y'), exponent: Some(2.0) });
    }

    #[test]
    fn nothing_to_factor() {
        let a = Term { coefficient: Some(4.0), variable: Some('x'), exponent: None };
        let b = Term { coefficient: Some(3.0), variable: Some('y'), exponent: None };
        assert_eq!(factor_common(&a, &b), None);

        let c = Term { coefficient: Some(0.5), variable: None, exponent: None };
        let d = Term { coefficient: Some(2.0), variable: None, exponent: None };
        assert_eq!(factor_common(&c, &d), None);

        // same variable, different powers
        let e = Term { coefficient: None, variable: Some('x'), exponent: Some(2.0) };
        let f = Term { coefficient: None, variable: Some('x'), exponent: None };
        assert_eq!(factor_common(&e, &f), None);
    }

    #[test]
    fn shared_variable_with_coprime_coefficients() {
        let a = Term { coefficient: Some(4.0), variable: Some('x'), exponent: None };
        let b = Term { coefficient: Some(3.0), variable: Some('x'), exponent: None };
        let factor = factor_common(&a, &b).unwrap();
        assert_eq!(factor.best, 1.0);
        assert_eq!(factor.term(), Term { coefficient: Some(1.0), variable: Some('x'), exponent: None });
    }

    #[test]
    fn built_terms() {
        let mut tree = Tree::new();
        let cases = [
            (Term { coefficient: Some(4.0), variable: Some('x'), exponent: Some(2.0) }, "4x^2"),
            (Term { coefficient: Some(1.0), variable: Some('x'), exponent: None }, "x"),
            (Term { coefficient: None, variable: Some('y'), exponent: Some(3.0) }, "y^3"),
            (Term { coefficient: Some(-2.0), variable: None, exponent: None }, "-2"),
            (Term::default(), "1"),
        ];
        for (term, expected) in cases {
            let id = make_term(&mut tree, &term);
            assert_eq!(tree.text(id), expected);
            assert_eq!(extract_term(&tree, id).map(|t| t.variable), Some(term.variable));
        }
    }

    #[test]
    fn terms_of_a_sum() {
        let tree = parse("4x^2 - 3y + (2 * x) = 7").unwrap();
        let terms = get_terms(&tree, tree.root().unwrap())
            .into_iter()
            .map(|id| tree.text(id))
            .collect::<Vec<_>>();
        assert_eq!(terms, ["4x^2", "3y", "2x", "7"]);
    }

    #[test]
    fn sub_term_counts() {
        let count = |input| sub_terms(input).map(|terms| terms.len());
        assert_eq!(count("-f"), Some(1));
        assert_eq!(count("70656 * (x^2 * z^6)"), Some(2));
        assert_eq!(count("4x^2 * z^6 * y"), Some(3));
        assert_eq!(count("2x^2"), Some(1));
        assert_eq!(count("x^2"), Some(1));
        assert_eq!(count("2"), Some(1));
        assert_eq!(count("4 + 4"), None);
        assert_eq!(count("x / 2"), None);
    }

    #[test]
    fn sub_terms_merge_coefficients() {
        assert_eq!(sub_terms("4x^2 * z^6 * y").unwrap(), vec![
            Term { coefficient: Some(4.0), variable: Some('x'), exponent: Some(2.0) },
            Term { coefficient: None, variable: Some('z'), exponent: Some(6.0) },
            Term { coefficient: None, variable: Some('y'), exponent: None },
        ]);
    }

    #[test]
    fn preferred_form() {
        let preferred = |input| {
            let tree = parse(input).unwrap();
            is_preferred_term_form(&tree, tree.root().unwrap())
        };
        let cases = [
            ("b * (44b^2)", false),
            ("z * (1274z^2)", false),
            ("4x * z", true),
            ("z * 4x", true),
            ("2x * x", false),
            ("29y", true),
            ("z", true),
            ("z * 10", false),
            ("4x^2", true),
            ("4x^2 * z^6 * y", true),
            ("x * y", true),
            ("7", true),
            ("x * 4", false),
            ("x * x", false),
            ("4x + 2", false),
        ];
        for (input, expected) in cases {
            assert_eq!(preferred(input), expected, "{}", input);
        }
    }

    #[test]
    fn like_terms_in_sum() {
        let has_like = |input| {
            let tree = parse(input).unwrap();
            has_like_terms(&tree, tree.root().unwrap())
        };
        assert!(has_like("4x - 3y + 3x"));
        assert!(has_like("x^2 + 2 + 4x^2"));
        assert!(!has_like("4x + 3y"));
        assert!(!has_like("4x"));
    }
}
