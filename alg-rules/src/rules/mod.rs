//! Implementation of the rewrite rules.
//!
//! Each rule classifies the tree around a node into one of the shapes it knows how to rewrite
//! (returning [`None`] if the node matches none of them), and [`Rule::apply`] rebuilds the tree
//! according to that shape.

pub mod associative_swap;
pub mod balanced_move;
pub mod commutative_swap;
pub mod constants_simplify;
pub mod distributive_factor_out;
pub mod distributive_multiply;
pub mod multiplicative_inverse;
pub mod restate_subtraction;
pub mod variable_multiply;

pub use associative_swap::AssociativeSwap;
pub use balanced_move::BalancedMove;
pub use commutative_swap::CommutativeSwap;
pub use constants_simplify::ConstantsSimplify;
pub use distributive_factor_out::DistributiveFactorOut;
pub use distributive_multiply::DistributiveMultiply;
pub use multiplicative_inverse::MultiplicativeInverse;
pub use restate_subtraction::RestateSubtraction;
pub use variable_multiply::VariableMultiply;

use crate::rule::Rule;

/// Returns every rule with its default options.
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(ConstantsSimplify),
        Box::new(CommutativeSwap::default()),
        Box::new(DistributiveMultiply),
        Box::new(DistributiveFactorOut::default()),
        Box::new(AssociativeSwap),
        Box::new(VariableMultiply),
        Box::new(RestateSubtraction),
        Box::new(MultiplicativeInverse),
        Box::new(BalancedMove),
    ]
}

/// Returns the rule with the given code, ignoring case.
pub fn find_rule(code: &str) -> Option<Box<dyn Rule>> {
    all_rules()
        .into_iter()
        .find(|rule| rule.code().eq_ignore_ascii_case(code))
}


#[cfg(test)]
mod tests {
    use alg_parser::parse;
    use pretty_assertions::assert_eq;
    use super::*;
    use super::test_util::*;

    #[test]
    fn codes_are_unique() {
        let mut codes = all_rules().iter().map(|rule| rule.code()).collect::<Vec<_>>();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), all_rules().len());
    }

    #[test]
    fn lookup_by_code() {
        assert_eq!(find_rule("cs").map(|rule| rule.name()), Some("Commutative Swap"));
        assert_eq!(find_rule("DF").map(|rule| rule.name()), Some("Distributive Factor Out"));
        assert!(find_rule("XYZ").is_none());
    }

    #[test]
    fn find_nodes_stamps_inorder_index() {
        let tree = parse("4x + 2 * 3").unwrap();
        let rule = CommutativeSwap::default();
        let found = rule.find_nodes(&tree);
        let texts = found.iter().map(|id| tree.text(*id)).collect::<Vec<_>>();
        assert_eq!(texts, ["4x", "4x + 2 * 3", "2 * 3"]);

        // 4, 4x, x, +, 2, *, 3
        let root = root(&tree);
        assert_eq!(tree.node(root).r_index.get(), Some(3));
        assert_eq!(found.first().and_then(|id| tree.node(*id).r_index.get()), Some(1));
    }

    #[test]
    fn find_node_is_first_inorder() {
        let tree = parse("4x + 2 * 3").unwrap();
        let rule = ConstantsSimplify;
        let found = rule.find_node(&tree).unwrap();
        assert_eq!(tree.text(found), "2 * 3");
    }

    #[test]
    fn scenario_restate_commute_factor() {
        // `4x - 3y + 3x` -> `4x + -3y + 3x`
        let mut tree = parse("4x - 3y + 3x").unwrap();
        let before = tree.clone();
        let restate = RestateSubtraction;
        let node = restate.find_node(&tree).unwrap();
        restate.apply_to(&mut tree, node);
        assert_eq!(tree.to_string(), "4x + -3y + 3x");

        // commute the outer addition, bringing the like terms together
        let swap = CommutativeSwap::default();
        let root = root(&tree);
        swap.apply_to(&mut tree, root);
        assert_eq!(tree.to_string(), "4x + 3x + -3y");

        let factor = DistributiveFactorOut::default();
        let node = factor.find_node(&tree).unwrap();
        factor.apply_to(&mut tree, node);
        assert_eq!(tree.to_string(), "(4 + 3) * x + -3y");
        assert_same_value(&before, &tree);
    }

    #[test]
    fn misuse_leaves_tree_unchanged() {
        if crate::config().debug {
            return;
        }

        let mut tree = parse("x + 2").unwrap();
        let before = tree.clone();
        let root = root(&tree);
        let change = MultiplicativeInverse.apply_to(&mut tree, root);
        assert_eq!(change.result, Some(root));
        assert!(!change.replaced());
        assert_eq!(tree, before);
    }
}
