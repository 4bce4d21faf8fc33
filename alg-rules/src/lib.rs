//! Term analysis and value-preserving rewrite rules for [`alg_parser`] expression trees.
//!
//! A rule is found and applied in two steps: [`Rule::find_node`] searches the tree in inorder for
//! the first node the rule can be applied to, and [`Rule::apply_to`] rewrites the tree around that
//! node.
//!
//! ```
//! use alg_parser::parse;
//! use alg_rules::{Rule, rules::DistributiveMultiply};
//!
//! let mut tree = parse("4(x + 2)").unwrap();
//! let rule = DistributiveMultiply;
//! let node = rule.find_node(&tree).unwrap();
//! rule.apply_to(&mut tree, node);
//! assert_eq!(tree.to_string(), "4x + 4 * 2");
//! ```
//!
//! Rules change the tree they are given. Trees handed out by [`alg_parser::Parser`] are shared
//! with its cache, so clone them before applying rules.

pub mod config;
pub mod rule;
pub mod rules;
pub mod term;

pub use config::{config, RuleConfig};
pub use rule::{ChangeRecord, Rule};
pub use rules::{all_rules, find_rule};
pub use term::{CommonFactor, Term};
