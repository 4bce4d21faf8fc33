//! Tokenizer, parser and expression tree for textual algebra expressions such as `4x^2 + 2 = y`.
//!
//! ```
//! use alg_parser::{parse, tree::Bindings};
//!
//! let tree = parse("4x^2 + 2").unwrap();
//! assert_eq!(tree.to_string(), "4x^2 + 2");
//! assert_eq!(tree.evaluate(&Bindings::from([('x', 2.0)])).unwrap(), 18.0);
//! ```
//!
//! Repeated parsing of the same text can be cached with a [`Parser`], which hands out shared
//! trees:
//!
//! ```
//! use alg_parser::Parser;
//! use std::rc::Rc;
//!
//! let mut parser = Parser::new();
//! let a = parser.parse("x + 1").unwrap();
//! let b = parser.parse("x + 1").unwrap();
//! assert!(Rc::ptr_eq(&a, &b));
//! ```

pub mod parser;
pub mod tokenizer;
pub mod tree;

pub use parser::{parse, parse_tokens, Parser};
pub use tree::{NodeId, NodeKind, Side, Tree};
