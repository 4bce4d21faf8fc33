//! The state kept between lines of the REPL, and the handling of each line.

use alg_error::Error;
use alg_parser::{
    tree::{eval::{UnboundVariable, UnequalSides}, Bindings},
    NodeId,
    NodeKind,
    Parser,
    Tree,
};
use alg_rules::{all_rules, find_rule, Rule};
use log::{debug, info};
use std::fmt::Write;
use crate::error::{InvalidArguments, NoExpression, NoMatch, UnknownCommand, UnknownRule};

const HELP: &str = "\
enter an expression to parse and evaluate it, such as `4(x + 2)`
x=2               give a variable a value
:vars             list the variable values
:rules            list the rules that apply to the current expression, and the nodes they apply to
:apply CODE [n]   apply a rule to node n of the current expression, or to the first node it applies to
:help             show this message";

/// State of an interactive session: the parser and its caches, the variable values, and the
/// current expression.
#[derive(Debug, Default)]
pub struct Session {
    parser: Parser,
    bindings: Bindings,

    /// The expression being worked on. It is a copy of the parsed tree, so rules can change it.
    current: Option<Tree>,
}

/// Reads `x=2` as a variable binding.
fn parse_binding(line: &str) -> Option<(char, f64)> {
    let (name, value) = line.split_once('=')?;
    let mut chars = name.trim().chars();
    let name = chars.next().filter(|c| c.is_ascii_alphabetic())?;
    if chars.next().is_some() {
        return None;
    }
    let value = value.trim().parse::<f64>().ok().filter(|value| value.is_finite())?;
    Some((name, value))
}

impl Session {
    /// Creates a session with no variable values and no current expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current expression, if any.
    pub fn current(&self) -> Option<&Tree> {
        self.current.as_ref()
    }

    /// Processes a single line of input, returning the text to print.
    ///
    /// The spans of a returned error always point into `line`.
    pub fn process(&mut self, line: &str) -> Result<String, Error> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        if let Some(command) = trimmed.strip_prefix(':') {
            let mut args = command.split_whitespace();
            return match args.next().unwrap_or_default() {
                "help" => Ok(HELP.to_string()),
                "vars" => Ok(self.vars()),
                "rules" => self.rules(),
                "apply" => self.apply(args.collect()),
                name => Err(Error::new(Vec::new(), UnknownCommand { name: name.to_string() })),
            };
        }

        if let Some((name, value)) = parse_binding(trimmed) {
            info!("binding `{}` to {}", name, value);
            self.bindings.insert(name, value);
            return Ok(String::new());
        }

        let tree = self.parser.parse(line)?;
        let current = self.current.insert((*tree).clone());
        let mut out = current.to_string();
        if let Some(value) = describe_value(current, &self.bindings)? {
            write!(out, "\n{}", value).ok();
        }
        Ok(out)
    }

    fn vars(&self) -> String {
        let mut vars = self.bindings.iter().collect::<Vec<_>>();
        vars.sort_by_key(|(name, _)| **name);
        vars.into_iter()
            .map(|(name, value)| format!("{} = {}", name, value))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Lists every rule that applies to the current expression, with the inorder index and text
    /// of each node it applies to.
    fn rules(&self) -> Result<String, Error> {
        let tree = self.current.as_ref().ok_or_else(|| Error::new(Vec::new(), NoExpression))?;
        let mut out = String::new();
        for rule in all_rules() {
            let nodes = rule.find_nodes(tree);
            if nodes.is_empty() {
                continue;
            }

            let positions = nodes.iter()
                .map(|&id| format!("{}: `{}`", index_of(tree, id), tree.text(id)))
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(out, "{:<3} {:<28} {}", rule.code(), rule.name(), positions).ok();
        }

        if out.is_empty() {
            out.push_str("no rules apply");
        }
        Ok(out.trim_end().to_string())
    }

    /// Applies a rule to the current expression.
    fn apply(&mut self, args: Vec<&str>) -> Result<String, Error> {
        let usage = || Error::new(Vec::new(), InvalidArguments { usage: ":apply CODE [index]" });
        let (code, index) = match args.as_slice() {
            [code] => (*code, None),
            [code, index] => (*code, Some(index.parse::<usize>().map_err(|_| usage())?)),
            _ => return Err(usage()),
        };
        let rule = find_rule(code)
            .ok_or_else(|| Error::new(Vec::new(), UnknownRule { code: code.to_string() }))?;

        let tree = self.current.as_mut().ok_or_else(|| Error::new(Vec::new(), NoExpression))?;
        let nodes = rule.find_nodes(tree);
        let node = match index {
            Some(index) => nodes.into_iter().find(|&id| index_of(tree, id) == index),
            None => nodes.into_iter().next(),
        }
        .ok_or_else(|| Error::new(Vec::new(), NoMatch { code: rule.code(), index }))?;

        let before = tree.text(node);
        let change = rule.apply_to(tree, node);
        debug!("{} changed node {:?} into {:?}", change.rule, change.node, change.result);

        let after = change.result
            .map(|result| tree.text(result))
            .unwrap_or_default();

        // handles from before the rewrite are not kept, so the unlinked nodes can go
        tree.compact();
        let mut out = format!("{}: `{}` => `{}`\n{}", rule.code(), before, after, tree);

        // spans of the rewritten tree point into the line it was parsed from
        let value = describe_value(tree, &self.bindings)
            .map_err(|mut err| {
                err.spans.clear();
                err
            })?;
        if let Some(value) = value {
            write!(out, "\n{}", value).ok();
        }
        Ok(out)
    }
}

/// Returns the inorder index stamped on the node by the last search.
fn index_of(tree: &Tree, id: NodeId) -> usize {
    tree.node(id).r_index.get().unwrap_or_default()
}

/// Describes the value of the tree, or whether the equation holds. Returns [`None`] if a variable
/// in the tree has no value.
fn describe_value(tree: &Tree, bindings: &Bindings) -> Result<Option<String>, Error> {
    let is_equation = tree.root().is_some_and(|root| *tree.kind(root) == NodeKind::Equal);
    match tree.evaluate(bindings) {
        Ok(value) if is_equation => Ok(Some(format!("holds, both sides are {}", value))),
        Ok(value) => Ok(Some(format!("= {}", value))),
        Err(err) if err.is::<UnboundVariable>() => Ok(None),
        Err(err) => match err.downcast_ref::<UnequalSides>() {
            Some(sides) => Ok(Some(format!("does not hold, {} != {}", sides.left, sides.right))),
            None => Err(err),
        },
    }
}
