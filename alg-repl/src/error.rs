use alg_attrs::ErrorKind;
use alg_error::{Error, EXPR};
use ariadne::{Fmt, Source};

/// The line started with `:`, but the rest is not a known command.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown command `:{}`", self.name),
    labels = [""],
    help = "type `:help` to see the available commands",
)]
pub struct UnknownCommand {
    /// The name of the command.
    pub name: String,
}

/// No rule has the given code.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("there is no rule with the code `{}`", self.code),
    labels = [""],
    help = "type `:rules` to list the rules that apply to the current expression",
)]
pub struct UnknownRule {
    /// The code that was given.
    pub code: String,
}

/// A command that works on the current expression was used before any expression was entered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "there is no current expression",
    labels = [""],
    help = format!("type an {} first, such as `4(x + 2)`", "expression".fg(EXPR)),
)]
pub struct NoExpression;

/// The rule cannot be applied anywhere in the current expression, or not at the requested node.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = match self.index {
        Some(index) => format!("`{}` cannot be applied at node {}", self.code, index),
        None => format!("`{}` cannot be applied to this expression", self.code),
    },
    labels = [""],
    help = "type `:rules` to list the rules that apply and where",
)]
pub struct NoMatch {
    /// The code of the rule.
    pub code: &'static str,

    /// The inorder index of the requested node.
    pub index: Option<usize>,
}

/// A command was given the wrong arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "invalid arguments",
    labels = [""],
    help = format!("usage: `{}`", self.usage),
)]
pub struct InvalidArguments {
    /// How the command is used.
    pub usage: &'static str,
}

/// Report the error to stderr.
///
/// The `ariadne` crate's [`Report`](ariadne::Report) type actually does not have a `Display`
/// implementation, so we can only use its `eprint` method to print to stderr.
pub fn report_to_stderr(err: &Error, input: &str) {
    if let Err(io_err) = err.build_report("input").eprint(("input", Source::from(input))) {
        eprintln!("{}: {}", err, io_err);
    }
}
