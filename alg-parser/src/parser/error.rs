use alg_attrs::ErrorKind;
use alg_error::EXPR;
use ariadne::Fmt;

/// A character that is not part of the expression language was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid character `{}`", self.found),
    labels = ["this character"],
    help = "expressions may contain numbers, letters, `+ - * / ^ ! ( ) [ ] =` and whitespace",
)]
pub struct InvalidToken {
    /// The character that could not be tokenized.
    pub found: char,
}

/// A run of digits and periods could not be read as a number, such as `.` or `1.2.3`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("invalid number `{}`", self.text),
    labels = ["this number"],
    help = "a number may contain at most one decimal point and at least one digit",
)]
pub struct InvalidNumber {
    /// The text of the offending constant.
    pub text: String,
}

/// The input contained no tokens.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "empty expression",
    labels = [""],
    help = format!("type an {} to parse, such as `4x + 2`", "expression".fg(EXPR)),
)]
pub struct EmptyExpression;

/// The parser tried to advance past the end of the token stream.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of expression",
    labels = [format!("I expected to see more {} here", "expression".fg(EXPR))],
)]
pub struct OutOfTokens;

/// The tokens at this position do not match the grammar production being parsed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "invalid syntax",
    labels = [format!("{}", self.message)],
)]
pub struct InvalidSyntax {
    /// What the parser was looking for.
    pub message: String,
}

/// An operator was not followed by an operand, or a token appeared where the grammar can never
/// accept it.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("{}", self.message)],
)]
pub struct UnexpectedBehavior {
    /// Description of what went wrong.
    pub message: String,
}

/// The expression was complete, but tokens remained after it.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of expression",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
    help = "maybe you forgot an operator between two terms?",
)]
pub struct TrailingTokens {
    /// The text of every token after the expression, joined without the whitespace between them.
    pub leftover: String,
}
