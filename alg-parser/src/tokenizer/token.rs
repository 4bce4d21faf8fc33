use logos::Logos;
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The raw lexemes recognized by the scanner, before alphabetic runs are split into functions and
/// single-letter variables.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
pub(crate) enum Lexeme {
    #[regex(r"[0-9.]+")]
    Number,

    #[regex(r"[a-zA-Z]+")]
    Alpha,

    #[token("+")]
    Plus,

    #[token("-")]
    #[token("\u{2013}")]
    Minus,

    #[token("*")]
    Multiply,

    #[token("/")]
    Divide,

    #[token("^")]
    Exponent,

    #[token("!")]
    Factorial,

    #[token("(")]
    #[token("[")]
    OpenParen,

    #[token(")")]
    #[token("]")]
    CloseParen,

    #[token("=")]
    Equal,

    #[regex(r"[ \t\r\n]")]
    Pad,
}

/// The different kinds of tokens that can be produced by the tokenizer.
///
/// Each kind is a distinct bit, so that sets of kinds can be represented as a bitmask (see
/// [`TokenSet`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u16)]
pub enum TokenKind {
    Constant = 1 << 0,
    Variable = 1 << 1,
    Plus = 1 << 2,
    Minus = 1 << 3,
    Multiply = 1 << 4,
    Divide = 1 << 5,
    Exponent = 1 << 6,
    Factorial = 1 << 7,
    OpenParen = 1 << 8,
    CloseParen = 1 << 9,
    Function = 1 << 10,
    Equal = 1 << 11,
    Pad = 1 << 12,
    Eof = 1 << 13,
    Invalid = 1 << 14,
}

impl TokenKind {
    /// Returns the bit flag of this token kind.
    pub const fn bit(self) -> u16 {
        self as u16
    }

    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(self) -> bool {
        self == TokenKind::Pad
    }

    /// Describes the token kind for use in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Constant => "a number",
            TokenKind::Variable => "a variable",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Multiply => "`*`",
            TokenKind::Divide => "`/`",
            TokenKind::Exponent => "`^`",
            TokenKind::Factorial => "`!`",
            TokenKind::OpenParen => "`(`",
            TokenKind::CloseParen => "`)`",
            TokenKind::Function => "a function name",
            TokenKind::Equal => "`=`",
            TokenKind::Pad => "whitespace",
            TokenKind::Eof => "the end of the expression",
            TokenKind::Invalid => "an invalid token",
        }
    }
}

/// A set of [`TokenKind`]s, stored as the union of their bit flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenSet(u16);

impl TokenSet {
    /// The empty set.
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Creates a set containing exactly the given kind.
    pub const fn of(kind: TokenKind) -> Self {
        TokenSet(kind.bit())
    }

    /// Returns a new set containing the members of this set plus the given kind.
    pub const fn with(self, kind: TokenKind) -> Self {
        TokenSet(self.0 | kind.bit())
    }

    /// Returns the union of both sets.
    pub const fn union(self, other: TokenSet) -> Self {
        TokenSet(self.0 | other.0)
    }

    /// Returns true if the given kind is part of this set.
    pub const fn contains(self, kind: TokenKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Returns the raw bitmask.
    pub const fn bits(self) -> u16 {
        self.0
    }
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The text of the token. For [`TokenKind::Eof`], this is empty.
    pub value: String,
}

impl Token {
    /// Creates a new token.
    pub fn new(kind: TokenKind, value: impl Into<String>, span: Range<usize>) -> Self {
        Self { span, kind, value: value.into() }
    }

    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(type={:?}, value=\"{}\")", self.kind, self.value)
    }
}
