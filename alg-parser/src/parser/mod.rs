//! Recursive-descent parser that turns a stream of [`Token`]s into an expression [`Tree`].
//!
//! The grammar, starting from `EqualExp`:
//!
//! ```text
//! Function   = functionName "(" AddExp ")"
//! Factor     = { Variable | Function | "(" AddExp ")" }+ { "^" UnaryExp }?
//! FactorPfx  = Constant { Factor | "!" }? | Factor
//! UnaryExp   = "-"? FactorPfx
//! ExpExp     = UnaryExp { "^" UnaryExp }?
//! MultExp    = ExpExp { ("*" | "/") ExpExp }*
//! AddExp     = MultExp { ("+" | "-") MultExp }*
//! EqualExp   = AddExp { "=" AddExp }*
//! ```
//!
//! Each production is chosen by checking the current token against the FIRST-set of the
//! production, the set of token kinds that can start it.

pub mod error;

use alg_error::{Error, ErrorKind};
use crate::tokenizer::{parse_number, Token, TokenKind, TokenSet, Tokenizer};
use crate::tree::{Function, NodeId, NodeKind, Tree};
use error::{
    EmptyExpression,
    InvalidNumber,
    InvalidSyntax,
    OutOfTokens,
    TrailingTokens,
    UnexpectedBehavior,
};
use log::{debug, trace};
use std::{collections::HashMap, ops::Range, rc::Rc};

const FIRST_FUNCTION: TokenSet = TokenSet::of(TokenKind::Function);
const FIRST_FACTOR: TokenSet = FIRST_FUNCTION
    .with(TokenKind::Variable)
    .with(TokenKind::OpenParen)
    .with(TokenKind::Factorial);
const FIRST_FACTOR_PREFIX: TokenSet = FIRST_FACTOR.with(TokenKind::Constant);
const FIRST_UNARY: TokenSet = FIRST_FACTOR_PREFIX.with(TokenKind::Minus);
const FIRST_EXP: TokenSet = FIRST_UNARY;
const FIRST_MULT: TokenSet = FIRST_UNARY;
const FIRST_ADD: TokenSet = FIRST_UNARY;

const IS_ADD: TokenSet = TokenSet::of(TokenKind::Plus).with(TokenKind::Minus);
const IS_MULT: TokenSet = TokenSet::of(TokenKind::Multiply).with(TokenKind::Divide);
const IS_EXP: TokenSet = TokenSet::of(TokenKind::Exponent);
const IS_EQUAL: TokenSet = TokenSet::of(TokenKind::Equal);

/// Position of the parser within a token stream, together with the tree being built.
struct TokenStream<'a> {
    /// The tokens being parsed, without whitespace.
    tokens: Vec<&'a Token>,

    /// The index of the current token.
    cursor: usize,

    /// The tree being built.
    tree: Tree,
}

impl<'a> TokenStream<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens: tokens.iter().filter(|token| !token.is_whitespace()).collect(),
            cursor: 0,
            tree: Tree::new(),
        }
    }

    /// Returns a span pointing at the end of the source code.
    fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the current token, or [`None`] if the stream has no explicit end-of-file token
    /// and the cursor ran past the last one.
    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.cursor).copied()
    }

    /// Returns the kind of the current token.
    fn kind(&self) -> TokenKind {
        self.current().map_or(TokenKind::Eof, |token| token.kind)
    }

    /// Returns the span of the current token.
    fn span(&self) -> Range<usize> {
        self.current().map_or_else(|| self.eof_span(), |token| token.span.clone())
    }

    /// Creates an error that points at the current token.
    fn error(&self, kind: impl ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    fn invalid_syntax(&self, message: impl Into<String>) -> Error {
        self.error(InvalidSyntax { message: message.into() })
    }

    fn unexpected(&self, message: impl Into<String>) -> Error {
        self.error(UnexpectedBehavior { message: message.into() })
    }

    /// Returns true if the current token is a member of the set.
    fn check(&self, set: TokenSet) -> bool {
        set.contains(self.kind())
    }

    /// Like [`TokenStream::check`], but fails with [`InvalidSyntax`] if the current token is not a
    /// member of the set.
    fn expect(&self, set: TokenSet) -> Result<(), Error> {
        if self.check(set) {
            Ok(())
        } else {
            Err(self.invalid_syntax("I expected to see an expression here"))
        }
    }

    /// Moves to the next token. Returns true if there are tokens left before the end of the
    /// stream.
    fn next(&mut self) -> Result<bool, Error> {
        if self.kind() == TokenKind::Eof {
            return Err(self.error(OutOfTokens));
        }
        self.cursor += 1;
        Ok(self.kind() != TokenKind::Eof)
    }

    /// Consumes the current token if it has the given kind, or fails with [`InvalidSyntax`].
    fn eat(&mut self, kind: TokenKind) -> Result<(), Error> {
        if self.kind() != kind {
            return Err(self.invalid_syntax(format!("I expected to see {} here", kind.describe())));
        }
        self.next()?;
        Ok(())
    }

    /// Returns the span of the node, or an empty span if it has none.
    fn span_of(&self, id: NodeId) -> Range<usize> {
        self.tree.node(id).span.clone().unwrap_or(0..0)
    }

    /// Builds a binary node spanning both operands.
    fn join(&mut self, kind: NodeKind, left: NodeId, right: NodeId) -> NodeId {
        let span = self.span_of(left).start..self.span_of(right).end;
        let id = self.tree.binary(kind, left, right);
        self.tree.node_mut(id).span = Some(span);
        id
    }

    /// Builds a unary node with the given span.
    fn wrap(&mut self, kind: NodeKind, child: NodeId, span: Range<usize>) -> NodeId {
        let id = self.tree.unary(kind, child);
        self.tree.node_mut(id).span = Some(span);
        id
    }

    /// Builds a leaf node with the given span.
    fn leaf(&mut self, kind: NodeKind, span: Range<usize>) -> NodeId {
        let id = self.tree.add(kind);
        self.tree.node_mut(id).span = Some(span);
        id
    }

    /// Parses a complete expression, failing if any tokens are left over.
    fn parse(mut self) -> Result<Tree, Error> {
        if self.kind() == TokenKind::Eof {
            return Err(self.error(EmptyExpression));
        }

        let root = self.parse_equal()?;

        if self.kind() != TokenKind::Eof {
            let start = self.span().start;
            let mut leftover = String::new();
            while let Some(token) = self.current().filter(|token| token.kind != TokenKind::Eof) {
                leftover.push_str(&token.value);
                self.cursor += 1;
            }
            let end = self.tokens[..self.cursor].last().map_or(start, |token| token.span.end);
            return Err(Error::new(vec![start..end], TrailingTokens { leftover }));
        }

        self.tree.set_root(root);
        Ok(self.tree)
    }

    fn parse_equal(&mut self) -> Result<NodeId, Error> {
        self.expect(FIRST_ADD)?;
        let mut exp = self.parse_add()?;

        while self.check(IS_EQUAL) {
            self.eat(TokenKind::Equal)?;
            if !self.check(FIRST_ADD) {
                return Err(self.unexpected("I expected to see an expression after `=`"));
            }
            let right = self.parse_add()?;
            exp = self.join(NodeKind::Equal, exp, right);
        }

        Ok(exp)
    }

    fn parse_add(&mut self) -> Result<NodeId, Error> {
        self.expect(FIRST_MULT)?;
        let mut exp = self.parse_mult()?;

        while self.check(IS_ADD) {
            let op = self.kind();
            self.eat(op)?;
            if !self.check(FIRST_MULT) {
                return Err(self.unexpected("I expected to see an expression after `+` or `-`"));
            }
            let right = self.parse_mult()?;
            let kind = match op {
                TokenKind::Plus => NodeKind::Add,
                _ => NodeKind::Subtract,
            };
            exp = self.join(kind, exp, right);
        }

        Ok(exp)
    }

    fn parse_mult(&mut self) -> Result<NodeId, Error> {
        self.expect(FIRST_EXP)?;
        let mut exp = self.parse_exponent()?;

        while self.check(IS_MULT) {
            let op = self.kind();
            self.eat(op)?;
            if !self.check(FIRST_EXP) {
                return Err(self.invalid_syntax("I expected to see an expression after `*` or `/`"));
            }
            let right = self.parse_exponent()?;
            let kind = match op {
                TokenKind::Multiply => NodeKind::Multiply,
                _ => NodeKind::Divide,
            };
            exp = self.join(kind, exp, right);
        }

        Ok(exp)
    }

    fn parse_exponent(&mut self) -> Result<NodeId, Error> {
        self.expect(FIRST_UNARY)?;
        let exp = self.parse_unary()?;

        if !self.check(IS_EXP) {
            return Ok(exp);
        }
        self.eat(TokenKind::Exponent)?;
        if !self.check(FIRST_UNARY) {
            return Err(self.invalid_syntax("I expected to see an expression after `^`"));
        }
        let right = self.parse_unary()?;
        Ok(self.join(NodeKind::Power, exp, right))
    }

    fn parse_unary(&mut self) -> Result<NodeId, Error> {
        let start = self.span().start;
        let mut negate = false;
        if self.kind() == TokenKind::Minus {
            self.eat(TokenKind::Minus)?;
            negate = true;
        }

        let expected = self.check(FIRST_FACTOR_PREFIX);
        let mut exp = None;
        if expected {
            if let Some(token) = self.current().filter(|token| token.kind == TokenKind::Constant) {
                let mut value = parse_number(&token.value).ok_or_else(|| {
                    self.error(InvalidNumber { text: token.value.clone() })
                })?;

                // a leading minus becomes part of the constant
                if negate {
                    value = -value;
                    negate = false;
                }
                exp = Some(self.leaf(NodeKind::Constant(value), start..token.span.end));
                self.eat(TokenKind::Constant)?;
            }

            if self.check(FIRST_FACTOR) {
                exp = Some(match exp {
                    None => self.parse_factors()?,
                    Some(constant) if self.kind() == TokenKind::Factorial => {
                        let span = self.span_of(constant).start..self.span().end;
                        self.eat(TokenKind::Factorial)?;
                        self.wrap(NodeKind::Factorial, constant, span)
                    },
                    Some(constant) => {
                        let factors = self.parse_factors()?;
                        self.join(NodeKind::Multiply, constant, factors)
                    },
                });
            }
        }

        let Some(exp) = exp.filter(|_| expected) else {
            return Err(self.invalid_syntax(
                "I expected to see a number, variable, function or parenthesis here",
            ));
        };

        if negate {
            let span = start..self.span_of(exp).end;
            return Ok(self.wrap(NodeKind::Negate, exp, span));
        }
        Ok(exp)
    }

    fn parse_factors(&mut self) -> Result<NodeId, Error> {
        let mut factors = Vec::new();
        loop {
            match self.kind() {
                TokenKind::Variable => {
                    let span = self.span();
                    let name = self.current()
                        .and_then(|token| token.value.chars().next())
                        .ok_or_else(|| self.unexpected("variable token has no name"))?;
                    factors.push(self.leaf(NodeKind::Variable(name), span));
                    self.eat(TokenKind::Variable)?;
                },
                TokenKind::Function => factors.push(self.parse_function()?),
                TokenKind::OpenParen => {
                    self.eat(TokenKind::OpenParen)?;
                    factors.push(self.parse_add()?);
                    self.eat(TokenKind::CloseParen)?;
                },
                _ => return Err(self.unexpected("I did not expect to see this token in a factor")),
            }

            if !self.check(FIRST_FACTOR) {
                break;
            }
        }

        // a trailing power binds to the last factor only
        if self.check(IS_EXP) {
            self.eat(TokenKind::Exponent)?;
            if !self.check(FIRST_UNARY) {
                return Err(self.invalid_syntax("I expected to see an expression after `^`"));
            }
            let right = self.parse_unary()?;
            if let Some(base) = factors.pop() {
                let power = self.join(NodeKind::Power, base, right);
                factors.push(power);
            }
        }

        let mut factors = factors.into_iter();
        let Some(first) = factors.next() else {
            return Err(self.unexpected("I expected to see at least one factor"));
        };
        Ok(factors.fold(first, |exp, factor| self.join(NodeKind::Multiply, exp, factor)))
    }

    fn parse_function(&mut self) -> Result<NodeId, Error> {
        let start = self.span().start;
        let func = self.current()
            .and_then(|token| Function::from_name(&token.value))
            .ok_or_else(|| self.unexpected("unknown function"))?;
        self.eat(TokenKind::Function)?;
        self.eat(TokenKind::OpenParen)?;
        let arg = self.parse_add()?;
        let end = self.span().end;
        self.eat(TokenKind::CloseParen)?;
        Ok(self.wrap(NodeKind::Function(func), arg, start..end))
    }
}

/// Parses a complete expression from a token stream. Whitespace tokens are ignored.
pub fn parse_tokens(tokens: &[Token]) -> Result<Tree, Error> {
    TokenStream::new(tokens).parse()
}

/// Tokenizes and parses a complete expression, without caching.
pub fn parse(input: &str) -> Result<Tree, Error> {
    let tokens = Tokenizer::new().tokenize(input)?;
    parse_tokens(&tokens)
}

/// A parser that remembers the tokens and trees it produced for each input text.
///
/// Parsing the same text twice returns the same shared [`Tree`]. Callers that want to modify a
/// parsed tree must clone it first. Nothing is ever evicted; call [`Parser::clear_cache`] to
/// release the cached values.
#[derive(Debug, Default)]
pub struct Parser {
    tokenizer: Tokenizer,
    tokens_cache: HashMap<String, Rc<[Token]>>,
    parse_cache: HashMap<String, Rc<Tree>>,
}

impl Parser {
    /// Creates a parser with empty caches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenizes the input, reusing the tokens from a previous call with the same text.
    pub fn tokenize(&mut self, input: &str) -> Result<Rc<[Token]>, Error> {
        if let Some(tokens) = self.tokens_cache.get(input) {
            trace!("token cache hit for `{}`", input);
            return Ok(Rc::clone(tokens));
        }

        let tokens: Rc<[Token]> = self.tokenizer.tokenize(input)?.into();
        self.tokens_cache.insert(input.to_string(), Rc::clone(&tokens));
        Ok(tokens)
    }

    /// Parses the input, reusing the tree from a previous call with the same text.
    pub fn parse(&mut self, input: &str) -> Result<Rc<Tree>, Error> {
        if let Some(tree) = self.parse_cache.get(input) {
            debug!("parse cache hit for `{}`", input);
            return Ok(Rc::clone(tree));
        }

        debug!("parsing `{}`", input);
        let tokens = self.tokenize(input)?;
        let tree = Rc::new(parse_tokens(&tokens)?);
        self.parse_cache.insert(input.to_string(), Rc::clone(&tree));
        Ok(tree)
    }

    /// Returns the number of parsed trees held in the cache.
    pub fn cached_trees(&self) -> usize {
        self.parse_cache.len()
    }

    /// Empties the token and tree caches.
    pub fn clear_cache(&mut self) {
        self.tokens_cache.clear();
        self.parse_cache.clear();
    }
}
