pub mod token;

use alg_error::Error;
use crate::{parser::error::InvalidToken, tree::Function};
use logos::{Lexer, Logos};
use token::Lexeme;
pub use token::{Token, TokenKind, TokenSet};

/// Returns an iterator over the raw lexemes produced by the scanner.
pub(crate) fn lex(input: &str) -> Lexer<Lexeme> {
    Lexeme::lexer(input)
}

/// Converts raw text into a flat sequence of [`Token`]s, always terminated by an
/// [`TokenKind::Eof`] token.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// If false, every whitespace character is kept as a [`TokenKind::Pad`] token, so that the
    /// input can be reconstructed exactly from its tokens.
    pub exclude_padding: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self { exclude_padding: true }
    }
}

impl Tokenizer {
    /// Creates a tokenizer that drops whitespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tokenizer that keeps whitespace as [`TokenKind::Pad`] tokens.
    pub fn with_padding() -> Self {
        Self { exclude_padding: false }
    }

    /// Returns an owned array containing all of the tokens produced by the tokenizer, ending with
    /// an [`TokenKind::Eof`] token.
    ///
    /// Returns an error if a character that is not part of the expression language is found.
    pub fn tokenize(&self, input: &str) -> Result<Vec<Token>, Error> {
        let mut lexer = lex(input);
        let mut tokens = Vec::new();

        while let Some(lexeme) = lexer.next() {
            let span = lexer.span();
            let slice = lexer.slice();
            let Ok(lexeme) = lexeme else {
                let found = slice.chars().next().unwrap_or_default();
                return Err(Error::new(vec![span], InvalidToken { found }));
            };

            let (kind, value) = match lexeme {
                Lexeme::Number => (TokenKind::Constant, slice),
                Lexeme::Alpha => {
                    self.push_alpha(&mut tokens, slice, span.start);
                    continue;
                },
                Lexeme::Pad if self.exclude_padding => continue,
                Lexeme::Pad => (TokenKind::Pad, slice),
                Lexeme::Plus => (TokenKind::Plus, "+"),
                Lexeme::Minus => (TokenKind::Minus, "-"),
                Lexeme::Multiply => (TokenKind::Multiply, "*"),
                Lexeme::Divide => (TokenKind::Divide, "/"),
                Lexeme::Exponent => (TokenKind::Exponent, "^"),
                Lexeme::Factorial => (TokenKind::Factorial, "!"),
                Lexeme::OpenParen => (TokenKind::OpenParen, "("),
                Lexeme::CloseParen => (TokenKind::CloseParen, ")"),
                Lexeme::Equal => (TokenKind::Equal, "="),
            };
            tokens.push(Token::new(kind, value, span));
        }

        tokens.push(Token::new(TokenKind::Eof, "", input.len()..input.len()));
        Ok(tokens)
    }

    /// Pushes the tokens for a run of letters: a single function token if the run names a
    /// registered function, otherwise one variable token per letter.
    fn push_alpha(&self, tokens: &mut Vec<Token>, run: &str, start: usize) {
        if Function::from_name(run).is_some() {
            tokens.push(Token::new(TokenKind::Function, run, start..start + run.len()));
            return;
        }

        // letters are ASCII, so byte offsets and character offsets agree
        for (i, c) in run.char_indices() {
            tokens.push(Token::new(TokenKind::Variable, c.to_string(), start + i..start + i + 1));
        }
    }
}

/// Tokenizes the input with a default [`Tokenizer`], dropping whitespace.
pub fn tokenize(input: &str) -> Result<Vec<Token>, Error> {
    Tokenizer::new().tokenize(input)
}

/// Reads the text of a [`TokenKind::Constant`] token as a number.
///
/// Text containing a `.` or `e` is read as a float, anything else as an integer. Returns [`None`]
/// for malformed text, such as `.` or `1.2.3`.
pub fn parse_number(text: &str) -> Option<f64> {
    if text.contains(['.', 'e']) {
        text.parse::<f64>().ok()
    } else {
        text.parse::<i64>()
            .map(|value| value as f64)
            .or_else(|_| text.parse::<f64>())
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::error::InvalidToken;
    use pretty_assertions::assert_eq;
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<const N: usize>(input: &str, expected: [(TokenKind, &str); N]) {
        let tokens = tokenize(input).unwrap();
        let actual = tokens.iter()
            .map(|token| (token.kind, token.value.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(actual, expected.to_vec());
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "4x + 2",
            [
                (TokenKind::Constant, "4"),
                (TokenKind::Variable, "x"),
                (TokenKind::Plus, "+"),
                (TokenKind::Constant, "2"),
                (TokenKind::Eof, ""),
            ],
        );
    }

    #[test]
    fn operators_and_brackets() {
        compare_tokens(
            "[2x^3] * 7! = y/1 - 0.5",
            [
                (TokenKind::OpenParen, "("),
                (TokenKind::Constant, "2"),
                (TokenKind::Variable, "x"),
                (TokenKind::Exponent, "^"),
                (TokenKind::Constant, "3"),
                (TokenKind::CloseParen, ")"),
                (TokenKind::Multiply, "*"),
                (TokenKind::Constant, "7"),
                (TokenKind::Factorial, "!"),
                (TokenKind::Equal, "="),
                (TokenKind::Variable, "y"),
                (TokenKind::Divide, "/"),
                (TokenKind::Constant, "1"),
                (TokenKind::Minus, "-"),
                (TokenKind::Constant, "0.5"),
                (TokenKind::Eof, ""),
            ],
        );
    }

    #[test]
    fn letters_are_separate_variables() {
        compare_tokens(
            "xyz",
            [
                (TokenKind::Variable, "x"),
                (TokenKind::Variable, "y"),
                (TokenKind::Variable, "z"),
                (TokenKind::Eof, ""),
            ],
        );
    }

    #[test]
    fn exponent_notation_is_not_a_number() {
        compare_tokens(
            "2.5e+3",
            [
                (TokenKind::Constant, "2.5"),
                (TokenKind::Variable, "e"),
                (TokenKind::Plus, "+"),
                (TokenKind::Constant, "3"),
                (TokenKind::Eof, ""),
            ],
        );
    }

    #[test]
    fn identify_functions() {
        let tokens = tokenize("sgn(-3)").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Function);
        assert_eq!(tokens[0].value, "sgn");

        let tokens = tokenize("abs(x)").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Function);
        assert_eq!(tokens[0].value, "abs");
    }

    #[test]
    fn padding_is_optional() {
        let text = "4x + 2y^7 - 6";
        let no_padding = tokenize(text).unwrap();
        let padding = Tokenizer::with_padding().tokenize(text).unwrap();
        assert_eq!(padding.len(), no_padding.len() + 4);

        // padding tokens allow exact reconstruction of the input
        let rebuilt = padding.iter().map(|token| token.value.as_str()).collect::<String>();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn spans_point_into_source() {
        let tokens = tokenize("12 + ab").unwrap();
        let spans = tokens.iter().map(|token| token.span.clone()).collect::<Vec<_>>();
        assert_eq!(spans, vec![0..2, 3..4, 5..6, 6..7, 7..7]);
    }

    #[test]
    fn numbers() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number("0.25"), Some(0.25));
        assert_eq!(parse_number("3."), Some(3.0));
        assert_eq!(parse_number("."), None);
        assert_eq!(parse_number("1.2.3"), None);
    }

    #[test]
    fn invalid_character() {
        let err = tokenize("4x + 2x^3 * 7\\").unwrap_err();
        assert!(err.is::<InvalidToken>());
        assert_eq!(err.spans, vec![13..14]);
        assert_eq!(err.downcast_ref::<InvalidToken>().unwrap().found, '\\');
    }
}
