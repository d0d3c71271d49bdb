//! Lexing utilities for the surface syntax.

use crate::err::{Span, TokenErr};
use logos::{Logos, SpannedIter};
use std::fmt::{Display, Formatter};

/// Tokens available to the grammar of the surface syntax.
#[derive(Logos, Clone, Debug, Eq, Hash, PartialEq)]
#[logos(skip r"[ \t\n\f\r]+")]
pub enum Tok {
    /// Identifier token: a maximal run of letters, digits and underscores
    /// that contains at least one letter or underscore.
    ///
    /// A run containing only digits is rejected at the lexer, mirroring the
    /// reference scanner's `parse_name_token`: the run is read in full before
    /// its shape is known, so `123abc` is one malformed token, not a number
    /// followed by a name.
    #[regex("[A-Za-z_0-9]+", ident_or_digits)]
    Ident(String),
    /// Left parenthesis token.
    #[token("(")]
    LParen,
    /// Right parenthesis token.
    #[token(")")]
    RParen,
    /// Dot (period) token, used to separate a binder's name from its body.
    #[token(".")]
    Dot,
    /// Backslash token, introducing a λ-abstraction.
    #[token("\\")]
    Lambda,
    /// Equals token, separating an assignment's name from its body.
    #[token("=")]
    Equals,
    /// Plus token. Reserved; no grammar production consumes it.
    #[token("+")]
    Plus,
    /// Minus token. Reserved; no grammar production consumes it.
    #[token("-")]
    Minus,
    /// Star token. Reserved; no grammar production consumes it.
    #[token("*")]
    Star,
    /// Slash token. Reserved; no grammar production consumes it.
    #[token("/")]
    Div,
}

/// Recognize an `[A-Za-z_0-9]+` run as an identifier, rejecting a run that
/// consists entirely of digits.
fn ident_or_digits(lex: &mut logos::Lexer<Tok>) -> Option<String> {
    let slice = lex.slice();
    if slice.bytes().all(|b| b.is_ascii_digit()) {
        None
    } else {
        Some(slice.to_string())
    }
}

impl Display for Tok {
    fn fmt(&self, f: &mut Formatter<'_>) -> crate::fmt::Formatted {
        match self {
            Tok::Ident(ident) => write!(f, "{}", ident),
            Tok::LParen => write!(f, "("),
            Tok::RParen => write!(f, ")"),
            Tok::Dot => write!(f, "."),
            Tok::Lambda => write!(f, "\\"),
            Tok::Equals => write!(f, "="),
            Tok::Plus => write!(f, "+"),
            Tok::Minus => write!(f, "-"),
            Tok::Star => write!(f, "*"),
            Tok::Div => write!(f, "/"),
        }
    }
}

/// Adapter from [`logos`]'s spanned token stream to `(start, token, end)`
/// triples, so positions survive into parse errors.
pub struct Lexer<'input> {
    token_stream: SpannedIter<'input, Tok>,
}

impl<'input> Lexer<'input> {
    /// Create a new instance of the lexer over `input`.
    pub fn new(input: &'input str) -> Self {
        Self {
            token_stream: Tok::lexer(input).spanned(),
        }
    }
}

impl<'input> Iterator for Lexer<'input> {
    type Item = Result<(usize, Tok, usize), TokenErr>;

    fn next(&mut self) -> Option<Self::Item> {
        self.token_stream.next().map(|(res, span)| match res {
            Ok(tok) => Ok((span.start, tok, span.end)),
            Err(()) => Err(TokenErr::new(
                "invalid element",
                Span::new(span.start, span.end - span.start),
            )),
        })
    }
}

#[cfg(test)]
mod test {

    use super::*;

    fn toks(input: &str) -> Vec<Tok> {
        Lexer::new(input).map(|r| r.unwrap().1).collect()
    }

    #[test]
    fn test_lex_identifier() {
        assert_eq!(toks("foo_1"), vec![Tok::Ident("foo_1".to_string())]);
    }

    #[test]
    fn test_lex_symbols() {
        assert_eq!(
            toks("\\x.x (y)"),
            vec![
                Tok::Lambda,
                Tok::Ident("x".to_string()),
                Tok::Dot,
                Tok::Ident("x".to_string()),
                Tok::LParen,
                Tok::Ident("y".to_string()),
                Tok::RParen,
            ]
        );
    }

    #[test]
    fn test_lex_rejects_digit_only_run() {
        let mut lexer = Lexer::new("123");
        assert!(lexer.next().unwrap().is_err());
    }

    #[test]
    fn test_lex_accepts_mixed_run() {
        assert_eq!(toks("123abc"), vec![Tok::Ident("123abc".to_string())]);
    }
}
