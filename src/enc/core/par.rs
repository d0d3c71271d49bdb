//! Recursive-descent parser for the surface syntax.
//!
//! The grammar needs more than a stack of productions: translating named
//! binders into de Bruijn indices requires mutable state threaded through
//! the descent (`bind_levels`, `bind_count`), and disambiguating a root-level
//! [`Assignment`][crate::ast::Assignment] from a bare application chain needs
//! one token of backtracking. Both are easier to express by hand than to
//! coax out of a generated LR parser, so this parser is hand-written.

use super::lex::{Lexer, Tok};
use crate::ast::{Abstraction, Application, Assignment, Constant, Exp, Variable};
use crate::err::{Frame, ParseErr, ParserErr, Span, TokenErr};
use std::collections::HashMap;

/// Parse `input`, returning `None` (rather than propagating the error) if it
/// does not denote a well-formed expression.
///
/// This is the convenience entry point a REPL would call: diagnostics are
/// the caller's concern (see [`try_parse`] for the `Result`-returning form).
pub fn parse(input: &str) -> Option<Exp> {
    try_parse(input).ok()
}

/// Parse `input`, returning the [`ParserErr`] on failure instead of discarding it.
pub fn try_parse(input: &str) -> Result<Exp, ParserErr> {
    Parser::new(input)?.parse_expr()
}

fn tokenize(input: &str) -> Result<Vec<(usize, Tok, usize)>, TokenErr> {
    Lexer::new(input).collect()
}

/// Recursive-descent parser over a fully tokenized input.
///
/// Tokenizing the whole input up front (rather than pulling tokens lazily)
/// is what makes the one-token backtracking in [`Parser::try_parse_assignment`]
/// a matter of rewinding `pos`, instead of re-running the lexer.
pub struct Parser<'input> {
    input: &'input str,
    tokens: Vec<(usize, Tok, usize)>,
    pos: usize,
    bind_levels: HashMap<String, u64>,
    bind_count: u64,
    trace: Vec<Frame>,
}

impl<'input> Parser<'input> {
    /// Create a new instance of the parser, tokenizing `input` in full.
    pub fn new(input: &'input str) -> Result<Self, ParserErr> {
        let tokens = tokenize(input)?;
        Ok(Self {
            input,
            tokens,
            pos: 0,
            bind_levels: HashMap::new(),
            bind_count: 0,
            trace: Vec::new(),
        })
    }

    /// Parse a complete `Expr`, failing if any non-whitespace input remains.
    pub fn parse_expr(&mut self) -> Result<Exp, ParserErr> {
        self.traced("parse_expr", |p| {
            let exp = match p.try_parse_assignment()? {
                Some(exp) => exp,
                None => p.parse_app_chain()?,
            };
            if p.pos != p.tokens.len() {
                return Err(ParseErr::new("invalid element", Span::point(p.position())).into());
            }
            Ok(exp)
        })
    }

    /// Run `f` with a trace frame pushed for `name`, guaranteeing the frame
    /// is popped on every exit path — including an early return through `?`
    /// inside `f` — and that the first failure to pass through here stamps
    /// its `ParserErr` with the call stack as it stood at that point.
    fn traced<T>(
        &mut self,
        name: &'static str,
        f: impl FnOnce(&mut Self) -> Result<T, ParserErr>,
    ) -> Result<T, ParserErr> {
        let position = self.position();
        self.trace.push(Frame {
            function: name,
            position,
        });
        let mut result = f(self);
        if let Err(err) = &mut result {
            if err.trace().is_empty() {
                err.set_trace(self.trace.clone());
            }
        }
        self.trace.pop();
        result
    }

    fn position(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|(start, _, _)| *start)
            .unwrap_or(self.input.len())
    }

    fn peek(&self) -> Option<&Tok> {
        self.tokens.get(self.pos).map(|(_, tok, _)| tok)
    }

    fn advance(&mut self) -> Option<(usize, Tok, usize)> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, want: Tok, what: &str) -> Result<(), ParserErr> {
        match self.peek() {
            Some(tok) if *tok == want => {
                self.advance();
                Ok(())
            }
            _ => Err(ParseErr::new(format!("expected '{}'", what), Span::point(self.position())).into()),
        }
    }

    fn starts_term(&self) -> bool {
        matches!(
            self.peek(),
            Some(Tok::Lambda) | Some(Tok::LParen) | Some(Tok::Ident(_))
        )
    }

    /// `Assignment ::= Name "=" AppChain`, attempted with one token of
    /// backtracking: if the leading `Name "="` doesn't materialize, the
    /// parser rewinds to try a bare `AppChain` instead.
    fn try_parse_assignment(&mut self) -> Result<Option<Exp>, ParserErr> {
        self.traced("parse_assignment", |p| {
            let checkpoint = p.pos;
            let start = p.position();
            if let Some(Tok::Ident(name)) = p.peek().cloned() {
                p.advance();
                if matches!(p.peek(), Some(Tok::Equals)) {
                    p.advance();
                    let body = p.parse_app_chain()?;
                    let len = p.position().saturating_sub(start).max(name.len());
                    return Ok(Some(Exp::Assignment(Assignment::new(
                        name,
                        body,
                        Span::new(start, len),
                    ))));
                }
            }
            p.pos = checkpoint;
            Ok(None)
        })
    }

    /// `AppChain ::= Term Term*`, left-associative.
    fn parse_app_chain(&mut self) -> Result<Exp, ParserErr> {
        self.traced("parse_app_chain", |p| {
            let start = p.position();
            let mut exp = p.parse_term()?;
            while p.starts_term() {
                let arg = p.parse_term()?;
                let len = p.position().saturating_sub(start);
                exp = Exp::Application(Application::new(exp, arg, Span::new(start, len)));
            }
            Ok(exp)
        })
    }

    /// `Term ::= Abstraction | Parenthesised | Variable`.
    fn parse_term(&mut self) -> Result<Exp, ParserErr> {
        self.traced("parse_term", |p| match p.peek() {
            Some(Tok::Lambda) => p.parse_abstraction(),
            Some(Tok::LParen) => p.parse_parenthesised(),
            Some(Tok::Ident(_)) => p.parse_variable(),
            _ => Err(ParseErr::new("expected a term", Span::point(p.position())).into()),
        })
    }

    /// `Abstraction ::= "\" Name AbsTail`.
    fn parse_abstraction(&mut self) -> Result<Exp, ParserErr> {
        self.traced("parse_abstraction", |p| {
            let start = p.position();
            p.expect(Tok::Lambda, "\\")?;
            p.parse_abstraction_chain(start)
        })
    }

    /// `AbsTail ::= "." AppChain | Name AbsTail`.
    ///
    /// Implements the binder-translation algorithm: a name not already bound
    /// gets a fresh level and an empty `previous_bind`; a name that shadows
    /// an already-bound name of the same spelling has its old level saved
    /// (restored on the way back out) and recorded as `previous_bind` on the
    /// new [`Abstraction`]. Curried binders (`\x y z. body`) desugar to
    /// nested abstractions by recursing here instead of consuming `.`.
    fn parse_abstraction_chain(&mut self, start: usize) -> Result<Exp, ParserErr> {
        self.traced("parse_abstraction_chain", |p| {
            let name = p.parse_name()?;
            let previous = p.bind_levels.get(&name).copied();
            let level = p.bind_count;
            p.bind_levels.insert(name.clone(), level);
            p.bind_count += 1;

            let body = match p.peek() {
                Some(Tok::Dot) => {
                    p.advance();
                    p.parse_app_chain()
                }
                Some(Tok::Ident(_)) => p.parse_abstraction_chain(start),
                _ => Err(ParseErr::new(
                    "expected '.' or another binder name",
                    Span::point(p.position()),
                )
                .into()),
            };

            p.bind_count -= 1;
            match previous {
                Some(level) => {
                    p.bind_levels.insert(name.clone(), level);
                }
                None => {
                    p.bind_levels.remove(&name);
                }
            }

            let body = body?;
            let len = p.position().saturating_sub(start);
            Ok(Exp::Abstraction(Abstraction::new(
                name,
                body,
                previous,
                Span::new(start, len),
            )))
        })
    }

    /// `Parenthesised ::= "(" AppChain ")"`.
    fn parse_parenthesised(&mut self) -> Result<Exp, ParserErr> {
        self.traced("parse_parenthesised", |p| {
            p.expect(Tok::LParen, "(")?;
            let exp = p.parse_app_chain()?;
            p.expect(Tok::RParen, ")")?;
            Ok(exp)
        })
    }

    /// `Variable ::= Name`, resolved against the current binder levels into
    /// either a bound [`Variable`] (de Bruijn index `bind_count - level`) or
    /// a free [`Constant`].
    fn parse_variable(&mut self) -> Result<Exp, ParserErr> {
        self.traced("parse_variable", |p| {
            let start = p.position();
            let name = p.parse_name()?;
            let span = Span::new(start, name.len());
            let exp = match p.bind_levels.get(&name) {
                Some(&level) => Exp::Variable(Variable::new(p.bind_count - level, span)),
                None => Exp::Constant(Constant::new(name, span)),
            };
            Ok(exp)
        })
    }

    fn parse_name(&mut self) -> Result<String, ParserErr> {
        self.traced("parse_name", |p| match p.peek().cloned() {
            Some(Tok::Ident(name)) => {
                p.advance();
                Ok(name)
            }
            _ => Err(ParseErr::new("expected an identifier", Span::point(p.position())).into()),
        })
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_parse_variable_resolves_free() {
        let exp = parse("x").unwrap();
        assert!(matches!(exp, Exp::Constant(_)));
    }

    #[test]
    fn test_parse_identity_abstraction() {
        let exp = parse("\\x.x").unwrap();
        match exp {
            Exp::Abstraction(abs) => {
                assert_eq!(abs.name, "x");
                assert_eq!(abs.previous_bind, None);
                assert!(matches!(*abs.body, Exp::Variable(Variable { index: 1, .. })));
            }
            _ => panic!("expected an abstraction"),
        }
    }

    #[test]
    fn test_parse_curried_abstraction_desugars_to_nesting() {
        let exp = parse("\\x y.x").unwrap();
        match exp {
            Exp::Abstraction(outer) => match *outer.body {
                Exp::Abstraction(inner) => {
                    assert!(matches!(*inner.body, Exp::Variable(Variable { index: 2, .. })));
                }
                _ => panic!("expected a nested abstraction"),
            },
            _ => panic!("expected an abstraction"),
        }
    }

    #[test]
    fn test_parse_shadowing_records_previous_bind() {
        let exp = parse("\\x.\\x.x").unwrap();
        match exp {
            Exp::Abstraction(outer) => match *outer.body {
                Exp::Abstraction(inner) => {
                    assert_eq!(inner.previous_bind, Some(0));
                    assert!(matches!(*inner.body, Exp::Variable(Variable { index: 1, .. })));
                }
                _ => panic!("expected a nested abstraction"),
            },
            _ => panic!("expected an abstraction"),
        }
    }

    #[test]
    fn test_parse_application_left_associative() {
        let exp = parse("a b c").unwrap();
        match exp {
            Exp::Application(outer) => {
                assert!(matches!(*outer.arg, Exp::Constant(ref c) if c.name == "c"));
                assert!(matches!(*outer.fn_, Exp::Application(_)));
            }
            _ => panic!("expected an application"),
        }
    }

    #[test]
    fn test_parse_assignment() {
        let exp = parse("id = \\x.x").unwrap();
        match exp {
            Exp::Assignment(asn) => {
                assert_eq!(asn.name, "id");
                assert!(matches!(*asn.body, Exp::Abstraction(_)));
            }
            _ => panic!("expected an assignment"),
        }
    }

    #[test]
    fn test_parse_assignment_backtracks_to_application() {
        // "id x" has the same leading Ident as an assignment, but no `=`
        // follows, so the parser must backtrack and parse a bare AppChain.
        let exp = parse("id x").unwrap();
        assert!(matches!(exp, Exp::Application(_)));
    }

    #[test]
    fn test_parse_rejects_trailing_garbage() {
        assert!(try_parse("x )").is_err());
    }

    #[test]
    fn test_parse_rejects_unbalanced_parenthesis() {
        assert!(try_parse("(x").is_err());
    }

    #[test]
    fn test_parse_error_carries_full_trace() {
        let err = try_parse("(x").unwrap_err();
        assert!(!err.trace().is_empty());
        assert_eq!(err.trace()[0].function, "parse_expr");
    }
}
