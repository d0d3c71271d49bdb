//! Top-level error types produced while parsing or reducing an expression.

use crate::fmt::Formatted;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// A byte-offset span into the original input.
///
/// Spans carry no semantic weight; they exist purely so an external
/// diagnostics renderer can underline the offending slice of input.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Span {
    /// Byte offset of the first character covered by this span.
    pub position: usize,
    /// Number of bytes covered by this span.
    pub length: usize,
}

impl Span {
    /// Create a new instance of a span.
    pub fn new(position: usize, length: usize) -> Self {
        Self { position, length }
    }

    /// Create a zero-width span at `position`, for errors that have no natural length.
    pub fn point(position: usize) -> Self {
        Self::new(position, 1)
    }
}

/// One frame of the recursive-descent call trace, pushed on entry to a parsing
/// routine and popped on every exit, success or failure.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Frame {
    /// Name of the parsing routine this frame represents.
    pub function: &'static str,
    /// Position in the input at which the routine was entered.
    pub position: usize,
}

/// Lexical error: the scanner could not classify a run of input as a token.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TokenErr {
    /// Human-readable explanation of the error.
    pub message: String,
    /// Span of the offending input.
    pub span: Span,
    /// Call trace captured at the point of failure.
    pub trace: Vec<Frame>,
}

/// Syntactic error: the token stream does not match the grammar.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ParseErr {
    /// Human-readable explanation of the error.
    pub message: String,
    /// Span of the offending input. Defaults to a single character when the
    /// grammar has no natural length to report (e.g. "expected `)`").
    pub span: Span,
    /// Call trace captured at the point of failure.
    pub trace: Vec<Frame>,
}

/// Error raised while reducing an already-parsed expression.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct RuntimeErr {
    /// Human-readable explanation of the error.
    pub message: String,
    /// Span of the term that caused the error.
    pub span: Span,
}

impl TokenErr {
    /// Create a new instance of a lexical error with an empty call trace.
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            trace: Vec::new(),
        }
    }
}

impl ParseErr {
    /// Create a new instance of a syntactic error with an empty call trace.
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            trace: Vec::new(),
        }
    }
}

impl RuntimeErr {
    /// Create a new instance of a runtime error.
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// Error produced by the parser: either a lexical or a syntactic failure.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum ParserErr {
    /// Lexical error.
    Token(TokenErr),
    /// Syntactic error.
    Parse(ParseErr),
}

impl ParserErr {
    /// Call trace captured at the point of failure, regardless of variant.
    pub fn trace(&self) -> &[Frame] {
        match self {
            ParserErr::Token(err) => &err.trace,
            ParserErr::Parse(err) => &err.trace,
        }
    }

    /// Span of the offending input, regardless of variant.
    pub fn span(&self) -> Span {
        match self {
            ParserErr::Token(err) => err.span,
            ParserErr::Parse(err) => err.span,
        }
    }

    /// Stamp this error with the call trace captured at the point of failure.
    pub fn set_trace(&mut self, trace: Vec<Frame>) {
        match self {
            ParserErr::Token(err) => err.trace = trace,
            ParserErr::Parse(err) => err.trace = trace,
        }
    }
}

impl From<TokenErr> for ParserErr {
    fn from(err: TokenErr) -> Self {
        ParserErr::Token(err)
    }
}

impl From<ParseErr> for ParserErr {
    fn from(err: ParseErr) -> Self {
        ParserErr::Parse(err)
    }
}

impl Error for TokenErr {}
impl Error for ParseErr {}
impl Error for RuntimeErr {}
impl Error for ParserErr {}

impl Display for TokenErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Formatted {
        write!(f, "token error: {} at {}", self.message, self.span.position)
    }
}

impl Display for ParseErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Formatted {
        write!(f, "parse error: {} at {}", self.message, self.span.position)
    }
}

impl Display for RuntimeErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Formatted {
        write!(
            f,
            "runtime error: {} at {}",
            self.message, self.span.position
        )
    }
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Formatted {
        match self {
            ParserErr::Token(err) => write!(f, "{}", err),
            ParserErr::Parse(err) => write!(f, "{}", err),
        }
    }
}
