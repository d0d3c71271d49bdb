//! Top-level named definition.

use super::Exp;
use crate::err::Span;

/// Assignment of a name to an expression.
///
/// An assignment may appear only at the root of a parsed expression; it is
/// never a subterm of another expression (enforced by the grammar, not by
/// this type). Evaluating one mutates a [dictionary][super::Dict] rather than
/// producing a value of its own: see [`solve`][crate::reduce::solve].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Assignment {
    /// Name being defined.
    pub name: String,
    /// Expression the name is being defined as.
    pub body: Box<Exp>,
    /// Location of `name` in the original input.
    pub span: Span,
}

impl Assignment {
    /// Create a new instance of an assignment.
    pub fn new(name: impl Into<String>, body: Exp, span: Span) -> Self {
        Self {
            name: name.into(),
            body: Box::new(body),
            span,
        }
    }
}
