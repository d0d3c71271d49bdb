//! Application, and related behaviors.

use super::Exp;
use crate::err::Span;

/// Application of a function expression to an argument expression.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Application {
    /// Expression in function position.
    pub fn_: Box<Exp>,
    /// Expression in argument position.
    pub arg: Box<Exp>,
    /// Location of this application in the original input.
    pub span: Span,
}

impl Application {
    /// Create a new instance of an application.
    pub fn new(fn_: Exp, arg: Exp, span: Span) -> Self {
        Self {
            fn_: Box::new(fn_),
            arg: Box::new(arg),
            span,
        }
    }
}
