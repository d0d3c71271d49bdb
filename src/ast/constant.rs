//! Free identifier, resolved against the [dictionary][super::Dict] during reduction.

use crate::err::Span;

/// Occurrence of a free identifier.
///
/// A constant is either a genuinely free name (no dictionary entry, rendered
/// as-is) or a reference to a named top-level definition, resolved by the
/// reducer when the constant appears in the function position of an
/// [application][super::Application].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Constant {
    /// Name of the identifier.
    pub name: String,
    /// Location of this occurrence in the original input.
    pub span: Span,
}

impl Constant {
    /// Create a new instance of a constant occurrence.
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}
