//! Encodings, aka surface syntaxes, supported for the abstract syntax tree.

use crate::ast::Exp;
use crate::err::ParserErr;

/// Trait that maps an [expression][Exp] from and to an encoding of type `T`.
pub trait Codec<T> {
    /// Encode an [expression][Exp] to an object of type `T`.
    fn encode(&self, exp: &Exp) -> T;

    /// Decode a value of type `T` to an [expression][Exp].
    fn decode(&self, val: &T) -> Result<Exp, ParserErr>;
}

pub mod core;
