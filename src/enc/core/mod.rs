//! The one concrete surface syntax this crate understands.

pub mod lex;
pub mod par;

use super::Codec;
use crate::ast::Exp;
use crate::err::ParserErr;

/// Surface-syntax codec: the textual grammar parsed by [`par::parse`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Surface;

impl Codec<String> for Surface {
    fn encode(&self, exp: &Exp) -> String {
        exp.to_display_string()
    }

    fn decode(&self, val: &String) -> Result<Exp, ParserErr> {
        par::Parser::new(val)?.parse_expr()
    }
}
