//! Top-level entity within the abstract syntax tree.

use super::{Abstraction, Application, Assignment, Constant, Variable};
use crate::err::{RuntimeErr, Span};
use std::collections::BTreeSet;

/// Expression, the top-level entity produced by the parser and consumed by
/// the reducer.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum Exp {
    /// Occurrence of a bound variable.
    Variable(Variable),
    /// Occurrence of a free identifier.
    Constant(Constant),
    /// λ-abstraction.
    Abstraction(Abstraction),
    /// Application of a function to an argument.
    Application(Application),
    /// Top-level named definition. Never a subterm of another expression.
    Assignment(Assignment),
}

impl Exp {
    /// Location of this expression in the original input.
    pub fn span(&self) -> Span {
        match self {
            Exp::Variable(var) => var.span,
            Exp::Constant(con) => con.span,
            Exp::Abstraction(abs) => abs.span,
            Exp::Application(app) => app.span,
            Exp::Assignment(asn) => asn.span,
        }
    }

    /// Shift every bound [`Variable`] whose index exceeds `cutoff` by `delta`.
    ///
    /// Descending through an [`Abstraction`] increments `cutoff` by one, since
    /// an extra binder now sits between the root and the subtree. Descending
    /// through an [`Application`] leaves `cutoff` unchanged on both branches.
    ///
    /// Fails when `delta` is negative and an adjustment would leave an index
    /// of zero or below, i.e. would point past the binder being removed.
    pub fn offset_indexes(&mut self, delta: i64, cutoff: u64) -> Result<(), RuntimeErr> {
        match self {
            Exp::Variable(var) => {
                if var.index > cutoff {
                    let shifted = var.index as i64 + delta;
                    if shifted <= cutoff as i64 {
                        return Err(RuntimeErr::new(
                            "index shift left the binder it was bound to",
                            var.span,
                        ));
                    }
                    var.index = shifted as u64;
                }
                Ok(())
            }
            Exp::Constant(_) => Ok(()),
            Exp::Abstraction(abs) => abs.body.offset_indexes(delta, cutoff + 1),
            Exp::Application(app) => {
                app.fn_.offset_indexes(delta, cutoff)?;
                app.arg.offset_indexes(delta, cutoff)
            }
            Exp::Assignment(asn) => Err(RuntimeErr::new(
                "cannot shift indexes within an assignment",
                asn.span,
            )),
        }
    }

    /// Free variables of this expression, expressed as distances past
    /// `depth` enclosing binders.
    ///
    /// A [`Variable`] with `index > depth` contributes `index - depth`;
    /// descending through an [`Abstraction`] increments `depth`.
    pub fn free_variables(&self, depth: u64) -> Result<BTreeSet<u64>, RuntimeErr> {
        match self {
            Exp::Variable(var) => {
                let mut set = BTreeSet::new();
                if var.index > depth {
                    set.insert(var.index - depth);
                }
                Ok(set)
            }
            Exp::Constant(_) => Ok(BTreeSet::new()),
            Exp::Abstraction(abs) => abs.body.free_variables(depth + 1),
            Exp::Application(app) => {
                let mut set = app.fn_.free_variables(depth)?;
                set.extend(app.arg.free_variables(depth)?);
                Ok(set)
            }
            Exp::Assignment(asn) => Err(RuntimeErr::new(
                "cannot compute free variables of an assignment",
                asn.span,
            )),
        }
    }

    /// Render this expression using de Bruijn indices only.
    ///
    /// Two structurally-equal expressions always produce identical canonical
    /// strings, regardless of the display names their binders carry — this
    /// is what lets the reducer detect a fixed point by plain string
    /// comparison (see [`crate::reduce`]).
    pub fn to_canonical_string(&self) -> String {
        match self {
            Exp::Variable(var) => var.index.to_string(),
            Exp::Constant(con) => con.name.clone(),
            Exp::Abstraction(abs) => format!("L {}", abs.body.to_canonical_string()),
            Exp::Application(app) => {
                let fn_str = match app.fn_.as_ref() {
                    Exp::Abstraction(_) => format!("({})", app.fn_.to_canonical_string()),
                    _ => app.fn_.to_canonical_string(),
                };
                let arg_str = match app.arg.as_ref() {
                    Exp::Abstraction(_) => format!("({})", app.arg.to_canonical_string()),
                    Exp::Application(_) => format!("[{}]", app.arg.to_canonical_string()),
                    _ => app.arg.to_canonical_string(),
                };
                format!("{} {}", fn_str, arg_str)
            }
            Exp::Assignment(asn) => format!("{} = {}", asn.name, asn.body.to_canonical_string()),
        }
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::enc::core::par::parse;

    #[test]
    fn test_canonical_string_ignores_names() {
        let a = parse("\\x.x").unwrap();
        let b = parse("\\y.y").unwrap();
        assert_eq!(a.to_canonical_string(), b.to_canonical_string());
    }

    #[test]
    fn test_offset_indexes_roundtrip() {
        let mut exp = parse("\\x.x y").unwrap();
        let before = exp.to_canonical_string();
        exp.offset_indexes(3, 5).unwrap();
        exp.offset_indexes(-3, 5).unwrap();
        assert_eq!(exp.to_canonical_string(), before);
    }

    #[test]
    fn test_offset_indexes_rejects_capture() {
        // Stripping the binder off `\x.x` leaves a bound `Variable` with
        // index 1 but no enclosing binder; shifting it down by 1 would point
        // past the binder it used to refer to.
        if let Exp::Abstraction(abs) = parse("\\x.x").unwrap() {
            let mut body = *abs.body;
            assert!(body.offset_indexes(-1, 0).is_err());
        } else {
            panic!("expected an abstraction");
        }
    }

    #[test]
    fn test_free_variables_of_abstraction() {
        let exp = parse("\\x.y x").unwrap();
        if let Exp::Abstraction(abs) = exp {
            let free = abs.body.free_variables(0).unwrap();
            // `y` is a Constant (contributes nothing); `x` is bound at index 1.
            assert_eq!(free, BTreeSet::from([1]));
        } else {
            panic!("expected an abstraction");
        }
    }
}
