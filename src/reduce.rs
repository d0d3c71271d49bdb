//! Reduction of a parsed [`Exp`] to normal form, and named-constant resolution.
//!
//! The reducer repeatedly applies one step of simplification — β-reduction,
//! η-reduction, or constant resolution — until the term stops changing
//! (detected by comparing [`Exp::to_canonical_string`] before and after a
//! step) or a step cap is exceeded, in which case the expression is assumed
//! non-terminating.

use crate::ast::{Abstraction, Application, Assignment, Dict, Exp};
use crate::err::RuntimeErr;

/// Maximum number of simplification steps attempted before an expression is
/// declared non-terminating.
pub const MAX_REDUCTION_STEPS: usize = 100;

/// Reduce `term` to normal form against `dict`, reporting the error on
/// failure instead of swallowing it.
///
/// If `term` is (or reduces to) a root-level [`Assignment`], `dict` is
/// mutated as a side effect: the assignment's body becomes (or replaces) the
/// dictionary entry for its name, unless the body is a bare reference to the
/// same name, in which case the entry is removed instead.
pub fn try_solve(term: &Exp, dict: &mut Dict) -> Result<String, RuntimeErr> {
    let mut current = term.clone();
    for _ in 0..MAX_REDUCTION_STEPS {
        let before = current.to_canonical_string();
        let next = simplify(&current, dict, &mut Vec::new())?;
        let after = next.to_canonical_string();
        current = next;
        if before == after {
            return Ok(finalize(current, dict));
        }
    }
    Err(RuntimeErr::new("infinite lambda expression", term.span()))
}

/// Reduce `term` to normal form against `dict`.
///
/// Mirrors the REPL contract: a failed reduction is reported by the caller's
/// diagnostics layer (not this crate, see [`crate::err`]) and rendered here
/// as an empty string, matching the convention that an empty result means
/// "already reported, nothing further to print". Use [`try_solve`] to get
/// the error itself.
pub fn solve(term: &Exp, dict: &mut Dict) -> String {
    try_solve(term, dict).unwrap_or_default()
}

fn finalize(term: Exp, dict: &mut Dict) -> String {
    match term {
        Exp::Assignment(asn) => {
            let self_assigned =
                matches!(asn.body.as_ref(), Exp::Constant(con) if con.name == asn.name);
            if self_assigned {
                dict.remove(&asn.name);
                format!("Deleted constant {}", asn.name)
            } else {
                let rendered = asn.body.to_display_string();
                dict.set(asn.name.clone(), *asn.body);
                format!("Set constant {} to {}", asn.name, rendered)
            }
        }
        other => other.to_display_string(),
    }
}

/// Perform exactly one simplification step.
///
/// Each variant recursively simplifies its children first; if a child
/// changed (by canonical-string comparison), this call returns immediately
/// with that child replaced, deferring any local rewrite (β, η, constant
/// resolution) to the next step. Only once a node's children have stopped
/// changing does it attempt its own local rewrite.
fn simplify(exp: &Exp, dict: &mut Dict, stack: &mut Vec<String>) -> Result<Exp, RuntimeErr> {
    match exp {
        Exp::Variable(_) | Exp::Constant(_) => Ok(exp.clone()),

        Exp::Abstraction(abs) => {
            stack.push(abs.name.clone());
            let new_body = simplify(&abs.body, dict, stack)?;
            stack.pop();

            if new_body.to_canonical_string() != abs.body.to_canonical_string() {
                return Ok(Exp::Abstraction(Abstraction::new(
                    abs.name.clone(),
                    new_body,
                    abs.previous_bind,
                    abs.span,
                )));
            }

            eta_reduce(&new_body)?.map_or_else(|| Ok(exp.clone()), Ok)
        }

        Exp::Application(app) => {
            let new_fn = simplify(&app.fn_, dict, stack)?;
            if new_fn.to_canonical_string() != app.fn_.to_canonical_string() {
                return Ok(Exp::Application(Application::new(
                    new_fn,
                    (*app.arg).clone(),
                    app.span,
                )));
            }

            let new_arg = simplify(&app.arg, dict, stack)?;
            if new_arg.to_canonical_string() != app.arg.to_canonical_string() {
                return Ok(Exp::Application(Application::new(new_fn, new_arg, app.span)));
            }

            match &new_fn {
                Exp::Abstraction(abs) => beta_reduce(abs, &new_arg, stack),
                Exp::Constant(con) => match dict.get(&con.name).cloned() {
                    Some(value) => {
                        let mut resolved = value;
                        let mut shadow_stack = stack.clone();
                        update_name_shadowing(&mut resolved, &mut shadow_stack);
                        Ok(Exp::Application(Application::new(resolved, new_arg, app.span)))
                    }
                    None => Ok(exp.clone()),
                },
                _ => Ok(exp.clone()),
            }
        }

        Exp::Assignment(asn) => {
            let new_body = simplify(&asn.body, dict, stack)?;
            Ok(Exp::Assignment(Assignment::new(
                asn.name.clone(),
                new_body,
                asn.span,
            )))
        }
    }
}

/// Attempt η-reduction: `\x. f x  ->  f` when `x` does not occur free in `f`.
///
/// Returns `Ok(None)` when `body` is not of the right shape or the variable
/// occurs free — i.e. no rewrite applies, and the caller should leave the
/// abstraction as-is.
fn eta_reduce(body: &Exp) -> Result<Option<Exp>, RuntimeErr> {
    let Exp::Application(app) = body else {
        return Ok(None);
    };
    let Exp::Variable(var) = app.arg.as_ref() else {
        return Ok(None);
    };
    if var.index != 1 {
        return Ok(None);
    }
    if app.fn_.free_variables(0)?.contains(&1) {
        return Ok(None);
    }
    let mut reduced = (*app.fn_).clone();
    reduced.offset_indexes(-1, 0)?;
    Ok(Some(reduced))
}

/// β-reduce `Application(Abstraction(.., body), arg)` by substituting `arg`
/// for occurrences of the bound variable in `body`, then shifting the result
/// down by one level to account for the binder having been removed.
fn beta_reduce(abs: &Abstraction, arg: &Exp, stack: &mut Vec<String>) -> Result<Exp, RuntimeErr> {
    let mut result = substitute(&abs.body, arg, 1, stack)?;
    result.offset_indexes(-1, 0)?;
    Ok(result)
}

/// Walk `node`, replacing every occurrence of the variable bound at
/// `current_index` with a copy of `arg` (index-shifted to account for the
/// binders crossed so far). `current_index` starts at 1 at the body of the
/// abstraction being eliminated and increases by one for every nested
/// abstraction `substitute` descends into.
fn substitute(
    node: &Exp,
    arg: &Exp,
    current_index: u64,
    stack: &mut Vec<String>,
) -> Result<Exp, RuntimeErr> {
    match node {
        Exp::Variable(var) if var.index == current_index => {
            let mut replacement = arg.clone();
            replacement.offset_indexes(current_index as i64, 0)?;
            Ok(replacement)
        }
        Exp::Variable(var) => Ok(Exp::Variable(var.clone())),
        Exp::Constant(con) => Ok(Exp::Constant(con.clone())),
        Exp::Application(app) => {
            let fn_ = substitute(&app.fn_, arg, current_index, stack)?;
            let arg_ = substitute(&app.arg, arg, current_index, stack)?;
            Ok(Exp::Application(Application::new(fn_, arg_, app.span)))
        }
        Exp::Abstraction(inner) => {
            let name = freshen_on_beta(inner, arg, current_index, stack);
            stack.push(name.clone());
            let body = substitute(&inner.body, arg, current_index + 1, stack)?;
            stack.pop();
            Ok(Exp::Abstraction(Abstraction::new(
                name,
                body,
                inner.previous_bind,
                inner.span,
            )))
        }
        Exp::Assignment(asn) => Err(RuntimeErr::new(
            "cannot substitute into an assignment",
            asn.span,
        )),
    }
}

/// Rule S1: while substituting, a nested binder that already shadows an
/// outer name (`previous_bind.is_some()`) is renamed if `arg` brings in a
/// free reference to the ambient binder of the same display name — printing
/// the substituted copy under the original name would otherwise visually
/// (not semantically) capture it.
fn freshen_on_beta(
    inner: &Abstraction,
    arg: &Exp,
    current_index: u64,
    stack: &[String],
) -> String {
    if inner.previous_bind.is_none() {
        return inner.name.clone();
    }
    let Ok(free) = arg.free_variables(0) else {
        return inner.name.clone();
    };
    let collides = free.iter().any(|&distance| {
        let levels_above = current_index as usize + distance as usize - 1;
        stack
            .len()
            .checked_sub(levels_above)
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| stack.get(i))
            == Some(&inner.name)
    });
    if collides {
        let k = 1 + stack.iter().filter(|n| **n == inner.name).count();
        format!("{}({})", inner.name, k)
    } else {
        inner.name.clone()
    }
}

/// Rule S2: when splicing a dictionary value into the tree, rename any of
/// its free constants that would collide with a name already bound in the
/// ambient `stack`, and record `previous_bind` on any of its binders that
/// shadow an ambient name — matching what the parser would have recorded had
/// this subtree been parsed in place.
fn update_name_shadowing(exp: &mut Exp, stack: &mut Vec<String>) {
    match exp {
        Exp::Variable(_) => {}
        Exp::Constant(con) => {
            if let Some(pos) = stack.iter().rposition(|n| n == &con.name) {
                let k = 2 + stack[..pos].iter().filter(|n| **n == con.name).count();
                con.name = format!("{}({})", con.name, k);
            }
        }
        Exp::Abstraction(abs) => {
            let previous = stack.iter().rposition(|n| n == &abs.name);
            if let Some(pos) = previous {
                abs.previous_bind = Some(pos as u64);
            }
            stack.push(abs.name.clone());
            update_name_shadowing(&mut abs.body, stack);
            stack.pop();
        }
        Exp::Application(app) => {
            update_name_shadowing(&mut app.fn_, stack);
            update_name_shadowing(&mut app.arg, stack);
        }
        Exp::Assignment(asn) => update_name_shadowing(&mut asn.body, stack),
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::enc::core::par::parse;

    fn reduce(input: &str, dict: &mut Dict) -> String {
        solve(&parse(input).unwrap(), dict)
    }

    #[test]
    fn test_beta_reduction_to_constant() {
        let mut dict = Dict::new();
        assert_eq!(reduce("(\\x.x) y", &mut dict), "y");
    }

    #[test]
    fn test_church_boolean_selector() {
        let mut dict = Dict::new();
        let result = reduce(
            "(\\b.b (\\x y.y) (\\x y.x)) \\x y.x",
            &mut dict,
        );
        assert_eq!(result, "\\x.\\y.y");
    }

    #[test]
    fn test_eta_reduction() {
        let mut dict = Dict::new();
        assert_eq!(reduce("\\x.(\\y.y) x", &mut dict), "\\x.x");
    }

    #[test]
    fn test_assignment_then_reference() {
        let mut dict = Dict::new();
        assert_eq!(reduce("id = \\x.x", &mut dict), "Set constant id to \\x.x");
        assert_eq!(reduce("id y", &mut dict), "y");
    }

    #[test]
    fn test_self_assignment_deletes() {
        let mut dict = Dict::new();
        reduce("id = \\x.x", &mut dict);
        assert_eq!(reduce("id = id", &mut dict), "Deleted constant id");
        assert!(dict.get("id").is_none());
    }

    #[test]
    fn test_non_terminating_expression_errors() {
        // `(\x.x x)(\x.x x)` reduces to itself in a single step, so the
        // canonical-string fixed point fires immediately and this term does
        // *not* exceed the step cap. Use a term that keeps growing instead.
        let mut dict = Dict::new();
        let term = parse("(\\x.x x x) (\\x.x x x)").unwrap();
        assert!(try_solve(&term, &mut dict).is_err());
        assert_eq!(solve(&term, &mut dict), "");
    }

    #[test]
    fn test_and_definition_reduces_true_true_to_true() {
        let mut dict = Dict::new();
        reduce("true = \\x y.x", &mut dict);
        reduce("false = \\x y.y", &mut dict);
        reduce("and = \\x y.x y false", &mut dict);
        assert_eq!(reduce("and true true", &mut dict), "\\x.\\y.x");
    }
}
