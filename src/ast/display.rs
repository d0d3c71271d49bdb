//! Human-readable rendering of an [`Exp`], recovering binder names.
//!
//! Unlike [`Exp::to_canonical_string`], this rendering walks an explicit
//! stack of binder names so that a bound [`Variable`][super::Variable] can be
//! printed using the name its binder was parsed with, rather than its raw
//! index. The stack is pushed on entering an [`Abstraction`][super::Abstraction]
//! and popped on leaving it — the same discipline the parser uses for
//! `bind_levels`/`bind_count`, kept here as an explicit argument instead of
//! process-wide state.

use super::Exp;

impl Exp {
    /// Render this expression for a human reader, using recovered binder names.
    pub fn to_display_string(&self) -> String {
        let mut stack = Vec::new();
        self.render(&mut stack)
    }

    fn render(&self, stack: &mut Vec<String>) -> String {
        match self {
            Exp::Variable(var) => stack
                .len()
                .checked_sub(var.index as usize)
                .and_then(|i| stack.get(i))
                .cloned()
                .unwrap_or_else(|| format!("#{}", var.index)),
            Exp::Constant(con) => con.name.clone(),
            Exp::Abstraction(abs) => {
                stack.push(abs.name.clone());
                let body = abs.body.render(stack);
                stack.pop();
                format!("\\{}.{}", abs.name, body)
            }
            Exp::Application(app) => {
                let fn_str = match app.fn_.as_ref() {
                    Exp::Abstraction(_) => format!("({})", app.fn_.render(stack)),
                    _ => app.fn_.render(stack),
                };
                let arg_str = match app.arg.as_ref() {
                    Exp::Abstraction(_) => format!("({})", app.arg.render(stack)),
                    Exp::Application(_) => format!("[{}]", app.arg.render(stack)),
                    _ => app.arg.render(stack),
                };
                format!("{} {}", fn_str, arg_str)
            }
            Exp::Assignment(asn) => format!("{} = {}", asn.name, asn.body.render(stack)),
        }
    }
}

#[cfg(test)]
mod test {

    use crate::enc::core::par::parse;

    #[test]
    fn test_display_identity() {
        let exp = parse("\\x.x").unwrap();
        assert_eq!(exp.to_display_string(), "\\x.x");
    }

    #[test]
    fn test_display_application_bracketing() {
        let exp = parse("(\\x.x) y").unwrap();
        assert_eq!(exp.to_display_string(), "(\\x.x) y");
    }

    #[test]
    fn test_display_nested_abstraction() {
        let exp = parse("\\x y.x").unwrap();
        assert_eq!(exp.to_display_string(), "\\x.\\y.x");
    }
}
