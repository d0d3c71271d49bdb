//! Dictionary of named top-level definitions.

use super::Exp;
use std::collections::HashMap;

/// Mapping from identifier to the closed expression it was last assigned.
///
/// A [`Dict`] is owned by whoever drives the evaluator (typically a REPL
/// session); nothing in this crate treats it as process-wide or global
/// state. Entries are added or replaced by [`solve`][crate::reduce::solve]
/// when it finishes reducing a root-level [`Assignment`][super::Assignment];
/// replacing or removing an entry drops the prior value through ordinary
/// `HashMap` semantics.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Dict {
    entries: HashMap<String, Exp>,
}

impl Dict {
    /// Create a new, empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a name, returning a view of its current definition.
    pub fn get(&self, name: &str) -> Option<&Exp> {
        self.entries.get(name)
    }

    /// Insert or replace the definition bound to `name`, dropping any prior value.
    pub fn set(&mut self, name: impl Into<String>, term: Exp) {
        self.entries.insert(name.into(), term);
    }

    /// Remove the definition bound to `name`, if any.
    pub fn remove(&mut self, name: &str) {
        self.entries.remove(name);
    }

    /// Remove every definition.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of definitions currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary holds no definitions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::enc::core::par::parse;

    #[test]
    fn test_set_replaces_prior_value() {
        let mut dict = Dict::new();
        dict.set("id", parse("\\x.x").unwrap());
        dict.set("id", parse("\\x.x x").unwrap());
        assert_eq!(dict.len(), 1);
        assert_eq!(
            dict.get("id").unwrap().to_canonical_string(),
            parse("\\x.x x").unwrap().to_canonical_string()
        );
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut dict = Dict::new();
        dict.set("id", parse("\\x.x").unwrap());
        dict.remove("id");
        dict.remove("id");
        assert!(dict.is_empty());
    }
}
