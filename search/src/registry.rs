//! Name-keyed catalogs of domain capabilities.
//!
//! Two registries, two mutation disciplines:
//!
//! - [`OperatorRegistry`]: one operator per name, **merge** semantics on
//!   registration (later registration overwrites earlier).
//! - [`MethodRegistry`]: an ordered method list per name, **replace**
//!   semantics per name; list order is resolution priority (first listed,
//!   first tried).
//!
//! The engine only ever reads these; writes happen through explicit
//! registration calls on the planner facade.

use std::collections::BTreeMap;

use htn_kernel::util::extend;

use crate::contract::{Method, Operator};

/// Catalog mapping task names to exactly one operator each.
#[derive(Default)]
pub struct OperatorRegistry {
    entries: BTreeMap<String, Box<dyn Operator>>,
}

impl OperatorRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one operator under `name`, overwriting any previous one.
    pub fn insert<O: Operator + 'static>(&mut self, name: impl Into<String>, operator: O) {
        self.entries.insert(name.into(), Box::new(operator));
    }

    /// Merge another registry into this one, overwriting on collision.
    pub fn merge(&mut self, other: OperatorRegistry) {
        extend(&mut self.entries, other.entries);
    }

    /// Look up the operator registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Operator> {
        self.entries.get(name).map(AsRef::as_ref)
    }

    /// Whether `name` resolves to an operator (i.e. is primitive).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for OperatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}

/// Catalog mapping task names to their ordered method alternatives.
#[derive(Default)]
pub struct MethodRegistry {
    entries: BTreeMap<String, Vec<Box<dyn Method>>>,
}

impl MethodRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the method list for `name`, replacing any previous list.
    pub fn set(&mut self, name: impl Into<String>, methods: Vec<Box<dyn Method>>) {
        self.entries.insert(name.into(), methods);
    }

    /// The method alternatives for `name`, in priority order.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[Box<dyn Method>]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Whether `name` resolves to at least a method list (i.e. is compound).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}

impl std::fmt::Debug for MethodRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (name, methods) in &self.entries {
            map.entry(name, &methods.len());
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use htn_kernel::state::State;
    use htn_kernel::task::Task;
    use serde_json::{json, Value};

    fn tag_operator(tag: &'static str) -> impl Operator {
        move |mut state: State, _args: &[Value]| {
            state.insert("tag", json!(tag));
            Some(state)
        }
    }

    #[test]
    fn later_operator_registration_overwrites() {
        let mut ops = OperatorRegistry::new();
        ops.insert("go", tag_operator("first"));
        ops.insert("go", tag_operator("second"));

        let out = ops
            .get("go")
            .expect("registered")
            .apply(State::new(), &[])
            .expect("applicable");
        assert_eq!(out.get("tag"), Some(&json!("second")));
    }

    #[test]
    fn merge_overwrites_collisions_and_keeps_the_rest() {
        let mut base = OperatorRegistry::new();
        base.insert("go", tag_operator("base"));
        base.insert("stay", tag_operator("base"));

        let mut incoming = OperatorRegistry::new();
        incoming.insert("go", tag_operator("incoming"));

        base.merge(incoming);
        assert!(base.contains("stay"));
        let out = base
            .get("go")
            .expect("registered")
            .apply(State::new(), &[])
            .expect("applicable");
        assert_eq!(out.get("tag"), Some(&json!("incoming")));
    }

    #[test]
    fn set_methods_replaces_the_whole_list() {
        let expand = |_: &State, _: &[Value]| Some(vec![Task::from_strs("noop", &[])]);
        let mut methods = MethodRegistry::new();
        methods.set("travel", vec![Box::new(expand), Box::new(expand)]);
        methods.set("travel", vec![Box::new(expand)]);
        assert_eq!(methods.get("travel").map(<[_]>::len), Some(1));
    }

    #[test]
    fn unknown_names_resolve_to_nothing() {
        let ops = OperatorRegistry::new();
        let methods = MethodRegistry::new();
        assert!(ops.get("warp").is_none());
        assert_eq!(ops.names().count(), 0);
        assert!(!methods.contains("warp"));
    }
}
