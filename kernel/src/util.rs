//! Sequence and mapping utilities the search engine depends on.
//!
//! Three operations, all total:
//!
//! - [`deep_clone`] — structural duplication of a JSON value
//! - [`tail`] — everything after the first element of a slice
//! - [`extend`] — merge one mapping into another, overwriting on collision
//!
//! `deep_clone` is the isolation primitive: every recursion branch of the
//! engine works on a duplicate produced here, which is what makes
//! backtracking safe without any undo machinery.

use std::collections::BTreeMap;

use serde_json::Value;

/// Structurally duplicate a JSON value.
///
/// Objects and arrays are rebuilt entry-by-entry with every value itself
/// deep-cloned; scalars are copied. Cyclic graphs are unrepresentable in
/// `Value`, so recursion always terminates.
#[must_use]
pub fn deep_clone(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = serde_json::Map::new();
            for (key, entry) in map {
                out.insert(key.clone(), deep_clone(entry));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(deep_clone).collect()),
        scalar => scalar.clone(),
    }
}

/// All elements after the first, as a fresh `Vec`.
///
/// The input slice is untouched. Empty and single-element inputs both
/// yield an empty `Vec`.
#[must_use]
pub fn tail<T: Clone>(items: &[T]) -> Vec<T> {
    items.get(1..).map(<[T]>::to_vec).unwrap_or_default()
}

/// Merge every entry of `source` into `target`, overwriting on key
/// collision, and return the mutated target.
pub fn extend<V>(
    target: &mut BTreeMap<String, V>,
    source: BTreeMap<String, V>,
) -> &mut BTreeMap<String, V> {
    for (key, value) in source {
        target.insert(key, value);
    }
    target
}
