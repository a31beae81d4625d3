//! The world-state carrier.
//!
//! A `State` is an arbitrary string-keyed mapping of JSON values (values may
//! themselves be nested mappings). The planner imposes no schema: domains
//! read and write whatever shape they care about through the path accessors.
//!
//! `State` deliberately does not implement `Clone`. Duplication is the
//! engine's isolation primitive and must stay a visible, explicit operation:
//! [`State::duplicate`].

use std::collections::BTreeMap;

use serde_json::Value;

use crate::canon::{canonical_hash, canonical_json_bytes, ContentHash, HashDomain};
use crate::util::{deep_clone, extend};

/// A string-keyed mapping of JSON values representing the whole world a
/// domain cares about.
#[derive(Debug, Default, PartialEq)]
pub struct State {
    entries: BTreeMap<String, Value>,
}

impl State {
    /// An empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from a JSON object.
    ///
    /// Returns `None` if `value` is not an object.
    #[must_use]
    pub fn from_object(value: Value) -> Option<Self> {
        let Value::Object(map) = value else {
            return None;
        };
        Some(Self {
            entries: map.into_iter().collect(),
        })
    }

    /// The state as a JSON object value (entries deep-cloned).
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map = serde_json::Map::new();
        for (key, value) in &self.entries {
            map.insert(key.clone(), deep_clone(value));
        }
        Value::Object(map)
    }

    /// Insert or replace a top-level entry.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    /// Read a top-level entry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Read a nested entry by key path, e.g. `&["loc", "me"]`.
    #[must_use]
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        let mut current = self.entries.get(*first)?;
        for key in rest {
            current = current.get(key)?;
        }
        Some(current)
    }

    /// Read a nested entry as an `f64`.
    #[must_use]
    pub fn f64_at(&self, path: &[&str]) -> Option<f64> {
        self.get_path(path).and_then(Value::as_f64)
    }

    /// Read a nested entry as a string slice.
    #[must_use]
    pub fn str_at(&self, path: &[&str]) -> Option<&str> {
        self.get_path(path).and_then(Value::as_str)
    }

    /// Write a nested entry by key path, creating intermediate objects as
    /// needed. A non-object intermediate is replaced by an object.
    ///
    /// An empty path is a no-op.
    pub fn set_path(&mut self, path: &[&str], value: Value) {
        let Some((first, rest)) = path.split_first() else {
            return;
        };
        if rest.is_empty() {
            self.entries.insert((*first).to_string(), value);
            return;
        }
        let slot = self
            .entries
            .entry((*first).to_string())
            .or_insert_with(|| Value::Object(serde_json::Map::new()));
        set_value_path(slot, rest, value);
    }

    /// Merge every entry of `other` into this state, overwriting on
    /// top-level key collision.
    pub fn merge(&mut self, other: State) {
        extend(&mut self.entries, other.entries);
    }

    /// Deep-copy this state.
    ///
    /// The engine calls this once per primitive-task attempt; the duplicate
    /// is owned exclusively by that recursion branch.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        let mut entries = BTreeMap::new();
        for (key, value) in &self.entries {
            entries.insert(key.clone(), deep_clone(value));
        }
        Self { entries }
    }

    /// Content-addressed fingerprint of this state (canonical JSON bytes,
    /// SHA-256, `State` hash domain).
    #[must_use]
    pub fn fingerprint(&self) -> ContentHash {
        let bytes = canonical_json_bytes(&self.to_value());
        canonical_hash(HashDomain::State, &bytes)
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the state has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn set_value_path(slot: &mut Value, path: &[&str], value: Value) {
    let Some((first, rest)) = path.split_first() else {
        return;
    };
    if !matches!(slot, Value::Object(_)) {
        *slot = Value::Object(serde_json::Map::new());
    }
    if let Value::Object(map) = slot {
        if rest.is_empty() {
            map.insert((*first).to_string(), value);
        } else {
            let next = map.entry(*first).or_insert(Value::Null);
            set_value_path(next, rest, value);
        }
    }
}
