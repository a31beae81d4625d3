//! Task and plan types.
//!
//! A task is a name plus an ordered, heterogeneous argument list. Whether a
//! task is primitive or compound is not a property of the task itself; it is
//! decided at solve time by which registry recognizes the name.

use serde_json::Value;

/// An immutable task: a name and its arguments.
///
/// Arguments are opaque to the engine; their count and meaning follow the
/// task name's convention, which only the domain knows.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    name: String,
    args: Vec<Value>,
}

/// The ordered sequence of primitive tasks returned on success.
pub type Plan = Vec<Task>;

impl Task {
    /// Build a task from a name and argument list.
    #[must_use]
    pub fn new(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Build a task whose arguments are all strings.
    ///
    /// Covers the common case of entity/location arguments without
    /// `json!` noise at every call site.
    #[must_use]
    pub fn from_strs(name: &str, args: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            args: args.iter().map(|a| Value::String((*a).to_string())).collect(),
        }
    }

    /// The task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The argument list, in order.
    #[must_use]
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// The argument at `index`, if present.
    #[must_use]
    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }

    /// The argument at `index` as a string slice, if present and a string.
    #[must_use]
    pub fn str_arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).and_then(Value::as_str)
    }

    /// Serialize to the transcript array form `[name, ...args]`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut items = Vec::with_capacity(1 + self.args.len());
        items.push(Value::String(self.name.clone()));
        items.extend(self.args.iter().cloned());
        Value::Array(items)
    }
}

impl std::fmt::Display for Task {
    /// Diagnostic form: `name(arg, arg, ...)`, string arguments unquoted.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match arg.as_str() {
                Some(s) => write!(f, "{s}")?,
                None => write!(f, "{arg}")?,
            }
        }
        write!(f, ")")
    }
}
