//! Planning policy: the caller-facing search configuration.
//!
//! The engine itself imposes no recursion bound; a method that always
//! re-expands itself recurses until the stack gives out. Callers that want
//! a guard opt into one here. Exceeding the bound fails the branch like any
//! other inapplicable alternative (backtracking, not abort).

/// Search configuration threaded through the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlanPolicy {
    /// Depth cutoff. `None` (the default) means unbounded.
    pub max_depth: Option<u32>,
}

impl PlanPolicy {
    /// A policy with a recursion depth cutoff.
    #[must_use]
    pub fn bounded(max_depth: u32) -> Self {
        Self {
            max_depth: Some(max_depth),
        }
    }
}
