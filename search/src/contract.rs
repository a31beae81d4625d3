//! Domain capability contracts: the two traits caller code implements.
//!
//! Failure is not an error anywhere in these contracts. "Not applicable" is
//! an ordinary, expected outcome expressed as `None`; it triggers
//! backtracking in the engine, never an abort.

use htn_kernel::state::State;
use htn_kernel::task::Task;
use serde_json::Value;

/// A primitive action: transforms a state directly.
///
/// # Contract
///
/// - Receives an *owned duplicate* of the branch state; the engine
///   duplicates before every invocation, so the operator may freely mutate
///   what it is handed and return it as the successor.
/// - Returns `None` when the action's preconditions do not hold in the
///   given state. This is backtracking fuel, not an error.
/// - Must be pure with respect to everything except the handed-in state:
///   same state and arguments, same answer.
pub trait Operator {
    /// Apply the action, returning the successor state or `None` if the
    /// action is not applicable.
    fn apply(&self, state: State, args: &[Value]) -> Option<State>;
}

impl<F> Operator for F
where
    F: Fn(State, &[Value]) -> Option<State>,
{
    fn apply(&self, state: State, args: &[Value]) -> Option<State> {
        self(state, args)
    }
}

/// A decomposition rule: rewrites a compound task into subtasks.
///
/// # Contract
///
/// - Receives the *live* branch state by shared reference. Non-mutation is
///   enforced by the type system here, not by convention.
/// - Returns the ordered subtask sequence to splice in place of the
///   compound task (empty is legal and means "nothing to do"), or `None`
///   when this rule does not apply.
/// - Same purity requirement as [`Operator`].
pub trait Method {
    /// Decompose the task, returning subtasks or `None` if this rule is
    /// not applicable.
    fn decompose(&self, state: &State, args: &[Value]) -> Option<Vec<Task>>;
}

impl<F> Method for F
where
    F: Fn(&State, &[Value]) -> Option<Vec<Task>>,
{
    fn decompose(&self, state: &State, args: &[Value]) -> Option<Vec<Task>> {
        self(state, args)
    }
}
