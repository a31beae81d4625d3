//! Planning world contract: the minimal trait a world must implement.
//!
//! Worlds provide domain knowledge only: operators, methods, an initial
//! state, and the goal task list. Worlds may NOT implement plan validation
//! or fingerprinting — those are runner concerns.

use htn_kernel::state::State;
use htn_kernel::task::Task;
use htn_search::planner::Planner;

/// Typed failure for world construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// Initial state encoding failed.
    EncodeFailure { detail: String },
}

impl std::fmt::Display for WorldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EncodeFailure { detail } => {
                write!(f, "world state encoding failed: {detail}")
            }
        }
    }
}

impl std::error::Error for WorldError {}

/// The contract a world must implement to be run by the harness runner.
///
/// A world provides:
/// - A unique identifier
/// - Its operators and methods, registered through [`PlanningWorld::install`]
/// - An initial state
/// - The goal task list to solve
pub trait PlanningWorld {
    /// Unique world identifier (e.g., `"travel"`).
    fn world_id(&self) -> &str;

    /// Register this world's operators and methods on `planner`.
    fn install(&self, planner: &mut Planner);

    /// Build the initial state.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EncodeFailure`] if the state cannot be built.
    fn initial_state(&self) -> Result<State, WorldError>;

    /// The ordered goal task list.
    fn goal_tasks(&self) -> Vec<Task>;
}
