//! Harness runner: solve a world and validate the plan by replay.
//!
//! # Pipeline
//!
//! ```text
//! install() → initial_state() → fingerprint → solve()
//!   → replay plan over a duplicate of the initial state
//!   → fingerprint final state → build report
//! ```
//!
//! Replay is the plan-validity check made executable: every plan task must
//! name a registered operator, and every operator must be applicable at its
//! position. A well-behaved (pure) domain always replays; a replay failure
//! means the domain broke the purity contract.

use htn_kernel::canon::{canonical_hash, canonical_json_bytes, ContentHash, HashDomain};
use htn_kernel::state::State;
use htn_kernel::task::{Plan, Task};
use htn_search::planner::Planner;
use htn_search::policy::PlanPolicy;

use crate::contract::{PlanningWorld, WorldError};

/// Error during a harness run.
#[derive(Debug)]
pub enum RunError {
    /// World construction failed.
    World(WorldError),
    /// The search exhausted every alternative.
    NoPlanFound { world_id: String },
    /// A plan step did not replay against the initial state.
    ReplayFailed { step_index: usize, detail: String },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::World(err) => write!(f, "world error: {err}"),
            Self::NoPlanFound { world_id } => {
                write!(f, "no plan found for world `{world_id}`")
            }
            Self::ReplayFailed { step_index, detail } => {
                write!(f, "plan replay failed at step {step_index}: {detail}")
            }
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::World(err) => Some(err),
            _ => None,
        }
    }
}

/// The outcome of a successful run: the plan, the replayed final state, and
/// the fingerprints that bind them to the exact initial state.
#[derive(Debug)]
pub struct PlanReport {
    /// Which world was solved.
    pub world_id: String,
    /// The plan the search returned.
    pub plan: Plan,
    /// Fingerprint of the initial state the plan was produced from.
    pub initial_fingerprint: ContentHash,
    /// Digest of the plan transcript (`[[name, ...args], ...]`).
    pub plan_digest: ContentHash,
    /// The state reached by replaying the plan.
    pub final_state: State,
    /// Fingerprint of the replayed final state.
    pub final_fingerprint: ContentHash,
}

/// Solve `world` under `policy` and validate the plan by replay.
///
/// # Errors
///
/// - [`RunError::World`] if the world cannot build its initial state.
/// - [`RunError::NoPlanFound`] if the search exhausts every alternative.
/// - [`RunError::ReplayFailed`] if a plan step names no operator or is
///   inapplicable at its position (an impure domain).
pub fn run_world(world: &dyn PlanningWorld, policy: PlanPolicy) -> Result<PlanReport, RunError> {
    let mut planner = Planner::with_policy(policy);
    world.install(&mut planner);

    let initial = world.initial_state().map_err(RunError::World)?;
    let initial_fingerprint = initial.fingerprint();

    let tasks = world.goal_tasks();
    let plan = planner
        .solve(&initial, &tasks)
        .ok_or_else(|| RunError::NoPlanFound {
            world_id: world.world_id().to_string(),
        })?;

    let final_state = replay(&planner, &initial, &plan)?;
    let final_fingerprint = final_state.fingerprint();
    let plan_digest = digest_plan(&plan);

    Ok(PlanReport {
        world_id: world.world_id().to_string(),
        plan,
        initial_fingerprint,
        plan_digest,
        final_state,
        final_fingerprint,
    })
}

/// Apply each plan task's operator in order to a duplicate of `initial`.
fn replay(planner: &Planner, initial: &State, plan: &Plan) -> Result<State, RunError> {
    let mut current = initial.duplicate();
    for (step_index, task) in plan.iter().enumerate() {
        let operator =
            planner
                .operators()
                .get(task.name())
                .ok_or_else(|| RunError::ReplayFailed {
                    step_index,
                    detail: format!("plan task `{task}` names no registered operator"),
                })?;
        current = operator
            .apply(current, task.args())
            .ok_or_else(|| RunError::ReplayFailed {
                step_index,
                detail: format!("plan task `{task}` was not applicable during replay"),
            })?;
    }
    Ok(current)
}

fn digest_plan(plan: &Plan) -> ContentHash {
    let transcript = serde_json::Value::Array(plan.iter().map(Task::to_value).collect());
    canonical_hash(HashDomain::Plan, &canonical_json_bytes(&transcript))
}
