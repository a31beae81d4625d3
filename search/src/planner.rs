//! The planner facade: registration plus solve.
//!
//! Holds the two registries and the policy, and delegates `solve` to the
//! engine with an empty accumulated plan at depth 0. The facade is the only
//! writer of the registries; the engine only reads them. `solve` borrows
//! `self` and the state immutably, so a planner can serve any number of
//! sequential solves — and concurrent ones, if a caller shares it — without
//! hidden state carried between calls.

use htn_kernel::state::State;
use htn_kernel::task::{Plan, Task};

use crate::contract::{Method, Operator};
use crate::engine::seek_plan;
use crate::policy::PlanPolicy;
use crate::registry::{MethodRegistry, OperatorRegistry};

/// An HTN planner: operator and method catalogs plus a search policy.
#[derive(Debug, Default)]
pub struct Planner {
    operators: OperatorRegistry,
    methods: MethodRegistry,
    policy: PlanPolicy,
}

impl Planner {
    /// An empty planner with the default (unbounded) policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty planner with the given policy.
    #[must_use]
    pub fn with_policy(policy: PlanPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// The active policy.
    #[must_use]
    pub fn policy(&self) -> PlanPolicy {
        self.policy
    }

    /// Read access to the operator catalog (used by replay validation).
    #[must_use]
    pub fn operators(&self) -> &OperatorRegistry {
        &self.operators
    }

    /// Read access to the method catalog.
    #[must_use]
    pub fn methods(&self) -> &MethodRegistry {
        &self.methods
    }

    /// Register one operator, overwriting any previous one for `name`.
    pub fn register_operator<O: Operator + 'static>(
        &mut self,
        name: impl Into<String>,
        operator: O,
    ) {
        self.operators.insert(name, operator);
    }

    /// Merge a whole operator registry in; later registrations overwrite
    /// earlier ones with the same name.
    pub fn register_operators(&mut self, operators: OperatorRegistry) {
        self.operators.merge(operators);
    }

    /// Set the method list for `name`, replacing (not merging) any previous
    /// list. List order is resolution priority.
    pub fn set_methods(&mut self, name: impl Into<String>, methods: Vec<Box<dyn Method>>) {
        self.methods.set(name, methods);
    }

    /// Solve `tasks` from `state`, returning the first plan found under the
    /// fixed operator/method ordering, or `None` if every alternative at
    /// every choice point is exhausted.
    #[must_use]
    pub fn solve(&self, state: &State, tasks: &[Task]) -> Option<Plan> {
        seek_plan(
            &self.operators,
            &self.methods,
            state,
            tasks,
            &[],
            0,
            &self.policy,
        )
    }
}
