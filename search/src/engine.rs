//! The search engine: recursive, depth-first, backtracking plan seeking.
//!
//! There is no explicit choice-point stack; the recursion stack itself
//! encodes every open alternative. Each primitive attempt runs against its
//! own state duplicate, so abandoning a branch requires no undo.
//!
//! Failure is the absence value `None` at every level: an inapplicable
//! operator, an inapplicable method, an unknown task name, and a fully
//! exhausted search all look identical to the caller above.

use htn_kernel::state::State;
use htn_kernel::task::{Plan, Task};
use htn_kernel::util::tail;

use crate::policy::PlanPolicy;
use crate::registry::{MethodRegistry, OperatorRegistry};

/// Seek a plan for `tasks` from `state`.
///
/// `plan` is the accumulated prefix of finalized primitive tasks; `depth`
/// counts recursion levels and has no effect on branching unless the policy
/// carries a `max_depth`.
///
/// Resolution order for the head task:
///
/// 1. If its name has a registered operator, duplicate the state, apply the
///    operator, and recurse on success. A successful recursion wins
///    outright and shadows the compound branch.
/// 2. If its name has registered methods, try each in registration order
///    against the live state, splicing the returned subtasks in place of
///    the head. First successful recursion wins.
/// 3. Otherwise this branch fails.
#[must_use]
pub fn seek_plan(
    operators: &OperatorRegistry,
    methods: &MethodRegistry,
    state: &State,
    tasks: &[Task],
    plan: &[Task],
    depth: u32,
    policy: &PlanPolicy,
) -> Option<Plan> {
    if policy.max_depth.is_some_and(|limit| depth > limit) {
        return None;
    }

    // Sole success path: nothing left to resolve.
    let Some(task1) = tasks.first() else {
        return Some(plan.to_vec());
    };
    let rest = tail(tasks);

    if let Some(operator) = operators.get(task1.name()) {
        if let Some(successor) = operator.apply(state.duplicate(), task1.args()) {
            let mut extended = plan.to_vec();
            extended.push(task1.clone());
            let solution = seek_plan(
                operators,
                methods,
                &successor,
                &rest,
                &extended,
                depth + 1,
                policy,
            );
            if solution.is_some() {
                return solution;
            }
        }
    }

    if let Some(alternatives) = methods.get(task1.name()) {
        for method in alternatives {
            let Some(subtasks) = method.decompose(state, task1.args()) else {
                continue;
            };
            let mut spliced = subtasks;
            spliced.extend(rest.iter().cloned());
            let solution = seek_plan(operators, methods, state, &spliced, plan, depth + 1, policy);
            if solution.is_some() {
                return solution;
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    // A tiny counter domain: `bump` increments "n"; check operators gate on
    // its value; compound tasks decompose into bump sequences.

    fn bump(mut state: State, _args: &[Value]) -> Option<State> {
        let n = state.f64_at(&["n"])?;
        state.insert("n", json!(n + 1.0));
        Some(state)
    }

    fn counter_state(n: f64) -> State {
        State::from_object(json!({ "n": n })).expect("object literal")
    }

    fn ops_with_bump() -> OperatorRegistry {
        let mut ops = OperatorRegistry::new();
        ops.insert("bump", bump);
        ops
    }

    fn solve(
        ops: &OperatorRegistry,
        methods: &MethodRegistry,
        state: &State,
        tasks: &[Task],
    ) -> Option<Plan> {
        seek_plan(ops, methods, state, tasks, &[], 0, &PlanPolicy::default())
    }

    #[test]
    fn empty_task_list_succeeds_with_the_accumulated_plan() {
        let ops = OperatorRegistry::new();
        let methods = MethodRegistry::new();
        let plan = solve(&ops, &methods, &State::new(), &[]).expect("base case");
        assert!(plan.is_empty());
    }

    #[test]
    fn unknown_task_name_fails() {
        let ops = ops_with_bump();
        let methods = MethodRegistry::new();
        let tasks = [Task::from_strs("warp", &[])];
        assert!(solve(&ops, &methods, &counter_state(0.0), &tasks).is_none());
    }

    #[test]
    fn primitive_tasks_are_applied_in_order() {
        let ops = ops_with_bump();
        let methods = MethodRegistry::new();
        let tasks = [Task::from_strs("bump", &[]), Task::from_strs("bump", &[])];
        let plan = solve(&ops, &methods, &counter_state(0.0), &tasks).expect("plan");
        assert_eq!(plan.len(), 2);
        assert!(plan.iter().all(|t| t.name() == "bump"));
    }

    #[test]
    fn inapplicable_operator_with_no_methods_fails() {
        let mut ops = OperatorRegistry::new();
        ops.insert("need_flag", |state: State, _args: &[Value]| {
            state.get("flag").is_some().then_some(state)
        });
        let methods = MethodRegistry::new();
        let tasks = [Task::from_strs("need_flag", &[])];
        assert!(solve(&ops, &methods, &State::new(), &tasks).is_none());
    }

    #[test]
    fn successful_operator_shadows_methods_for_the_same_name() {
        let mut ops = ops_with_bump();
        ops.insert("step", bump);
        let mut methods = MethodRegistry::new();
        // A method for the same name that would also succeed; it must never run.
        methods.set(
            "step",
            vec![Box::new(|_: &State, _: &[Value]| {
                Some(vec![
                    Task::from_strs("bump", &[]),
                    Task::from_strs("bump", &[]),
                ])
            })],
        );
        let tasks = [Task::from_strs("step", &[])];
        let plan = solve(&ops, &methods, &counter_state(0.0), &tasks).expect("plan");
        assert_eq!(plan.len(), 1, "operator wins outright, no expansion");
        assert_eq!(plan[0].name(), "step");
    }

    #[test]
    fn failed_operator_falls_through_to_methods() {
        let mut ops = ops_with_bump();
        ops.insert("step", |state: State, _args: &[Value]| {
            // Applicable only when the flag is present; it never is here.
            state.get("flag").is_some().then_some(state)
        });
        let mut methods = MethodRegistry::new();
        methods.set(
            "step",
            vec![Box::new(|_: &State, _: &[Value]| {
                Some(vec![Task::from_strs("bump", &[])])
            })],
        );
        let tasks = [Task::from_strs("step", &[])];
        let plan = solve(&ops, &methods, &counter_state(0.0), &tasks).expect("plan");
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].name(), "bump", "resolution went through the method");
    }

    #[test]
    fn operator_success_with_failing_continuation_still_tries_methods() {
        // "finish" is primitive and applicable, but leaves n at 1, where the
        // trailing "check3" task fails. The method alternative expands to
        // three bumps, under which "check3" succeeds.
        let mut ops = ops_with_bump();
        ops.insert("finish", bump);
        ops.insert("check3", |state: State, _args: &[Value]| {
            (state.f64_at(&["n"]) == Some(3.0)).then_some(state)
        });
        let mut methods = MethodRegistry::new();
        methods.set(
            "finish",
            vec![Box::new(|_: &State, _: &[Value]| {
                Some(vec![
                    Task::from_strs("bump", &[]),
                    Task::from_strs("bump", &[]),
                    Task::from_strs("bump", &[]),
                ])
            })],
        );
        let tasks = [Task::from_strs("finish", &[]), Task::from_strs("check3", &[])];
        let plan = solve(&ops, &methods, &counter_state(0.0), &tasks).expect("plan");
        let names: Vec<&str> = plan.iter().map(Task::name).collect();
        assert_eq!(names, ["bump", "bump", "bump", "check3"]);
    }

    #[test]
    fn methods_are_tried_in_registration_order_with_backtracking() {
        let mut ops = ops_with_bump();
        ops.insert("check2", |state: State, _args: &[Value]| {
            (state.f64_at(&["n"]) == Some(2.0)).then_some(state)
        });
        let mut methods = MethodRegistry::new();
        methods.set(
            "reach2",
            vec![
                // First alternative: one bump. Leads to check2 failing at n=1.
                Box::new(|_: &State, _: &[Value]| Some(vec![Task::from_strs("bump", &[])])),
                // Second alternative: two bumps. Succeeds.
                Box::new(|_: &State, _: &[Value]| {
                    Some(vec![
                        Task::from_strs("bump", &[]),
                        Task::from_strs("bump", &[]),
                    ])
                }),
            ],
        );
        let tasks = [Task::from_strs("reach2", &[]), Task::from_strs("check2", &[])];
        let plan = solve(&ops, &methods, &counter_state(0.0), &tasks).expect("plan");
        let names: Vec<&str> = plan.iter().map(Task::name).collect();
        assert_eq!(
            names,
            ["bump", "bump", "check2"],
            "no task from the abandoned first alternative may leak into the plan"
        );
    }

    #[test]
    fn inapplicable_methods_are_skipped() {
        let ops = ops_with_bump();
        let mut methods = MethodRegistry::new();
        methods.set(
            "step",
            vec![
                Box::new(|_: &State, _: &[Value]| -> Option<Vec<Task>> { None }),
                Box::new(|_: &State, _: &[Value]| Some(vec![Task::from_strs("bump", &[])])),
            ],
        );
        let tasks = [Task::from_strs("step", &[])];
        let plan = solve(&ops, &methods, &counter_state(0.0), &tasks).expect("plan");
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn subtasks_are_spliced_before_the_remaining_tasks() {
        let ops = ops_with_bump();
        let mut methods = MethodRegistry::new();
        methods.set(
            "twice",
            vec![Box::new(|_: &State, _: &[Value]| {
                Some(vec![
                    Task::from_strs("bump", &["a"]),
                    Task::from_strs("bump", &["b"]),
                ])
            })],
        );
        let tasks = [Task::from_strs("twice", &[]), Task::from_strs("bump", &["c"])];
        let plan = solve(&ops, &methods, &counter_state(0.0), &tasks).expect("plan");
        let tags: Vec<Option<&str>> = plan.iter().map(|t| t.str_arg(0)).collect();
        assert_eq!(tags, [Some("a"), Some("b"), Some("c")]);
    }

    #[test]
    fn empty_decomposition_is_legal_and_consumes_the_task() {
        let ops = ops_with_bump();
        let mut methods = MethodRegistry::new();
        methods.set(
            "nothing_to_do",
            vec![Box::new(|_: &State, _: &[Value]| Some(Vec::new()))],
        );
        let tasks = [
            Task::from_strs("nothing_to_do", &[]),
            Task::from_strs("bump", &[]),
        ];
        let plan = solve(&ops, &methods, &counter_state(0.0), &tasks).expect("plan");
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].name(), "bump");
    }

    #[test]
    fn failed_branch_mutations_do_not_leak_to_sibling_alternatives() {
        // "poison" mutates its duplicate, then the continuation fails.
        // The method alternative observes the live state and must not see
        // the poison flag.
        let mut ops = OperatorRegistry::new();
        ops.insert("step", |mut state: State, _args: &[Value]| {
            state.insert("poisoned", json!(true));
            Some(state)
        });
        ops.insert("fail", |_: State, _: &[Value]| -> Option<State> { None });
        ops.insert("noop", |state: State, _: &[Value]| Some(state));
        let mut methods = MethodRegistry::new();
        methods.set(
            "step",
            vec![Box::new(|state: &State, _: &[Value]| {
                assert!(
                    state.get("poisoned").is_none(),
                    "abandoned primitive branch leaked into the live state"
                );
                Some(vec![Task::from_strs("noop", &[])])
            })],
        );
        let tasks = [Task::from_strs("step", &[]), Task::from_strs("fail", &[])];
        // Overall failure ("fail" is never applicable), but the method ran
        // its assertion along the way.
        assert!(solve(&ops, &methods, &State::new(), &tasks).is_none());
    }

    #[test]
    fn depth_bound_fails_a_runaway_expansion() {
        // "loop" always re-expands itself; only the bound stops it.
        let ops = OperatorRegistry::new();
        let mut methods = MethodRegistry::new();
        methods.set(
            "loop",
            vec![Box::new(|_: &State, _: &[Value]| {
                Some(vec![Task::from_strs("loop", &[])])
            })],
        );
        let tasks = [Task::from_strs("loop", &[])];
        let solution = seek_plan(
            &ops,
            &methods,
            &State::new(),
            &tasks,
            &[],
            0,
            &PlanPolicy::bounded(64),
        );
        assert!(solution.is_none());
    }

    #[test]
    fn depth_bound_failure_backtracks_to_a_shallow_alternative() {
        let ops = ops_with_bump();
        let mut methods = MethodRegistry::new();
        methods.set(
            "step",
            vec![
                // Deep alternative: re-expands itself forever.
                Box::new(|_: &State, _: &[Value]| Some(vec![Task::from_strs("step", &[])])),
                // Shallow alternative.
                Box::new(|_: &State, _: &[Value]| Some(vec![Task::from_strs("bump", &[])])),
            ],
        );
        let tasks = [Task::from_strs("step", &[])];
        let plan = seek_plan(
            &ops,
            &methods,
            &counter_state(0.0),
            &tasks,
            &[],
            0,
            &PlanPolicy::bounded(16),
        );
        // The runaway first alternative exhausts its depth budget at every
        // level, after which the second alternative closes the plan.
        let plan = plan.expect("shallow alternative must win");
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].name(), "bump");
    }
}
