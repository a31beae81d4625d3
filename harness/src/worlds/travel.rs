//! The reference travel world.
//!
//! A person travels between locations either on foot (distance ≤ 2) or by
//! taxi (call, ride, pay — cash permitting). State shape:
//!
//! ```text
//! loc:  { "me": "home", "taxi": ... }      current locations
//! cash: { "me": 20 }                        money on hand
//! owe:  { "me": 0 }                         outstanding fare
//! dist: { "home": { "park": 8 }, ... }     pairwise distances
//! ```
//!
//! `travel` is the compound task; `travel_by_foot` is registered before
//! `travel_by_taxi`, so walking wins whenever both would apply.

use serde_json::{json, Value};

use htn_kernel::state::State;
use htn_kernel::task::Task;
use htn_search::planner::Planner;

use crate::contract::{PlanningWorld, WorldError};

/// Taxi fare for a given distance.
#[must_use]
pub fn taxi_rate(distance: f64) -> f64 {
    1.5 + 0.5 * distance
}

fn three_strs(args: &[Value]) -> Option<(&str, &str, &str)> {
    match args {
        [a, b, c] => Some((a.as_str()?, b.as_str()?, c.as_str()?)),
        _ => None,
    }
}

/// Walk from `from` to `to`; applicable when `who` is at `from`.
pub fn walk(mut state: State, args: &[Value]) -> Option<State> {
    let (who, from, to) = three_strs(args)?;
    if state.str_at(&["loc", who]) != Some(from) {
        return None;
    }
    state.set_path(&["loc", who], json!(to));
    Some(state)
}

/// Summon the taxi to `from`. Always applicable.
pub fn call_taxi(mut state: State, args: &[Value]) -> Option<State> {
    let from = args.get(1)?.as_str()?;
    state.set_path(&["loc", "taxi"], json!(from));
    Some(state)
}

/// Ride the taxi from `from` to `to`; applicable when both `who` and the
/// taxi are at `from`. Leaves the fare owed.
pub fn ride_taxi(mut state: State, args: &[Value]) -> Option<State> {
    let (who, from, to) = three_strs(args)?;
    if state.str_at(&["loc", "taxi"]) != Some(from) || state.str_at(&["loc", who]) != Some(from) {
        return None;
    }
    let fare = taxi_rate(state.f64_at(&["dist", from, to])?);
    state.set_path(&["loc", "taxi"], json!(to));
    state.set_path(&["loc", who], json!(to));
    state.set_path(&["owe", who], json!(fare));
    Some(state)
}

/// Settle the outstanding fare; applicable when `who` can cover it.
pub fn pay_driver(mut state: State, args: &[Value]) -> Option<State> {
    let who = args.first()?.as_str()?;
    let cash = state.f64_at(&["cash", who])?;
    let owed = state.f64_at(&["owe", who])?;
    if cash < owed {
        return None;
    }
    state.set_path(&["cash", who], json!(cash - owed));
    state.set_path(&["owe", who], json!(0));
    Some(state)
}

/// Decompose `travel` into a single walk when the distance allows it.
pub fn travel_by_foot(state: &State, args: &[Value]) -> Option<Vec<Task>> {
    let (who, from, to) = three_strs(args)?;
    let distance = state.f64_at(&["dist", from, to])?;
    (distance <= 2.0).then(|| vec![Task::from_strs("walk", &[who, from, to])])
}

/// Decompose `travel` into the taxi sequence, cash permitting.
///
/// Skips the `call_taxi` step when the taxi is already where `who` is.
pub fn travel_by_taxi(state: &State, args: &[Value]) -> Option<Vec<Task>> {
    let (who, from, to) = three_strs(args)?;
    let distance = state.f64_at(&["dist", from, to])?;
    if distance <= 2.0 {
        // Walkable; leave it to travel_by_foot.
        return None;
    }
    if state.f64_at(&["cash", who])? < taxi_rate(distance) {
        return None;
    }
    let who_loc = state.str_at(&["loc", who])?;
    let mut subtasks = Vec::new();
    if state.str_at(&["loc", "taxi"]) != Some(who_loc) {
        subtasks.push(Task::from_strs("call_taxi", &[who, from]));
    }
    subtasks.push(Task::from_strs("ride_taxi", &[who, from, to]));
    subtasks.push(Task::from_strs("pay_driver", &[who]));
    Some(subtasks)
}

/// The travel world: home and park with configurable distances and cash.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelWorld {
    /// Distance home → park.
    pub distance_out: f64,
    /// Distance park → home.
    pub distance_back: f64,
    /// Cash `me` starts with.
    pub cash: f64,
    /// Whether the goal includes the return trip.
    pub round_trip: bool,
}

impl TravelWorld {
    /// The park is far (8) and there is taxi money: the taxi sequence wins.
    #[must_use]
    pub fn far_park() -> Self {
        Self {
            distance_out: 8.0,
            distance_back: 8.0,
            cash: 20.0,
            round_trip: false,
        }
    }

    /// The park is near (1.3): walking wins even with little cash.
    #[must_use]
    pub fn near_park() -> Self {
        Self {
            distance_out: 1.3,
            distance_back: 1.3,
            cash: 2.0,
            round_trip: false,
        }
    }

    /// There and back, with a far outbound leg and a short return.
    #[must_use]
    pub fn round_trip() -> Self {
        Self {
            distance_out: 8.0,
            distance_back: 1.3,
            cash: 20.0,
            round_trip: true,
        }
    }
}

impl PlanningWorld for TravelWorld {
    fn world_id(&self) -> &str {
        "travel"
    }

    fn install(&self, planner: &mut Planner) {
        planner.register_operator("walk", walk);
        planner.register_operator("call_taxi", call_taxi);
        planner.register_operator("ride_taxi", ride_taxi);
        planner.register_operator("pay_driver", pay_driver);
        planner.set_methods(
            "travel",
            vec![Box::new(travel_by_foot), Box::new(travel_by_taxi)],
        );
    }

    fn initial_state(&self) -> Result<State, WorldError> {
        State::from_object(json!({
            "loc": { "me": "home" },
            "cash": { "me": self.cash },
            "owe": { "me": 0 },
            "dist": {
                "home": { "park": self.distance_out },
                "park": { "home": self.distance_back },
            },
        }))
        .ok_or_else(|| WorldError::EncodeFailure {
            detail: "travel state literal is not an object".to_string(),
        })
    }

    fn goal_tasks(&self) -> Vec<Task> {
        let mut tasks = vec![Task::from_strs("travel", &["me", "home", "park"])];
        if self.round_trip {
            tasks.push(Task::from_strs("travel", &["me", "park", "home"]));
        }
        tasks
    }
}
