//! HTN Harness: world-level orchestration for the planner.
//!
//! The harness wires a world (a self-contained planning domain) into a
//! planner, solves it, and validates the returned plan by replaying it
//! against the initial state. The harness does NOT implement search logic —
//! it delegates to `htn_search`. Worlds provide domain data only; the
//! harness owns orchestration.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod runner;
pub mod worlds;
