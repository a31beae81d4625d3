//! HTN Kernel: the data-model leaf of the planner.
//!
//! Holds everything the search layer consumes but does not own: the `State`
//! carrier, `Task`/`Plan` types, the sequence/mapping utilities the engine
//! depends on for correctness, and canonical-bytes fingerprinting for states
//! and plans.
//!
//! # Module Dependency Direction
//!
//! `util`, `canon` ← `state`; `task` stands alone.
//!
//! One-way only. No cycles. `util` and `canon` depend on nothing internal.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod canon;
pub mod state;
pub mod task;
pub mod util;
