//! HTN Search: recursive decompose-and-backtrack planning.
//!
//! This crate is the core of the planner: the capability contracts domain
//! code implements, the name-keyed registries that hold them, and the
//! recursive [`engine::seek_plan`] procedure with its backtracking
//! discipline. It depends only on `htn_kernel` — it does NOT depend on
//! `htn_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! htn_kernel  ←  htn_search  ←  htn_harness
//! (state, tasks)  (engine, planner)  (worlds, runner)
//! ```
//!
//! # Key types
//!
//! - [`contract::Operator`] / [`contract::Method`] — the two capability
//!   traits a domain implements (closures work via blanket impls)
//! - [`registry::OperatorRegistry`] / [`registry::MethodRegistry`] — the
//!   name-keyed catalogs the engine resolves against
//! - [`policy::PlanPolicy`] — opt-in recursion depth bound
//! - [`planner::Planner`] — the registration + solve facade

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod engine;
pub mod planner;
pub mod policy;
pub mod registry;
