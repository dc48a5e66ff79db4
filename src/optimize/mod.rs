//! Exact section scheduling.
//!
//! # Pipeline
//!
//! 1. [`ConflictModel`]: release times, travel times, weights, and the
//!    disjunctive non-overlap constraints with headway
//! 2. [`MilpBackend`]: solves the model under a [`SolveBudget`]
//!    ([`GoodLpBackend`] by default)
//! 3. [`ExactOptimizer`]: enforces the time budget, falls back to the
//!    best dispatch incumbent when needed, checks the solution, and
//!    decodes a [`Schedule`]
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3
//! - Balas (1985), "On the facial structure of scheduling polyhedra"
//!
//! [`Schedule`]: crate::models::Schedule

mod conflict;
mod exact;
mod milp;

pub use conflict::{ConflictModel, ModelViolation};
pub use exact::{ExactOptimizer, OptimizationResult};
pub use milp::{GoodLpBackend, MilpBackend, MilpError, MilpSolution, SolveBudget, SolveStatus};
