//! Dispatching rules and precedence ranking for trains.
//!
//! Provides priority-based dispatching rules and a composable rule
//! engine that turns them into a total train order.
//!
//! # Usage
//!
//! ```
//! use chrono::Utc;
//! use section_sched::dispatching::{RuleEngine, SchedulingContext};
//! use section_sched::dispatching::rules;
//! use section_sched::models::{PriorityTier, Train};
//!
//! let trains = vec![
//!     Train::new(1).with_priority(PriorityTier::Low),
//!     Train::new(2).with_priority(PriorityTier::Critical),
//! ];
//! let engine = RuleEngine::new()
//!     .with_rule(rules::PriorityScore)
//!     .with_tie_breaker(rules::EarliestDeparture);
//!
//! let context = SchedulingContext::at_time(Utc::now());
//! assert_eq!(engine.sort_ids(&trains, &context), vec![2, 1]);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod context;
mod engine;
pub mod rules;

pub use context::SchedulingContext;
pub use engine::{precedence_order, RuleEngine, TieBreaker};

use crate::models::Train;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first).
pub type RuleScore = f64;

/// A dispatching rule that evaluates train priority.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules should return smaller values
/// for trains that should enter the section first.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "PRIORITY", "EDT").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of a train given the current scheduling context.
    ///
    /// Returns a score where lower = higher priority.
    fn evaluate(&self, train: &Train, context: &SchedulingContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
