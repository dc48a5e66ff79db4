//! Built-in dispatching rules.
//!
//! # Categories
//!
//! - **Priority**: PRIORITY (score)
//! - **Timetable**: EDT
//! - **Occupation**: SPT, WSPT
//!
//! # Score Convention
//! All rules return lower scores for higher priority trains.

use super::{DispatchingRule, RuleScore, SchedulingContext};
use crate::models::time::minutes_between;
use crate::models::Train;

// ======================== Priority rules ========================

/// Priority score rule.
///
/// Prioritizes trains with a higher `tier weight × category multiplier`.
#[derive(Debug, Clone, Copy)]
pub struct PriorityScore;

impl DispatchingRule for PriorityScore {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, train: &Train, _context: &SchedulingContext) -> RuleScore {
        -train.priority_score()
    }

    fn description(&self) -> &'static str {
        "Priority Score"
    }
}

// ======================== Timetable rules ========================

/// Earliest Departure Time.
///
/// Prioritizes trains with an earlier timetable departure. Trains without
/// one are treated as departing at the context reference time.
#[derive(Debug, Clone, Copy)]
pub struct EarliestDeparture;

impl DispatchingRule for EarliestDeparture {
    fn name(&self) -> &'static str {
        "EDT"
    }

    fn evaluate(&self, train: &Train, context: &SchedulingContext) -> RuleScore {
        let now = context.reference_time;
        minutes_between(now, train.departure_or(now))
    }

    fn description(&self) -> &'static str {
        "Earliest Departure Time"
    }
}

// ======================== Occupation rules ========================

/// Shortest Processing Time.
///
/// Prioritizes trains that clear the section fastest. Uses
/// `context.travel_minutes`, falling back to the inverse of the train's
/// own maximum speed.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on single machine.
#[derive(Debug, Clone, Copy)]
pub struct Spt;

impl DispatchingRule for Spt {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn evaluate(&self, train: &Train, context: &SchedulingContext) -> RuleScore {
        travel_estimate(train, context)
    }

    fn description(&self) -> &'static str {
        "Shortest Processing Time"
    }
}

/// Weighted Shortest Processing Time.
///
/// Prioritizes by `tier weight / travel time`, the order that minimizes
/// weighted completion time when all trains are released together.
///
/// # Reference
/// Smith (1956), optimal for minimizing weighted mean flow time.
#[derive(Debug, Clone, Copy)]
pub struct Wspt;

impl DispatchingRule for Wspt {
    fn name(&self) -> &'static str {
        "WSPT"
    }

    fn evaluate(&self, train: &Train, context: &SchedulingContext) -> RuleScore {
        let travel = travel_estimate(train, context);
        if travel <= 0.0 || !travel.is_finite() {
            return f64::MAX;
        }
        -(train.priority.weight() / travel)
    }

    fn description(&self) -> &'static str {
        "Weighted Shortest Processing Time"
    }
}

fn travel_estimate(train: &Train, context: &SchedulingContext) -> f64 {
    context
        .travel_minutes
        .get(&train.id)
        .copied()
        .unwrap_or_else(|| {
            if train.max_speed_kmh > 0.0 {
                60.0 / train.max_speed_kmh
            } else {
                f64::MAX
            }
        })
}
