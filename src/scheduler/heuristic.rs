//! Priority-driven greedy section scheduler.
//!
//! # Algorithm
//!
//! 1. Rank trains by the precedence rule engine.
//! 2. Keep one cursor, "section free at", starting at the start time.
//! 3. For each train in rank order, enter at the later of the cursor
//!    (plus headway after the first train) and `start + hold`.
//! 4. Exit after the travel time and advance the cursor to the exit.
//!
//! Timetable departures only affect the ranking: once ordered, a train
//! enters as soon as the section is free.
//!
//! # Complexity
//! O(n log n) for the ranking, O(n) for the placement.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 4: Priority Dispatching

use chrono::{DateTime, Utc};
use tracing::debug;

use super::request::ScheduleRequest;
use crate::dispatching::{RuleEngine, SchedulingContext};
use crate::error::ScheduleError;
use crate::models::time::{minutes_between, offset};
use crate::models::{Schedule, ScheduleEntry};

/// Priority-driven greedy scheduler for a single section.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use section_sched::models::{Section, Train};
/// use section_sched::scheduler::{HeuristicScheduler, ScheduleRequest};
///
/// let start = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();
/// let request = ScheduleRequest::new(vec![Train::new(1)], Section::new(1, 100.0, 100.0))
///     .with_start_time(start);
///
/// let schedule = HeuristicScheduler::new().schedule(&request).unwrap();
/// assert_eq!(schedule.len(), 1);
/// assert_eq!(schedule.entries[0].duration_minutes(), 60.0);
/// ```
#[derive(Debug, Clone)]
pub struct HeuristicScheduler {
    rule_engine: RuleEngine,
}

impl HeuristicScheduler {
    /// Creates a scheduler using the precedence ranking.
    pub fn new() -> Self {
        Self {
            rule_engine: RuleEngine::precedence(),
        }
    }

    /// Replaces the ranking with a custom rule engine.
    pub fn with_rule_engine(mut self, engine: RuleEngine) -> Self {
        self.rule_engine = engine;
        self
    }

    /// Builds a schedule for the request.
    ///
    /// An absent start time resolves to the current time once, at entry.
    pub fn schedule(&self, request: &ScheduleRequest) -> Result<Schedule, ScheduleError> {
        request.validate()?;
        let start = request.resolve_start();
        self.schedule_from(request, start)
    }

    /// Places trains with an already-validated request and resolved start.
    pub(crate) fn schedule_from(
        &self,
        request: &ScheduleRequest,
        start: DateTime<Utc>,
    ) -> Result<Schedule, ScheduleError> {
        let plans = request.plans(start)?;

        let context = plans.iter().fold(SchedulingContext::at_time(start), |ctx, p| {
            ctx.with_travel_time(p.train_id, p.travel_minutes)
        });
        let order = self.rule_engine.sort_indices(&request.trains, &context);

        let mut schedule = Schedule::new();
        let mut section_free_at = start;

        for (position, &idx) in order.iter().enumerate() {
            let train = &request.trains[idx];
            let plan = &plans[idx];

            let out_of_range = || {
                let reached = minutes_between(start, section_free_at) + plan.travel_minutes;
                ScheduleError::time_out_of_range(train.id, reached)
            };
            let earliest = if position == 0 {
                section_free_at
            } else {
                offset(section_free_at, request.headway_minutes).ok_or_else(out_of_range)?
            };
            let held_until = offset(start, plan.hold_minutes).ok_or_else(out_of_range)?;
            let planned_entry = earliest.max(held_until);
            let planned_exit = offset(planned_entry, plan.travel_minutes).ok_or_else(out_of_range)?;

            schedule.push(ScheduleEntry {
                train_id: train.id,
                section_id: request.section.id,
                planned_entry,
                planned_exit,
                effective_speed_kmh: plan.effective_speed_kmh,
                priority: train.priority,
                priority_weight: plan.weight,
            });
            section_free_at = planned_exit;
        }

        debug!(
            trains = schedule.len(),
            section = request.section.id,
            makespan = ?schedule.makespan(),
            "heuristic schedule built"
        );
        Ok(schedule)
    }
}

impl Default for HeuristicScheduler {
    fn default() -> Self {
        Self::new()
    }
}
