//! Scheduling context for dispatching rule evaluation.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::TrainId;

/// Runtime state passed to dispatching rules.
///
/// Holds the reference time (trains without a timetable departure are
/// treated as departing at this instant) and per-train travel estimates
/// for rules that look at occupation time.
#[derive(Debug, Clone)]
pub struct SchedulingContext {
    /// Reference time of the scheduling request.
    pub reference_time: DateTime<Utc>,
    /// Travel time through the section per train (minutes).
    pub travel_minutes: HashMap<TrainId, f64>,
}

impl SchedulingContext {
    /// Creates a context at the given reference time.
    pub fn at_time(reference_time: DateTime<Utc>) -> Self {
        Self {
            reference_time,
            travel_minutes: HashMap::new(),
        }
    }

    /// Sets the travel time for a train.
    pub fn with_travel_time(mut self, train_id: TrainId, minutes: f64) -> Self {
        self.travel_minutes.insert(train_id, minutes);
        self
    }
}
