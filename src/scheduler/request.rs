//! Scheduling request shared by both strategies.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::models::time::{minutes_between, offset};
use crate::models::{Section, Train, TrainId};
use crate::validation::validate_request;

/// Input container for scheduling one section.
///
/// Built fresh per request from caller-supplied snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Trains to schedule.
    pub trains: Vec<Train>,
    /// The shared section.
    pub section: Section,
    /// Reference start time. `None` = the current time when scheduling.
    pub start_time: Option<DateTime<Utc>>,
    /// Forced hold before entry, per train (minutes after the start time).
    pub holds: HashMap<TrainId, f64>,
    /// Caller-imposed speed cap for the section (km/h).
    pub speed_override: Option<f64>,
    /// Minimum gap between one exit and the next entry (minutes).
    pub headway_minutes: f64,
}

impl ScheduleRequest {
    /// Creates a request with no holds, no override, and zero headway.
    pub fn new(trains: Vec<Train>, section: Section) -> Self {
        Self {
            trains,
            section,
            start_time: None,
            holds: HashMap::new(),
            speed_override: None,
            headway_minutes: 0.0,
        }
    }

    /// Sets the reference start time.
    pub fn with_start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = Some(start_time);
        self
    }

    /// Adds a hold for one train (minutes).
    pub fn with_hold(mut self, train_id: TrainId, minutes: f64) -> Self {
        self.holds.insert(train_id, minutes);
        self
    }

    /// Replaces all holds.
    pub fn with_holds(mut self, holds: HashMap<TrainId, f64>) -> Self {
        self.holds = holds;
        self
    }

    /// Sets the section speed override (km/h).
    pub fn with_speed_override(mut self, kmh: f64) -> Self {
        self.speed_override = Some(kmh);
        self
    }

    /// Sets the headway (minutes).
    pub fn with_headway(mut self, headway_minutes: f64) -> Self {
        self.headway_minutes = headway_minutes;
        self
    }

    /// Validates the request.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        validate_request(
            &self.trains,
            &self.section,
            &self.holds,
            self.speed_override,
            self.headway_minutes,
        )
        .map_err(ScheduleError::InvalidInput)
    }

    /// Start time, resolving an absent value to the current time.
    pub fn resolve_start(&self) -> DateTime<Utc> {
        self.start_time.unwrap_or_else(Utc::now)
    }

    /// Hold for a train (minutes); zero when none is set.
    pub fn hold_minutes(&self, train_id: TrainId) -> f64 {
        self.holds.get(&train_id).copied().unwrap_or(0.0)
    }

    /// Derives per-train scheduling figures relative to `start`, in input order.
    pub(crate) fn plans(&self, start: DateTime<Utc>) -> Result<Vec<TrainPlan>, ScheduleError> {
        self.trains
            .iter()
            .map(|train| TrainPlan::derive(train, self, start))
            .collect()
    }
}

/// Per-train figures derived from a request, in minutes from the start time.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TrainPlan {
    pub train_id: TrainId,
    pub effective_speed_kmh: f64,
    pub travel_minutes: f64,
    pub hold_minutes: f64,
    /// `max(0, departure − start, hold)`.
    pub release_minutes: f64,
    pub weight: f64,
}

impl TrainPlan {
    fn derive(
        train: &Train,
        request: &ScheduleRequest,
        start: DateTime<Utc>,
    ) -> Result<Self, ScheduleError> {
        let speed = request
            .section
            .effective_speed(train.max_speed_kmh, request.speed_override);
        let travel = request
            .section
            .travel_time_minutes(speed)
            .ok_or(ScheduleError::Unschedulable {
                train_id: train.id,
                speed_kmh: speed,
            })?;

        let hold = request.hold_minutes(train.id);
        let departure = minutes_between(start, train.departure_or(start));
        let release = 0.0_f64.max(departure).max(hold);

        // The train's own exit must be a valid timestamp
        let earliest_exit = release + travel;
        if offset(start, earliest_exit).is_none() {
            return Err(ScheduleError::time_out_of_range(train.id, earliest_exit));
        }

        Ok(Self {
            train_id: train.id,
            effective_speed_kmh: speed,
            travel_minutes: travel,
            hold_minutes: hold,
            release_minutes: release,
            weight: train.priority.weight(),
        })
    }
}
