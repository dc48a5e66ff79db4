//! What-if scenarios.
//!
//! A scenario names a subset of trains and a list of operator
//! instructions (holds, temporary speed restrictions). Running it against
//! train and section snapshots replays the heuristic builder and reports
//! the resulting schedule and metrics, without touching any stored plan.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ScheduleError;
use crate::models::{Schedule, Section, SectionId, Train, TrainId};
use crate::scheduler::{HeuristicScheduler, ScheduleMetrics, ScheduleRequest};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Hold a train before it may enter the section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldInstruction {
    pub train_id: TrainId,
    /// Minutes after the scenario start time.
    pub hold_minutes: f64,
}

/// Temporary speed cap on a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedRestriction {
    pub section_id: SectionId,
    pub max_speed_limit_kmh: f64,
}

/// A what-if request for one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIfScenario {
    /// Section the scenario applies to.
    pub section_id: SectionId,
    /// Trains to include, by ID.
    pub train_ids: Vec<TrainId>,
    #[serde(default)]
    pub holds: Vec<HoldInstruction>,
    #[serde(default)]
    pub speed_restrictions: Vec<SpeedRestriction>,
    /// Reference start time. `None` = the current time when run.
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
}

/// Outcome of a what-if run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub schedule: Schedule,
    pub metrics: ScheduleMetrics,
}

impl WhatIfScenario {
    /// Creates a scenario with no instructions.
    pub fn new(section_id: SectionId, train_ids: Vec<TrainId>) -> Self {
        Self {
            section_id,
            train_ids,
            holds: Vec::new(),
            speed_restrictions: Vec::new(),
            start_time: None,
        }
    }

    /// Adds a hold instruction.
    pub fn with_hold(mut self, train_id: TrainId, hold_minutes: f64) -> Self {
        self.holds.push(HoldInstruction {
            train_id,
            hold_minutes,
        });
        self
    }

    /// Adds a speed restriction.
    pub fn with_speed_restriction(mut self, section_id: SectionId, max_speed_limit_kmh: f64) -> Self {
        self.speed_restrictions.push(SpeedRestriction {
            section_id,
            max_speed_limit_kmh,
        });
        self
    }

    /// Sets the start time.
    pub fn with_start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = Some(start_time);
        self
    }

    /// Speed cap from the first restriction on `section_id`, if any.
    pub fn speed_override_for(&self, section_id: SectionId) -> Option<f64> {
        self.speed_restrictions
            .iter()
            .find(|r| r.section_id == section_id)
            .map(|r| r.max_speed_limit_kmh)
    }

    /// Hold map; a later instruction for the same train wins.
    pub fn hold_map(&self) -> HashMap<TrainId, f64> {
        self.holds
            .iter()
            .map(|h| (h.train_id, h.hold_minutes))
            .collect()
    }

    /// Converts the scenario into a scheduling request.
    ///
    /// `snapshots` is searched for every train in `train_ids`; IDs with
    /// no snapshot are rejected as [`ValidationErrorKind::UnknownTrain`].
    pub fn to_request(
        &self,
        snapshots: &[Train],
        section: &Section,
    ) -> Result<ScheduleRequest, ScheduleError> {
        let by_id: HashMap<TrainId, &Train> = snapshots.iter().map(|t| (t.id, t)).collect();

        let mut trains = Vec::with_capacity(self.train_ids.len());
        let mut errors = Vec::new();
        for id in &self.train_ids {
            match by_id.get(id) {
                Some(train) => trains.push((*train).clone()),
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownTrain,
                    format!("Scenario references unknown train {id}"),
                )),
            }
        }
        if !errors.is_empty() {
            return Err(ScheduleError::InvalidInput(errors));
        }

        let mut request = ScheduleRequest::new(trains, section.clone()).with_holds(self.hold_map());
        request.start_time = self.start_time;
        if let Some(cap) = self.speed_override_for(section.id) {
            request = request.with_speed_override(cap);
        }
        Ok(request)
    }

    /// Runs the scenario through the heuristic builder.
    pub fn run(&self, snapshots: &[Train], section: &Section) -> Result<SimulationResult, ScheduleError> {
        let request = self.to_request(snapshots, section)?;
        let schedule = HeuristicScheduler::new().schedule(&request)?;
        let metrics = ScheduleMetrics::calculate(&schedule);

        debug!(
            section = self.section_id,
            trains = schedule.len(),
            holds = self.holds.len(),
            speed_override = ?request.speed_override,
            "what-if scenario simulated"
        );
        Ok(SimulationResult { schedule, metrics })
    }
}
