//! Section snapshot model.
//!
//! A section is the single shared resource: one stretch of track that
//! at most one train occupies at a time.
//!
//! # Travel Time
//! `effective speed = min(train speed, section limit, override)`
//! `travel minutes = length_km / effective speed × 60`

use serde::{Deserialize, Serialize};

/// Section identifier.
pub type SectionId = u64;

/// Track layout of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SectionType {
    #[default]
    SingleLine,
    DoubleLine,
    MultipleLine,
}

/// Immutable section snapshot supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Unique section identifier.
    pub id: SectionId,
    /// Section code (informational).
    pub code: String,
    /// Track layout.
    pub section_type: SectionType,
    /// Length (km).
    pub length_km: f64,
    /// Speed limit (km/h).
    pub max_speed_limit_kmh: f64,
    /// Design capacity (trains per hour). Read for metrics only.
    pub max_trains_per_hour: u32,
    /// Whether a crossing station splits the section.
    pub has_crossing_station: bool,
}

impl Section {
    /// Creates a single-line section.
    pub fn new(id: SectionId, length_km: f64, max_speed_limit_kmh: f64) -> Self {
        Self {
            id,
            code: String::new(),
            section_type: SectionType::default(),
            length_km,
            max_speed_limit_kmh,
            max_trains_per_hour: 6,
            has_crossing_station: true,
        }
    }

    /// Sets the section code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the track layout.
    pub fn with_section_type(mut self, section_type: SectionType) -> Self {
        self.section_type = section_type;
        self
    }

    /// Sets the design capacity.
    pub fn with_capacity(mut self, max_trains_per_hour: u32) -> Self {
        self.max_trains_per_hour = max_trains_per_hour;
        self
    }

    /// Sets the crossing station flag.
    pub fn with_crossing_station(mut self, has_crossing_station: bool) -> Self {
        self.has_crossing_station = has_crossing_station;
        self
    }

    /// Effective speed of a train in this section (km/h).
    ///
    /// An override only ever tightens the section limit.
    pub fn effective_speed(&self, train_speed_kmh: f64, speed_override: Option<f64>) -> f64 {
        let limit = match speed_override {
            Some(cap) => self.max_speed_limit_kmh.min(cap),
            None => self.max_speed_limit_kmh,
        };
        train_speed_kmh.min(limit)
    }

    /// Travel time through the section at `effective_speed_kmh` (minutes).
    ///
    /// Returns `None` when the speed is not positive or the result is not
    /// finite: the train cannot be scheduled.
    pub fn travel_time_minutes(&self, effective_speed_kmh: f64) -> Option<f64> {
        if effective_speed_kmh.is_nan() || effective_speed_kmh <= 0.0 {
            return None;
        }
        let minutes = self.length_km / effective_speed_kmh * 60.0;
        minutes.is_finite().then_some(minutes)
    }
}
