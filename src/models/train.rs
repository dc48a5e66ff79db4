//! Train snapshot model.
//!
//! A train is the unit of work to be scheduled through a section. The
//! snapshot carries only the attributes the scheduler reads: identity,
//! priority tier, category, speed, and the timetable departure.
//!
//! # Priority Score
//! `score = tier weight × category multiplier`
//!
//! | Tier | Weight | | Category | Multiplier |
//! |------|--------|-|----------|-----------|
//! | Low | 1 | | Passenger | 1.5 |
//! | Medium | 2 | | Express | 1.3 |
//! | High | 3 | | Superfast | 1.2 |
//! | Critical | 4 | | Freight | 0.8 |
//! | | | | Special | 2.0 |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Train identifier.
pub type TrainId = u64;

/// Operating speed assumed when a train declares none (km/h).
pub const DEFAULT_TRAIN_SPEED_KMH: f64 = 100.0;

/// Priority tier, ordered from least to most important.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum PriorityTier {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl PriorityTier {
    /// Numeric tier weight (1..=4).
    pub fn weight(self) -> f64 {
        match self {
            PriorityTier::Low => 1.0,
            PriorityTier::Medium => 2.0,
            PriorityTier::High => 3.0,
            PriorityTier::Critical => 4.0,
        }
    }

    /// Upper-case label used in schedule output.
    pub fn label(self) -> &'static str {
        match self {
            PriorityTier::Low => "LOW",
            PriorityTier::Medium => "MEDIUM",
            PriorityTier::High => "HIGH",
            PriorityTier::Critical => "CRITICAL",
        }
    }
}

/// Train category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TrainCategory {
    #[default]
    Passenger,
    Express,
    Superfast,
    Freight,
    Special,
}

impl TrainCategory {
    /// Multiplier applied to the tier weight in the priority score.
    pub fn multiplier(self) -> f64 {
        match self {
            TrainCategory::Passenger => 1.5,
            TrainCategory::Express => 1.3,
            TrainCategory::Superfast => 1.2,
            TrainCategory::Freight => 0.8,
            TrainCategory::Special => 2.0,
        }
    }
}

/// Immutable train snapshot supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Train {
    /// Unique train identifier.
    pub id: TrainId,
    /// Public train number (informational).
    pub number: String,
    /// Priority tier.
    pub priority: PriorityTier,
    /// Train category.
    pub category: TrainCategory,
    /// Maximum operating speed (km/h).
    pub max_speed_kmh: f64,
    /// Timetable departure. `None` = departs at the scheduling reference time.
    pub scheduled_departure: Option<DateTime<Utc>>,
}

impl Train {
    /// Creates a medium-priority passenger train running at the default speed.
    pub fn new(id: TrainId) -> Self {
        Self {
            id,
            number: String::new(),
            priority: PriorityTier::default(),
            category: TrainCategory::default(),
            max_speed_kmh: DEFAULT_TRAIN_SPEED_KMH,
            scheduled_departure: None,
        }
    }

    /// Sets the public train number.
    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = number.into();
        self
    }

    /// Sets the priority tier.
    pub fn with_priority(mut self, priority: PriorityTier) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the category.
    pub fn with_category(mut self, category: TrainCategory) -> Self {
        self.category = category;
        self
    }

    /// Sets the maximum operating speed (km/h).
    pub fn with_max_speed(mut self, kmh: f64) -> Self {
        self.max_speed_kmh = kmh;
        self
    }

    /// Sets the timetable departure.
    pub fn with_scheduled_departure(mut self, departure: DateTime<Utc>) -> Self {
        self.scheduled_departure = Some(departure);
        self
    }

    /// Derived priority score (sort and weight key; never mutated).
    pub fn priority_score(&self) -> f64 {
        self.priority.weight() * self.category.multiplier()
    }

    /// Departure used for ordering: the timetable value, or `now` when absent.
    pub fn departure_or(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.scheduled_departure.unwrap_or(now)
    }
}
