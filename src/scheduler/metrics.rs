//! Schedule quality metrics.
//!
//! Computes section performance indicators from any produced schedule,
//! regardless of which strategy built it.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Throughput | Entries ÷ hours from first entry to last exit (1 h for a single entry) |
//! | Average headway | Mean gap between consecutive exits (minutes) |
//! | Capacity utilization | Throughput ÷ section design capacity |
//!
//! The throughput span opens at the first entry, not the first exit: two
//! 30 minute trains run back to back report 2 per hour, where a first-exit
//! span would report 4.
//!
//! Throughput and headway are rounded to two decimals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::time::minutes_between;
use crate::models::{Schedule, Section};

/// Utilization at or above which a section counts as congested.
pub const CONGESTION_THRESHOLD: f64 = 0.8;

/// Section performance indicators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleMetrics {
    /// Trains per hour.
    pub throughput_per_hour: f64,
    /// Mean exit-to-exit gap (minutes).
    pub average_headway_minutes: f64,
    /// Number of scheduled trains.
    pub train_count: usize,
    /// Latest planned exit.
    pub makespan: Option<DateTime<Utc>>,
}

impl ScheduleMetrics {
    /// Computes metrics from a schedule. An empty schedule yields zeros.
    pub fn calculate(schedule: &Schedule) -> Self {
        if schedule.is_empty() {
            return Self::default();
        }

        let count = schedule.len();
        let mut exits: Vec<DateTime<Utc>> = schedule.iter().map(|e| e.planned_exit).collect();
        exits.sort();

        let throughput = if count == 1 {
            count as f64
        } else {
            let first_entry = schedule.first_entry().unwrap_or(exits[0]);
            let span_hours = minutes_between(first_entry, exits[count - 1]) / 60.0;
            if span_hours > 0.0 {
                count as f64 / span_hours
            } else {
                count as f64
            }
        };

        let average_headway = if count < 2 {
            0.0
        } else {
            let total: f64 = exits
                .windows(2)
                .map(|w| minutes_between(w[0], w[1]))
                .sum();
            total / (count - 1) as f64
        };

        Self {
            throughput_per_hour: round2(throughput),
            average_headway_minutes: round2(average_headway),
            train_count: count,
            makespan: exits.last().copied(),
        }
    }

    /// Throughput relative to the section's design capacity.
    ///
    /// Returns 0.0 when the section declares no capacity.
    pub fn capacity_utilization(&self, section: &Section) -> f64 {
        if section.max_trains_per_hour == 0 {
            return 0.0;
        }
        self.throughput_per_hour / section.max_trains_per_hour as f64
    }

    /// Whether the schedule loads the section to the congestion threshold.
    pub fn is_congested(&self, section: &Section) -> bool {
        self.capacity_utilization(section) >= CONGESTION_THRESHOLD
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
