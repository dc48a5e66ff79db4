//! Single-section train scheduling.
//!
//! Orders trains competing for one shared track section and produces
//! time-stamped entry/exit plans, either with a fast priority heuristic
//! or with an exact mixed-integer model that minimizes
//! priority-weighted completion time under headway and release
//! constraints.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Train`, `Section`, `ScheduleEntry`, `Schedule`
//! - **`dispatching`**: Composable ranking rules and the precedence `RuleEngine`
//! - **`scheduler`**: `ScheduleRequest`, the greedy `HeuristicScheduler`, `ScheduleMetrics`
//! - **`optimize`**: `ConflictModel`, MILP backends, `ExactOptimizer`
//! - **`scenario`**: What-if runs with holds and speed restrictions
//! - **`validation`**: Input integrity checks
//! - **`config`**: Per-call optimizer settings
//!
//! # Architecture
//!
//! The crate is a pure core: train and section snapshots come in as plain
//! values, schedules and metrics go out as plain values. Persistence,
//! HTTP, and live feeds belong to the caller. Logging goes through
//! `tracing`; no subscriber is installed here.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Brucker (2007), "Scheduling Algorithms"
//! - Lamorgese et al. (2018), "Optimal Train Dispatching by Benders'-Like Reformulation"

use std::collections::HashMap;

use chrono::{DateTime, Utc};

pub mod config;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod optimize;
pub mod scenario;
pub mod scheduler;
pub mod validation;

pub use config::OptimizerConfig;
pub use error::ScheduleError;
pub use optimize::{ExactOptimizer, OptimizationResult, SolveStatus};

use models::{Schedule, Section, Train, TrainId};
use scheduler::{HeuristicScheduler, ScheduleRequest};

/// Builds a schedule with the priority heuristic.
///
/// Trains enter back to back with no headway. `holds` maps train IDs to
/// minutes after the start time; pass an empty map for none.
///
/// # Example
/// ```
/// use std::collections::HashMap;
/// use chrono::{TimeZone, Utc};
/// use section_sched::build_heuristic_schedule;
/// use section_sched::models::{PriorityTier, Section, Train};
///
/// let start = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();
/// let trains = vec![
///     Train::new(1).with_priority(PriorityTier::Low),
///     Train::new(2).with_priority(PriorityTier::Critical),
/// ];
/// let schedule = build_heuristic_schedule(
///     trains,
///     Section::new(1, 50.0, 100.0),
///     Some(start),
///     HashMap::new(),
///     None,
/// )
/// .unwrap();
/// assert_eq!(schedule.train_order(), vec![2, 1]);
/// ```
pub fn build_heuristic_schedule(
    trains: Vec<Train>,
    section: Section,
    start_time: Option<DateTime<Utc>>,
    holds: HashMap<TrainId, f64>,
    speed_override: Option<f64>,
) -> Result<Schedule, ScheduleError> {
    let request = request(trains, section, start_time, holds, speed_override);
    HeuristicScheduler::new().schedule(&request)
}

/// Optimizes a schedule with the exact model.
///
/// Headway and time budget come from `config`.
pub fn optimize_schedule(
    trains: Vec<Train>,
    section: Section,
    start_time: Option<DateTime<Utc>>,
    holds: HashMap<TrainId, f64>,
    speed_override: Option<f64>,
    config: &OptimizerConfig,
) -> Result<OptimizationResult, ScheduleError> {
    let request = request(trains, section, start_time, holds, speed_override)
        .with_headway(config.headway_minutes);
    ExactOptimizer::new().optimize(&request, config.time_limit)
}

fn request(
    trains: Vec<Train>,
    section: Section,
    start_time: Option<DateTime<Utc>>,
    holds: HashMap<TrainId, f64>,
    speed_override: Option<f64>,
) -> ScheduleRequest {
    let mut request = ScheduleRequest::new(trains, section).with_holds(holds);
    request.start_time = start_time;
    request.speed_override = speed_override;
    request
}
