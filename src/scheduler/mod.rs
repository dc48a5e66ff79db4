//! Greedy section scheduling and schedule metrics.
//!
//! # Algorithm
//!
//! `HeuristicScheduler` places trains one after another in precedence
//! order, each entering as soon as the section is free (or its hold
//! expires). It runs in near-linear time and is meant for interactive
//! use; it is not optimal.
//!
//! # Metrics
//!
//! `ScheduleMetrics` derives throughput and average headway from any
//! schedule, heuristic or exact.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

mod heuristic;
mod metrics;
mod request;

pub use heuristic::HeuristicScheduler;
pub use metrics::{ScheduleMetrics, CONGESTION_THRESHOLD};
pub use request::ScheduleRequest;
pub(crate) use request::TrainPlan;
