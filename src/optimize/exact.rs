//! Exact optimizer: builds the conflict model, runs a time-bounded MILP
//! solve, and decodes the result into a schedule.
//!
//! # Time Budget
//! The solve runs on a worker thread under a [`SolveBudget`] and is
//! awaited up to the limit. When the limit passes, the optimizer raises
//! the budget's stop flag and waits a short grace period for the worker
//! to hand back its best point and exit. A backend that ignores the flag
//! is detached and the incumbent is returned instead.
//!
//! The incumbent is the better of two dispatches with headway: the
//! configured ranking (precedence by default) and Smith's ratio order.
//! Both are always feasible.
//!
//! # Solution Check
//! Starts read back from a backend are checked against the conflict
//! model. A violated constraint is a backend fault and is reported as
//! [`ScheduleError::InvalidSolution`], never returned as a schedule.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::conflict::ConflictModel;
use super::milp::{GoodLpBackend, MilpBackend, MilpError, MilpSolution, SolveBudget, SolveStatus};
use crate::dispatching::{RuleEngine, SchedulingContext};
use crate::error::ScheduleError;
use crate::models::time::offset;
use crate::models::{Schedule, ScheduleEntry};
use crate::scheduler::{ScheduleMetrics, ScheduleRequest, TrainPlan};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Numeric tolerance when checking decoded starts (minutes).
const FEASIBILITY_TOL: f64 = 1e-6;

/// How long an interrupted worker gets to return after the time limit.
const STOP_GRACE: Duration = Duration::from_millis(200);

/// Result of an exact optimization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Solver status. Absent for trivial instances (one train).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SolveStatus>,
    /// Achieved objective `Σ w (start + travel)` in minutes from the
    /// start time. Absent for trivial instances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objective: Option<f64>,
    /// Schedule ordered by entry time.
    pub schedule: Schedule,
    /// Metrics of the schedule.
    pub metrics: ScheduleMetrics,
}

/// Exact single-section optimizer.
///
/// Minimizes priority-weighted completion time subject to pairwise
/// non-overlap with headway and release times.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use chrono::{TimeZone, Utc};
/// use section_sched::models::{Section, Train};
/// use section_sched::optimize::{ExactOptimizer, SolveStatus};
/// use section_sched::scheduler::ScheduleRequest;
///
/// let start = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();
/// let request = ScheduleRequest::new(vec![Train::new(1), Train::new(2)], Section::new(1, 50.0, 100.0))
///     .with_start_time(start)
///     .with_headway(5.0);
///
/// let result = ExactOptimizer::new().optimize(&request, Duration::from_secs(10)).unwrap();
/// assert_eq!(result.status, Some(SolveStatus::Optimal));
/// assert!(result.schedule.is_conflict_free(5.0));
/// ```
#[derive(Debug)]
pub struct ExactOptimizer<B = GoodLpBackend> {
    backend: Arc<B>,
    rule_engine: RuleEngine,
}

impl ExactOptimizer<GoodLpBackend> {
    /// Creates an optimizer with the `good_lp` backend.
    pub fn new() -> Self {
        Self::with_backend(GoodLpBackend::new())
    }
}

impl Default for ExactOptimizer<GoodLpBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> Clone for ExactOptimizer<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            rule_engine: self.rule_engine.clone(),
        }
    }
}

impl<B: MilpBackend + 'static> ExactOptimizer<B> {
    /// Creates an optimizer with a custom backend.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
            rule_engine: RuleEngine::precedence(),
        }
    }

    /// Replaces the ranking tried first for the incumbent schedule.
    pub fn with_rule_engine(mut self, engine: RuleEngine) -> Self {
        self.rule_engine = engine;
        self
    }

    /// Optimizes the request within `time_limit`.
    ///
    /// Headway is taken from the request. Exceeding the budget is not an
    /// error: the best feasible schedule is returned with
    /// [`SolveStatus::TimeLimitFeasible`].
    pub fn optimize(
        &self,
        request: &ScheduleRequest,
        time_limit: Duration,
    ) -> Result<OptimizationResult, ScheduleError> {
        let mut errors = match request.validate() {
            Ok(()) => Vec::new(),
            Err(ScheduleError::InvalidInput(errors)) => errors,
            Err(other) => return Err(other),
        };
        if time_limit.is_zero() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTimeLimit,
                "Solver time limit must be positive",
            ));
        }
        if !errors.is_empty() {
            return Err(ScheduleError::InvalidInput(errors));
        }

        let start = request.resolve_start();
        let plans = request.plans(start)?;
        let model = ConflictModel::from_plans(&plans, request.headway_minutes);

        if model.len() <= 1 {
            let schedule = decode(request, &plans, &model.release, start)?;
            let metrics = ScheduleMetrics::calculate(&schedule);
            return Ok(OptimizationResult {
                status: None,
                objective: None,
                schedule,
                metrics,
            });
        }

        let incumbent = self.incumbent(request, &plans, &model, start);

        info!(
            trains = model.len(),
            pairs = model.pair_count(),
            big_m = model.big_m(),
            backend = self.backend.name(),
            "conflict model built"
        );

        let began = Instant::now();
        let (status, starts) = match self.solve_bounded(&model, time_limit) {
            Ok(solution) => {
                let status = solution.status;
                let starts = fill_missing(&model, solution);

                let violations = model.violations(&starts, FEASIBILITY_TOL);
                if !violations.is_empty() {
                    error!(
                        trains = model.len(),
                        violations = violations.len(),
                        first = ?violations[0],
                        "solver starts violate the conflict model"
                    );
                    return Err(ScheduleError::InvalidSolution {
                        trains: model.len(),
                        violations: violations.len(),
                    });
                }

                // A cut-short search may trail the dispatch incumbent
                if status != SolveStatus::Optimal
                    && model.objective(&incumbent) < model.objective(&starts)
                {
                    (status, incumbent)
                } else {
                    (status, starts)
                }
            }
            Err(SolveFailure::Timeout) => {
                warn!(?time_limit, "time budget exceeded, returning incumbent");
                (SolveStatus::TimeLimitFeasible, incumbent)
            }
            Err(SolveFailure::Milp(MilpError::Infeasible)) => {
                error!(trains = model.len(), "solver declared conflict model infeasible");
                return Err(ScheduleError::SolverInfeasible { trains: model.len() });
            }
            Err(failure) => {
                warn!(%failure, "solver failed, returning incumbent");
                (SolveStatus::Other, incumbent)
            }
        };

        let objective = model.objective(&starts);
        let schedule = decode(request, &plans, &starts, start)?;
        let metrics = ScheduleMetrics::calculate(&schedule);

        debug!(
            %status,
            objective,
            elapsed_ms = began.elapsed().as_millis() as u64,
            "exact optimization finished"
        );

        Ok(OptimizationResult {
            status: Some(status),
            objective: Some(objective),
            schedule,
            metrics,
        })
    }

    /// Best of the configured ranking and Smith's ratio order, dispatched
    /// with headway.
    fn incumbent(
        &self,
        request: &ScheduleRequest,
        plans: &[TrainPlan],
        model: &ConflictModel,
        start: DateTime<Utc>,
    ) -> Vec<f64> {
        let context = plans.iter().fold(SchedulingContext::at_time(start), |ctx, p| {
            ctx.with_travel_time(p.train_id, p.travel_minutes)
        });
        let ranked = model.sequence_starts(&self.rule_engine.sort_indices(&request.trains, &context));
        let ratio = model.sequence_starts(
            &RuleEngine::weighted_completion().sort_indices(&request.trains, &context),
        );

        if model.objective(&ratio) < model.objective(&ranked) {
            ratio
        } else {
            ranked
        }
    }

    fn solve_bounded(
        &self,
        model: &ConflictModel,
        time_limit: Duration,
    ) -> Result<MilpSolution, SolveFailure> {
        let budget = SolveBudget::new(time_limit);
        let (tx, rx) = mpsc::channel();
        let backend = Arc::clone(&self.backend);
        let worker_model = model.clone();
        let worker_budget = budget.clone();

        let spawned = thread::Builder::new()
            .name("milp-solve".into())
            .spawn(move || {
                // Receiver is gone if the worker was detached
                let _ = tx.send(backend.solve(&worker_model, &worker_budget));
            });
        let worker = match spawned {
            Ok(handle) => handle,
            Err(e) => {
                warn!(error = %e, "could not spawn solver thread, solving inline");
                return self.backend.solve(model, &budget).map_err(SolveFailure::Milp);
            }
        };

        match rx.recv_timeout(time_limit) {
            Ok(result) => {
                reap(worker);
                result.map_err(SolveFailure::Milp)
            }
            Err(RecvTimeoutError::Timeout) => {
                budget.interrupt();
                match rx.recv_timeout(STOP_GRACE) {
                    Ok(result) => {
                        reap(worker);
                        // Only a point found before the stop is worth keeping
                        result.map_err(|_| SolveFailure::Timeout)
                    }
                    Err(RecvTimeoutError::Timeout) => {
                        warn!(grace = ?STOP_GRACE, "solver ignored the stop flag, detaching");
                        Err(SolveFailure::Timeout)
                    }
                    Err(RecvTimeoutError::Disconnected) => {
                        reap(worker);
                        Err(SolveFailure::WorkerLost)
                    }
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                reap(worker);
                Err(SolveFailure::WorkerLost)
            }
        }
    }
}

/// Joins a worker that has already sent (or dropped) its result.
fn reap(worker: JoinHandle<()>) {
    if worker.join().is_err() {
        error!("solver thread panicked");
    }
}

#[derive(Debug, thiserror::Error)]
enum SolveFailure {
    #[error("time budget exceeded")]
    Timeout,
    #[error("solver thread exited without a result")]
    WorkerLost,
    #[error(transparent)]
    Milp(#[from] MilpError),
}

/// Reads solver starts, falling back to the release time where the
/// solver has no value.
fn fill_missing(model: &ConflictModel, solution: MilpSolution) -> Vec<f64> {
    solution
        .starts
        .into_iter()
        .enumerate()
        .map(|(i, start)| match start {
            Some(s) => s,
            None => {
                warn!(train = model.train_ids[i], "no solver value, using release time");
                model.release[i]
            }
        })
        .collect()
}

fn decode(
    request: &ScheduleRequest,
    plans: &[TrainPlan],
    starts: &[f64],
    start: DateTime<Utc>,
) -> Result<Schedule, ScheduleError> {
    let entries = request
        .trains
        .iter()
        .zip(plans)
        .zip(starts)
        .map(|((train, plan), &s)| {
            let out_of_range = || ScheduleError::time_out_of_range(train.id, s + plan.travel_minutes);
            let planned_entry = offset(start, s).ok_or_else(out_of_range)?;
            let planned_exit = offset(planned_entry, plan.travel_minutes).ok_or_else(out_of_range)?;
            Ok(ScheduleEntry {
                train_id: train.id,
                section_id: request.section.id,
                planned_entry,
                planned_exit,
                effective_speed_kmh: plan.effective_speed_kmh,
                priority: train.priority,
                priority_weight: plan.weight,
            })
        })
        .collect::<Result<Vec<_>, ScheduleError>>()?;
    Ok(Schedule::from_entries(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::time::minutes_between;
    use crate::models::{PriorityTier, Section, Train};
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap()
    }

    fn budget() -> Duration {
        Duration::from_secs(10)
    }

    fn request(trains: Vec<Train>, headway: f64) -> ScheduleRequest {
        ScheduleRequest::new(trains, Section::new(7, 50.0, 100.0))
            .with_start_time(t0())
            .with_headway(headway)
    }

    fn entry_min(result: &OptimizationResult, train_id: u64) -> f64 {
        minutes_between(t0(), result.schedule.entry_for_train(train_id).unwrap().planned_entry)
    }

    /// Ignores the budget and sleeps.
    #[derive(Debug)]
    struct StubbornBackend(Duration);

    impl MilpBackend for StubbornBackend {
        fn name(&self) -> &'static str {
            "stubborn"
        }

        fn solve(&self, model: &ConflictModel, _: &SolveBudget) -> Result<MilpSolution, MilpError> {
            thread::sleep(self.0);
            Ok(MilpSolution {
                starts: model.release.iter().map(|&r| Some(r)).collect(),
                status: SolveStatus::Optimal,
            })
        }
    }

    /// Spins until the stop flag is raised, then gives up.
    #[derive(Debug)]
    struct PatientBackend;

    impl MilpBackend for PatientBackend {
        fn name(&self) -> &'static str {
            "patient"
        }

        fn solve(&self, _: &ConflictModel, budget: &SolveBudget) -> Result<MilpSolution, MilpError> {
            while !budget.is_interrupted() {
                thread::sleep(Duration::from_millis(1));
            }
            Err(MilpError::Failed("stopped".into()))
        }
    }

    #[derive(Debug)]
    struct FixedBackend(Result<MilpSolution, MilpError>);

    impl MilpBackend for FixedBackend {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn solve(&self, _: &ConflictModel, _: &SolveBudget) -> Result<MilpSolution, MilpError> {
            self.0.clone()
        }
    }

    fn fixed(starts: Vec<Option<f64>>) -> ExactOptimizer<FixedBackend> {
        ExactOptimizer::with_backend(FixedBackend(Ok(MilpSolution {
            starts,
            status: SolveStatus::Optimal,
        })))
    }

    #[test]
    fn test_headway_optimal() {
        let result = ExactOptimizer::new()
            .optimize(&request(vec![Train::new(1), Train::new(2)], 5.0), budget())
            .unwrap();

        assert_eq!(result.status, Some(SolveStatus::Optimal));
        assert!(result.schedule.is_conflict_free(5.0));
        let first = result.schedule.entries[0].train_id;
        let second = result.schedule.entries[1].train_id;
        assert!(entry_min(&result, first).abs() < 1e-4);
        assert!((entry_min(&result, second) - 35.0).abs() < 1e-4);
        assert!((result.objective.unwrap() - 190.0).abs() < 1e-4);
    }

    #[test]
    fn test_priority_weight_goes_first() {
        let trains = vec![
            Train::new(1).with_priority(PriorityTier::Low),
            Train::new(2).with_priority(PriorityTier::Critical),
        ];
        let result = ExactOptimizer::new().optimize(&request(trains, 0.0), budget()).unwrap();
        assert_eq!(result.schedule.train_order(), vec![2, 1]);
        assert_eq!(result.schedule.entries[0].priority_weight, 4.0);
    }

    #[test]
    fn test_respects_departure_release() {
        let trains = vec![
            Train::new(1).with_scheduled_departure(t0() + chrono::Duration::minutes(40)),
            Train::new(2),
        ];
        let result = ExactOptimizer::new().optimize(&request(trains, 2.0), budget()).unwrap();
        assert!(entry_min(&result, 1) >= 40.0 - 1e-4);
        assert!(result.schedule.is_conflict_free(2.0));
    }

    #[test]
    fn test_respects_hold() {
        let req = request(vec![Train::new(1), Train::new(2)], 0.0).with_hold(1, 90.0);
        let result = ExactOptimizer::new().optimize(&req, budget()).unwrap();
        assert!(entry_min(&result, 1) >= 90.0 - 1e-4);
        assert!(entry_min(&result, 2).abs() < 1e-4);
    }

    #[test]
    fn test_single_train_is_trivial() {
        let req = request(vec![Train::new(3)], 5.0).with_hold(3, 10.0);
        let result = ExactOptimizer::new().optimize(&req, budget()).unwrap();
        assert!(result.status.is_none());
        assert!(result.objective.is_none());
        assert_eq!(result.schedule.len(), 1);
        assert!((entry_min(&result, 3) - 10.0).abs() < 1e-9);
        assert!((result.metrics.throughput_per_hour - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_time_limit_stops_worker() {
        let optimizer = ExactOptimizer::with_backend(PatientBackend);
        let trains = vec![
            Train::new(1),
            Train::new(2).with_priority(PriorityTier::High),
            Train::new(3),
        ];
        let result = optimizer
            .optimize(&request(trains, 3.0), Duration::from_millis(20))
            .unwrap();

        assert_eq!(result.status, Some(SolveStatus::TimeLimitFeasible));
        assert_eq!(result.schedule.len(), 3);
        assert!(result.schedule.is_conflict_free(3.0));
        assert_eq!(result.schedule.train_order(), vec![2, 1, 3]);
        // The worker's handle on the backend is gone once it has exited
        assert_eq!(Arc::strong_count(&optimizer.backend), 1);
    }

    #[test]
    fn test_default_backend_stops_at_time_limit() {
        let trains: Vec<Train> = (1..=14u64)
            .map(|id| {
                Train::new(id)
                    .with_max_speed(40.0 + (id * 17 % 120) as f64)
                    .with_scheduled_departure(t0() + chrono::Duration::minutes((id * 7 % 25) as i64))
            })
            .collect();
        let optimizer = ExactOptimizer::new();
        let began = Instant::now();
        let result = optimizer
            .optimize(&request(trains, 2.0), Duration::from_millis(100))
            .unwrap();

        assert!(began.elapsed() < Duration::from_secs(5));
        assert_eq!(result.schedule.len(), 14);
        assert!(result.schedule.is_conflict_free(2.0));
        assert_eq!(Arc::strong_count(&optimizer.backend), 1);
    }

    #[test]
    fn test_stubborn_backend_is_detached() {
        let optimizer = ExactOptimizer::with_backend(StubbornBackend(Duration::from_secs(2)));
        let began = Instant::now();
        let result = optimizer
            .optimize(&request(vec![Train::new(1), Train::new(2)], 1.0), Duration::from_millis(20))
            .unwrap();

        assert!(began.elapsed() < Duration::from_millis(1500));
        assert_eq!(result.status, Some(SolveStatus::TimeLimitFeasible));
        assert!(result.schedule.is_conflict_free(1.0));
    }

    #[test]
    fn test_overlapping_solution_rejected() {
        let err = fixed(vec![Some(0.0), Some(10.0)])
            .optimize(&request(vec![Train::new(1), Train::new(2)], 0.0), budget())
            .unwrap_err();
        assert_eq!(err, ScheduleError::InvalidSolution { trains: 2, violations: 1 });
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_start_before_release_rejected() {
        let req = request(vec![Train::new(1), Train::new(2)], 0.0).with_hold(2, 45.0);
        let err = fixed(vec![Some(0.0), Some(31.0)]).optimize(&req, budget()).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidSolution { violations: 1, .. }));
    }

    #[test]
    fn test_ratio_order_improves_incumbent() {
        // Precedence puts the slow critical train first; the ratio order
        // runs the two fast low trains ahead of it
        let trains = vec![
            Train::new(1).with_priority(PriorityTier::Critical).with_max_speed(10.0),
            Train::new(2).with_priority(PriorityTier::Low),
            Train::new(3).with_priority(PriorityTier::Low),
        ];
        let optimizer = ExactOptimizer::with_backend(FixedBackend(Err(MilpError::Failed("down".into()))));
        let result = optimizer.optimize(&request(trains, 0.0), budget()).unwrap();

        assert_eq!(result.status, Some(SolveStatus::Other));
        assert_eq!(result.schedule.train_order(), vec![2, 3, 1]);
    }

    #[test]
    fn test_huge_hold_rejected_without_panic() {
        let req = request(vec![Train::new(1), Train::new(2)], 2.0).with_hold(1, 1e12);
        let err = ExactOptimizer::new().optimize(&req, budget()).unwrap_err();
        assert_eq!(err.validation_errors()[0].kind, ValidationErrorKind::TimeOutOfRange);
    }

    #[test]
    fn test_solution_past_time_range_rejected() {
        let req = request(vec![Train::new(1), Train::new(2)], 0.0);
        let err = fixed(vec![Some(0.0), Some(1e12)]).optimize(&req, budget()).unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_infeasible_is_fatal() {
        let optimizer = ExactOptimizer::with_backend(FixedBackend(Err(MilpError::Infeasible)));
        let err = optimizer
            .optimize(&request(vec![Train::new(1), Train::new(2)], 0.0), budget())
            .unwrap_err();
        assert_eq!(err, ScheduleError::SolverInfeasible { trains: 2 });
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_solver_failure_reports_other() {
        let optimizer =
            ExactOptimizer::with_backend(FixedBackend(Err(MilpError::Failed("boom".into()))));
        let result = optimizer
            .optimize(&request(vec![Train::new(1), Train::new(2)], 1.0), budget())
            .unwrap();
        assert_eq!(result.status, Some(SolveStatus::Other));
        assert!(result.schedule.is_conflict_free(1.0));
    }

    #[test]
    fn test_missing_value_falls_back_to_release() {
        let optimizer = ExactOptimizer::with_backend(FixedBackend(Ok(MilpSolution {
            starts: vec![Some(0.0), None],
            status: SolveStatus::TimeLimitFeasible,
        })));
        let req = request(vec![Train::new(1), Train::new(2)], 0.0).with_hold(2, 45.0);
        let result = optimizer.optimize(&req, budget()).unwrap();
        assert_eq!(result.status, Some(SolveStatus::TimeLimitFeasible));
        assert!((entry_min(&result, 2) - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_time_limit_rejected() {
        let err = ExactOptimizer::new()
            .optimize(&request(vec![Train::new(1)], 0.0), Duration::ZERO)
            .unwrap_err();
        assert_eq!(
            err.validation_errors()[0].kind,
            ValidationErrorKind::InvalidTimeLimit
        );
    }

    #[test]
    fn test_empty_rejected() {
        let err = ExactOptimizer::new()
            .optimize(&request(vec![], 0.0), budget())
            .unwrap_err();
        assert_eq!(err.validation_errors()[0].kind, ValidationErrorKind::EmptyTrainSet);
    }

    #[test]
    fn test_random_instances_beat_incumbent() {
        use rand::rngs::SmallRng;
        use rand::{Rng, SeedableRng};

        let tiers = [
            PriorityTier::Low,
            PriorityTier::Medium,
            PriorityTier::High,
            PriorityTier::Critical,
        ];
        let mut rng = SmallRng::seed_from_u64(42);

        for _ in 0..8 {
            let n = rng.random_range(2..=5);
            let trains: Vec<Train> = (1..=n as u64)
                .map(|id| {
                    Train::new(id)
                        .with_priority(tiers[rng.random_range(0..tiers.len())])
                        .with_max_speed(rng.random_range(40.0..160.0))
                })
                .collect();
            let headway = rng.random_range(0.0..5.0);
            let mut req = request(trains, headway);
            if rng.random_bool(0.5) {
                req = req.with_hold(1, rng.random_range(0.0..60.0));
            }

            let result = ExactOptimizer::new().optimize(&req, budget()).unwrap();
            assert_eq!(result.status, Some(SolveStatus::Optimal));
            assert_eq!(result.schedule.len(), n);
            assert!(result.schedule.is_conflict_free(headway));

            let plans = req.plans(t0()).unwrap();
            let model = ConflictModel::from_plans(&plans, headway);
            let context = SchedulingContext::at_time(t0());
            let order = RuleEngine::precedence().sort_indices(&req.trains, &context);
            let incumbent = model.objective(&model.sequence_starts(&order));
            assert!(result.objective.unwrap() <= incumbent + 1e-4);
        }
    }

    #[test]
    fn test_result_serialization_omits_absent_status() {
        let result = ExactOptimizer::new()
            .optimize(&request(vec![Train::new(1)], 0.0), budget())
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("status").is_none());
        assert!(json.get("objective").is_none());
        assert!(json.get("schedule").is_some());
    }
}
