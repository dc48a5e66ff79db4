//! End-to-end checks through the crate-root entry points.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use section_sched::models::{PriorityTier, Schedule, Section, Train};
use section_sched::scheduler::ScheduleMetrics;
use section_sched::validation::ValidationErrorKind;
use section_sched::{
    build_heuristic_schedule, optimize_schedule, OptimizerConfig, ScheduleError, SolveStatus,
};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 6, 0, 0).unwrap()
}

fn at(minutes: i64) -> DateTime<Utc> {
    start() + chrono::Duration::minutes(minutes)
}

fn heuristic(trains: Vec<Train>, section: Section, holds: HashMap<u64, f64>) -> Schedule {
    build_heuristic_schedule(trains, section, Some(start()), holds, None).unwrap()
}

#[test]
fn scenario_a_single_train_travel_time() {
    let schedule = heuristic(
        vec![Train::new(1).with_max_speed(100.0)],
        Section::new(1, 100.0, 120.0),
        HashMap::new(),
    );

    assert_eq!(schedule.len(), 1);
    let entry = &schedule.entries[0];
    assert_eq!(entry.planned_entry, start());
    assert_eq!(entry.planned_exit, at(60));
}

#[test]
fn scenario_b_back_to_back_chaining() {
    let trains = vec![
        Train::new(2).with_scheduled_departure(at(10)),
        Train::new(1).with_scheduled_departure(at(5)),
    ];
    let schedule = heuristic(trains, Section::new(1, 50.0, 100.0), HashMap::new());

    assert_eq!(schedule.train_order(), vec![1, 2]);
    let first = schedule.entry_for_train(1).unwrap();
    let second = schedule.entry_for_train(2).unwrap();
    assert_eq!((first.planned_entry, first.planned_exit), (start(), at(30)));
    assert_eq!((second.planned_entry, second.planned_exit), (at(30), at(60)));

    let metrics = ScheduleMetrics::calculate(&schedule);
    assert!((metrics.average_headway_minutes - 30.0).abs() < 1e-9);
    assert!((metrics.throughput_per_hour - 2.0).abs() < 1e-9);
}

#[test]
fn scenario_c_hold_within_busy_section() {
    let trains = vec![
        Train::new(1).with_scheduled_departure(at(5)),
        Train::new(2).with_scheduled_departure(at(10)),
    ];
    let holds = HashMap::from([(2, 15.0)]);
    let schedule = heuristic(trains, Section::new(1, 50.0, 100.0), holds);

    // Section frees at +30, later than the hold
    assert_eq!(schedule.entry_for_train(2).unwrap().planned_entry, at(30));
}

#[test]
fn scenario_c_hold_beyond_section_free() {
    let trains = vec![Train::new(1), Train::new(2)];
    let holds = HashMap::from([(2, 45.0)]);
    let schedule = heuristic(trains, Section::new(1, 50.0, 100.0), holds);

    assert_eq!(schedule.entry_for_train(2).unwrap().planned_entry, at(45));
    assert!(schedule.is_conflict_free(0.0));
}

#[test]
fn scenario_d_exact_with_headway() {
    let config = OptimizerConfig::new()
        .with_headway(5.0)
        .with_time_limit(Duration::from_secs(10));
    let result = optimize_schedule(
        vec![Train::new(1), Train::new(2)],
        Section::new(1, 50.0, 100.0),
        Some(start()),
        HashMap::new(),
        None,
        &config,
    )
    .unwrap();

    assert_eq!(result.status, Some(SolveStatus::Optimal));
    assert_eq!(result.schedule.len(), 2);
    assert!(result.schedule.is_conflict_free(5.0));

    let first = &result.schedule.entries[0];
    let second = &result.schedule.entries[1];
    assert!((first.planned_entry - start()).num_seconds().abs() <= 1);
    let gap = (second.planned_entry - first.planned_exit).num_milliseconds() as f64 / 60_000.0;
    assert!((gap - 5.0).abs() < 1e-3);
    assert!((result.objective.unwrap() - 190.0).abs() < 1e-3);
    assert_eq!(result.metrics.train_count, 2);
}

#[test]
fn priority_dominance_in_both_strategies() {
    let trains = || {
        vec![
            Train::new(1).with_priority(PriorityTier::Low),
            Train::new(2).with_priority(PriorityTier::High),
        ]
    };
    let section = Section::new(1, 30.0, 90.0);

    let schedule = heuristic(trains(), section.clone(), HashMap::new());
    assert!(
        schedule.entry_for_train(2).unwrap().planned_entry
            <= schedule.entry_for_train(1).unwrap().planned_entry
    );

    let result = optimize_schedule(
        trains(),
        section,
        Some(start()),
        HashMap::new(),
        None,
        &OptimizerConfig::default(),
    )
    .unwrap();
    assert_eq!(result.schedule.train_order(), vec![2, 1]);
}

#[test]
fn empty_schedule_metrics_are_zero() {
    let metrics = ScheduleMetrics::calculate(&Schedule::new());
    assert_eq!(metrics.throughput_per_hour, 0.0);
    assert_eq!(metrics.average_headway_minutes, 0.0);
}

#[test]
fn invalid_inputs_are_reported_before_scheduling() {
    let err = build_heuristic_schedule(
        vec![],
        Section::new(1, 0.0, 100.0),
        Some(start()),
        HashMap::new(),
        Some(-5.0),
    )
    .unwrap_err();

    assert!(err.is_input_error());
    let kinds: Vec<_> = err.validation_errors().iter().map(|e| e.kind).collect();
    assert!(kinds.contains(&ValidationErrorKind::EmptyTrainSet));
    assert!(kinds.contains(&ValidationErrorKind::NonPositiveLength));
    assert!(kinds.contains(&ValidationErrorKind::NonPositiveSpeed));

    let err = optimize_schedule(
        vec![Train::new(1)],
        Section::new(1, 10.0, 100.0),
        Some(start()),
        HashMap::new(),
        None,
        &OptimizerConfig::new().with_time_limit(Duration::ZERO),
    )
    .unwrap_err();
    assert!(matches!(err, ScheduleError::InvalidInput(_)));
}
