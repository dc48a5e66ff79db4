//! Error types.

use crate::models::TrainId;
use crate::validation::{ValidationError, ValidationErrorKind};

/// Errors returned by the scheduling entry points.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScheduleError {
    /// The request was rejected before any scheduling attempt.
    #[error("invalid input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),
    /// A train has no positive effective speed through the section.
    #[error("train {train_id} cannot traverse the section at {speed_kmh} km/h")]
    Unschedulable { train_id: TrainId, speed_kmh: f64 },
    /// The solver declared the conflict model infeasible. The disjunctive
    /// formulation always admits an ordering, so this is an internal fault.
    #[error("solver reported the conflict model for {trains} trains as infeasible")]
    SolverInfeasible { trains: usize },
    /// The solver returned starts that break the conflict model (overlap
    /// or entry before release). Numeric or backend fault.
    #[error("solver solution for {trains} trains violates {violations} model constraints")]
    InvalidSolution { trains: usize, violations: usize },
}

impl ScheduleError {
    /// Whether this error stems from caller input rather than an internal fault.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ScheduleError::InvalidInput(_) | ScheduleError::Unschedulable { .. }
        )
    }

    /// Validation errors carried by an `InvalidInput`.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            ScheduleError::InvalidInput(errors) => errors,
            _ => &[],
        }
    }
}

impl ScheduleError {
    pub(crate) fn time_out_of_range(train_id: TrainId, minutes: f64) -> Self {
        ScheduleError::InvalidInput(vec![ValidationError::new(
            ValidationErrorKind::TimeOutOfRange,
            format!("Train {train_id} would be placed {minutes} minutes out, beyond the supported time range"),
        )])
    }
}

impl From<Vec<ValidationError>> for ScheduleError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ScheduleError::InvalidInput(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_messages() {
        let err = ScheduleError::from(vec![
            ValidationError::new(ValidationErrorKind::EmptyTrainSet, "no trains"),
            ValidationError::new(ValidationErrorKind::InvalidHeadway, "headway is negative"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid input: no trains; headway is negative"
        );
        assert!(err.is_input_error());
        assert_eq!(err.validation_errors().len(), 2);
    }

    #[test]
    fn test_infeasible_is_internal() {
        let err = ScheduleError::SolverInfeasible { trains: 3 };
        assert!(!err.is_input_error());
        assert!(err.validation_errors().is_empty());
        assert!(err.to_string().contains("3 trains"));
    }

    #[test]
    fn test_invalid_solution_is_internal() {
        let err = ScheduleError::InvalidSolution { trains: 4, violations: 2 };
        assert!(!err.is_input_error());
        assert!(err.to_string().contains("violates 2"));
    }

    #[test]
    fn test_time_out_of_range_is_input() {
        let err = ScheduleError::time_out_of_range(7, 1e12);
        assert!(err.is_input_error());
        assert_eq!(err.validation_errors()[0].kind, ValidationErrorKind::TimeOutOfRange);
    }
}
