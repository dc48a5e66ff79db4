//! Input validation for section scheduling requests.
//!
//! Checks a request before any scheduling attempt and reports every
//! problem found, not only the first. Detects:
//! - Empty train sets and duplicate train IDs
//! - Non-positive or non-finite speeds and section lengths
//! - Malformed holds (negative, non-finite, or naming an absent train)
//! - Malformed headway and speed overrides

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Section, Train, TrainId};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// No trains were supplied.
    EmptyTrainSet,
    /// Two trains share the same ID.
    DuplicateId,
    /// A train speed, section limit, or override is not positive.
    NonPositiveSpeed,
    /// The section length is not positive.
    NonPositiveLength,
    /// A hold duration is negative or not finite.
    InvalidHold,
    /// A hold or scenario references a train that was not supplied.
    UnknownTrain,
    /// The headway is negative or not finite.
    InvalidHeadway,
    /// The solver time budget is zero.
    InvalidTimeLimit,
    /// A hold, departure, or travel time places a train beyond the
    /// representable timestamp range.
    TimeOutOfRange,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

fn is_positive(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

/// Validates the inputs of a scheduling request.
///
/// Checks:
/// 1. At least one train
/// 2. No duplicate train IDs
/// 3. Every train speed is positive and finite
/// 4. Section length and speed limit are positive and finite
/// 5. The speed override, if any, is positive and finite
/// 6. Holds are non-negative, finite, and reference supplied trains
/// 7. Headway is non-negative and finite
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(
    trains: &[Train],
    section: &Section,
    holds: &HashMap<TrainId, f64>,
    speed_override: Option<f64>,
    headway_minutes: f64,
) -> ValidationResult {
    let mut errors = Vec::new();

    if trains.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyTrainSet,
            "No trains to schedule",
        ));
    }

    let mut train_ids = HashSet::new();
    for train in trains {
        if !train_ids.insert(train.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate train ID: {}", train.id),
            ));
        }
        if !is_positive(train.max_speed_kmh) {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveSpeed,
                format!(
                    "Train {} has non-positive max speed {}",
                    train.id, train.max_speed_kmh
                ),
            ));
        }
    }

    if !is_positive(section.length_km) {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveLength,
            format!(
                "Section {} has non-positive length {}",
                section.id, section.length_km
            ),
        ));
    }
    if !is_positive(section.max_speed_limit_kmh) {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveSpeed,
            format!(
                "Section {} has non-positive speed limit {}",
                section.id, section.max_speed_limit_kmh
            ),
        ));
    }
    if let Some(cap) = speed_override {
        if !is_positive(cap) {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveSpeed,
                format!("Speed override {cap} is not positive"),
            ));
        }
    }

    // Sorted for deterministic error order
    let mut hold_ids: Vec<&TrainId> = holds.keys().collect();
    hold_ids.sort();
    for id in hold_ids {
        let minutes = holds[id];
        if !minutes.is_finite() || minutes < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidHold,
                format!("Hold for train {id} is invalid: {minutes} minutes"),
            ));
        }
        if !train_ids.contains(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownTrain,
                format!("Hold references unknown train {id}"),
            ));
        }
    }

    if !headway_minutes.is_finite() || headway_minutes < 0.0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidHeadway,
            format!("Headway {headway_minutes} minutes is invalid"),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trains() -> Vec<Train> {
        vec![Train::new(1), Train::new(2).with_max_speed(80.0)]
    }

    fn sample_section() -> Section {
        Section::new(10, 50.0, 100.0)
    }

    fn kinds(result: ValidationResult) -> Vec<ValidationErrorKind> {
        result.unwrap_err().into_iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_valid_input() {
        let holds = HashMap::from([(2, 15.0)]);
        assert!(validate_request(&sample_trains(), &sample_section(), &holds, Some(60.0), 2.0).is_ok());
    }

    #[test]
    fn test_empty_train_set() {
        let k = kinds(validate_request(&[], &sample_section(), &HashMap::new(), None, 0.0));
        assert_eq!(k, vec![ValidationErrorKind::EmptyTrainSet]);
    }

    #[test]
    fn test_duplicate_train_id() {
        let trains = vec![Train::new(1), Train::new(1)];
        let k = kinds(validate_request(&trains, &sample_section(), &HashMap::new(), None, 0.0));
        assert!(k.contains(&ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_zero_speed() {
        let trains = vec![Train::new(1).with_max_speed(0.0)];
        let k = kinds(validate_request(&trains, &sample_section(), &HashMap::new(), None, 0.0));
        assert_eq!(k, vec![ValidationErrorKind::NonPositiveSpeed]);
    }

    #[test]
    fn test_degenerate_section() {
        let section = Section::new(1, 0.0, 0.0);
        let k = kinds(validate_request(&sample_trains(), &section, &HashMap::new(), None, 0.0));
        assert!(k.contains(&ValidationErrorKind::NonPositiveLength));
        assert!(k.contains(&ValidationErrorKind::NonPositiveSpeed));
    }

    #[test]
    fn test_zero_override() {
        let k = kinds(validate_request(
            &sample_trains(),
            &sample_section(),
            &HashMap::new(),
            Some(0.0),
            0.0,
        ));
        assert_eq!(k, vec![ValidationErrorKind::NonPositiveSpeed]);
    }

    #[test]
    fn test_malformed_holds() {
        let holds = HashMap::from([(1, -5.0), (99, 10.0)]);
        let k = kinds(validate_request(&sample_trains(), &sample_section(), &holds, None, 0.0));
        assert_eq!(
            k,
            vec![ValidationErrorKind::InvalidHold, ValidationErrorKind::UnknownTrain]
        );
    }

    #[test]
    fn test_invalid_headway() {
        let k = kinds(validate_request(
            &sample_trains(),
            &sample_section(),
            &HashMap::new(),
            None,
            f64::NAN,
        ));
        assert_eq!(k, vec![ValidationErrorKind::InvalidHeadway]);
    }

    #[test]
    fn test_multiple_errors() {
        let trains = vec![Train::new(1).with_max_speed(-1.0), Train::new(1)];
        let errors =
            validate_request(&trains, &Section::new(1, -2.0, 100.0), &HashMap::new(), None, -1.0)
                .unwrap_err();
        assert!(errors.len() >= 4);
    }
}
