//! Input validation for scheduling runs.
//!
//! Checks a caller-supplied task set and pool shape before scheduling and
//! reports every problem found, not just the first. Detects:
//! - Duplicate task IDs
//! - Negative or non-finite arrival times
//! - Non-positive or non-finite execution times
//! - Empty pools and non-positive processing powers

use crate::error::SchedulingError;
use crate::models::Task;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two tasks share the same ID.
    DuplicateId,
    /// Arrival time is negative, NaN or infinite.
    InvalidArrivalTime,
    /// Execution time is zero, negative, NaN or infinite.
    InvalidExecutionTime,
    /// The pool has no processors.
    EmptyPool,
    /// A processor's power is zero, negative, NaN or infinite.
    InvalidProcessingPower,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a task set.
///
/// Checks:
/// 1. No duplicate task IDs
/// 2. Arrival times are finite and non-negative
/// 3. Execution times are finite and positive
///
/// An empty task set is valid.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_tasks(tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut task_ids = HashSet::new();

    for task in tasks {
        if !task_ids.insert(task.id()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.id()),
            ));
        }

        let arrival = task.arrival_time();
        if !arrival.is_finite() || arrival < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidArrivalTime,
                format!("Task {} has invalid arrival time {arrival}", task.id()),
            ));
        }

        let execution = task.execution_time();
        if !execution.is_finite() || execution <= 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidExecutionTime,
                format!("Task {} has invalid execution time {execution}", task.id()),
            ));
        }
    }

    finish(errors)
}

/// Validates a pool shape given as one processing power per processor.
pub fn validate_processing_powers(powers: &[f64]) -> ValidationResult {
    let mut errors = Vec::new();

    if powers.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyPool,
            "Pool must have at least one processor",
        ));
    }

    for (i, &power) in powers.iter().enumerate() {
        if !power.is_finite() || power <= 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidProcessingPower,
                format!("Processor {i} has invalid processing power {power}"),
            ));
        }
    }

    finish(errors)
}

/// Folds a list of validation errors into one configuration error.
pub fn into_configuration_error(errors: Vec<ValidationError>) -> SchedulingError {
    let joined = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    SchedulingError::InvalidConfiguration(joined)
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tasks() {
        let tasks = vec![Task::new(0, 0.0, 10.0), Task::new(1, 5.0, 0.5)];
        assert!(validate_tasks(&tasks).is_ok());
        assert!(validate_tasks(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_task_id() {
        let tasks = vec![Task::new(1, 0.0, 10.0), Task::new(1, 5.0, 10.0)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_invalid_arrival() {
        let tasks = vec![Task::new(0, -1.0, 10.0), Task::new(1, f64::INFINITY, 10.0)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::InvalidArrivalTime)
                .count(),
            2
        );
    }

    #[test]
    fn test_invalid_execution() {
        let tasks = vec![
            Task::new(0, 0.0, 0.0),
            Task::new(1, 0.0, -3.0),
            Task::new(2, 0.0, f64::NAN),
        ];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::InvalidExecutionTime));
    }

    #[test]
    fn test_multiple_errors() {
        let tasks = vec![Task::new(0, -1.0, 0.0), Task::new(0, 0.0, 1.0)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_processing_powers() {
        assert!(validate_processing_powers(&[1.0, 2.5]).is_ok());

        let errors = validate_processing_powers(&[]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyPool);

        let errors = validate_processing_powers(&[1.0, 0.0, f64::NAN]).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].message.contains("Processor 1"));
    }

    #[test]
    fn test_into_configuration_error() {
        let errors = validate_tasks(&[Task::new(3, -1.0, 0.0)]).unwrap_err();
        let err = into_configuration_error(errors);
        match err {
            SchedulingError::InvalidConfiguration(msg) => {
                assert!(msg.contains("arrival"));
                assert!(msg.contains("execution"));
                assert!(msg.contains("; "));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
