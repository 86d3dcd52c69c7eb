//! Input validation for simulation runs.
//!
//! Checks the shape of the input arrays and their compatibility with the
//! selected configuration before any simulation state is built. Detects:
//! - Arrays of different lengths
//! - Zero burst times
//! - Workloads whose clock would exceed the tick range
//! - Missing priorities for the priority policy
//! - Missing or out-of-range quantum for round-robin
//! - Preemption flags the algorithm cannot honor
//!
//! All problems are collected and reported together.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{Algorithm, SimulationConfig, MAX_QUANTUM, MIN_QUANTUM};
use crate::models::{ScheduleInput, Ticks};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// Parallel input arrays differ in length.
    LengthMismatch,
    /// A process has a burst time of zero.
    ZeroBurst,
    /// The priority policy was selected without priorities.
    MissingPriority,
    /// Round-robin was selected without a quantum.
    MissingQuantum,
    /// The quantum is outside the accepted range.
    InvalidQuantum,
    /// The preemption flag contradicts the algorithm.
    InvalidPreemption,
    /// The algorithm name is not recognized.
    UnknownAlgorithm,
    /// Latest arrival plus total burst does not fit in the clock.
    TimeOverflow,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a configuration on its own.
///
/// Checks:
/// 1. FCFS is non-preemptive
/// 2. Round-robin is preemptive
/// 3. Round-robin has a quantum in `MIN_QUANTUM..=MAX_QUANTUM`
pub fn validate_config(config: &SimulationConfig) -> ValidationResult {
    let mut errors = Vec::new();
    check_config(config, &mut errors);
    finish(errors)
}

/// Validates the input arrays against a configuration.
///
/// Checks everything [`validate_config`] does, plus:
/// 1. Burst and priority arrays match the arrival array in length
/// 2. Every burst time is at least 1
/// 3. Latest arrival plus the sum of all bursts fits in [`Ticks`]
/// 4. Priorities are present when the algorithm ranks by priority
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(input: &ScheduleInput, config: &SimulationConfig) -> ValidationResult {
    let mut errors = Vec::new();
    check_config(config, &mut errors);

    let n = input.arrival_times.len();
    if input.burst_times.len() != n {
        errors.push(ValidationError::new(
            ValidationErrorKind::LengthMismatch,
            format!(
                "Arrival times and burst times must have the same number of values ({} vs {})",
                n,
                input.burst_times.len()
            ),
        ));
    }

    if let Some(priorities) = &input.priorities {
        if priorities.len() != n {
            errors.push(ValidationError::new(
                ValidationErrorKind::LengthMismatch,
                format!(
                    "Priority values must match the number of arrival times ({} vs {})",
                    priorities.len(),
                    n
                ),
            ));
        }
    }

    for (id, _) in input.burst_times.iter().enumerate().filter(|(_, b)| **b == 0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::ZeroBurst,
            format!("Process {id} has a burst time of 0"),
        ));
    }

    // The clock never passes the latest arrival plus the total burst
    let latest_arrival = input.arrival_times.iter().copied().max().unwrap_or(0);
    let horizon = input
        .burst_times
        .iter()
        .try_fold(latest_arrival, |acc, &burst| acc.checked_add(burst));
    if horizon.is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimeOverflow,
            format!("Latest arrival plus total burst time exceeds {}", Ticks::MAX),
        ));
    }

    if config.algorithm == Algorithm::Priority && input.priorities.is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingPriority,
            "Priority scheduling requires a priority value for every process",
        ));
    }

    finish(errors)
}

fn check_config(config: &SimulationConfig, errors: &mut Vec<ValidationError>) {
    match config.algorithm {
        Algorithm::Fcfs if config.preemptive => {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidPreemption,
                "First-come-first-served cannot be preemptive",
            ));
        }
        Algorithm::RoundRobin => {
            if !config.preemptive {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidPreemption,
                    "Round-robin is always preemptive",
                ));
            }
            match config.quantum {
                None => errors.push(ValidationError::new(
                    ValidationErrorKind::MissingQuantum,
                    "Round-robin requires a time quantum",
                )),
                Some(q) if !(MIN_QUANTUM..=MAX_QUANTUM).contains(&q) => {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidQuantum,
                        format!("Time quantum must be between {MIN_QUANTUM} and {MAX_QUANTUM}, got {q}"),
                    ))
                }
                Some(_) => {}
            }
        }
        _ => {}
    }
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

    fn fcfs() -> SimulationConfig {
        SimulationConfig::new(Algorithm::Fcfs)
    }

    fn round_robin(quantum: Option<u32>) -> SimulationConfig {
        let config = SimulationConfig::new(Algorithm::RoundRobin).with_preemptive(true);
        match quantum {
            Some(q) => config.with_quantum(q),
            None => config,
        }
    }

    fn kinds(result: ValidationResult) -> Vec<ValidationErrorKind> {
        result.unwrap_err().iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_valid_input() {
        let input = ScheduleInput::new(vec![0, 1, 2], vec![5, 3, 1]);
        assert!(validate_input(&input, &fcfs()).is_ok());
    }

    #[test]
    fn test_empty_input_is_valid() {
        assert!(validate_input(&ScheduleInput::default(), &fcfs()).is_ok());
    }

    #[test]
    fn test_length_mismatch() {
        let input = ScheduleInput::new(vec![0, 1], vec![5]);
        assert_eq!(
            kinds(validate_input(&input, &fcfs())),
            vec![ValidationErrorKind::LengthMismatch]
        );
    }

    #[test]
    fn test_priority_length_mismatch() {
        let input = ScheduleInput::new(vec![0, 1], vec![5, 2]).with_priorities(vec![1]);
        let config = SimulationConfig::new(Algorithm::Priority);
        assert_eq!(
            kinds(validate_input(&input, &config)),
            vec![ValidationErrorKind::LengthMismatch]
        );
    }

    #[test]
    fn test_zero_burst() {
        let input = ScheduleInput::new(vec![0, 1], vec![0, 2]);
        let errors = validate_input(&input, &fcfs()).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::ZeroBurst);
        assert!(errors[0].message.contains("Process 0"));
    }

    #[test]
    fn test_missing_priority() {
        let input = ScheduleInput::new(vec![0], vec![1]);
        let config = SimulationConfig::new(Algorithm::Priority).with_preemptive(true);
        assert_eq!(
            kinds(validate_input(&input, &config)),
            vec![ValidationErrorKind::MissingPriority]
        );
    }

    #[test]
    fn test_priorities_optional_for_other_algorithms() {
        let input = ScheduleInput::new(vec![0], vec![1]).with_priorities(vec![4]);
        assert!(validate_input(&input, &fcfs()).is_ok());
    }

    #[test]
    fn test_fcfs_preemptive_rejected() {
        let config = fcfs().with_preemptive(true);
        assert_eq!(
            kinds(validate_config(&config)),
            vec![ValidationErrorKind::InvalidPreemption]
        );
    }

    #[test]
    fn test_round_robin_quantum() {
        assert!(validate_config(&round_robin(Some(1))).is_ok());
        assert!(validate_config(&round_robin(Some(1000))).is_ok());
        assert_eq!(
            kinds(validate_config(&round_robin(None))),
            vec![ValidationErrorKind::MissingQuantum]
        );
        assert_eq!(
            kinds(validate_config(&round_robin(Some(0)))),
            vec![ValidationErrorKind::InvalidQuantum]
        );
        assert_eq!(
            kinds(validate_config(&round_robin(Some(1001)))),
            vec![ValidationErrorKind::InvalidQuantum]
        );
    }

    #[test]
    fn test_round_robin_must_be_preemptive() {
        let config = SimulationConfig::new(Algorithm::RoundRobin).with_quantum(2);
        assert_eq!(
            kinds(validate_config(&config)),
            vec![ValidationErrorKind::InvalidPreemption]
        );
    }

    #[test]
    fn test_multiple_errors() {
        let input = ScheduleInput::new(vec![0, 1], vec![0]);
        let config = SimulationConfig::new(Algorithm::RoundRobin);
        let errors = validate_input(&input, &config).unwrap_err();
        // Preemption + quantum + length + zero burst
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_time_overflow() {
        let input = ScheduleInput::new(vec![0, u64::MAX - 1], vec![1, 5]);
        let config = SimulationConfig::new(Algorithm::Sjf).with_preemptive(true);
        assert_eq!(
            kinds(validate_input(&input, &config)),
            vec![ValidationErrorKind::TimeOverflow]
        );

        let fits = ScheduleInput::new(vec![u64::MAX - 6, 0], vec![3, 3]);
        assert!(validate_input(&fits, &fcfs()).is_ok());
    }
}
