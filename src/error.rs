//! Error types.
//!
//! Two families are kept apart so callers can present distinct messages:
//! input shape problems found before the run starts, and policy
//! precondition violations hit while the run is in progress.

use thiserror::Error;

use crate::models::ProcessId;
use crate::validation::ValidationError;

/// Simulation result alias.
pub type SimulationResult<T> = Result<T, SimulationError>;

/// A scheduling policy was asked to act on data it cannot handle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("process {process_id} has no priority but the policy ranks by priority")]
    MissingPriority { process_id: ProcessId },

    #[error("round-robin quantum must be a positive integer, got {0}")]
    InvalidQuantum(u32),
}

/// Any failure of a simulation run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("invalid simulation input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),

    #[error("policy precondition violated: {0}")]
    Policy(#[from] PolicyError),
}

impl SimulationError {
    /// Whether the error stems from the input shape.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// The individual validation errors, empty for policy errors.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidInput(errors) => errors,
            Self::Policy(_) => &[],
        }
    }
}

impl From<Vec<ValidationError>> for SimulationError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidInput(errors)
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
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_input_error_display() {
        let err = SimulationError::from(vec![
            ValidationError::new(ValidationErrorKind::LengthMismatch, "lengths differ"),
            ValidationError::new(ValidationErrorKind::MissingQuantum, "quantum missing"),
        ]);
        assert!(err.is_input_error());
        assert_eq!(err.validation_errors().len(), 2);
        assert_eq!(
            err.to_string(),
            "invalid simulation input: lengths differ; quantum missing"
        );
    }

    #[test]
    fn test_policy_error_conversion() {
        let err: SimulationError = PolicyError::MissingPriority { process_id: 2 }.into();
        assert!(!err.is_input_error());
        assert!(err.validation_errors().is_empty());
        assert!(err.to_string().contains("process 2"));
    }
}
