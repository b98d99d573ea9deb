//! Error types for the judging domain.
//!
//! Field-level validation problems are not errors here: they are collected in
//! a [`ValidationResult`](crate::validation::ValidationResult) so callers can
//! point a judge at each broken field. The enums below cover the cases that
//! abort an operation outright.

use crate::identifiers::PrizeCohortId;
use crate::lifecycle::EvaluationState;

/// Errors raised while editing or scoring an evaluation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    /// Write to a criterion the selected cohort does not define
    #[error("Unknown criterion '{name}' for prize cohort {cohort_id}")]
    UnknownCriterion {
        name: String,
        cohort_id: PrizeCohortId,
    },

    /// Cohort passed in does not match the submission's selected cohort
    #[error("Submission targets prize cohort {expected}, but cohort {actual} was supplied")]
    CohortMismatch {
        expected: PrizeCohortId,
        actual: PrizeCohortId,
    },

    /// Lifecycle transition not allowed
    #[error("Evaluation state transition not allowed: {from:?} -> {to:?}")]
    InvalidTransition {
        from: EvaluationState,
        to: EvaluationState,
    },
}

impl EvaluationError {
    /// Machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCriterion { .. } => "UNKNOWN_CRITERION",
            Self::CohortMismatch { .. } => "COHORT_MISMATCH",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
        }
    }
}

/// Failure reported by the ledger/persistence collaborator that accepts
/// aggregated evaluations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmissionError {
    /// The sink refused the payload
    #[error("Submission rejected: {0}")]
    Rejected(String),

    /// The sink could not be reached
    #[error("Submission sink unavailable: {0}")]
    Unavailable(String),

    /// The ledger transaction failed
    #[error("Ledger transaction failed: {0}")]
    Ledger(String),
}

impl SubmissionError {
    /// Whether a judge-triggered retry has a chance of succeeding.
    ///
    /// Nothing retries automatically; this only informs the message shown.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Ledger(_))
    }
}

/// Result type for evaluation operations
pub type EvaluationResult<T> = Result<T, EvaluationError>;
