//! Application layer for hackathon judging
//!
//! Validates judge evaluations against their prize cohort, aggregates scores,
//! ranks projects within a cohort and drives a single evaluation through its
//! lifecycle up to the submission sink.
//!
//! ## Modules
//!
//! - `validation` - per-cohort evaluation schemas, evaluation and cohort validation
//! - `scoring` - score aggregation, sink payloads and cohort rankings
//! - `services` - evaluation sessions and the submission sink port

pub mod scoring;
pub mod services;
pub mod validation;

pub use scoring::{aggregate, build_payload, rank_cohort, CohortStanding};
pub use services::{
    EvaluationSession, SessionError, SubmissionContext, SubmissionSink, SubmittedEvaluation,
};
pub use validation::{
    schema_for, validate, validate_with, EvaluationSchema, SchemaCache, Validatable,
    ValidationLimits, ValidationResultExt,
};

use hackathon_judging_domain::{EvaluationError, ValidationResult};
use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug, Clone)]
pub enum ApplicationError {
    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Validation errors, with every field issue
    #[error("Validation failed: {0}")]
    ValidationFailed(ValidationResult),

    /// Request conflicts with the evaluation's current state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal invariant broken
    #[error("Internal error: {0}")]
    Internal(String),

    /// External service unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl ApplicationError {
    /// Get HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            ApplicationError::NotFound(_) => 404,
            ApplicationError::InvalidInput(_) => 400,
            ApplicationError::ValidationFailed(_) => 422,
            ApplicationError::Conflict(_) => 409,
            ApplicationError::Internal(_) => 500,
            ApplicationError::ServiceUnavailable(_) => 503,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApplicationError::ServiceUnavailable(_))
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ApplicationError::NotFound(_) => "NOT_FOUND",
            ApplicationError::InvalidInput(_) => "INVALID_INPUT",
            ApplicationError::ValidationFailed(_) => "VALIDATION_FAILED",
            ApplicationError::Conflict(_) => "CONFLICT",
            ApplicationError::Internal(_) => "INTERNAL_ERROR",
            ApplicationError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }
}

impl From<EvaluationError> for ApplicationError {
    fn from(err: EvaluationError) -> Self {
        match err {
            EvaluationError::UnknownCriterion { .. } => Self::InvalidInput(err.to_string()),
            // Callers must validate before aggregating
            EvaluationError::CohortMismatch { .. } => Self::Internal(err.to_string()),
            EvaluationError::InvalidTransition { .. } => Self::Conflict(err.to_string()),
        }
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
