//! Application Services
//!
//! Drives one judge's evaluation from editing through submission and defines
//! the port to the ledger/persistence collaborator that accepts it.

mod session;

pub use session::*;

use crate::ApplicationError;
use async_trait::async_trait;
use hackathon_judging_domain::{
    EvaluationError, EvaluationPayload, HackathonId, JudgeIdentity, PrizeCohortId, ProjectId,
    SubmissionError, ValidationResult,
};
use thiserror::Error;

/// Port to the collaborator that records accepted evaluations.
///
/// Resubmitting for the same (project, cohort, judge) is expected to replace
/// the previous record.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn submit(&self, payload: &EvaluationPayload) -> Result<(), SubmissionError>;
}

/// Who is evaluating what
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionContext {
    pub project_id: ProjectId,
    pub hackathon_id: HackathonId,
    pub judge: JudgeIdentity,
}

impl SubmissionContext {
    pub fn new(project_id: ProjectId, hackathon_id: HackathonId, judge: JudgeIdentity) -> Self {
        Self {
            project_id,
            hackathon_id,
            judge,
        }
    }
}

/// Errors returned by [`EvaluationSession`] operations
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Evaluation is invalid: {0}")]
    Invalid(ValidationResult),

    #[error("A submission is already in flight for this evaluation")]
    SubmissionInFlight,

    #[error("Evaluation has already been submitted")]
    AlreadySubmitted,

    #[error("Unknown prize cohort {0}")]
    UnknownCohort(PrizeCohortId),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl From<SessionError> for ApplicationError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Invalid(result) => ApplicationError::ValidationFailed(result),
            SessionError::SubmissionInFlight | SessionError::AlreadySubmitted => {
                ApplicationError::Conflict(err.to_string())
            }
            SessionError::UnknownCohort(_) => ApplicationError::NotFound(err.to_string()),
            SessionError::Evaluation(inner) => inner.into(),
            SessionError::Submission(inner) if inner.is_retryable() => {
                ApplicationError::ServiceUnavailable(inner.to_string())
            }
            SessionError::Submission(inner) => ApplicationError::InvalidInput(inner.to_string()),
        }
    }
}
