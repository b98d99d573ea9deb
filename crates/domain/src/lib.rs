//! Hackathon Judging Domain Types
//!
//! Core domain model for judging hackathon projects: prize cohorts and their
//! evaluation criteria, a judge's per-criterion verdicts, and the lifecycle of
//! one evaluation from editing to submission.
//!
//! ## Architecture
//!
//! - **identifiers**: UUID newtypes for hackathons, projects, cohorts and evaluations
//! - **cohort**: prize cohorts, criteria, judging/voting modes, loose prize amounts
//! - **hackathon**: hackathons and category mapping
//! - **evaluation**: criterion verdicts, evaluation submissions, score summaries, sink payloads
//! - **lifecycle**: evaluation state machine
//! - **errors**: operation-aborting errors
//! - **validation**: field-level validation results
//!
//! ## Usage
//!
//! ```rust
//! use hackathon_judging_domain::{
//!     cohort::{Criterion, JudgingMode, PrizeCohort, VotingMode},
//!     evaluation::EvaluationSubmission,
//!     identifiers::PrizeCohortId,
//! };
//!
//! let cohort = PrizeCohort {
//!     id: PrizeCohortId::new(),
//!     name: "Best UX".to_string(),
//!     description: String::new(),
//!     number_of_winners: 1,
//!     prize_amount: "$500".to_string(),
//!     judging_mode: JudgingMode::Manual,
//!     voting_mode: VotingMode::JudgesOnly,
//!     max_votes_per_judge: 1,
//!     evaluation_criteria: vec![Criterion::new("Tech", 10), Criterion::new("UX", 5)],
//! };
//!
//! let mut submission = EvaluationSubmission::for_cohort(&cohort);
//! submission.set_score("Tech", 8.0).unwrap();
//! assert!(submission.set_score("Design", 3.0).is_err());
//! assert_eq!(cohort.max_possible_score(), 15);
//! ```

#![warn(clippy::all)]

pub mod cohort;
pub mod errors;
pub mod evaluation;
pub mod hackathon;
pub mod identifiers;
pub mod lifecycle;
pub mod validation;

pub use cohort::{Criterion, JudgingMode, PrizeAmount, PrizeCohort, VotingMode};
pub use errors::{EvaluationError, EvaluationResult, SubmissionError};
pub use evaluation::{
    CriteriaEvaluations, CriterionEvaluation, EvaluationPayload, EvaluationSubmission,
    ScoreSummary,
};
pub use hackathon::{Hackathon, HackathonCategory};
pub use identifiers::*;
pub use lifecycle::EvaluationState;
pub use validation::{IssueSeverity, ValidationErrorKind, ValidationIssue, ValidationResult};
