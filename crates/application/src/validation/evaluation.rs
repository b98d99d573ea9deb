//! Evaluation submission validation

use super::schema::{schema_for, EvaluationSchema, ValidationLimits};
use hackathon_judging_domain::{
    EvaluationSubmission, PrizeCohort, ValidationErrorKind, ValidationResult,
};
use tracing::{debug, instrument};

/// Validate `submission` against `cohort` with default limits.
///
/// Pure: no side effects, the same inputs always give the same result.
pub fn validate(submission: &EvaluationSubmission, cohort: &PrizeCohort) -> ValidationResult {
    let schema = schema_for(&cohort.evaluation_criteria, &ValidationLimits::default());
    validate_with(&schema, submission, cohort)
}

/// Validate `submission` against `cohort` using a prebuilt schema
#[instrument(skip_all, fields(cohort_id = %cohort.id))]
pub fn validate_with(
    schema: &EvaluationSchema,
    submission: &EvaluationSubmission,
    cohort: &PrizeCohort,
) -> ValidationResult {
    let mut result = ValidationResult::success();

    if submission.selected_prize_cohort_id != cohort.id {
        result.add_error(
            "selectedPrizeCohortId",
            ValidationErrorKind::CohortMismatch,
            "Selected prize cohort does not match",
        );
    }

    result.merge(schema.check(submission));

    debug!(
        valid = result.valid,
        errors = result.errors.len(),
        "validated evaluation"
    );

    result
}
