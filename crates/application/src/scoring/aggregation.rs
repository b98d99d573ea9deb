//! Score aggregation and sink payload assembly

use crate::services::SubmissionContext;
use hackathon_judging_domain::{
    EvaluationError, EvaluationPayload, EvaluationResult, EvaluationSubmission, PrizeCohort,
    ScoreSummary,
};
use indexmap::IndexMap;
use tracing::{debug, instrument};

/// Aggregate a submission into its total and the cohort's maximum.
///
/// The maximum is the sum of every criterion's points and does not depend on
/// the submission. The total sums the scores of the cohort's criteria present
/// in the submission; absent criteria contribute nothing and keys the cohort
/// does not define are ignored.
///
/// Fails only when `cohort` is not the submission's selected cohort.
#[instrument(skip_all, fields(cohort_id = %cohort.id))]
pub fn aggregate(
    submission: &EvaluationSubmission,
    cohort: &PrizeCohort,
) -> EvaluationResult<ScoreSummary> {
    ensure_same_cohort(submission, cohort)?;

    let total_score = cohort
        .evaluation_criteria
        .iter()
        .filter_map(|c| submission.criteria_evaluations.get(&c.name))
        .map(|e| e.score)
        .sum();

    let summary = ScoreSummary {
        total_score,
        max_possible_score: cohort.max_possible_score(),
    };

    debug!(
        total_score = summary.total_score,
        max_possible_score = summary.max_possible_score,
        "aggregated evaluation"
    );

    Ok(summary)
}

/// Assemble the payload handed to the submission sink.
///
/// Scores and feedback are restricted to the cohort's criteria, in cohort
/// order, so they always agree with the aggregate.
pub fn build_payload(
    context: &SubmissionContext,
    submission: &EvaluationSubmission,
    cohort: &PrizeCohort,
) -> EvaluationResult<EvaluationPayload> {
    let summary = aggregate(submission, cohort)?;

    let mut scores = IndexMap::with_capacity(cohort.evaluation_criteria.len());
    let mut feedback = IndexMap::with_capacity(cohort.evaluation_criteria.len());
    for criterion in &cohort.evaluation_criteria {
        if let Some(evaluation) = submission.criteria_evaluations.get(&criterion.name) {
            scores.insert(criterion.name.clone(), evaluation.score);
            feedback.insert(criterion.name.clone(), evaluation.feedback.clone());
        }
    }

    Ok(EvaluationPayload {
        project_id: context.project_id,
        hackathon_id: context.hackathon_id,
        prize_cohort_id: cohort.id,
        judge_identity: context.judge.clone(),
        scores,
        feedback,
        overall_feedback: submission.overall_feedback.clone(),
        total_score: summary.total_score,
        max_possible_score: summary.max_possible_score,
    })
}

fn ensure_same_cohort(
    submission: &EvaluationSubmission,
    cohort: &PrizeCohort,
) -> EvaluationResult<()> {
    if submission.selected_prize_cohort_id != cohort.id {
        return Err(EvaluationError::CohortMismatch {
            expected: submission.selected_prize_cohort_id,
            actual: cohort.id,
        });
    }
    Ok(())
}
