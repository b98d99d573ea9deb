//! Proptest strategies for cohorts and submissions.

use hackathon_judging_domain::{
    Criterion, CriterionEvaluation, EvaluationSubmission, JudgingMode, PrizeCohort, PrizeCohortId,
    VotingMode,
};
use proptest::collection::{hash_set, vec};
use proptest::prelude::*;

/// Between one and six criteria with distinct names and 1..=100 points
pub fn criteria_strategy() -> impl Strategy<Value = Vec<Criterion>> {
    hash_set("[A-Z][a-z]{2,10}", 1..=6).prop_flat_map(|names| {
        let names: Vec<String> = names.into_iter().collect();
        let count = names.len();
        vec(1u32..=100, count).prop_map(move |points| {
            names
                .iter()
                .zip(points)
                .map(|(name, points)| Criterion::new(name.clone(), points))
                .collect()
        })
    })
}

/// Manually judged cohort over [`criteria_strategy`]
pub fn cohort_strategy() -> impl Strategy<Value = PrizeCohort> {
    (criteria_strategy(), 1u32..=5).prop_map(|(criteria, winners)| PrizeCohort {
        id: PrizeCohortId::new(),
        name: "Generated Cohort".to_string(),
        description: String::new(),
        number_of_winners: winners,
        prize_amount: "$500".to_string(),
        judging_mode: JudgingMode::Manual,
        voting_mode: VotingMode::JudgesOnly,
        max_votes_per_judge: 1,
        evaluation_criteria: criteria,
    })
}

/// Submission for `cohort` whose scores lie within each criterion's cap and
/// whose feedback satisfies the default length limits
pub fn valid_submission_strategy(cohort: PrizeCohort) -> impl Strategy<Value = EvaluationSubmission> {
    let ratios = vec(0.0f64..=1.0, cohort.evaluation_criteria.len());
    let feedback = vec("[a-zA-Z ]{1,80}", cohort.evaluation_criteria.len());
    let overall = "[a-zA-Z ]{10,200}";

    (ratios, feedback, overall).prop_map(move |(ratios, feedback, overall)| {
        let criteria_evaluations = cohort
            .evaluation_criteria
            .iter()
            .zip(ratios)
            .zip(feedback)
            .map(|((criterion, ratio), feedback)| {
                (
                    criterion.name.clone(),
                    CriterionEvaluation::new(f64::from(criterion.points) * ratio, feedback),
                )
            })
            .collect();

        EvaluationSubmission {
            selected_prize_cohort_id: cohort.id,
            criteria_evaluations,
            overall_feedback: overall,
        }
    })
}

/// Cohort paired with a valid submission for it
pub fn cohort_with_valid_submission() -> impl Strategy<Value = (PrizeCohort, EvaluationSubmission)> {
    cohort_strategy().prop_flat_map(|cohort| {
        let submission = valid_submission_strategy(cohort.clone());
        (Just(cohort), submission)
    })
}

/// Cohort paired with an arbitrary, possibly invalid, submission for it.
///
/// Scores range from -50 to twice the largest cap, keys may be missing, and
/// stray keys may appear.
pub fn cohort_with_any_submission() -> impl Strategy<Value = (PrizeCohort, EvaluationSubmission)> {
    cohort_strategy().prop_flat_map(|cohort| {
        let count = cohort.evaluation_criteria.len();
        let entries = vec((any::<bool>(), -50.0f64..250.0, "[a-z ]{0,20}"), count);
        let stray = proptest::option::of(("[A-Z]{12}", -50.0f64..250.0));
        let overall = "[a-z ]{0,40}";
        (Just(cohort), entries, stray, overall)
    })
    .prop_map(|(cohort, entries, stray, overall)| {
        let mut criteria_evaluations: Vec<(String, CriterionEvaluation)> = cohort
            .evaluation_criteria
            .iter()
            .zip(entries)
            .filter(|(_, (present, _, _))| *present)
            .map(|(criterion, (_, score, feedback))| {
                (criterion.name.clone(), CriterionEvaluation::new(score, feedback))
            })
            .collect();
        if let Some((name, score)) = stray {
            criteria_evaluations.push((name, CriterionEvaluation::new(score, "stray")));
        }

        let submission = EvaluationSubmission {
            selected_prize_cohort_id: cohort.id,
            criteria_evaluations: criteria_evaluations.into_iter().collect(),
            overall_feedback: overall,
        };
        (cohort, submission)
    })
}
