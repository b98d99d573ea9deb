//! Test fixtures for generating domain entities with realistic data.

use fake::{
    faker::lorem::en::{Sentence, Word},
    Fake,
};
use hackathon_judging_application::SubmissionContext;
use hackathon_judging_domain::{
    Criterion, CriterionEvaluation, EvaluationSubmission, Hackathon, HackathonCategory,
    HackathonId, JudgeIdentity, JudgingMode, PrizeCohort, PrizeCohortId, ProjectId, VotingMode,
};

/// Cohort with criteria `Tech` (10 points) and `UX` (5 points)
pub fn create_test_cohort() -> PrizeCohort {
    create_test_cohort_with_criteria(vec![Criterion::new("Tech", 10), Criterion::new("UX", 5)])
}

/// Cohort with the given criteria and otherwise fixed settings
pub fn create_test_cohort_with_criteria(criteria: Vec<Criterion>) -> PrizeCohort {
    PrizeCohort {
        id: PrizeCohortId::new(),
        name: "Best Technical Implementation".to_string(),
        description: "Awarded for engineering quality".to_string(),
        number_of_winners: 1,
        prize_amount: "$1,000 USDC".to_string(),
        judging_mode: JudgingMode::Manual,
        voting_mode: VotingMode::JudgesOnly,
        max_votes_per_judge: 1,
        evaluation_criteria: criteria,
    }
}

/// Cohort with random name and between one and five random criteria
pub fn create_random_cohort() -> PrizeCohort {
    let count: usize = (1..6).fake();
    let criteria = (0..count)
        .map(|index| {
            // Suffix keeps names unique when the faker repeats a word
            let name = format!("{}-{}", Word().fake::<String>(), index);
            Criterion::new(name, (1..21).fake::<u32>()).with_description(Sentence(3..6).fake::<String>())
        })
        .collect();

    PrizeCohort {
        id: PrizeCohortId::new(),
        name: Sentence(2..4).fake(),
        description: Sentence(5..10).fake(),
        number_of_winners: (1..4).fake(),
        prize_amount: format!("${}", (100..10_000).fake::<u32>()),
        judging_mode: JudgingMode::Manual,
        voting_mode: VotingMode::JudgesOnly,
        max_votes_per_judge: (1..4).fake(),
        evaluation_criteria: criteria,
    }
}

/// Hackathon holding the given cohorts
pub fn create_test_hackathon(cohorts: Vec<PrizeCohort>) -> Hackathon {
    Hackathon {
        id: HackathonId::new(),
        name: format!("{} Hackathon", Word().fake::<String>()),
        categories: vec![HackathonCategory::Defi, HackathonCategory::Infrastructure],
        prize_cohorts: cohorts,
    }
}

/// Submission that passes validation for `cohort`, scoring every criterion
/// at `ratio` of its cap
pub fn create_valid_submission(cohort: &PrizeCohort, ratio: f64) -> EvaluationSubmission {
    let criteria_evaluations = cohort
        .evaluation_criteria
        .iter()
        .map(|c| {
            (
                c.name.clone(),
                CriterionEvaluation::new(f64::from(c.points) * ratio, Sentence(3..8).fake::<String>()),
            )
        })
        .collect();

    EvaluationSubmission {
        selected_prize_cohort_id: cohort.id,
        criteria_evaluations,
        overall_feedback: Sentence(6..12).fake(),
    }
}

/// Random wallet-style judge identity
pub fn create_test_judge() -> JudgeIdentity {
    let high: u64 = (0..u64::MAX).fake();
    let mid: u64 = (0..u64::MAX).fake();
    let low: u32 = (0..u32::MAX).fake();
    JudgeIdentity::new(format!("0x{:016x}{:016x}{:08x}", high, mid, low))
}

/// Submission context for a new project in `hackathon`
pub fn create_test_context(hackathon: &Hackathon) -> SubmissionContext {
    SubmissionContext::new(ProjectId::new(), hackathon.id, create_test_judge())
}
