//! Fluent builder pattern for constructing test data.

use hackathon_judging_domain::{
    Criterion, CriteriaEvaluations, CriterionEvaluation, EvaluationSubmission, Hackathon,
    HackathonCategory, HackathonId, JudgingMode, PrizeCohort, PrizeCohortId, VotingMode,
};

/// Builder for creating PrizeCohort test instances
#[derive(Clone)]
pub struct PrizeCohortBuilder {
    id: PrizeCohortId,
    name: String,
    description: String,
    number_of_winners: u32,
    prize_amount: String,
    judging_mode: JudgingMode,
    voting_mode: VotingMode,
    max_votes_per_judge: u32,
    criteria: Vec<Criterion>,
}

impl PrizeCohortBuilder {
    pub fn new() -> Self {
        Self {
            id: PrizeCohortId::new(),
            name: "Best Overall".to_string(),
            description: "Top project across all tracks".to_string(),
            number_of_winners: 1,
            prize_amount: "$1,000 USDC".to_string(),
            judging_mode: JudgingMode::Manual,
            voting_mode: VotingMode::JudgesOnly,
            max_votes_per_judge: 1,
            criteria: vec![],
        }
    }

    pub fn with_id(mut self, id: PrizeCohortId) -> Self {
        self.id = id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_winners(mut self, number_of_winners: u32) -> Self {
        self.number_of_winners = number_of_winners;
        self
    }

    pub fn with_prize_amount(mut self, amount: impl Into<String>) -> Self {
        self.prize_amount = amount.into();
        self
    }

    pub fn with_judging_mode(mut self, mode: JudgingMode) -> Self {
        self.judging_mode = mode;
        self
    }

    pub fn with_voting_mode(mut self, mode: VotingMode) -> Self {
        self.voting_mode = mode;
        self
    }

    pub fn with_max_votes_per_judge(mut self, votes: u32) -> Self {
        self.max_votes_per_judge = votes;
        self
    }

    pub fn with_criterion(mut self, name: impl Into<String>, points: u32) -> Self {
        self.criteria.push(Criterion::new(name, points));
        self
    }

    pub fn with_criteria(mut self, criteria: Vec<Criterion>) -> Self {
        self.criteria = criteria;
        self
    }

    pub fn automated(mut self) -> Self {
        self.judging_mode = JudgingMode::Automated;
        self
    }

    pub fn build(self) -> PrizeCohort {
        PrizeCohort {
            id: self.id,
            name: self.name,
            description: self.description,
            number_of_winners: self.number_of_winners,
            prize_amount: self.prize_amount,
            judging_mode: self.judging_mode,
            voting_mode: self.voting_mode,
            max_votes_per_judge: self.max_votes_per_judge,
            evaluation_criteria: self.criteria,
        }
    }
}

impl Default for PrizeCohortBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating EvaluationSubmission test instances.
///
/// Unlike the checked setters on [`EvaluationSubmission`], this builder
/// writes any criterion name so tests can produce stray or missing keys.
#[derive(Clone)]
pub struct EvaluationSubmissionBuilder {
    cohort_id: PrizeCohortId,
    evaluations: Vec<(String, CriterionEvaluation)>,
    overall_feedback: String,
}

impl EvaluationSubmissionBuilder {
    /// Empty submission targeting `cohort`
    pub fn for_cohort(cohort: &PrizeCohort) -> Self {
        Self {
            cohort_id: cohort.id,
            evaluations: vec![],
            overall_feedback: "Solid project with a clear demo".to_string(),
        }
    }

    /// Submission scoring every criterion of `cohort` at `ratio` of its cap
    pub fn complete(cohort: &PrizeCohort, ratio: f64) -> Self {
        let mut builder = Self::for_cohort(cohort);
        for criterion in &cohort.evaluation_criteria {
            builder = builder.with_score(
                criterion.name.clone(),
                f64::from(criterion.points) * ratio,
                format!("{} looks good", criterion.name),
            );
        }
        builder
    }

    pub fn with_cohort_id(mut self, id: PrizeCohortId) -> Self {
        self.cohort_id = id;
        self
    }

    pub fn with_score(
        mut self,
        name: impl Into<String>,
        score: f64,
        feedback: impl Into<String>,
    ) -> Self {
        let name = name.into();
        self.evaluations.retain(|(existing, _)| *existing != name);
        self.evaluations
            .push((name, CriterionEvaluation::new(score, feedback)));
        self
    }

    pub fn without(mut self, name: &str) -> Self {
        self.evaluations.retain(|(existing, _)| existing != name);
        self
    }

    pub fn with_overall_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.overall_feedback = feedback.into();
        self
    }

    pub fn build(self) -> EvaluationSubmission {
        EvaluationSubmission {
            selected_prize_cohort_id: self.cohort_id,
            criteria_evaluations: self.evaluations.into_iter().collect::<CriteriaEvaluations>(),
            overall_feedback: self.overall_feedback,
        }
    }
}

/// Builder for creating Hackathon test instances
#[derive(Clone)]
pub struct HackathonBuilder {
    id: HackathonId,
    name: String,
    categories: Vec<HackathonCategory>,
    cohorts: Vec<PrizeCohort>,
}

impl HackathonBuilder {
    pub fn new() -> Self {
        Self {
            id: HackathonId::new(),
            name: "Test Hackathon".to_string(),
            categories: vec![],
            cohorts: vec![],
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_category(mut self, category: HackathonCategory) -> Self {
        self.categories.push(category);
        self
    }

    pub fn with_cohort(mut self, cohort: PrizeCohort) -> Self {
        self.cohorts.push(cohort);
        self
    }

    pub fn build(self) -> Hackathon {
        Hackathon {
            id: self.id,
            name: self.name,
            categories: self.categories,
            prize_cohorts: self.cohorts,
        }
    }
}

impl Default for HackathonBuilder {
    fn default() -> Self {
        Self::new()
    }
}
