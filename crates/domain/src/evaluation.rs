//! Judge evaluations: per-criterion verdicts, the submission that groups them,
//! and the aggregated payload handed to the submission sink.

use crate::cohort::{Criterion, PrizeCohort};
use crate::errors::{EvaluationError, EvaluationResult};
use crate::identifiers::{HackathonId, JudgeIdentity, PrizeCohortId, ProjectId};
use indexmap::IndexMap;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A judge's verdict on one criterion for one project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CriterionEvaluation {
    pub score: f64,
    pub feedback: String,
}

impl CriterionEvaluation {
    pub fn new(score: f64, feedback: impl Into<String>) -> Self {
        Self {
            score,
            feedback: feedback.into(),
        }
    }
}

/// Criterion name to verdict, in the cohort's criterion order.
///
/// Entries created through [`CriteriaEvaluations::for_criteria`] and edited
/// through [`set_score`](Self::set_score) / [`set_feedback`](Self::set_feedback)
/// can only ever use names of the cohort they were created for. Maps coming
/// from the wire may carry any name, but never the same name twice;
/// validation reports stray keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CriteriaEvaluations(IndexMap<String, CriterionEvaluation>);

impl CriteriaEvaluations {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Blank verdicts (`score: 0`, empty feedback) for every criterion
    pub fn for_criteria(criteria: &[Criterion]) -> Self {
        criteria
            .iter()
            .map(|c| (c.name.clone(), CriterionEvaluation::default()))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&CriterionEvaluation> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CriterionEvaluation)> {
        self.0.iter().map(|(name, eval)| (name.as_str(), eval))
    }

    /// Insert a verdict without checking the name against any cohort.
    ///
    /// Meant for assembling maps from external input; edits made on behalf of
    /// a judge go through the checked setters.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        evaluation: CriterionEvaluation,
    ) -> Option<CriterionEvaluation> {
        self.0.insert(name.into(), evaluation)
    }

    /// Set the score of an existing entry
    pub fn set_score(
        &mut self,
        cohort_id: PrizeCohortId,
        name: &str,
        score: f64,
    ) -> EvaluationResult<()> {
        self.entry_mut(cohort_id, name)?.score = score;
        Ok(())
    }

    /// Set the feedback of an existing entry
    pub fn set_feedback(
        &mut self,
        cohort_id: PrizeCohortId,
        name: &str,
        feedback: impl Into<String>,
    ) -> EvaluationResult<()> {
        self.entry_mut(cohort_id, name)?.feedback = feedback.into();
        Ok(())
    }

    fn entry_mut(
        &mut self,
        cohort_id: PrizeCohortId,
        name: &str,
    ) -> EvaluationResult<&mut CriterionEvaluation> {
        self.0
            .get_mut(name)
            .ok_or_else(|| EvaluationError::UnknownCriterion {
                name: name.to_string(),
                cohort_id,
            })
    }
}

impl FromIterator<(String, CriterionEvaluation)> for CriteriaEvaluations {
    fn from_iter<I: IntoIterator<Item = (String, CriterionEvaluation)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for CriteriaEvaluations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CriteriaVisitor;

        impl<'de> Visitor<'de> for CriteriaVisitor {
            type Value = CriteriaEvaluations;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of criterion name to evaluation")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = IndexMap::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, evaluation)) =
                    access.next_entry::<String, CriterionEvaluation>()?
                {
                    if map.contains_key(&name) {
                        return Err(de::Error::custom(format!(
                            "criterion {} is evaluated more than once",
                            name
                        )));
                    }
                    map.insert(name, evaluation);
                }
                Ok(CriteriaEvaluations(map))
            }
        }

        deserializer.deserialize_map(CriteriaVisitor)
    }
}

/// One judge's full evaluation of one project within one selected cohort
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationSubmission {
    pub selected_prize_cohort_id: PrizeCohortId,
    #[serde(default)]
    pub criteria_evaluations: CriteriaEvaluations,
    #[serde(default)]
    pub overall_feedback: String,
}

impl EvaluationSubmission {
    /// Fresh submission with a blank verdict per criterion of `cohort`
    pub fn for_cohort(cohort: &PrizeCohort) -> Self {
        Self {
            selected_prize_cohort_id: cohort.id,
            criteria_evaluations: CriteriaEvaluations::for_criteria(&cohort.evaluation_criteria),
            overall_feedback: String::new(),
        }
    }

    /// Switch to another cohort.
    ///
    /// All verdicts are discarded and replaced by blank ones keyed by the new
    /// cohort's criteria; overall feedback is kept.
    pub fn select_cohort(&mut self, cohort: &PrizeCohort) {
        self.selected_prize_cohort_id = cohort.id;
        self.criteria_evaluations = CriteriaEvaluations::for_criteria(&cohort.evaluation_criteria);
    }

    pub fn set_score(&mut self, name: &str, score: f64) -> EvaluationResult<()> {
        self.criteria_evaluations
            .set_score(self.selected_prize_cohort_id, name, score)
    }

    pub fn set_feedback(&mut self, name: &str, feedback: impl Into<String>) -> EvaluationResult<()> {
        self.criteria_evaluations
            .set_feedback(self.selected_prize_cohort_id, name, feedback)
    }
}

/// Aggregate of one submission within its cohort
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub total_score: f64,
    pub max_possible_score: u64,
}

impl ScoreSummary {
    /// Total as a percentage of the maximum; 0 when the cohort has no points
    pub fn percentage(&self) -> f64 {
        if self.max_possible_score == 0 {
            return 0.0;
        }
        self.total_score / self.max_possible_score as f64 * 100.0
    }
}

/// Payload accepted by the ledger/persistence collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationPayload {
    pub project_id: ProjectId,
    pub hackathon_id: HackathonId,
    pub prize_cohort_id: PrizeCohortId,
    pub judge_identity: JudgeIdentity,
    pub scores: IndexMap<String, f64>,
    pub feedback: IndexMap<String, String>,
    pub overall_feedback: String,
    pub total_score: f64,
    pub max_possible_score: u64,
}
