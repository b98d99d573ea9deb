//! Per-cohort evaluation schemas.
//!
//! A schema is derived purely from a cohort's criteria list plus the
//! configured length limits. [`SchemaCache`] memoises schemas on the content
//! of the criteria list so cohorts that share criteria share a schema.

use hackathon_judging_common::{check_length, JudgingConfig, LengthCheck};
use hackathon_judging_domain::{
    Criterion, EvaluationSubmission, PrizeCohort, ValidationErrorKind, ValidationResult,
};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Length limits and policies applied by every schema
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidationLimits {
    pub overall_feedback: RangeInclusive<usize>,
    pub criterion_feedback: RangeInclusive<usize>,
    pub allow_empty_criteria: bool,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self::from(&JudgingConfig::default())
    }
}

impl From<&JudgingConfig> for ValidationLimits {
    fn from(config: &JudgingConfig) -> Self {
        Self {
            overall_feedback: config.min_overall_feedback_chars
                ..=config.max_overall_feedback_chars,
            criterion_feedback: config.min_criterion_feedback_chars
                ..=config.max_criterion_feedback_chars,
            allow_empty_criteria: config.allow_empty_criteria,
        }
    }
}

/// Bounds for one criterion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriterionRule {
    pub name: String,
    pub max_points: u32,
}

/// Validator for evaluations against one list of criteria
#[derive(Debug, Clone)]
pub struct EvaluationSchema {
    rules: IndexMap<String, CriterionRule>,
    duplicates: Vec<String>,
    limits: ValidationLimits,
}

/// Build the schema for `criteria`
pub fn schema_for(criteria: &[Criterion], limits: &ValidationLimits) -> EvaluationSchema {
    let mut rules = IndexMap::with_capacity(criteria.len());
    let mut duplicates = Vec::new();

    for criterion in criteria {
        if rules.contains_key(&criterion.name) {
            duplicates.push(criterion.name.clone());
            continue;
        }
        rules.insert(
            criterion.name.clone(),
            CriterionRule {
                name: criterion.name.clone(),
                max_points: criterion.points,
            },
        );
    }

    EvaluationSchema {
        rules,
        duplicates,
        limits: limits.clone(),
    }
}

impl EvaluationSchema {
    pub fn rules(&self) -> impl Iterator<Item = &CriterionRule> {
        self.rules.values()
    }

    pub fn rule(&self, name: &str) -> Option<&CriterionRule> {
        self.rules.get(name)
    }

    pub fn limits(&self) -> &ValidationLimits {
        &self.limits
    }

    /// Check criteria verdicts and overall feedback.
    ///
    /// Cohort identity is not part of the schema; see
    /// [`validate_with`](super::validate_with).
    pub fn check(&self, submission: &EvaluationSubmission) -> ValidationResult {
        let mut result = ValidationResult::success();

        for name in &self.duplicates {
            result.add_error(
                "evaluationCriteria",
                ValidationErrorKind::DuplicateCriterion,
                format!("Duplicate criterion name {} in prize cohort", name),
            );
        }

        if self.rules.is_empty() && !self.limits.allow_empty_criteria {
            result.add_error(
                "evaluationCriteria",
                ValidationErrorKind::EmptyCriteria,
                "Prize cohort has no evaluation criteria",
            );
        }

        for rule in self.rules.values() {
            let path = format!("criteriaEvaluations.{}", rule.name);
            match submission.criteria_evaluations.get(&rule.name) {
                None => result.add_error(
                    path,
                    ValidationErrorKind::MissingCriterion,
                    format!("{} must be evaluated", rule.name),
                ),
                Some(evaluation) => {
                    self.check_score(&path, rule, evaluation.score, &mut result);
                    self.check_feedback(&path, &evaluation.feedback, &mut result);
                }
            }
        }

        for name in submission.criteria_evaluations.names() {
            if !self.rules.contains_key(name) {
                result.add_error(
                    format!("criteriaEvaluations.{}", name),
                    ValidationErrorKind::UnknownCriterion,
                    format!("Unknown criterion {} for this prize cohort", name),
                );
            }
        }

        match check_length(&submission.overall_feedback, self.limits.overall_feedback.clone()) {
            LengthCheck::Ok => {}
            LengthCheck::TooShort { min, .. } => result.add_error(
                "overallFeedback",
                ValidationErrorKind::OverallFeedbackLength,
                format!("Overall feedback must be at least {} characters", min),
            ),
            LengthCheck::TooLong { max, .. } => result.add_error(
                "overallFeedback",
                ValidationErrorKind::OverallFeedbackLength,
                format!("Overall feedback must be {} characters or less", max),
            ),
        }

        result
    }

    fn check_score(&self, path: &str, rule: &CriterionRule, score: f64, result: &mut ValidationResult) {
        let path = format!("{}.score", path);
        if !score.is_finite() {
            result.add_error(path, ValidationErrorKind::InvalidScore, "Score must be a number");
        } else if score < 0.0 {
            result.add_error(
                path,
                ValidationErrorKind::ScoreOutOfRange,
                "Score cannot be negative",
            );
        } else if score > f64::from(rule.max_points) {
            result.add_error(
                path,
                ValidationErrorKind::ScoreOutOfRange,
                format!("Score cannot exceed {} points", rule.max_points),
            );
        }
    }

    fn check_feedback(&self, path: &str, feedback: &str, result: &mut ValidationResult) {
        let path = format!("{}.feedback", path);
        match check_length(feedback, self.limits.criterion_feedback.clone()) {
            LengthCheck::Ok => {}
            LengthCheck::TooShort { min: 1, .. } => {
                result.add_error(path, ValidationErrorKind::FeedbackTooShort, "Feedback is required")
            }
            LengthCheck::TooShort { min, .. } => result.add_error(
                path,
                ValidationErrorKind::FeedbackTooShort,
                format!("Feedback must be at least {} characters", min),
            ),
            LengthCheck::TooLong { max, .. } => result.add_error(
                path,
                ValidationErrorKind::FeedbackTooLong,
                format!("Feedback must be {} characters or less", max),
            ),
        }
    }
}

type SchemaKey = Vec<(String, u32)>;

/// Memoised schemas keyed by criteria content (names, caps, order)
#[derive(Debug, Default)]
pub struct SchemaCache {
    limits: ValidationLimits,
    schemas: RwLock<HashMap<SchemaKey, Arc<EvaluationSchema>>>,
}

impl SchemaCache {
    pub fn new(limits: ValidationLimits) -> Self {
        Self {
            limits,
            schemas: RwLock::new(HashMap::new()),
        }
    }

    pub fn limits(&self) -> &ValidationLimits {
        &self.limits
    }

    /// Get or build the schema for `criteria`
    pub fn schema_for(&self, criteria: &[Criterion]) -> Arc<EvaluationSchema> {
        let key: SchemaKey = criteria
            .iter()
            .map(|c| (c.name.clone(), c.points))
            .collect();

        // Fast path: read lock
        if let Some(schema) = self.schemas.read().get(&key) {
            return Arc::clone(schema);
        }

        let mut schemas = self.schemas.write();
        Arc::clone(
            schemas
                .entry(key)
                .or_insert_with(|| Arc::new(schema_for(criteria, &self.limits))),
        )
    }

    /// Validate `submission` against `cohort` using the memoised schema
    pub fn validate(
        &self,
        submission: &EvaluationSubmission,
        cohort: &PrizeCohort,
    ) -> ValidationResult {
        let schema = self.schema_for(&cohort.evaluation_criteria);
        super::validate_with(&schema, submission, cohort)
    }

    /// Number of distinct schemas built so far
    pub fn len(&self) -> usize {
        self.schemas.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hackathon_judging_domain::{CriterionEvaluation, PrizeCohortId};

    fn submission(entries: &[(&str, f64, &str)]) -> EvaluationSubmission {
        EvaluationSubmission {
            selected_prize_cohort_id: PrizeCohortId::new(),
            criteria_evaluations: entries
                .iter()
                .map(|(name, score, feedback)| {
                    (name.to_string(), CriterionEvaluation::new(*score, *feedback))
                })
                .collect(),
            overall_feedback: "A thoughtful, complete project".to_string(),
        }
    }

    #[test]
    fn test_schema_records_duplicates() {
        let criteria = vec![Criterion::new("Tech", 10), Criterion::new("Tech", 5)];
        let schema = schema_for(&criteria, &ValidationLimits::default());

        assert_eq!(schema.rules().count(), 1);
        assert_eq!(schema.rule("Tech").map(|r| r.max_points), Some(10));

        let result = schema.check(&submission(&[("Tech", 3.0, "ok")]));
        assert!(result.has_error_kind(ValidationErrorKind::DuplicateCriterion));
    }

    #[test]
    fn test_score_bounds_are_inclusive() {
        let schema = schema_for(&[Criterion::new("Tech", 10)], &ValidationLimits::default());

        assert!(schema.check(&submission(&[("Tech", 0.0, "ok")])).valid);
        assert!(schema.check(&submission(&[("Tech", 10.0, "ok")])).valid);
        assert!(schema.check(&submission(&[("Tech", 7.5, "ok")])).valid);

        let result = schema.check(&submission(&[("Tech", -1.0, "ok")]));
        assert!(result.has_error_at("criteriaEvaluations.Tech.score"));

        let result = schema.check(&submission(&[("Tech", f64::NAN, "ok")]));
        assert!(result.has_error_kind(ValidationErrorKind::InvalidScore));
    }

    #[test]
    fn test_feedback_length_limits() {
        let schema = schema_for(&[Criterion::new("Tech", 10)], &ValidationLimits::default());

        let result = schema.check(&submission(&[("Tech", 5.0, "")]));
        let issue = result.errors_at("criteriaEvaluations.Tech.feedback").next().unwrap();
        assert_eq!(issue.message, "Feedback is required");

        let long = "x".repeat(1001);
        let result = schema.check(&submission(&[("Tech", 5.0, &long)]));
        assert!(result.has_error_kind(ValidationErrorKind::FeedbackTooLong));

        let exact = "x".repeat(1000);
        assert!(schema.check(&submission(&[("Tech", 5.0, &exact)])).valid);
    }

    #[test]
    fn test_empty_criteria_policy() {
        let strict = ValidationLimits {
            allow_empty_criteria: false,
            ..ValidationLimits::default()
        };

        assert!(schema_for(&[], &ValidationLimits::default())
            .check(&submission(&[]))
            .valid);

        let result = schema_for(&[], &strict).check(&submission(&[]));
        assert!(result.has_error_kind(ValidationErrorKind::EmptyCriteria));
    }

    #[test]
    fn test_cache_memoises_on_content() {
        let cache = SchemaCache::default();
        let first = cache.schema_for(&[Criterion::new("Tech", 10), Criterion::new("UX", 5)]);
        let second = cache.schema_for(&[
            Criterion::new("Tech", 10).with_description("ignored"),
            Criterion::new("UX", 5),
        ]);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        let third = cache.schema_for(&[Criterion::new("Tech", 10), Criterion::new("UX", 6)]);
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(cache.len(), 2);
    }
}
