//! Prize cohort and hackathon configuration validation

use super::{Validatable, ValidatorExt};
use hackathon_judging_domain::{
    Hackathon, PrizeCohort, ValidationErrorKind, ValidationIssue, ValidationResult,
};
use std::collections::HashSet;

impl Validatable for PrizeCohort {
    fn validate_all(&self) -> ValidationResult {
        let mut result = self.to_validation_result();

        let mut seen = HashSet::new();
        for (index, criterion) in self.evaluation_criteria.iter().enumerate() {
            let path = format!("evaluationCriteria.{}", index);

            if criterion.name.trim().is_empty() {
                result.add_error(
                    format!("{}.name", path),
                    ValidationErrorKind::InvalidValue,
                    "Criterion name cannot be empty",
                );
            } else if !seen.insert(criterion.name.as_str()) {
                result.add_error(
                    format!("{}.name", path),
                    ValidationErrorKind::DuplicateCriterion,
                    format!("Duplicate criterion name {}", criterion.name),
                );
            }

            if criterion.points == 0 {
                result.add_error(
                    format!("{}.points", path),
                    ValidationErrorKind::InvalidValue,
                    "Criterion points must be at least 1",
                );
            }
        }

        if self.judging_mode.requires_criteria() && self.evaluation_criteria.is_empty() {
            result.add_error(
                "evaluationCriteria",
                ValidationErrorKind::EmptyCriteria,
                "Manually judged prize cohorts need at least one criterion",
            );
        }

        if !self.prize_amount.trim().is_empty() && self.prize_value().is_none() {
            result.add_warning("prizeAmount", "Prize amount has no numeric value");
        }

        result
    }
}

impl Validatable for Hackathon {
    fn validate_all(&self) -> ValidationResult {
        let mut result = ValidationResult::success();

        if self.name.trim().is_empty() {
            result.add_error("name", ValidationErrorKind::InvalidValue, "Hackathon name cannot be empty");
        }

        let mut seen = HashSet::new();
        for (index, cohort) in self.prize_cohorts.iter().enumerate() {
            let prefix = format!("prizeCohorts.{}", index);

            if !seen.insert(cohort.id) {
                result.add_error(
                    format!("{}.id", prefix),
                    ValidationErrorKind::InvalidValue,
                    format!("Duplicate prize cohort id {}", cohort.id),
                );
            }

            let cohort_result = cohort.validate_all();
            result.merge(ValidationResult {
                valid: cohort_result.valid,
                errors: prefixed(&prefix, cohort_result.errors),
                warnings: prefixed(&prefix, cohort_result.warnings),
            });
        }

        result
    }
}

fn prefixed(prefix: &str, issues: Vec<ValidationIssue>) -> Vec<ValidationIssue> {
    issues
        .into_iter()
        .map(|mut issue| {
            issue.path = format!("{}.{}", prefix, issue.path);
            issue
        })
        .collect()
}
