//! Tests for evaluation validation and score aggregation
//!
//! Covers the judging scenarios end to end plus property checks over
//! generated cohorts and submissions.

use hackathon_judging_application::{aggregate, build_payload, validate, SchemaCache, ValidationLimits};
use hackathon_judging_domain::{
    CriteriaEvaluations, Criterion, CriterionEvaluation, EvaluationSubmission, ValidationErrorKind,
};
use hackathon_judging_testing::fixtures::*;
use hackathon_judging_testing::strategies::*;
use hackathon_judging_testing::EvaluationSubmissionBuilder;
use proptest::prelude::*;
use std::sync::Arc;

#[test]
fn test_valid_submission_aggregates() {
    // Arrange
    let cohort = create_test_cohort();
    let submission = EvaluationSubmissionBuilder::for_cohort(&cohort)
        .with_score("Tech", 8.0, "Clean, well tested code")
        .with_score("UX", 5.0, "Intuitive flows")
        .with_overall_feedback("Great work!!")
        .build();

    // Act
    let result = validate(&submission, &cohort);
    let summary = aggregate(&submission, &cohort).unwrap();

    // Assert
    assert!(result.valid, "{}", result);
    assert_eq!(summary.total_score, 13.0);
    assert_eq!(summary.max_possible_score, 15);
}

#[test]
fn test_score_above_cap_rejected() {
    // Arrange
    let cohort = create_test_cohort();
    let submission = EvaluationSubmissionBuilder::complete(&cohort, 1.0)
        .with_score("Tech", 12.0, "Exceptional")
        .build();

    // Act
    let result = validate(&submission, &cohort);

    // Assert
    assert!(!result.valid);
    let issue = result
        .errors_at("criteriaEvaluations.Tech.score")
        .next()
        .expect("error on Tech score");
    assert_eq!(issue.message, "Score cannot exceed 10 points");
    assert_eq!(issue.kind, ValidationErrorKind::ScoreOutOfRange);
    assert_eq!(result.errors.len(), 1);
}

#[test]
fn test_missing_criterion_rejected() {
    // Arrange
    let cohort = create_test_cohort();
    let submission = EvaluationSubmissionBuilder::complete(&cohort, 0.5)
        .without("UX")
        .build();

    // Act
    let result = validate(&submission, &cohort);

    // Assert
    let issue = result.errors_at("criteriaEvaluations.UX").next().unwrap();
    assert_eq!(issue.message, "UX must be evaluated");
    assert_eq!(issue.kind, ValidationErrorKind::MissingCriterion);
}

#[test]
fn test_extra_criterion_rejected() {
    // Arrange
    let cohort = create_test_cohort();
    let submission = EvaluationSubmissionBuilder::complete(&cohort, 0.5)
        .with_score("Design", 3.0, "ok")
        .build();

    // Act
    let result = validate(&submission, &cohort);

    // Assert
    assert!(!result.valid);
    assert!(result.has_error_at("criteriaEvaluations.Design"));
    assert!(result.has_error_kind(ValidationErrorKind::UnknownCriterion));
}

#[test]
fn test_short_overall_feedback_rejected() {
    // Arrange
    let cohort = create_test_cohort();
    let submission = EvaluationSubmissionBuilder::complete(&cohort, 0.5)
        .with_overall_feedback("short")
        .build();

    // Act
    let result = validate(&submission, &cohort);

    // Assert
    let issue = result.errors_at("overallFeedback").next().unwrap();
    assert_eq!(issue.message, "Overall feedback must be at least 10 characters");
}

#[test]
fn test_overall_feedback_bounds() {
    let cohort = create_test_cohort();

    let at_min = EvaluationSubmissionBuilder::complete(&cohort, 0.5)
        .with_overall_feedback("x".repeat(10))
        .build();
    assert!(validate(&at_min, &cohort).valid);

    let at_max = EvaluationSubmissionBuilder::complete(&cohort, 0.5)
        .with_overall_feedback("x".repeat(2000))
        .build();
    assert!(validate(&at_max, &cohort).valid);

    let too_long = EvaluationSubmissionBuilder::complete(&cohort, 0.5)
        .with_overall_feedback("x".repeat(2001))
        .build();
    let result = validate(&too_long, &cohort);
    assert_eq!(
        result.errors_at("overallFeedback").next().unwrap().message,
        "Overall feedback must be 2000 characters or less"
    );
}

#[test]
fn test_cohort_switch_resets_evaluations() {
    // Arrange
    let first = create_test_cohort_with_criteria(vec![
        Criterion::new("A", 5),
        Criterion::new("B", 5),
    ]);
    let second = create_test_cohort_with_criteria(vec![
        Criterion::new("X", 5),
        Criterion::new("Y", 5),
    ]);
    let mut submission = EvaluationSubmission::for_cohort(&first);
    submission.set_score("A", 4.0).unwrap();
    submission.set_feedback("B", "nice").unwrap();

    // Act
    submission.select_cohort(&second);

    // Assert
    let expected: CriteriaEvaluations = [
        ("X".to_string(), CriterionEvaluation::new(0.0, "")),
        ("Y".to_string(), CriterionEvaluation::new(0.0, "")),
    ]
    .into_iter()
    .collect();
    assert_eq!(submission.criteria_evaluations, expected);
    assert_eq!(submission.selected_prize_cohort_id, second.id);
}

#[test]
fn test_empty_criteria_cohort_policy() {
    let cohort = create_test_cohort_with_criteria(vec![]);
    let submission = EvaluationSubmissionBuilder::for_cohort(&cohort).build();

    let lenient = SchemaCache::default();
    assert!(lenient.validate(&submission, &cohort).valid);
    assert_eq!(aggregate(&submission, &cohort).unwrap().max_possible_score, 0);

    let strict = SchemaCache::new(ValidationLimits {
        allow_empty_criteria: false,
        ..ValidationLimits::default()
    });
    let result = strict.validate(&submission, &cohort);
    assert!(result.has_error_at("evaluationCriteria"));
}

#[test]
fn test_schema_cache_shared_across_threads() {
    let cache = Arc::new(SchemaCache::default());
    let cohort = create_test_cohort();
    let submission = create_valid_submission(&cohort, 0.5);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let cohort = cohort.clone();
            let submission = submission.clone();
            std::thread::spawn(move || cache.validate(&submission, &cohort).valid)
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_payload_matches_aggregate() {
    let cohort = create_test_cohort();
    let hackathon = create_test_hackathon(vec![cohort.clone()]);
    let context = create_test_context(&hackathon);
    let submission = create_valid_submission(&cohort, 0.8);

    let payload = build_payload(&context, &submission, &cohort).unwrap();
    let summary = aggregate(&submission, &cohort).unwrap();

    assert_eq!(payload.total_score, summary.total_score);
    assert_eq!(payload.max_possible_score, summary.max_possible_score);
    assert_eq!(payload.scores.values().sum::<f64>(), summary.total_score);
    assert_eq!(payload.hackathon_id, hackathon.id);
}

#[test]
fn test_random_cohorts_score_half_marks() {
    for _ in 0..25 {
        let cohort = create_random_cohort();
        let submission = create_valid_submission(&cohort, 0.5);

        let result = validate(&submission, &cohort);
        assert!(result.valid, "{}", result);

        let summary = aggregate(&submission, &cohort).unwrap();
        assert_eq!(summary.total_score * 2.0, summary.max_possible_score as f64);
    }
}

#[test]
fn test_payload_wire_format() {
    let cohort = create_test_cohort();
    let hackathon = create_test_hackathon(vec![cohort.clone()]);
    let context = create_test_context(&hackathon);
    let submission = create_valid_submission(&cohort, 1.0);

    let payload = build_payload(&context, &submission, &cohort).unwrap();
    let json = serde_json::to_value(&payload).unwrap();

    for field in [
        "projectId",
        "hackathonId",
        "prizeCohortId",
        "judgeIdentity",
        "scores",
        "feedback",
        "overallFeedback",
        "totalScore",
        "maxPossibleScore",
    ] {
        assert!(json.get(field).is_some(), "missing {}", field);
    }
    assert_eq!(json["maxPossibleScore"], 15);
}

proptest! {
    #[test]
    fn prop_max_score_independent_of_submission((cohort, submission) in cohort_with_any_submission()) {
        let summary = aggregate(&submission, &cohort).unwrap();
        let expected: u64 = cohort.evaluation_criteria.iter().map(|c| u64::from(c.points)).sum();
        prop_assert_eq!(summary.max_possible_score, expected);
    }

    #[test]
    fn prop_valid_total_within_bounds((cohort, submission) in cohort_with_valid_submission()) {
        let result = validate(&submission, &cohort);
        prop_assert!(result.valid, "{}", result);

        let summary = aggregate(&submission, &cohort).unwrap();
        prop_assert!(summary.total_score >= 0.0);
        prop_assert!(summary.total_score <= summary.max_possible_score as f64);
    }

    #[test]
    fn prop_aggregate_is_idempotent((cohort, submission) in cohort_with_any_submission()) {
        prop_assert_eq!(aggregate(&submission, &cohort).unwrap(), aggregate(&submission, &cohort).unwrap());
        prop_assert_eq!(validate(&submission, &cohort), validate(&submission, &cohort));
    }

    #[test]
    fn prop_valid_implies_only_cohort_criteria_summed((cohort, submission) in cohort_with_any_submission()) {
        if validate(&submission, &cohort).valid {
            let expected: f64 = cohort
                .evaluation_criteria
                .iter()
                .map(|c| submission.criteria_evaluations.get(&c.name).map(|e| e.score).unwrap_or(0.0))
                .sum();
            prop_assert_eq!(aggregate(&submission, &cohort).unwrap().total_score, expected);
        }
    }

    #[test]
    fn prop_stray_keys_always_rejected((cohort, submission) in cohort_with_any_submission()) {
        let stray = submission
            .criteria_evaluations
            .names()
            .any(|name| cohort.criterion(name).is_none());
        if stray {
            prop_assert!(!validate(&submission, &cohort).valid);
        }
    }
}
