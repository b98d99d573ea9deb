//! Tests for the evaluation session lifecycle
//!
//! Live validation while editing, cohort switching, and the guarded submit
//! path against recording, failing and gated sinks.

use hackathon_judging_application::{EvaluationSession, SchemaCache, SessionError};
use hackathon_judging_domain::{
    Criterion, EvaluationState, Hackathon, SubmissionError, ValidationErrorKind,
};
use hackathon_judging_testing::fixtures::*;
use hackathon_judging_testing::mocks::*;
use std::sync::Arc;

fn two_cohort_hackathon() -> Hackathon {
    create_test_hackathon(vec![
        create_test_cohort(),
        create_test_cohort_with_criteria(vec![Criterion::new("X", 3), Criterion::new("Y", 7)]),
    ])
}

fn new_session(hackathon: &Hackathon) -> EvaluationSession {
    let context = create_test_context(hackathon);
    EvaluationSession::new(
        hackathon,
        context.project_id,
        context.judge,
        hackathon.prize_cohorts[0].id,
        Arc::new(SchemaCache::default()),
    )
    .unwrap()
}

fn fill(session: &EvaluationSession) {
    session.set_score("Tech", 8.0).unwrap();
    session.set_feedback("Tech", "Clean architecture").unwrap();
    session.set_score("UX", 5.0).unwrap();
    session.set_feedback("UX", "Smooth onboarding").unwrap();
    session.set_overall_feedback("Impressive, polished demo").unwrap();
}

#[test]
fn test_session_becomes_valid_when_complete() {
    // Arrange
    let hackathon = two_cohort_hackathon();
    let session = new_session(&hackathon);
    assert_eq!(session.state(), EvaluationState::Invalid);

    // Act
    fill(&session);

    // Assert
    assert_eq!(session.state(), EvaluationState::Valid);
    assert!(session.validation().valid);
    let summary = session.summary().unwrap();
    assert_eq!(summary.total_score, 13.0);
    assert_eq!(summary.max_possible_score, 15);
}

#[test]
fn test_switching_cohort_discards_verdicts() {
    // Arrange
    let hackathon = two_cohort_hackathon();
    let session = new_session(&hackathon);
    fill(&session);

    // Act
    session.select_cohort(hackathon.prize_cohorts[1].id).unwrap();

    // Assert
    let draft = session.draft();
    assert_eq!(draft.criteria_evaluations.names().collect::<Vec<_>>(), vec!["X", "Y"]);
    assert!(!draft.criteria_evaluations.contains("Tech"));
    assert_eq!(draft.overall_feedback, "Impressive, polished demo");
    assert_eq!(session.state(), EvaluationState::Invalid);
    assert_eq!(session.selected_cohort().unwrap().id, hackathon.prize_cohorts[1].id);

    // Old criterion names are no longer writable
    assert!(session.set_score("Tech", 1.0).is_err());
}

#[test]
fn test_invalid_edit_reports_field() {
    let hackathon = two_cohort_hackathon();
    let session = new_session(&hackathon);
    fill(&session);

    session.set_score("UX", 6.0).unwrap();

    let validation = session.validation();
    assert_eq!(session.state(), EvaluationState::Invalid);
    assert!(validation.has_error_at("criteriaEvaluations.UX.score"));
    assert!(validation.has_error_kind(ValidationErrorKind::ScoreOutOfRange));
}

#[tokio::test]
async fn test_submit_records_payload() {
    // Arrange
    let hackathon = two_cohort_hackathon();
    let session = new_session(&hackathon);
    let sink = RecordingSubmissionSink::new();
    fill(&session);

    // Act
    let receipt = session.submit(&sink).await.unwrap();

    // Assert
    assert_eq!(session.state(), EvaluationState::Submitted);
    assert_eq!(sink.count(), 1);
    let payload = &sink.payloads()[0];
    assert_eq!(payload, &receipt.payload);
    assert_eq!(payload.total_score, 13.0);
    assert_eq!(payload.max_possible_score, 15);
    assert_eq!(payload.prize_cohort_id, hackathon.prize_cohorts[0].id);
    assert_eq!(payload.hackathon_id, hackathon.id);
}

#[tokio::test]
async fn test_invalid_session_never_reaches_sink() {
    let hackathon = two_cohort_hackathon();
    let session = new_session(&hackathon);
    let sink = RecordingSubmissionSink::new();

    let err = session.submit(&sink).await.unwrap_err();

    match err {
        SessionError::Invalid(result) => assert!(result.has_error_at("overallFeedback")),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(sink.count(), 0);
}

#[tokio::test]
async fn test_failure_keeps_data_and_allows_retry() {
    // Arrange
    let hackathon = two_cohort_hackathon();
    let session = new_session(&hackathon);
    let sink = FailingSubmissionSink::times(SubmissionError::Ledger("reverted".to_string()), 1);
    fill(&session);
    let before = session.draft();

    // Act
    let err = session.submit(&sink).await.unwrap_err();

    // Assert
    assert!(matches!(err, SessionError::Submission(SubmissionError::Ledger(_))));
    assert_eq!(session.state(), EvaluationState::Failed);
    assert_eq!(session.draft(), before);
    assert_eq!(
        session.last_error(),
        Some(SubmissionError::Ledger("reverted".to_string()))
    );

    // Retry is explicit and succeeds
    session.submit(&sink).await.unwrap();
    assert_eq!(session.state(), EvaluationState::Submitted);
    assert_eq!(sink.attempts(), 2);
    assert_eq!(sink.accepted().len(), 1);
}

#[tokio::test]
async fn test_resume_editing_after_failure() {
    let hackathon = two_cohort_hackathon();
    let session = new_session(&hackathon);
    let sink = FailingSubmissionSink::always(SubmissionError::Unavailable("rpc down".to_string()));
    fill(&session);

    assert!(session.submit(&sink).await.is_err());
    session.resume_editing().unwrap();

    assert_eq!(session.state(), EvaluationState::Valid);
    assert!(session.last_error().is_none());
    assert_eq!(session.draft().criteria_evaluations.get("Tech").unwrap().score, 8.0);
}

#[tokio::test]
async fn test_concurrent_submit_is_refused() {
    // Arrange
    let hackathon = two_cohort_hackathon();
    let session = Arc::new(new_session(&hackathon));
    let sink = Arc::new(GatedSubmissionSink::new());
    fill(&session);

    // Act
    let first = {
        let session = Arc::clone(&session);
        let sink = Arc::clone(&sink);
        tokio::spawn(async move { session.submit(sink.as_ref()).await })
    };
    sink.wait_until_entered().await;

    // Assert
    assert!(session.is_submitting());
    assert!(matches!(
        session.submit(sink.as_ref()).await,
        Err(SessionError::SubmissionInFlight)
    ));
    assert!(matches!(
        session.set_score("Tech", 1.0),
        Err(SessionError::SubmissionInFlight)
    ));

    sink.release();
    first.await.unwrap().unwrap();
    assert_eq!(session.state(), EvaluationState::Submitted);
    assert_eq!(sink.accepted().len(), 1);
}

#[tokio::test]
async fn test_cancelled_submit_marks_failed() {
    let hackathon = two_cohort_hackathon();
    let session = Arc::new(new_session(&hackathon));
    let sink = Arc::new(GatedSubmissionSink::new());
    fill(&session);

    let attempt = {
        let session = Arc::clone(&session);
        let sink = Arc::clone(&sink);
        tokio::spawn(async move { session.submit(sink.as_ref()).await })
    };
    sink.wait_until_entered().await;
    attempt.abort();
    let _ = attempt.await;

    assert_eq!(session.state(), EvaluationState::Failed);
    assert!(session.last_error().is_some());
    assert!(sink.accepted().is_empty());
}
