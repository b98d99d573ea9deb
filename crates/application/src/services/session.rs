//! Evaluation Session
//!
//! One judge's evaluation of one project. Every edit revalidates the draft
//! against the selected cohort, and at most one submission attempt runs at a
//! time. A failed attempt keeps everything the judge entered.

use super::{SessionError, SubmissionContext, SubmissionSink};
use crate::scoring::{aggregate, build_payload};
use crate::validation::SchemaCache;
use chrono::{DateTime, Utc};
use hackathon_judging_domain::{
    EvaluationError, EvaluationId, EvaluationPayload, EvaluationState, EvaluationSubmission,
    Hackathon, JudgeIdentity, PrizeCohort, PrizeCohortId, ProjectId, ScoreSummary,
    SubmissionError, ValidationResult,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Receipt for an evaluation the sink accepted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedEvaluation {
    pub evaluation_id: EvaluationId,
    pub payload: EvaluationPayload,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug)]
struct SessionInner {
    draft: EvaluationSubmission,
    state: EvaluationState,
    validation: ValidationResult,
    last_error: Option<SubmissionError>,
}

impl SessionInner {
    fn transition(&mut self, to: EvaluationState) -> Result<(), EvaluationError> {
        if !self.state.can_transition_to(to) {
            return Err(EvaluationError::InvalidTransition {
                from: self.state,
                to,
            });
        }
        debug!(from = ?self.state, to = ?to, "evaluation state change");
        self.state = to;
        Ok(())
    }
}

/// A single judge evaluation and its lifecycle
#[derive(Debug)]
pub struct EvaluationSession {
    id: EvaluationId,
    context: SubmissionContext,
    cohorts: Vec<PrizeCohort>,
    schemas: Arc<SchemaCache>,
    inner: Mutex<SessionInner>,
}

impl EvaluationSession {
    /// Start evaluating `project_id` in `cohort_id` of `hackathon`.
    ///
    /// The draft starts with a blank verdict per criterion and is validated
    /// immediately, so a fresh session is normally `Invalid`.
    pub fn new(
        hackathon: &Hackathon,
        project_id: ProjectId,
        judge: JudgeIdentity,
        cohort_id: PrizeCohortId,
        schemas: Arc<SchemaCache>,
    ) -> Result<Self, SessionError> {
        let cohort = hackathon
            .cohort(cohort_id)
            .ok_or(SessionError::UnknownCohort(cohort_id))?;

        let session = Self {
            id: EvaluationId::new(),
            context: SubmissionContext::new(project_id, hackathon.id, judge),
            inner: Mutex::new(SessionInner {
                draft: EvaluationSubmission::for_cohort(cohort),
                state: EvaluationState::Editing,
                validation: ValidationResult::success(),
                last_error: None,
            }),
            cohorts: hackathon.prize_cohorts.clone(),
            schemas,
        };

        {
            let mut inner = session.inner.lock();
            session.revalidate(&mut inner)?;
        }

        Ok(session)
    }

    pub fn id(&self) -> EvaluationId {
        self.id
    }

    pub fn context(&self) -> &SubmissionContext {
        &self.context
    }

    pub fn state(&self) -> EvaluationState {
        self.inner.lock().state
    }

    /// Snapshot of the current draft
    pub fn draft(&self) -> EvaluationSubmission {
        self.inner.lock().draft.clone()
    }

    /// Result of the latest validation
    pub fn validation(&self) -> ValidationResult {
        self.inner.lock().validation.clone()
    }

    /// Failure of the latest submission attempt, if it failed
    pub fn last_error(&self) -> Option<SubmissionError> {
        self.inner.lock().last_error.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.inner.lock().state == EvaluationState::Submitting
    }

    /// Currently selected cohort
    pub fn selected_cohort(&self) -> Result<&PrizeCohort, SessionError> {
        let id = self.inner.lock().draft.selected_prize_cohort_id;
        self.cohort(id)
    }

    /// Running total of the draft against its cohort
    pub fn summary(&self) -> Result<ScoreSummary, SessionError> {
        let inner = self.inner.lock();
        let cohort = self.cohort(inner.draft.selected_prize_cohort_id)?;
        Ok(aggregate(&inner.draft, cohort)?)
    }

    /// Switch to another cohort of the hackathon.
    ///
    /// All criterion verdicts are replaced by blank ones for the new cohort.
    pub fn select_cohort(&self, cohort_id: PrizeCohortId) -> Result<(), SessionError> {
        let cohort = self.cohort(cohort_id)?;
        self.edit(|draft| {
            draft.select_cohort(cohort);
            Ok(())
        })
    }

    pub fn set_score(&self, criterion: &str, score: f64) -> Result<(), SessionError> {
        self.edit(|draft| Ok(draft.set_score(criterion, score)?))
    }

    pub fn set_feedback(&self, criterion: &str, feedback: &str) -> Result<(), SessionError> {
        self.edit(|draft| Ok(draft.set_feedback(criterion, feedback)?))
    }

    pub fn set_overall_feedback(&self, feedback: &str) -> Result<(), SessionError> {
        self.edit(|draft| {
            draft.overall_feedback = feedback.to_string();
            Ok(())
        })
    }

    /// Return to editing after a failed submission, keeping all entered data
    pub fn resume_editing(&self) -> Result<(), SessionError> {
        let mut inner = self.inner.lock();
        if inner.state == EvaluationState::Failed {
            inner.transition(EvaluationState::Editing)?;
            inner.last_error = None;
            self.revalidate(&mut inner)?;
        }
        Ok(())
    }

    /// Aggregate the draft and hand it to `sink`.
    ///
    /// Only a `Valid` evaluation is submitted, and a second call while one is
    /// in flight is refused with [`SessionError::SubmissionInFlight`]. A sink
    /// failure leaves the session `Failed` with the draft intact; calling
    /// `submit` again retries.
    #[instrument(skip_all, fields(evaluation_id = %self.id, project_id = %self.context.project_id))]
    pub async fn submit<S>(&self, sink: &S) -> Result<SubmittedEvaluation, SessionError>
    where
        S: SubmissionSink + ?Sized,
    {
        let payload = {
            let mut inner = self.inner.lock();
            match inner.state {
                EvaluationState::Submitting => {
                    warn!("submission already in flight");
                    return Err(SessionError::SubmissionInFlight);
                }
                EvaluationState::Submitted => return Err(SessionError::AlreadySubmitted),
                EvaluationState::Failed => {
                    inner.transition(EvaluationState::Editing)?;
                    self.revalidate(&mut inner)?;
                }
                _ => {}
            }

            if inner.state != EvaluationState::Valid {
                return Err(SessionError::Invalid(inner.validation.clone()));
            }

            let cohort = self.cohort(inner.draft.selected_prize_cohort_id)?;
            let payload = build_payload(&self.context, &inner.draft, cohort)?;
            inner.transition(EvaluationState::Submitting)?;
            inner.last_error = None;
            payload
        };

        let guard = InFlightGuard::new(&self.inner);
        let outcome = sink.submit(&payload).await;
        guard.disarm();

        let mut inner = self.inner.lock();
        match outcome {
            Ok(()) => {
                inner.transition(EvaluationState::Submitted)?;
                info!(
                    total_score = payload.total_score,
                    max_possible_score = payload.max_possible_score,
                    "evaluation submitted"
                );
                Ok(SubmittedEvaluation {
                    evaluation_id: self.id,
                    payload,
                    submitted_at: Utc::now(),
                })
            }
            Err(err) => {
                inner.transition(EvaluationState::Failed)?;
                inner.last_error = Some(err.clone());
                warn!(error = %err, retryable = err.is_retryable(), "evaluation submission failed");
                Err(err.into())
            }
        }
    }

    fn cohort(&self, id: PrizeCohortId) -> Result<&PrizeCohort, SessionError> {
        self.cohorts
            .iter()
            .find(|c| c.id == id)
            .ok_or(SessionError::UnknownCohort(id))
    }

    fn edit<F>(&self, change: F) -> Result<(), SessionError>
    where
        F: FnOnce(&mut EvaluationSubmission) -> Result<(), SessionError>,
    {
        let mut inner = self.inner.lock();
        match inner.state {
            EvaluationState::Submitting => return Err(SessionError::SubmissionInFlight),
            EvaluationState::Submitted => return Err(SessionError::AlreadySubmitted),
            _ => {}
        }

        change(&mut inner.draft)?;

        if inner.state != EvaluationState::Editing {
            inner.transition(EvaluationState::Editing)?;
        }
        if inner.last_error.is_some() {
            inner.last_error = None;
        }
        self.revalidate(&mut inner)
    }

    /// Editing -> Validating -> Valid | Invalid
    fn revalidate(&self, inner: &mut SessionInner) -> Result<(), SessionError> {
        inner.transition(EvaluationState::Validating)?;

        let cohort = self.cohort(inner.draft.selected_prize_cohort_id)?;
        let result = self.schemas.validate(&inner.draft, cohort);
        let next = if result.valid {
            EvaluationState::Valid
        } else {
            EvaluationState::Invalid
        };
        inner.validation = result;
        inner.transition(next)?;
        Ok(())
    }
}

/// Marks the attempt failed if the submit future is dropped mid-flight
struct InFlightGuard<'a> {
    inner: &'a Mutex<SessionInner>,
    armed: bool,
}

impl<'a> InFlightGuard<'a> {
    fn new(inner: &'a Mutex<SessionInner>) -> Self {
        Self { inner, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = self.inner.lock();
        if inner.state == EvaluationState::Submitting {
            inner.state = EvaluationState::Failed;
            inner.last_error = Some(SubmissionError::Unavailable(
                "submission was cancelled before the sink answered".to_string(),
            ));
            warn!("evaluation submission cancelled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hackathon_judging_domain::{Criterion, HackathonId, JudgingMode, VotingMode};

    struct AcceptAll;

    #[async_trait]
    impl SubmissionSink for AcceptAll {
        async fn submit(&self, _payload: &EvaluationPayload) -> Result<(), SubmissionError> {
            Ok(())
        }
    }

    fn hackathon() -> Hackathon {
        let cohort = PrizeCohort {
            id: PrizeCohortId::new(),
            name: "Best Tech".to_string(),
            description: String::new(),
            number_of_winners: 1,
            prize_amount: "$500".to_string(),
            judging_mode: JudgingMode::Manual,
            voting_mode: VotingMode::JudgesOnly,
            max_votes_per_judge: 1,
            evaluation_criteria: vec![Criterion::new("Tech", 10)],
        };
        Hackathon {
            id: HackathonId::new(),
            name: "ETH Summer".to_string(),
            categories: vec![],
            prize_cohorts: vec![cohort],
        }
    }

    fn session(h: &Hackathon) -> EvaluationSession {
        EvaluationSession::new(
            h,
            ProjectId::new(),
            JudgeIdentity::new("0xjudge"),
            h.prize_cohorts[0].id,
            Arc::new(SchemaCache::default()),
        )
        .unwrap()
    }

    #[test]
    fn test_fresh_session_is_invalid() {
        let h = hackathon();
        let s = session(&h);
        assert_eq!(s.state(), EvaluationState::Invalid);
        assert!(s.validation().has_error_at("overallFeedback"));
    }

    #[test]
    fn test_edits_revalidate() {
        let h = hackathon();
        let s = session(&h);
        s.set_score("Tech", 7.0).unwrap();
        s.set_feedback("Tech", "Clean code").unwrap();
        s.set_overall_feedback("Really solid entry").unwrap();
        assert_eq!(s.state(), EvaluationState::Valid);

        s.set_score("Tech", 11.0).unwrap();
        assert_eq!(s.state(), EvaluationState::Invalid);
    }

    #[test]
    fn test_unknown_criterion_leaves_state_untouched() {
        let h = hackathon();
        let s = session(&h);
        let err = s.set_score("Design", 3.0).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Evaluation(EvaluationError::UnknownCriterion { .. })
        ));
        assert_eq!(s.state(), EvaluationState::Invalid);
        assert!(!s.draft().criteria_evaluations.contains("Design"));
    }

    #[test]
    fn test_unknown_cohort_rejected() {
        let h = hackathon();
        let result = EvaluationSession::new(
            &h,
            ProjectId::new(),
            JudgeIdentity::new("0xjudge"),
            PrizeCohortId::new(),
            Arc::new(SchemaCache::default()),
        );
        assert!(matches!(result, Err(SessionError::UnknownCohort(_))));
    }

    #[tokio::test]
    async fn test_submit_requires_valid() {
        let h = hackathon();
        let s = session(&h);
        let err = s.submit(&AcceptAll).await.unwrap_err();
        assert!(matches!(err, SessionError::Invalid(_)));
        assert_eq!(s.state(), EvaluationState::Invalid);
    }

    #[tokio::test]
    async fn test_submitted_is_final() {
        let h = hackathon();
        let s = session(&h);
        s.set_score("Tech", 7.0).unwrap();
        s.set_feedback("Tech", "Clean code").unwrap();
        s.set_overall_feedback("Really solid entry").unwrap();

        let receipt = s.submit(&AcceptAll).await.unwrap();
        assert_eq!(receipt.payload.total_score, 7.0);
        assert_eq!(receipt.evaluation_id, s.id());
        assert_eq!(s.state(), EvaluationState::Submitted);

        assert!(matches!(
            s.set_score("Tech", 1.0),
            Err(SessionError::AlreadySubmitted)
        ));
        assert!(matches!(
            s.submit(&AcceptAll).await,
            Err(SessionError::AlreadySubmitted)
        ));
    }
}
