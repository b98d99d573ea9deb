//! Mock implementations of the submission sink.
//!
//! In-memory sinks for exercising evaluation sessions without a ledger.

use async_trait::async_trait;
use hackathon_judging_application::SubmissionSink;
use hackathon_judging_domain::{EvaluationPayload, SubmissionError};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::{Notify, Semaphore};

/// Sink that accepts every payload and remembers it
pub struct RecordingSubmissionSink {
    payloads: Arc<RwLock<Vec<EvaluationPayload>>>,
}

impl RecordingSubmissionSink {
    pub fn new() -> Self {
        Self {
            payloads: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn payloads(&self) -> Vec<EvaluationPayload> {
        self.payloads.read().clone()
    }

    pub fn count(&self) -> usize {
        self.payloads.read().len()
    }

    pub fn clear(&self) {
        self.payloads.write().clear();
    }
}

impl Default for RecordingSubmissionSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubmissionSink for RecordingSubmissionSink {
    async fn submit(&self, payload: &EvaluationPayload) -> Result<(), SubmissionError> {
        self.payloads.write().push(payload.clone());
        Ok(())
    }
}

/// Sink that fails with a fixed error, then accepts once its failures run out
pub struct FailingSubmissionSink {
    error: SubmissionError,
    /// `None` fails forever
    remaining: RwLock<Option<usize>>,
    attempts: RwLock<usize>,
    accepted: RecordingSubmissionSink,
}

impl FailingSubmissionSink {
    /// Fail every call with `error`
    pub fn always(error: SubmissionError) -> Self {
        Self::with_remaining(error, None)
    }

    /// Fail the first `times` calls with `error`
    pub fn times(error: SubmissionError, times: usize) -> Self {
        Self::with_remaining(error, Some(times))
    }

    fn with_remaining(error: SubmissionError, remaining: Option<usize>) -> Self {
        Self {
            error,
            remaining: RwLock::new(remaining),
            attempts: RwLock::new(0),
            accepted: RecordingSubmissionSink::new(),
        }
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.read()
    }

    pub fn accepted(&self) -> Vec<EvaluationPayload> {
        self.accepted.payloads()
    }
}

#[async_trait]
impl SubmissionSink for FailingSubmissionSink {
    async fn submit(&self, payload: &EvaluationPayload) -> Result<(), SubmissionError> {
        *self.attempts.write() += 1;

        let fail = {
            let mut remaining = self.remaining.write();
            match remaining.as_mut() {
                None => true,
                Some(0) => false,
                Some(n) => {
                    *n -= 1;
                    true
                }
            }
        };

        if fail {
            return Err(self.error.clone());
        }
        self.accepted.submit(payload).await
    }
}

/// Sink that holds each submission until [`release`](Self::release) is called
pub struct GatedSubmissionSink {
    entered: Notify,
    gate: Semaphore,
    accepted: RecordingSubmissionSink,
}

impl GatedSubmissionSink {
    pub fn new() -> Self {
        Self {
            entered: Notify::new(),
            gate: Semaphore::new(0),
            accepted: RecordingSubmissionSink::new(),
        }
    }

    /// Wait until a submission is inside the sink
    pub async fn wait_until_entered(&self) {
        self.entered.notified().await;
    }

    /// Let one held submission through
    pub fn release(&self) {
        self.gate.add_permits(1);
    }

    pub fn accepted(&self) -> Vec<EvaluationPayload> {
        self.accepted.payloads()
    }
}

impl Default for GatedSubmissionSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubmissionSink for GatedSubmissionSink {
    async fn submit(&self, payload: &EvaluationPayload) -> Result<(), SubmissionError> {
        self.entered.notify_one();
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| SubmissionError::Unavailable("gate closed".to_string()))?;
        permit.forget();
        self.accepted.submit(payload).await
    }
}
