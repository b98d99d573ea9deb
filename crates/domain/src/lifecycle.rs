//! Lifecycle of a single judge evaluation.

use serde::{Deserialize, Serialize};

/// State of one evaluation instance
///
/// ```text
/// Editing -> Validating -> Valid | Invalid
/// Valid -> Submitting -> Submitted | Failed
/// Valid | Invalid | Failed -> Editing
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationState {
    Editing,
    Validating,
    Valid,
    Invalid,
    Submitting,
    Submitted,
    Failed,
}

impl EvaluationState {
    pub fn can_transition_to(&self, target: EvaluationState) -> bool {
        matches!(
            (self, target),
            (Self::Editing, Self::Validating)
                | (Self::Validating, Self::Valid)
                | (Self::Validating, Self::Invalid)
                | (Self::Valid, Self::Editing)
                | (Self::Invalid, Self::Editing)
                | (Self::Valid, Self::Submitting)
                | (Self::Submitting, Self::Submitted)
                | (Self::Submitting, Self::Failed)
                | (Self::Failed, Self::Editing)
        )
    }

    /// Whether scores and feedback may still change
    pub fn is_editable(&self) -> bool {
        !matches!(self, Self::Submitting | Self::Submitted)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Submitted)
    }
}
