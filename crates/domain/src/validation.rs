//! Validation result types.
//!
//! A [`ValidationResult`] collects one [`ValidationIssue`] per offending field
//! so that a UI can highlight exactly which criterion or field is broken.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a validation operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the validation passed (no errors)
    pub valid: bool,

    /// List of validation errors (block submission)
    pub errors: Vec<ValidationIssue>,

    /// List of validation warnings (don't block submission)
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Create a new successful validation result
    pub fn success() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Create a new validation result with errors
    pub fn with_errors(errors: Vec<ValidationIssue>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings: Vec::new(),
        }
    }

    /// Add an error to this validation result
    pub fn add_error(
        &mut self,
        path: impl Into<String>,
        kind: ValidationErrorKind,
        message: impl Into<String>,
    ) {
        self.valid = false;
        self.errors.push(ValidationIssue::error(path, kind, message));
    }

    /// Add a warning to this validation result
    pub fn add_warning(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationIssue::warning(path, message));
    }

    /// Merge another validation result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.valid = self.errors.is_empty();
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Errors reported against exactly `path`
    pub fn errors_at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ValidationIssue> {
        self.errors.iter().filter(move |issue| issue.path == path)
    }

    pub fn has_error_at(&self, path: &str) -> bool {
        self.errors_at(path).next().is_some()
    }

    /// Whether any error of the given kind was reported
    pub fn has_error_kind(&self, kind: ValidationErrorKind) -> bool {
        self.errors.iter().any(|issue| issue.kind == kind)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return f.write_str("valid");
        }
        let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        f.write_str(&messages.join("; "))
    }
}

/// Individual validation issue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Path to the offending field
    ///
    /// Examples: "overallFeedback", "criteriaEvaluations.Tech.score"
    pub path: String,

    /// Human-readable description, suitable for showing to a judge
    pub message: String,

    pub kind: ValidationErrorKind,

    pub severity: IssueSeverity,
}

impl ValidationIssue {
    pub fn error(
        path: impl Into<String>,
        kind: ValidationErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
            severity: IssueSeverity::Error,
        }
    }

    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind: ValidationErrorKind::Advisory,
            severity: IssueSeverity::Warning,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// What kind of rule an issue violates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    MissingCriterion,
    UnknownCriterion,
    ScoreOutOfRange,
    InvalidScore,
    FeedbackTooShort,
    FeedbackTooLong,
    OverallFeedbackLength,
    CohortMismatch,
    EmptyCriteria,
    DuplicateCriterion,
    InvalidValue,
    /// Non-blocking note attached to a warning
    Advisory,
}

/// Severity level of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

impl IssueSeverity {
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Error)
    }
}
