//! Validation Framework
//!
//! Validates judge evaluations against their prize cohort and checks cohort
//! and hackathon configuration before judging opens.

mod cohort;
mod evaluation;
mod schema;

pub use evaluation::*;
pub use schema::*;

use crate::ApplicationError;
use hackathon_judging_domain::{ValidationErrorKind, ValidationResult};
use validator::Validate;

/// Trait for validatable types
pub trait Validatable {
    /// Validate the type and return a result
    fn validate_all(&self) -> ValidationResult;
}

/// Extension to convert validator errors to our format
pub trait ValidatorExt {
    fn to_validation_result(&self) -> ValidationResult;
}

impl<T: Validate> ValidatorExt for T {
    fn to_validation_result(&self) -> ValidationResult {
        match self.validate() {
            Ok(_) => ValidationResult::success(),
            Err(errors) => {
                let mut result = ValidationResult::success();

                for (field, field_errors) in errors.field_errors() {
                    for error in field_errors {
                        let message = error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| error.code.to_string());
                        result.add_error(
                            camel_case(field),
                            ValidationErrorKind::InvalidValue,
                            message,
                        );
                    }
                }

                result
            }
        }
    }
}

/// Turn a validation result into an error if it carries any errors
pub trait ValidationResultExt {
    fn to_error(&self) -> Option<ApplicationError>;

    /// Ensure validation passed, returning error if not
    fn ensure_valid(&self) -> Result<(), ApplicationError> {
        match self.to_error() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl ValidationResultExt for ValidationResult {
    fn to_error(&self) -> Option<ApplicationError> {
        if self.valid {
            return None;
        }
        Some(ApplicationError::ValidationFailed(self.clone()))
    }
}

/// Field names on the wire are camelCase; validator reports Rust field names
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
