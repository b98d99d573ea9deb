//! Testing utilities for hackathon judging
//!
//! This crate provides:
//! - Test fixtures for cohorts, hackathons, submissions and judges
//! - Builder patterns for custom cohorts and (possibly invalid) submissions
//! - Mock submission sinks: recording, failing and gated
//! - Proptest strategies for cohorts and submissions
//!
//! # Examples
//!
//! ```
//! use hackathon_judging_testing::{builders::*, fixtures::*};
//!
//! let cohort = PrizeCohortBuilder::new()
//!     .with_name("Best UX")
//!     .with_criterion("Tech", 10)
//!     .with_criterion("UX", 5)
//!     .build();
//!
//! let submission = EvaluationSubmissionBuilder::complete(&cohort, 1.0)
//!     .without("UX")
//!     .build();
//! assert_eq!(submission.criteria_evaluations.len(), 1);
//!
//! let hackathon = create_test_hackathon(vec![cohort]);
//! assert_eq!(hackathon.prize_cohorts.len(), 1);
//! ```

pub mod builders;
pub mod fixtures;
pub mod mocks;
pub mod strategies;

// Re-export commonly used types
pub use builders::*;
pub use fixtures::*;
pub use mocks::*;

// Re-export testing dependencies for convenience
pub use fake;
pub use proptest;
