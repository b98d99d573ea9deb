//! Common utilities shared across the hackathon judging crates.
//!
//! - Configuration management
//! - Tracing setup
//! - Text length helpers

pub mod config;
pub mod telemetry;
pub mod validation;

pub use config::{AppConfig, JudgingConfig, TelemetryConfig};
pub use telemetry::{init_from_config, init_tracing};
pub use validation::{char_len, check_length, LengthCheck};
