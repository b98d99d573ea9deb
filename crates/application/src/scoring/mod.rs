//! Scoring module - aggregation, sink payloads and cohort rankings

mod aggregation;
mod ranking;

pub use aggregation::*;
pub use ranking::*;
