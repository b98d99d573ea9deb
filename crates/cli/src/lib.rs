//! Hackathon Judging CLI Library
//!
//! Command implementations and output formatting for the `judging` binary.

pub mod commands;
pub mod output;

pub use commands::CommandContext;
pub use output::{Formattable, JsonFormatter, OutputFormat, PlainFormatter, TableFormatter};

/// Re-export common types
pub use anyhow::{Context, Result};
