//! CLI commands

pub mod cohorts;
pub mod evaluate;
pub mod rank;

use crate::output::{Formattable, OutputFormat};
use anyhow::{Context, Result};
use hackathon_judging_application::{SchemaCache, ValidationLimits};
use hackathon_judging_common::AppConfig;
use hackathon_judging_domain::{Hackathon, PrizeCohort, PrizeCohortId};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Context passed to all commands
pub struct CommandContext {
    pub config: AppConfig,
    pub format: OutputFormat,
    pub schemas: SchemaCache,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(config: AppConfig, format: OutputFormat) -> Self {
        let schemas = SchemaCache::new(ValidationLimits::from(&config.judging));
        Self {
            config,
            format,
            schemas,
        }
    }

    /// Print a report in the selected format
    pub fn emit<R: Formattable>(&self, report: &R) -> Result<()> {
        println!("{}", report.format(self.format)?);
        Ok(())
    }
}

/// Read and parse a JSON file
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))
}

/// Look up a cohort of `hackathon`, failing with a readable message
pub fn find_cohort(hackathon: &Hackathon, id: PrizeCohortId) -> Result<&PrizeCohort> {
    hackathon
        .cohort(id)
        .with_context(|| format!("Prize cohort {} not found in hackathon '{}'", id, hackathon.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hackathon_judging_testing::fixtures::*;

    #[test]
    fn test_context_uses_configured_limits() {
        let mut config = AppConfig::default();
        config.judging.allow_empty_criteria = false;

        let ctx = CommandContext::new(config, OutputFormat::Json);
        assert!(!ctx.schemas.limits().allow_empty_criteria);
    }

    #[test]
    fn test_find_cohort_reports_missing_id() {
        let hackathon = create_test_hackathon(vec![create_test_cohort()]);
        let err = find_cohort(&hackathon, PrizeCohortId::new()).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_json_reports_path() {
        let path = std::env::temp_dir().join("judging-cli-missing-file.json");
        let err = load_json::<Hackathon>(&path).unwrap_err();
        assert!(err.to_string().contains("judging-cli-missing-file.json"));
    }
}
