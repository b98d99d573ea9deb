//! Configuration management.
//!
//! Settings are loaded from configuration files and environment variables.
//!
//! ## Example Configuration
//!
//! ```toml
//! [telemetry]
//! service_name = "hackathon-judging"
//! json_logging = false
//! log_level = "info"
//!
//! [judging]
//! min_overall_feedback_chars = 10
//! max_overall_feedback_chars = 2000
//! min_criterion_feedback_chars = 1
//! max_criterion_feedback_chars = 1000
//! allow_empty_criteria = true
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub judging: JudgingConfig,
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name attached to log output
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Enable JSON logging format
    #[serde(default)]
    pub json_logging: bool,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl TelemetryConfig {
    /// Same settings with `level` as the log level
    pub fn with_log_level(&self, level: impl Into<String>) -> Self {
        Self {
            log_level: level.into(),
            ..self.clone()
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            json_logging: false,
            log_level: default_log_level(),
        }
    }
}

/// Limits applied when validating judge evaluations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_feedback_bounds"))]
pub struct JudgingConfig {
    #[serde(default = "default_min_overall_feedback")]
    pub min_overall_feedback_chars: usize,

    #[validate(range(min = 1, message = "Overall feedback limit must be at least 1"))]
    #[serde(default = "default_max_overall_feedback")]
    pub max_overall_feedback_chars: usize,

    #[validate(range(min = 1, message = "Criterion feedback must require at least 1 character"))]
    #[serde(default = "default_min_criterion_feedback")]
    pub min_criterion_feedback_chars: usize,

    #[serde(default = "default_max_criterion_feedback")]
    pub max_criterion_feedback_chars: usize,

    /// Accept evaluations for cohorts that define no criteria
    #[serde(default = "default_allow_empty_criteria")]
    pub allow_empty_criteria: bool,
}

impl Default for JudgingConfig {
    fn default() -> Self {
        Self {
            min_overall_feedback_chars: default_min_overall_feedback(),
            max_overall_feedback_chars: default_max_overall_feedback(),
            min_criterion_feedback_chars: default_min_criterion_feedback(),
            max_criterion_feedback_chars: default_max_criterion_feedback(),
            allow_empty_criteria: default_allow_empty_criteria(),
        }
    }
}

fn validate_feedback_bounds(config: &JudgingConfig) -> Result<(), ValidationError> {
    if config.min_overall_feedback_chars > config.max_overall_feedback_chars {
        return Err(ValidationError::new("overall_feedback_bounds"));
    }
    if config.min_criterion_feedback_chars > config.max_criterion_feedback_chars {
        return Err(ValidationError::new("criterion_feedback_bounds"));
    }
    Ok(())
}

// Default value functions
fn default_service_name() -> String {
    "hackathon-judging".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_min_overall_feedback() -> usize {
    10
}

fn default_max_overall_feedback() -> usize {
    2000
}

fn default_min_criterion_feedback() -> usize {
    1
}

fn default_max_criterion_feedback() -> usize {
    1000
}

fn default_allow_empty_criteria() -> bool {
    true
}

impl AppConfig {
    /// Load configuration from configuration files and environment variables.
    ///
    /// Later sources override earlier ones:
    /// 1. Default values
    /// 2. config/default.toml (if exists)
    /// 3. config/{environment}.toml (if exists, where environment is from APP_ENV)
    /// 4. Environment variables (prefixed with APP_, e.g. APP_JUDGING__ALLOW_EMPTY_CRITERIA=false)
    pub fn load() -> Result<Self> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        Self::from_config(config)
    }

    /// Load configuration from a single file, still honouring APP_ overrides
    pub fn load_from(path: &str) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path))?;

        Self::from_config(config)
    }

    fn from_config(config: config::Config) -> Result<Self> {
        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.telemetry.log_level.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}'. Must be one of: {}",
                self.telemetry.log_level,
                valid_log_levels.join(", ")
            );
        }

        Validate::validate(&self.judging).context("Invalid judging configuration")?;

        Ok(())
    }
}
