//! Evaluation commands: validate and score a judge's submission

use anyhow::{bail, Result};
use hackathon_judging_application::aggregate;
use hackathon_judging_domain::{EvaluationSubmission, Hackathon, PrizeCohortId, ValidationResult};
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::commands::{find_cohort, load_json, CommandContext};
use crate::output::{colors, Formattable, TableFormatter};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub cohort_id: PrizeCohortId,
    pub cohort_name: String,
    #[serde(flatten)]
    pub result: ValidationResult,
}

impl Formattable for ValidationReport {
    fn format_table(&self) -> Result<String> {
        let status = if self.result.valid {
            colors::success("valid")
        } else {
            colors::error("invalid")
        };
        let mut out = format!("{} {}", colors::bold(&self.cohort_name), status);
        if self.result.has_errors() || self.result.has_warnings() {
            out.push('\n');
            out.push_str(&TableFormatter::issues(&self.result)?);
        }
        Ok(out)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub cohort_id: PrizeCohortId,
    pub cohort_name: String,
    pub total_score: f64,
    pub max_possible_score: u64,
    pub percentage: f64,
}

impl Formattable for ScoreReport {
    fn format_table(&self) -> Result<String> {
        TableFormatter::key_value(vec![
            ("Prize cohort", self.cohort_name.clone()),
            ("Total score", format!("{}", self.total_score)),
            ("Max possible", self.max_possible_score.to_string()),
            ("Percentage", format!("{:.1}%", self.percentage)),
        ])
    }
}

/// Validate a submission against its selected cohort
pub fn validation_report(
    ctx: &CommandContext,
    hackathon: &Hackathon,
    submission: &EvaluationSubmission,
) -> Result<ValidationReport> {
    let cohort = find_cohort(hackathon, submission.selected_prize_cohort_id)?;
    Ok(ValidationReport {
        cohort_id: cohort.id,
        cohort_name: cohort.name.clone(),
        result: ctx.schemas.validate(submission, cohort),
    })
}

/// Score a submission; fails if it does not validate
pub fn score_report(
    ctx: &CommandContext,
    hackathon: &Hackathon,
    submission: &EvaluationSubmission,
) -> Result<ScoreReport> {
    let validation = validation_report(ctx, hackathon, submission)?;
    if !validation.result.valid {
        bail!("Evaluation is invalid: {}", validation.result);
    }

    let cohort = find_cohort(hackathon, submission.selected_prize_cohort_id)?;
    let summary = aggregate(submission, cohort)?;

    Ok(ScoreReport {
        cohort_id: cohort.id,
        cohort_name: cohort.name.clone(),
        total_score: summary.total_score,
        max_possible_score: summary.max_possible_score,
        percentage: summary.percentage(),
    })
}

/// `judging validate`
pub fn validate(ctx: &CommandContext, hackathon_path: &Path, evaluation_path: &Path) -> Result<()> {
    let hackathon: Hackathon = load_json(hackathon_path)?;
    let submission: EvaluationSubmission = load_json(evaluation_path)?;

    let report = validation_report(ctx, &hackathon, &submission)?;
    ctx.emit(&report)?;

    if !report.result.valid {
        bail!("Evaluation has {} error(s)", report.result.errors.len());
    }
    Ok(())
}

/// `judging score`
pub fn score(ctx: &CommandContext, hackathon_path: &Path, evaluation_path: &Path) -> Result<()> {
    let hackathon: Hackathon = load_json(hackathon_path)?;
    let submission: EvaluationSubmission = load_json(evaluation_path)?;

    let report = score_report(ctx, &hackathon, &submission)?;
    info!(
        cohort = %report.cohort_name,
        total_score = report.total_score,
        "scored evaluation"
    );
    ctx.emit(&report)
}
