//! Cohort configuration check

use anyhow::{bail, Result};
use hackathon_judging_application::Validatable;
use hackathon_judging_domain::{Hackathon, HackathonCategory, ValidationResult};
use serde::Serialize;
use std::path::Path;

use crate::commands::{load_json, CommandContext};
use crate::output::{colors, Formattable, TableFormatter};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortSummary {
    pub name: String,
    pub criteria: usize,
    pub max_possible_score: u64,
    pub prize_value: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortCheckReport {
    pub hackathon: String,
    pub categories: Vec<String>,
    pub cohorts: Vec<CohortSummary>,
    pub total_prize_pool: f64,
    #[serde(flatten)]
    pub result: ValidationResult,
}

impl Formattable for CohortCheckReport {
    fn format_table(&self) -> Result<String> {
        let rows = self
            .cohorts
            .iter()
            .map(|c| {
                vec![
                    c.name.clone(),
                    c.criteria.to_string(),
                    c.max_possible_score.to_string(),
                    c.prize_value
                        .map(|v| format!("{:.2}", v))
                        .unwrap_or_else(|| "-".to_string()),
                ]
            })
            .collect();

        let mut out = format!(
            "{} ({})\n{}",
            colors::bold(&self.hackathon),
            self.categories.join(", "),
            TableFormatter::simple(vec!["Cohort", "Criteria", "Max score", "Prize"], rows)?
        );
        out.push_str(&format!("\nTotal prize pool: {:.2}\n", self.total_prize_pool));

        if self.result.has_errors() || self.result.has_warnings() {
            out.push_str(&TableFormatter::issues(&self.result)?);
        } else {
            out.push_str(&colors::success("All prize cohorts are valid").to_string());
        }
        Ok(out)
    }
}

/// Check every cohort of `hackathon`
pub fn check_report(hackathon: &Hackathon) -> CohortCheckReport {
    CohortCheckReport {
        hackathon: hackathon.name.clone(),
        categories: hackathon
            .categories
            .iter()
            .map(HackathonCategory::display_name)
            .map(str::to_string)
            .collect(),
        cohorts: hackathon
            .prize_cohorts
            .iter()
            .map(|c| CohortSummary {
                name: c.name.clone(),
                criteria: c.evaluation_criteria.len(),
                max_possible_score: c.max_possible_score(),
                prize_value: c.prize_value(),
            })
            .collect(),
        total_prize_pool: hackathon.total_prize_pool(),
        result: hackathon.validate_all(),
    }
}

/// `judging check-cohorts`
pub fn check(ctx: &CommandContext, hackathon_path: &Path) -> Result<()> {
    let hackathon: Hackathon = load_json(hackathon_path)?;
    let report = check_report(&hackathon);
    ctx.emit(&report)?;

    if !report.result.valid {
        bail!("Hackathon has {} configuration error(s)", report.result.errors.len());
    }
    Ok(())
}
