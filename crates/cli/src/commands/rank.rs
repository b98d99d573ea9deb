//! Ranking command: standings per cohort from accepted evaluations

use anyhow::Result;
use hackathon_judging_application::{rank_cohort, CohortStanding};
use hackathon_judging_domain::{EvaluationPayload, Hackathon, PrizeCohortId};
use serde::Serialize;
use std::path::Path;

use crate::commands::{find_cohort, load_json, CommandContext};
use crate::output::{colors, Formattable, TableFormatter};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortRanking {
    pub cohort_id: PrizeCohortId,
    pub cohort_name: String,
    pub standings: Vec<CohortStanding>,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct RankingReport(pub Vec<CohortRanking>);

impl Formattable for RankingReport {
    fn format_table(&self) -> Result<String> {
        let mut sections = Vec::with_capacity(self.0.len());
        for ranking in &self.0 {
            if ranking.standings.is_empty() {
                sections.push(format!(
                    "{}\n{}",
                    colors::bold(&ranking.cohort_name),
                    colors::warning("No evaluations submitted.")
                ));
                continue;
            }

            let rows = ranking
                .standings
                .iter()
                .map(|s| {
                    vec![
                        s.rank.to_string(),
                        s.project_id.to_string(),
                        format!("{:.2}", s.average_score),
                        s.max_possible_score.to_string(),
                        s.judge_count.to_string(),
                        if s.is_winner { "yes" } else { "" }.to_string(),
                    ]
                })
                .collect();
            let table = TableFormatter::simple(
                vec!["Rank", "Project", "Average", "Max", "Judges", "Winner"],
                rows,
            )?;
            sections.push(format!("{}\n{}", colors::bold(&ranking.cohort_name), table));
        }
        Ok(sections.join("\n\n"))
    }
}

/// Rank one cohort, or every cohort when `cohort` is `None`
pub fn ranking_report(
    hackathon: &Hackathon,
    payloads: &[EvaluationPayload],
    cohort: Option<PrizeCohortId>,
) -> Result<RankingReport> {
    let cohorts = match cohort {
        Some(id) => vec![find_cohort(hackathon, id)?],
        None => hackathon.prize_cohorts.iter().collect(),
    };

    Ok(RankingReport(
        cohorts
            .into_iter()
            .map(|c| CohortRanking {
                cohort_id: c.id,
                cohort_name: c.name.clone(),
                standings: rank_cohort(c, payloads),
            })
            .collect(),
    ))
}

/// `judging rank`
pub fn rank(
    ctx: &CommandContext,
    hackathon_path: &Path,
    payloads_path: &Path,
    cohort: Option<PrizeCohortId>,
) -> Result<()> {
    let hackathon: Hackathon = load_json(hackathon_path)?;
    let payloads: Vec<EvaluationPayload> = load_json(payloads_path)?;

    let report = ranking_report(&hackathon, &payloads, cohort)?;
    ctx.emit(&report)
}
