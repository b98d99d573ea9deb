//! Cohort standings from several judges' accepted evaluations

use hackathon_judging_domain::{EvaluationPayload, JudgeIdentity, PrizeCohort, ProjectId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One project's position within a cohort
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortStanding {
    /// 1-based position
    pub rank: u32,
    pub project_id: ProjectId,
    /// Mean of the judges' total scores
    pub average_score: f64,
    pub max_possible_score: u64,
    pub judge_count: usize,
    pub is_winner: bool,
}

/// Rank the projects of `cohort` by their average total score.
///
/// Payloads for other cohorts are ignored. When a judge evaluated the same
/// project more than once, the later payload replaces the earlier one. Ties
/// are broken by project id so the order is stable across runs. The first
/// `number_of_winners` standings are marked as winners.
pub fn rank_cohort(cohort: &PrizeCohort, payloads: &[EvaluationPayload]) -> Vec<CohortStanding> {
    let mut latest: IndexMap<(ProjectId, &JudgeIdentity), f64> = IndexMap::new();
    for payload in payloads.iter().filter(|p| p.prize_cohort_id == cohort.id) {
        latest.insert(
            (payload.project_id, &payload.judge_identity),
            payload.total_score,
        );
    }

    let mut totals: IndexMap<ProjectId, (f64, usize)> = IndexMap::new();
    for ((project_id, _), score) in &latest {
        let entry = totals.entry(*project_id).or_insert((0.0, 0));
        entry.0 += score;
        entry.1 += 1;
    }

    let mut averages: Vec<(ProjectId, f64, usize)> = totals
        .into_iter()
        .map(|(project_id, (sum, count))| (project_id, sum / count as f64, count))
        .collect();
    averages.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let max_possible_score = cohort.max_possible_score();
    let winners = cohort.number_of_winners as usize;

    let standings: Vec<CohortStanding> = averages
        .into_iter()
        .enumerate()
        .map(|(index, (project_id, average_score, judge_count))| CohortStanding {
            rank: index as u32 + 1,
            project_id,
            average_score,
            max_possible_score,
            judge_count,
            is_winner: index < winners,
        })
        .collect();

    debug!(cohort_id = %cohort.id, projects = standings.len(), "ranked cohort");
    standings
}

#[cfg(test)]
mod tests {
    use super::*;
    use hackathon_judging_domain::{Criterion, HackathonId, JudgingMode, PrizeCohortId, VotingMode};

    fn cohort(winners: u32) -> PrizeCohort {
        PrizeCohort {
            id: PrizeCohortId::new(),
            name: "Best Tech".to_string(),
            description: String::new(),
            number_of_winners: winners,
            prize_amount: String::new(),
            judging_mode: JudgingMode::Manual,
            voting_mode: VotingMode::JudgesOnly,
            max_votes_per_judge: 1,
            evaluation_criteria: vec![Criterion::new("Tech", 10)],
        }
    }

    fn payload(cohort: &PrizeCohort, project_id: ProjectId, judge: &str, total: f64) -> EvaluationPayload {
        EvaluationPayload {
            project_id,
            hackathon_id: HackathonId::new(),
            prize_cohort_id: cohort.id,
            judge_identity: JudgeIdentity::new(judge),
            scores: [("Tech".to_string(), total)].into_iter().collect(),
            feedback: [("Tech".to_string(), "ok".to_string())].into_iter().collect(),
            overall_feedback: "Decent overall".to_string(),
            total_score: total,
            max_possible_score: cohort.max_possible_score(),
        }
    }

    #[test]
    fn test_ranks_by_average_and_marks_winners() {
        let c = cohort(1);
        let (a, b) = (ProjectId::new(), ProjectId::new());
        let payloads = vec![
            payload(&c, a, "j1", 6.0),
            payload(&c, a, "j2", 8.0),
            payload(&c, b, "j1", 9.0),
        ];

        let standings = rank_cohort(&c, &payloads);
        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].project_id, b);
        assert_eq!(standings[0].rank, 1);
        assert!(standings[0].is_winner);
        assert_eq!(standings[1].average_score, 7.0);
        assert_eq!(standings[1].judge_count, 2);
        assert!(!standings[1].is_winner);
    }

    #[test]
    fn test_resubmission_replaces_previous() {
        let c = cohort(1);
        let a = ProjectId::new();
        let payloads = vec![payload(&c, a, "j1", 2.0), payload(&c, a, "j1", 9.0)];

        let standings = rank_cohort(&c, &payloads);
        assert_eq!(standings[0].average_score, 9.0);
        assert_eq!(standings[0].judge_count, 1);
    }

    #[test]
    fn test_ignores_other_cohorts_and_breaks_ties_by_id() {
        let c = cohort(2);
        let other = cohort(1);
        let (a, b) = (ProjectId::new(), ProjectId::new());
        let payloads = vec![
            payload(&c, b, "j1", 5.0),
            payload(&c, a, "j1", 5.0),
            payload(&other, a, "j1", 10.0),
        ];

        let standings = rank_cohort(&c, &payloads);
        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].project_id, a.min(b));
        assert!(standings.iter().all(|s| s.is_winner));
        assert!(standings.iter().all(|s| s.average_score == 5.0));
    }
}
