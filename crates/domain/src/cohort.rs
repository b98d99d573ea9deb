//! Prize cohorts and their evaluation criteria.

use crate::identifiers::PrizeCohortId;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// How a cohort's winners are determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JudgingMode {
    #[default]
    Manual,
    Automated,
    Hybrid,
}

impl JudgingMode {
    /// Whether judges score projects by hand against the cohort's criteria
    pub fn requires_criteria(&self) -> bool {
        matches!(self, Self::Manual)
    }
}

/// Who may vote within a cohort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VotingMode {
    #[default]
    Public,
    Private,
    JudgesOnly,
}

/// One named, point-capped scoring dimension within a cohort
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Criterion {
    pub name: String,
    /// Maximum score a judge may award for this criterion
    pub points: u32,
    #[serde(default)]
    pub description: String,
}

impl Criterion {
    pub fn new(name: impl Into<String>, points: u32) -> Self {
        Self {
            name: name.into(),
            points,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A named award track within a hackathon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PrizeCohort {
    pub id: PrizeCohortId,
    #[validate(length(min = 1, max = 200, message = "Prize cohort name must be 1-200 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 1, message = "Number of winners must be at least 1"))]
    pub number_of_winners: u32,
    /// Free-text amount, e.g. "$1,000 USDC"
    #[serde(default)]
    pub prize_amount: String,
    #[serde(default)]
    pub judging_mode: JudgingMode,
    #[serde(default)]
    pub voting_mode: VotingMode,
    #[validate(range(min = 1, message = "Max votes per judge must be at least 1"))]
    #[serde(default = "default_max_votes_per_judge")]
    pub max_votes_per_judge: u32,
    #[serde(default)]
    pub evaluation_criteria: Vec<Criterion>,
}

fn default_max_votes_per_judge() -> u32 {
    1
}

impl PrizeCohort {
    /// Look up a criterion by name
    pub fn criterion(&self, name: &str) -> Option<&Criterion> {
        self.evaluation_criteria.iter().find(|c| c.name == name)
    }

    /// Criterion names in their configured order
    pub fn criterion_names(&self) -> impl Iterator<Item = &str> {
        self.evaluation_criteria.iter().map(|c| c.name.as_str())
    }

    /// Sum of all criterion point caps
    pub fn max_possible_score(&self) -> u64 {
        self.evaluation_criteria
            .iter()
            .map(|c| u64::from(c.points))
            .sum()
    }

    /// Numeric prize value, if the free-text amount contains one
    pub fn prize_value(&self) -> Option<f64> {
        PrizeAmount::parse_loose(&self.prize_amount).map(|a| a.value)
    }
}

static AMOUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d[\d,]*(?:\.\d+)?)\s*(k|m)?\b").expect("amount pattern is valid")
});

/// Numeric value extracted from a free-text prize amount
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrizeAmount {
    pub value: f64,
}

impl PrizeAmount {
    /// Extract the first number from text such as `"$1,000 USDC"` or `"2.5k"`.
    ///
    /// Thousands separators are ignored and a trailing `k`/`m` multiplies the
    /// value. Returns `None` when the text contains no number.
    pub fn parse_loose(text: &str) -> Option<Self> {
        let caps = AMOUNT_PATTERN.captures(text)?;
        let digits = caps.get(1)?.as_str().replace(',', "");
        let mut value: f64 = digits.parse().ok()?;

        match caps.get(2).map(|m| m.as_str().to_ascii_lowercase()) {
            Some(suffix) if suffix == "k" => value *= 1_000.0,
            Some(suffix) if suffix == "m" => value *= 1_000_000.0,
            _ => {}
        }

        Some(Self { value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cohort(criteria: Vec<Criterion>) -> PrizeCohort {
        PrizeCohort {
            id: PrizeCohortId::new(),
            name: "Best DeFi".to_string(),
            description: String::new(),
            number_of_winners: 3,
            prize_amount: "$1,000 USDC".to_string(),
            judging_mode: JudgingMode::Manual,
            voting_mode: VotingMode::JudgesOnly,
            max_votes_per_judge: 1,
            evaluation_criteria: criteria,
        }
    }

    #[test]
    fn test_max_possible_score() {
        let c = cohort(vec![Criterion::new("Tech", 10), Criterion::new("UX", 5)]);
        assert_eq!(c.max_possible_score(), 15);
        assert_eq!(cohort(vec![]).max_possible_score(), 0);
    }

    #[test]
    fn test_criterion_lookup() {
        let c = cohort(vec![Criterion::new("Tech", 10), Criterion::new("UX", 5)]);
        assert_eq!(c.criterion("UX").map(|c| c.points), Some(5));
        assert!(c.criterion("Design").is_none());
        assert_eq!(c.criterion_names().collect::<Vec<_>>(), vec!["Tech", "UX"]);
    }

    #[test]
    fn test_parse_loose_amounts() {
        assert_eq!(PrizeAmount::parse_loose("$1,000 USDC").unwrap().value, 1000.0);
        assert_eq!(PrizeAmount::parse_loose("500").unwrap().value, 500.0);
        assert_eq!(PrizeAmount::parse_loose("2.5k").unwrap().value, 2500.0);
        assert_eq!(PrizeAmount::parse_loose("1M tokens").unwrap().value, 1_000_000.0);
        assert!(PrizeAmount::parse_loose("swag bag").is_none());
        assert!(PrizeAmount::parse_loose("").is_none());
    }

    #[test]
    fn test_cohort_wire_format() {
        let json = r#"{
            "id": "0190f5c2-7c1a-7000-8000-000000000001",
            "name": "Best UX",
            "numberOfWinners": 2,
            "prizeAmount": "500",
            "judgingMode": "hybrid",
            "votingMode": "judges_only",
            "maxVotesPerJudge": 3,
            "evaluationCriteria": [{"name": "UX", "points": 5, "description": "Polish"}]
        }"#;

        let c: PrizeCohort = serde_json::from_str(json).unwrap();
        assert_eq!(c.judging_mode, JudgingMode::Hybrid);
        assert_eq!(c.voting_mode, VotingMode::JudgesOnly);
        assert_eq!(c.max_votes_per_judge, 3);
        assert_eq!(c.evaluation_criteria[0].description, "Polish");
        assert_eq!(c.prize_value(), Some(500.0));
    }

    #[test]
    fn test_derived_validation_rejects_zero_winners() {
        let mut c = cohort(vec![Criterion::new("Tech", 10)]);
        assert!(c.validate().is_ok());

        c.number_of_winners = 0;
        assert!(c.validate().is_err());
    }
}
