//! Hackathon definitions and category mapping.

use crate::cohort::PrizeCohort;
use crate::identifiers::{HackathonId, PrizeCohortId};
use serde::{Deserialize, Serialize};

/// Track a hackathon is listed under.
///
/// Serialised as its display name and parsed leniently with
/// [`HackathonCategory::from_label`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HackathonCategory {
    Defi,
    Nft,
    Gaming,
    Infrastructure,
    Ai,
    Social,
    PublicGoods,
    Other(String),
}

impl HackathonCategory {
    pub fn all() -> &'static [HackathonCategory] {
        &[
            Self::Defi,
            Self::Nft,
            Self::Gaming,
            Self::Infrastructure,
            Self::Ai,
            Self::Social,
            Self::PublicGoods,
        ]
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Defi => "DeFi",
            Self::Nft => "NFT",
            Self::Gaming => "Gaming",
            Self::Infrastructure => "Infrastructure",
            Self::Ai => "AI",
            Self::Social => "Social",
            Self::PublicGoods => "Public Goods",
            Self::Other(label) => label,
        }
    }

    /// Map a free-form label to a category.
    ///
    /// Matching ignores case, whitespace, hyphens and underscores, so
    /// `"Public-Goods"` and `"public goods"` both map to [`Self::PublicGoods`].
    /// Unrecognised labels are kept verbatim as [`Self::Other`].
    pub fn from_label(label: &str) -> Self {
        let key: String = label
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "defi" | "decentralizedfinance" => Self::Defi,
            "nft" | "nfts" => Self::Nft,
            "gaming" | "games" => Self::Gaming,
            "infrastructure" | "infra" | "tooling" => Self::Infrastructure,
            "ai" | "ml" | "artificialintelligence" => Self::Ai,
            "social" => Self::Social,
            "publicgoods" => Self::PublicGoods,
            _ => Self::Other(label.trim().to_string()),
        }
    }
}

impl From<String> for HackathonCategory {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<HackathonCategory> for String {
    fn from(category: HackathonCategory) -> Self {
        category.display_name().to_string()
    }
}

/// A hackathon and the prize cohorts judges evaluate projects in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hackathon {
    pub id: HackathonId,
    pub name: String,
    #[serde(default)]
    pub categories: Vec<HackathonCategory>,
    #[serde(default)]
    pub prize_cohorts: Vec<PrizeCohort>,
}

impl Hackathon {
    /// Look up a prize cohort by id
    pub fn cohort(&self, id: PrizeCohortId) -> Option<&PrizeCohort> {
        self.prize_cohorts.iter().find(|c| c.id == id)
    }

    /// Sum of every cohort's prize amount that parses as a number
    pub fn total_prize_pool(&self) -> f64 {
        self.prize_cohorts
            .iter()
            .filter_map(PrizeCohort::prize_value)
            .sum()
    }
}
