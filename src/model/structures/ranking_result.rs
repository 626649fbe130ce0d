use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::structures::{
    conference_class::ConferenceClass,
    team_state::{ClassRecord, WinLoss}
};

/// One resume term: how much it contributed and how many games (or, for flags,
/// 0/1) produced it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Adjustment {
    pub amount: f64,
    pub count: u32
}

impl Adjustment {
    pub fn new(amount: f64, count: u32) -> Adjustment {
        Adjustment { amount, count }
    }

    pub fn none() -> Adjustment {
        Adjustment::default()
    }
}

/// Every term that went into a team's resume score. Penalties are stored as
/// positive amounts and subtracted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ResumeBreakdown {
    pub weighted_wins: Adjustment,
    pub strength_of_victory: Adjustment,
    pub strength_of_schedule: Adjustment,
    pub quality_wins: Adjustment,
    pub quality_losses: Adjustment,
    pub bad_losses: Adjustment,
    pub cross_tier_wins: Adjustment,
    pub loss_penalty: Adjustment,
    pub championship: Adjustment,
    pub perfection_multiplier: f64,
    /// Average rating of defeated opponents (0 without wins)
    pub average_victory_rating: f64,
    /// Average rating of all opponents
    pub average_opponent_rating: f64
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResumeScore {
    pub score: f64,
    pub breakdown: ResumeBreakdown
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WinDetail {
    pub opponent: String,
    pub opponent_rating: f64,
    /// Filled in once the final order is known
    pub opponent_rank: usize,
    pub was_road: bool,
    pub margin: u32,
    pub notes: Option<String>,
    pub is_quality_win: bool
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LossDetail {
    pub opponent: String,
    pub opponent_rating: f64,
    pub opponent_rank: usize,
    pub was_home: bool,
    pub margin: u32,
    pub notes: Option<String>,
    pub is_quality_loss: bool,
    pub is_bad_loss: bool
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RecordSummary {
    pub overall: WinLoss,
    pub ties: u32,
    pub conference: WinLoss,
    pub road_wins: u32,
    pub vs_class: ClassRecord
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TeamRanking {
    pub rank: usize,
    pub team: String,
    pub conference: Option<String>,
    pub conference_class: ConferenceClass,
    pub rating: f64,
    pub conference_quality: f64,
    pub resume_score: f64,
    pub final_score: f64,
    pub normalized_score: f64,
    pub record: RecordSummary,
    pub resume: ResumeBreakdown,
    pub wins: Vec<WinDetail>,
    pub losses: Vec<LossDetail>
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ConferenceRanking {
    pub rank: usize,
    pub conference: String,
    pub conference_class: ConferenceClass,
    pub quality: f64,
    pub team_count: usize,
    /// Inter-conference games only
    pub record_vs_class: ClassRecord
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SeasonRankings {
    pub teams: Vec<TeamRanking>,
    pub conferences: Vec<ConferenceRanking>,
    /// Week -> team -> rating after that week, recorded on the last pass
    #[serde(default)]
    pub weekly_ratings: BTreeMap<u32, IndexMap<String, f64>>
}

impl SeasonRankings {
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn team(&self, name: &str) -> Option<&TeamRanking> {
        self.teams.iter().find(|t| t.team == name)
    }

    pub fn conference(&self, name: &str) -> Option<&ConferenceRanking> {
        self.conferences.iter().find(|c| c.conference == name)
    }
}
