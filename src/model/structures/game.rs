use serde::{Deserialize, Serialize};

use crate::model::{classification::is_independent, structures::conference_class::ConferenceClass};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum SeasonType {
    #[default]
    Regular,
    Postseason
}

/// A completed, validated game. Both scores are always present; incomplete
/// records are dropped by the feed before they reach the model.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Game {
    pub week: u32,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    pub home_conference: Option<String>,
    pub away_conference: Option<String>,
    pub home_class: ConferenceClass,
    pub away_class: ConferenceClass,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub season_type: SeasonType
}

impl Game {
    pub fn margin(&self) -> u32 {
        self.home_score.abs_diff(self.away_score)
    }

    pub fn is_tie(&self) -> bool {
        self.home_score == self.away_score
    }

    pub fn home_won(&self) -> bool {
        self.home_score > self.away_score
    }

    /// Both teams play in the same named conference. Two independents meeting
    /// is not a conference game.
    pub fn is_conference_game(&self) -> bool {
        match (&self.home_conference, &self.away_conference) {
            (Some(home), Some(away)) => home == away && !is_independent(Some(home)),
            _ => false
        }
    }
}
