//! Game-feed boundary: reads raw game records, drops the malformed ones before
//! they reach the engine and writes results back out as JSON.

use std::{
    fs::{self, File},
    io::BufWriter,
    path::Path
};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    error::{RankingError, Result},
    model::{
        classification::classify_conference,
        structures::{
            conference_class::ConferenceClass,
            game::{Game, SeasonType},
            ranking_result::SeasonRankings
        }
    }
};

/// A game record as supplied by the feed. Any field may be missing.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RawGame {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub week: Option<u32>,
    #[serde(default, alias = "home_team_name", alias = "homeTeam")]
    pub home_team: Option<String>,
    #[serde(default, alias = "away_team_name", alias = "awayTeam")]
    pub away_team: Option<String>,
    #[serde(default, alias = "home_points", alias = "homePoints")]
    pub home_score: Option<u32>,
    #[serde(default, alias = "away_points", alias = "awayPoints")]
    pub away_score: Option<u32>,
    #[serde(default, alias = "homeConference")]
    pub home_conference: Option<String>,
    #[serde(default, alias = "awayConference")]
    pub away_conference: Option<String>,
    #[serde(default, alias = "home_conference_type")]
    pub home_class: Option<ConferenceClass>,
    #[serde(default, alias = "away_conference_type")]
    pub away_class: Option<ConferenceClass>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, alias = "seasonType")]
    pub season_type: Option<SeasonType>
}

impl RawGame {
    /// `None` when a team or a score is missing. A missing class is derived from
    /// the conference name.
    pub fn into_game(self) -> Option<Game> {
        let home_class = self
            .home_class
            .unwrap_or_else(|| classify_conference(self.home_conference.as_deref()));
        let away_class = self
            .away_class
            .unwrap_or_else(|| classify_conference(self.away_conference.as_deref()));

        Some(Game {
            week: self.week?,
            home_team: self.home_team.filter(|t| !t.is_empty())?,
            away_team: self.away_team.filter(|t| !t.is_empty())?,
            home_score: self.home_score?,
            away_score: self.away_score?,
            home_conference: self.home_conference,
            away_conference: self.away_conference,
            home_class,
            away_class,
            notes: self.notes,
            season_type: self.season_type.unwrap_or_default()
        })
    }
}

/// Reads a JSON array of [`RawGame`]s.
pub fn load_games(path: &Path) -> Result<Vec<RawGame>> {
    let contents = fs::read_to_string(path).map_err(|source| RankingError::Io {
        path: path.to_path_buf(),
        source
    })?;

    let games: Vec<RawGame> = serde_json::from_str(&contents)?;
    info!(path = %path.display(), games = games.len(), "Loaded game feed");

    Ok(games)
}

/// Converts raw records into engine games, dropping (and logging) every record
/// without both teams, both scores and a week.
pub fn validate_games(raw: Vec<RawGame>) -> Vec<Game> {
    let total = raw.len();
    let games = raw
        .into_iter()
        .filter_map(|r| {
            let id = r.id;
            let game = r.into_game();
            if game.is_none() {
                warn!(?id, "Dropping game with missing team, score or week");
            }
            game
        })
        .collect::<Vec<_>>();

    if games.len() < total {
        warn!(dropped = total - games.len(), kept = games.len(), "Dropped malformed games");
    }

    games
}

/// With `exclude_bottom_tier`, keeps only games between two major-division teams.
pub fn filter_games(games: Vec<Game>, exclude_bottom_tier: bool) -> Vec<Game> {
    if !exclude_bottom_tier {
        return games;
    }

    games
        .into_iter()
        .filter(|g| g.home_class.is_major() && g.away_class.is_major())
        .collect()
}

/// Keeps games played up to and including `week`.
pub fn games_through_week(games: Vec<Game>, week: Option<u32>) -> Vec<Game> {
    match week {
        Some(week) => games.into_iter().filter(|g| g.week <= week).collect(),
        None => games
    }
}

pub fn write_rankings(path: &Path, rankings: &SeasonRankings) -> Result<()> {
    let file = File::create(path).map_err(|source| RankingError::Io {
        path: path.to_path_buf(),
        source
    })?;

    serde_json::to_writer_pretty(BufWriter::new(file), rankings)?;
    info!(path = %path.display(), teams = rankings.teams.len(), "Wrote rankings");

    Ok(())
}
