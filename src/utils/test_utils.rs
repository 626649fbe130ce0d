use itertools::Itertools;
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::model::{
    classification::classify_conference,
    structures::game::{Game, SeasonType}
};

/// Conferences cycled through by [`generate_season`]: two of each tier.
pub const SEASON_CONFERENCES: [&str; 6] = ["SEC", "Big Ten", "Sun Belt", "Mountain West", "Big Sky", "Ivy"];

/// A regular-season game without notes. Classes come from the conference names.
pub fn generate_game(
    week: u32,
    (home_team, home_conference): (&str, &str),
    home_score: u32,
    (away_team, away_conference): (&str, &str),
    away_score: u32
) -> Game {
    Game {
        week,
        home_team: home_team.to_string(),
        away_team: away_team.to_string(),
        home_score,
        away_score,
        home_conference: Some(home_conference.to_string()),
        away_conference: Some(away_conference.to_string()),
        home_class: classify_conference(Some(home_conference)),
        away_class: classify_conference(Some(away_conference)),
        notes: None,
        season_type: SeasonType::Regular
    }
}

pub fn generate_game_with_notes(
    week: u32,
    home: (&str, &str),
    home_score: u32,
    away: (&str, &str),
    away_score: u32,
    notes: &str,
    season_type: SeasonType
) -> Game {
    Game {
        notes: Some(notes.to_string()),
        season_type,
        ..generate_game(week, home, home_score, away, away_score)
    }
}

pub fn team_name(index: usize) -> String {
    format!("Team {index}")
}

/// Conference of `team_name(index)` in a generated season.
pub fn team_conference(index: usize) -> &'static str {
    SEASON_CONFERENCES[index % SEASON_CONFERENCES.len()]
}

/// A reproducible season of `n_weeks` weeks in which every team plays once per
/// week (one team sits out when `n_teams` is odd). Scores never tie.
pub fn generate_season(n_teams: usize, n_weeks: u32) -> Vec<Game> {
    if n_teams < 2 {
        panic!("A season needs at least two teams");
    }

    // Initialize seeded RNG for reproducible results
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut games = Vec::with_capacity(n_teams / 2 * n_weeks as usize);
    let mut order = (0..n_teams).collect_vec();

    for week in 1..=n_weeks {
        order.shuffle(&mut rng);

        for pair in order.chunks_exact(2) {
            let (home, away) = (pair[0], pair[1]);
            let home_score = rng.random_range(0..=56);
            let mut away_score = rng.random_range(0..=56);
            if away_score == home_score {
                away_score += 3;
            }

            games.push(generate_game(
                week,
                (&team_name(home), team_conference(home)),
                home_score,
                (&team_name(away), team_conference(away)),
                away_score
            ));
        }
    }

    games
}
