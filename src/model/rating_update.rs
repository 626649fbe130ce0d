use tracing::trace;

use crate::model::{
    classification::GameContext,
    config::RankingConfig,
    constants::ELO_SCALE,
    structures::{
        conference_class::ConferenceClass,
        game::Game,
        team_state::{LossEvent, WinEvent},
        Priors, ReferenceRatings
    },
    team_store::TeamStore
};

/// What a single decided game did to the ratings. `delta` is the amount moved
/// from the loser to the winner before the winner's ceiling is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingTransfer {
    pub winner: String,
    pub loser: String,
    pub delta: f64,
    /// Winner's expected score
    pub expected: f64,
    pub matchup_weight: f64,
    pub upset_multiplier: f64,
    pub winner_rating_after: f64,
    pub loser_rating_after: f64
}

/// Applies game results to a [`TeamStore`].
///
/// When a reference map from a previous pass is supplied, each team's strength in
/// the expected-score formula is `(1 - w) * live + w * reference`, with `w` the
/// configured `reference_weight`. Upset detection and the transfer itself always
/// work on live ratings.
pub struct RatingUpdater<'a> {
    config: &'a RankingConfig,
    priors: &'a Priors,
    reference: Option<&'a ReferenceRatings>
}

impl<'a> RatingUpdater<'a> {
    pub fn new(
        config: &'a RankingConfig,
        priors: &'a Priors,
        reference: Option<&'a ReferenceRatings>
    ) -> RatingUpdater<'a> {
        RatingUpdater {
            config,
            priors,
            reference
        }
    }

    /// Updates the two participants of `game`. Ties only count as a game played
    /// and return `None`.
    pub fn apply(&self, game: &Game, store: &mut TeamStore) -> Option<RatingTransfer> {
        self.init_team(store, &game.home_team, game.home_conference.as_deref(), game.home_class);
        self.init_team(store, &game.away_team, game.away_conference.as_deref(), game.away_class);

        if game.is_tie() {
            for name in [&game.home_team, &game.away_team] {
                if let Some(team) = store.get_mut(name) {
                    team.games_played += 1;
                    team.ties += 1;
                }
            }

            return None;
        }

        let home_won = game.home_won();
        let (winner, loser) = if home_won {
            (&game.home_team, &game.away_team)
        } else {
            (&game.away_team, &game.home_team)
        };

        let context = GameContext::classify(game.notes.as_deref(), game.season_type);
        let (winner_rating, winner_class, winner_conference) = Self::snapshot(store, winner)?;
        let (loser_rating, loser_class, loser_conference) = Self::snapshot(store, loser)?;

        let margin = game.margin();
        let mov_factor = (margin as f64 + 1.0).ln();
        let matchup_weight = self.config.matchup_weights.weight(winner_class, loser_class);

        // Home-field advantage shifts the expectation only, never the stored rating
        let hfa = self.home_field_advantage(&context);
        let winner_strength = self.strength(winner, winner_rating) + if home_won { hfa } else { 0.0 };
        let loser_strength = self.strength(loser, loser_rating) + if home_won { 0.0 } else { hfa };
        let expected = expected_score(winner_strength, loser_strength);

        let mut k = self.config.k_factor;
        if context.postseason {
            k *= self.config.postseason_k_multiplier;
        }

        let upset_multiplier = self.upset_multiplier(winner_rating, loser_rating, winner_class, loser_class);
        let delta = k * matchup_weight * mov_factor * (1.0 - expected) * upset_multiplier;

        let winner_rating_after = (winner_rating + delta).min(self.config.rating_ceiling);
        let loser_rating_after = loser_rating - delta;

        trace!(
            winner = winner.as_str(),
            loser = loser.as_str(),
            delta,
            expected,
            matchup_weight,
            upset_multiplier,
            "Applied game"
        );

        let conference_game = game.is_conference_game();
        let inter_conference = match (&winner_conference, &loser_conference) {
            (Some(w), Some(l)) => w != l,
            _ => false
        };

        if let Some(team) = store.get_mut(winner) {
            team.rating = winner_rating_after;
            team.games_played += 1;
            team.wins += 1;
            if !home_won {
                team.road_wins += 1;
            }
            if conference_game {
                team.conference_wins += 1;
            }
            team.record_vs_class.get_mut(loser_class).record(true);
            if inter_conference {
                team.inter_class_record.get_mut(loser_class).record(true);
            }
            team.win_events.push(WinEvent {
                opponent: loser.clone(),
                was_road: !home_won,
                margin,
                notes: game.notes.clone()
            });
            team.opponents.push(loser.clone());
        }

        if let Some(team) = store.get_mut(loser) {
            team.rating = loser_rating_after;
            team.games_played += 1;
            team.losses += 1;
            if conference_game {
                team.conference_losses += 1;
            }
            team.record_vs_class.get_mut(winner_class).record(false);
            if inter_conference {
                team.inter_class_record.get_mut(winner_class).record(false);
            }
            team.loss_events.push(LossEvent {
                opponent: winner.clone(),
                was_home: !home_won,
                margin,
                notes: game.notes.clone()
            });
            team.opponents.push(winner.clone());
        }

        Some(RatingTransfer {
            winner: winner.clone(),
            loser: loser.clone(),
            delta,
            expected,
            matchup_weight,
            upset_multiplier,
            winner_rating_after,
            loser_rating_after
        })
    }

    fn init_team(&self, store: &mut TeamStore, name: &str, conference: Option<&str>, class: ConferenceClass) {
        let prior = self.priors.get(name).copied();
        store.get_or_insert(name, conference, class, |c| self.config.initial_rating(c, prior));
    }

    fn snapshot(store: &TeamStore, name: &str) -> Option<(f64, ConferenceClass, Option<String>)> {
        store
            .get(name)
            .map(|t| (t.rating, t.conference_class, t.conference.clone()))
    }

    fn strength(&self, name: &str, live: f64) -> f64 {
        let w = self.config.reference_weight;

        match self.reference.and_then(|r| r.get(name)) {
            Some(reference) => (1.0 - w) * live + w * reference,
            None => live
        }
    }

    fn home_field_advantage(&self, context: &GameContext) -> f64 {
        let hfa = &self.config.home_field;

        if context.neutral_site {
            hfa.neutral
        } else if context.postseason {
            hfa.postseason
        } else {
            hfa.regular
        }
    }

    fn upset_multiplier(
        &self,
        winner_rating: f64,
        loser_rating: f64,
        winner_class: ConferenceClass,
        loser_class: ConferenceClass
    ) -> f64 {
        let upsets = &self.config.upsets;
        let mut multiplier: f64 = 1.0;

        if loser_rating - winner_rating > upsets.rating_gap {
            multiplier *= upsets.multiplier;
        }

        if winner_class == ConferenceClass::Mid && loser_class == ConferenceClass::Top {
            multiplier *= upsets.cross_tier_multiplier;
        }

        multiplier.min(upsets.cap)
    }
}

/// Logistic expectation of the first side beating the second.
pub fn expected_score(strength: f64, opponent_strength: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent_strength - strength) / ELO_SCALE))
}
