//! Resume ("record") score: how good a team's results look given who it played,
//! independent of its raw rating.
//!
//! Each term is a separate pure function returning an [`Adjustment`] so it can be
//! checked against a single synthetic team; [`compute`] only adds them up.

use itertools::Itertools;
use tracing::debug;

use crate::model::{
    classification::is_championship,
    config::{RankingConfig, ResumeConfig},
    statistics::{mean, percentile},
    structures::{
        conference_class::ConferenceClass,
        ranking_result::{Adjustment, ResumeBreakdown, ResumeScore},
        team_state::TeamState
    },
    team_store::TeamStore
};

/// League-wide rating cut-offs, recomputed from every pass's frozen ratings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeagueThresholds {
    /// Beating a team above this is a quality win
    pub quality_win: f64,
    /// Losing to a team above this is a quality loss
    pub quality_loss: f64,
    /// Losing to a team below this is a bad loss
    pub bad_loss: f64
}

impl LeagueThresholds {
    pub fn from_ratings(ratings: &[f64], config: &ResumeConfig) -> LeagueThresholds {
        if ratings.is_empty() {
            debug!("No ratings available, using fallback resume thresholds");
        }

        LeagueThresholds {
            quality_win: percentile(ratings, config.quality_win_percentile)
                .unwrap_or(config.fallback_quality_win_threshold),
            quality_loss: percentile(ratings, config.quality_loss_percentile)
                .unwrap_or(config.fallback_quality_loss_threshold),
            bad_loss: percentile(ratings, config.bad_loss_percentile).unwrap_or(config.fallback_bad_loss_threshold)
        }
    }

    pub fn from_store(store: &TeamStore, config: &ResumeConfig) -> LeagueThresholds {
        Self::from_ratings(&store.ratings(), config)
    }

    pub fn is_quality_win(&self, opponent_rating: f64) -> bool {
        opponent_rating > self.quality_win
    }

    pub fn is_quality_loss(&self, opponent_rating: f64) -> bool {
        opponent_rating > self.quality_loss
    }

    pub fn is_bad_loss(&self, opponent_rating: f64) -> bool {
        opponent_rating < self.bad_loss
    }
}

pub fn compute(team: &TeamState, store: &TeamStore, thresholds: &LeagueThresholds, config: &RankingConfig) -> ResumeScore {
    let resume = &config.resume;

    let weighted_wins = weighted_win_base(team, resume);
    let (strength_of_victory, average_victory_rating) = strength_of_victory(team, store, resume);
    let (strength_of_schedule, average_opponent_rating) = strength_of_schedule(team, store, resume);
    let quality_wins = quality_win_bonus(team, store, thresholds, resume);
    let quality_losses = quality_loss_bonus(team, store, thresholds, resume);
    let bad_losses = bad_loss_penalty(team, store, thresholds, resume);
    let cross_tier_wins = cross_tier_bonus(team, store, resume);
    let loss_penalty = loss_penalty(team, resume);
    let championship = championship_anchor(team, resume);
    let perfection_multiplier = perfection_multiplier(team, resume);

    let additive = weighted_wins.amount
        + strength_of_victory.amount
        + strength_of_schedule.amount
        + quality_wins.amount
        + quality_losses.amount
        + cross_tier_wins.amount
        + championship.amount
        - bad_losses.amount
        - loss_penalty.amount;

    ResumeScore {
        score: additive * perfection_multiplier,
        breakdown: ResumeBreakdown {
            weighted_wins,
            strength_of_victory,
            strength_of_schedule,
            quality_wins,
            quality_losses,
            bad_losses,
            cross_tier_wins,
            loss_penalty,
            championship,
            perfection_multiplier,
            average_victory_rating,
            average_opponent_rating
        }
    }
}

/// `base + scale * weighted win pct`, road wins weighted above home wins.
/// The count is the number of road wins.
pub fn weighted_win_base(team: &TeamState, config: &ResumeConfig) -> Adjustment {
    let games = team.decided_games();
    let weighted_pct = if games > 0 {
        let weighted =
            team.home_wins() as f64 * config.home_win_weight + team.road_wins as f64 * config.road_win_weight;
        weighted / games as f64
    } else {
        0.0
    };

    Adjustment::new(config.base + config.win_scale * weighted_pct, team.road_wins)
}

/// Bonus for the average rating of defeated opponents exceeding the team's tier
/// threshold. Also returns that average (0 without wins).
pub fn strength_of_victory(team: &TeamState, store: &TeamStore, config: &ResumeConfig) -> (Adjustment, f64) {
    let ratings = team
        .win_events
        .iter()
        .filter_map(|w| store.rating(&w.opponent))
        .collect_vec();

    let Some(average) = mean(&ratings) else {
        return (Adjustment::none(), 0.0);
    };

    let threshold = config.sov_threshold.for_class(team.conference_class);
    let amount = if average > threshold {
        (average - threshold) * config.sov_multiplier.for_class(team.conference_class)
    } else {
        0.0
    };

    (Adjustment::new(amount, ratings.len() as u32), average)
}

/// Logarithmic bonus above the tier's schedule baseline, linear penalty below it.
/// Also returns the average opponent rating.
pub fn strength_of_schedule(team: &TeamState, store: &TeamStore, config: &ResumeConfig) -> (Adjustment, f64) {
    let ratings = team
        .opponents
        .iter()
        .filter_map(|o| store.rating(o))
        .collect_vec();
    let average = mean(&ratings).unwrap_or(config.sos_default_average);
    let baseline = config.sos_baseline.for_class(team.conference_class);

    let amount = if average > baseline {
        (average - baseline).max(1.0).ln() * config.sos_log_scale
    } else {
        (average - baseline) * config.sos_penalty_multiplier
    };

    (Adjustment::new(amount, ratings.len() as u32), average)
}

/// Per win over an opponent above the quality-win threshold, proportional to the
/// excess. Not capped.
pub fn quality_win_bonus(
    team: &TeamState,
    store: &TeamStore,
    thresholds: &LeagueThresholds,
    config: &ResumeConfig
) -> Adjustment {
    team.win_events
        .iter()
        .filter_map(|w| store.rating(&w.opponent))
        .filter(|r| thresholds.is_quality_win(*r))
        .fold(Adjustment::none(), |acc, r| {
            Adjustment::new(
                acc.amount + (r - thresholds.quality_win) * config.quality_win_multiplier,
                acc.count + 1
            )
        })
}

/// Small credit per loss to an opponent above the quality-loss threshold.
pub fn quality_loss_bonus(
    team: &TeamState,
    store: &TeamStore,
    thresholds: &LeagueThresholds,
    config: &ResumeConfig
) -> Adjustment {
    team.loss_events
        .iter()
        .filter_map(|l| store.rating(&l.opponent))
        .filter(|r| thresholds.is_quality_loss(*r))
        .fold(Adjustment::none(), |acc, r| {
            Adjustment::new(
                acc.amount + (r - thresholds.quality_loss) * config.quality_loss_multiplier,
                acc.count + 1
            )
        })
}

/// Penalty (positive amount) per loss to an opponent below the bad-loss threshold,
/// proportional to the shortfall.
pub fn bad_loss_penalty(
    team: &TeamState,
    store: &TeamStore,
    thresholds: &LeagueThresholds,
    config: &ResumeConfig
) -> Adjustment {
    team.loss_events
        .iter()
        .filter_map(|l| store.rating(&l.opponent))
        .filter(|r| thresholds.is_bad_loss(*r))
        .fold(Adjustment::none(), |acc, r| {
            Adjustment::new(
                acc.amount + (thresholds.bad_loss - r) * config.bad_loss_multiplier,
                acc.count + 1
            )
        })
}

/// Flat bonus per win by a mid-tier team over a top-tier team.
pub fn cross_tier_bonus(team: &TeamState, store: &TeamStore, config: &ResumeConfig) -> Adjustment {
    if team.conference_class != ConferenceClass::Mid {
        return Adjustment::none();
    }

    let count = team
        .win_events
        .iter()
        .filter_map(|w| store.get(&w.opponent))
        .filter(|o| o.conference_class == ConferenceClass::Top)
        .count() as u32;

    Adjustment::new(count as f64 * config.cross_tier_win_bonus, count)
}

/// `base * losses ^ exponent` (positive amount, subtracted).
pub fn loss_penalty(team: &TeamState, config: &ResumeConfig) -> Adjustment {
    if team.losses == 0 {
        return Adjustment::none();
    }

    Adjustment::new(
        config.loss_penalty_base * (team.losses as f64).powf(config.loss_penalty_exponent),
        team.losses
    )
}

/// Flat bonus for winning a championship game, a smaller one for losing one.
/// The count is 1 when either applies.
pub fn championship_anchor(team: &TeamState, config: &ResumeConfig) -> Adjustment {
    if team.win_events.iter().any(|w| is_championship(w.notes.as_deref())) {
        return Adjustment::new(config.championship_win_bonus, 1);
    }

    if team.loss_events.iter().any(|l| is_championship(l.notes.as_deref())) {
        return Adjustment::new(config.championship_loss_bonus, 1);
    }

    Adjustment::none()
}

/// Multiplier on the whole resume for an unbeaten (or one-loss) full season.
pub fn perfection_multiplier(team: &TeamState, config: &ResumeConfig) -> f64 {
    if team.decided_games() < config.perfection_min_games {
        return 1.0;
    }

    match team.losses {
        0 => config.undefeated_multiplier,
        1 => config.one_loss_multiplier,
        _ => 1.0
    }
}
