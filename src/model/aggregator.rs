use std::collections::HashMap;

use indexmap::IndexMap;
use itertools::Itertools;
use tracing::debug;

use crate::model::{
    conference_quality,
    config::RankingConfig,
    constants::NORMALIZED_MAX,
    resume::{self, LeagueThresholds},
    structures::{
        conference_class::ConferenceClass,
        ranking_result::{ConferenceRanking, LossDetail, RecordSummary, SeasonRankings, TeamRanking, WinDetail},
        team_state::{ClassRecord, TeamState, WinLoss},
        Priors
    },
    team_store::TeamStore
};

/// Scores every team in `store` from its frozen end-of-pass ratings and sorts
/// the result. Normalized scores are left at 0; see [`normalize_scores`].
///
/// League thresholds and conference quality are derived once from the store
/// before any team is scored.
pub fn calculate_final_rankings(
    store: &TeamStore,
    config: &RankingConfig,
    prior_pass_std_devs: Option<&HashMap<String, f64>>
) -> SeasonRankings {
    if store.is_empty() {
        debug!("No teams to rank");
        return SeasonRankings::default();
    }

    let thresholds = LeagueThresholds::from_store(store, &config.resume);
    let quality = conference_quality::compute(store, &config.conference, prior_pass_std_devs);
    let weights = &config.final_weights;

    let mut teams = store
        .iter()
        .map(|team| {
            let resume = resume::compute(team, store, &thresholds, config);
            let conference_quality = quality.for_team(team);
            let final_score =
                weights.rating * team.rating + weights.conference * conference_quality + weights.resume * resume.score;

            TeamRanking {
                rank: 0,
                team: team.name.clone(),
                conference: team.conference.clone(),
                conference_class: team.conference_class,
                rating: team.rating,
                conference_quality,
                resume_score: resume.score,
                final_score,
                normalized_score: 0.0,
                record: record_summary(team),
                resume: resume.breakdown,
                wins: win_details(team, store, &thresholds),
                losses: loss_details(team, store, &thresholds)
            }
        })
        .collect_vec();

    // Stable: equal scores keep first-appearance order
    teams.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
    for (i, team) in teams.iter_mut().enumerate() {
        team.rank = i + 1;
    }

    let ranks: HashMap<String, usize> = teams.iter().map(|t| (t.team.clone(), t.rank)).collect();
    for team in teams.iter_mut() {
        for win in team.wins.iter_mut() {
            win.opponent_rank = ranks.get(&win.opponent).copied().unwrap_or(0);
        }
        for loss in team.losses.iter_mut() {
            loss.opponent_rank = ranks.get(&loss.opponent).copied().unwrap_or(0);
        }
    }

    let conferences = conference_rankings(store, &quality.conferences);

    SeasonRankings {
        teams,
        conferences,
        weekly_ratings: Default::default()
    }
}

/// Min-max rescales final scores onto 0..=100. All teams get 0 when every final
/// score is equal.
pub fn normalize_scores(rankings: &mut SeasonRankings) {
    let Some((min, max)) = rankings
        .teams
        .iter()
        .map(|t| t.final_score)
        .fold(None, |acc: Option<(f64, f64)>, s| match acc {
            Some((lo, hi)) => Some((lo.min(s), hi.max(s))),
            None => Some((s, s))
        })
    else {
        return;
    };

    let range = max - min;
    for team in rankings.teams.iter_mut() {
        team.normalized_score = if range > 0.0 {
            NORMALIZED_MAX * ((team.final_score - min) / range)
        } else {
            0.0
        };
    }
}

/// Weighted sum of each team's final score over previous seasons, most recent
/// first. Seasons beyond the number of weights are ignored.
pub fn calculate_priors(history: &[SeasonRankings], weights: &[f64]) -> Priors {
    let mut priors = Priors::new();

    for (season, weight) in history.iter().zip(weights) {
        for team in &season.teams {
            *priors.entry(team.team.clone()).or_insert(0.0) += team.final_score * weight;
        }
    }

    priors
}

fn record_summary(team: &TeamState) -> RecordSummary {
    RecordSummary {
        overall: WinLoss {
            wins: team.wins,
            losses: team.losses
        },
        ties: team.ties,
        conference: WinLoss {
            wins: team.conference_wins,
            losses: team.conference_losses
        },
        road_wins: team.road_wins,
        vs_class: team.record_vs_class
    }
}

fn win_details(team: &TeamState, store: &TeamStore, thresholds: &LeagueThresholds) -> Vec<WinDetail> {
    team.win_events
        .iter()
        .map(|w| {
            let opponent_rating = store.rating(&w.opponent).unwrap_or(0.0);
            WinDetail {
                opponent: w.opponent.clone(),
                opponent_rating,
                opponent_rank: 0,
                was_road: w.was_road,
                margin: w.margin,
                notes: w.notes.clone(),
                is_quality_win: thresholds.is_quality_win(opponent_rating)
            }
        })
        .collect()
}

fn loss_details(team: &TeamState, store: &TeamStore, thresholds: &LeagueThresholds) -> Vec<LossDetail> {
    team.loss_events
        .iter()
        .map(|l| {
            let opponent_rating = store.rating(&l.opponent).unwrap_or(0.0);
            LossDetail {
                opponent: l.opponent.clone(),
                opponent_rating,
                opponent_rank: 0,
                was_home: l.was_home,
                margin: l.margin,
                notes: l.notes.clone(),
                is_quality_loss: thresholds.is_quality_loss(opponent_rating),
                is_bad_loss: thresholds.is_bad_loss(opponent_rating)
            }
        })
        .collect()
}

fn conference_rankings(store: &TeamStore, qualities: &IndexMap<String, f64>) -> Vec<ConferenceRanking> {
    let mut conferences = qualities
        .iter()
        .map(|(conference, quality)| {
            let members = store
                .iter()
                .filter(|t| t.conference.as_deref() == Some(conference.as_str()))
                .collect_vec();

            let mut record_vs_class = ClassRecord::default();
            for member in &members {
                record_vs_class.absorb(&member.inter_class_record);
            }

            ConferenceRanking {
                rank: 0,
                conference: conference.clone(),
                conference_class: members
                    .first()
                    .map(|t| t.conference_class)
                    .unwrap_or(ConferenceClass::Bottom),
                quality: *quality,
                team_count: members.len(),
                record_vs_class
            }
        })
        .collect_vec();

    conferences.sort_by(|a, b| b.quality.total_cmp(&a.quality));
    for (i, conference) in conferences.iter_mut().enumerate() {
        conference.rank = i + 1;
    }

    conferences
}
