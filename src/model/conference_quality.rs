use std::collections::HashMap;

use indexmap::IndexMap;
use itertools::Itertools;
use strum::IntoEnumIterator;
use tracing::debug;

use crate::model::{
    classification::is_independent,
    config::ConferenceConfig,
    statistics::{mean, std_dev},
    structures::{
        conference_class::ConferenceClass,
        team_state::{ClassRecord, TeamState}
    },
    team_store::TeamStore
};

/// Quality figures for one pass: one per named conference, plus a synthetic
/// figure for every independent team.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConferenceQuality {
    pub conferences: IndexMap<String, f64>,
    pub independents: IndexMap<String, f64>
}

impl ConferenceQuality {
    pub fn for_team(&self, team: &TeamState) -> f64 {
        if is_independent(team.conference.as_deref()) {
            return self.independents.get(&team.name).copied().unwrap_or(0.0);
        }

        team.conference
            .as_ref()
            .and_then(|c| self.conferences.get(c))
            .copied()
            .unwrap_or(0.0)
    }
}

/// Estimates conference strength from the frozen ratings of a finished pass.
///
/// The variance penalty uses `prior_pass_std_devs` when given, otherwise the
/// spread of the ratings in `store`.
pub fn compute(
    store: &TeamStore,
    config: &ConferenceConfig,
    prior_pass_std_devs: Option<&HashMap<String, f64>>
) -> ConferenceQuality {
    let members = members_by_conference(store);
    let current_std_devs;
    let std_devs = match prior_pass_std_devs {
        Some(s) => s,
        None => {
            current_std_devs = conference_std_devs(store);
            &current_std_devs
        }
    };

    let mut conferences = IndexMap::new();
    for (conference, teams) in &members {
        let ratings = teams.iter().map(|t| t.rating).collect_vec();
        let raw = hybrid_average(&ratings, config.top_half_weight, config.full_average_weight);

        let mut record = ClassRecord::default();
        for team in teams {
            record.absorb(&team.inter_class_record);
        }

        let mut multiplier = out_of_conference_multiplier(&record, config);
        let spread = std_devs.get(*conference).copied().unwrap_or(0.0);
        if spread > config.chaos_std_dev_threshold {
            debug!(conference = *conference, spread, "Applying chaos tax");
            multiplier *= config.chaos_tax_multiplier;
        }

        conferences.insert(conference.to_string(), raw * multiplier);
    }

    let mut independents = IndexMap::new();
    for team in store.iter().filter(|t| is_independent(t.conference.as_deref())) {
        independents.insert(team.name.clone(), synthetic_quality(team, store, &conferences));
    }

    ConferenceQuality {
        conferences,
        independents
    }
}

/// `top_weight * mean(top half, rounded up) + full_weight * mean(all)`; 0 when empty.
pub fn hybrid_average(ratings: &[f64], top_weight: f64, full_weight: f64) -> f64 {
    let sorted = ratings.iter().copied().sorted_by(|a, b| b.total_cmp(a)).collect_vec();
    let top_n = sorted.len().div_ceil(2);

    match (mean(&sorted[..top_n]), mean(&sorted)) {
        (Some(top), Some(full)) => top_weight * top + full_weight * full,
        _ => 0.0
    }
}

/// Maps the class-weighted win ratio of inter-conference games linearly onto the
/// configured multiplier band. A conference without such games gets 1.
pub fn out_of_conference_multiplier(record: &ClassRecord, config: &ConferenceConfig) -> f64 {
    let (weighted_wins, weighted_losses) = ConferenceClass::iter().fold((0.0, 0.0), |(w, l), class| {
        let weight = config.opponent_weight(class);
        let games = record.get(class);
        (w + games.wins as f64 * weight, l + games.losses as f64 * weight)
    });

    let total = weighted_wins + weighted_losses;
    if total <= 0.0 {
        return 1.0;
    }

    let ratio = weighted_wins / total;
    config.multiplier_floor + (config.multiplier_ceiling - config.multiplier_floor) * ratio
}

/// Sample standard deviation of member ratings per named conference.
pub fn conference_std_devs(store: &TeamStore) -> HashMap<String, f64> {
    members_by_conference(store)
        .into_iter()
        .map(|(conference, teams)| {
            let ratings = teams.iter().map(|t| t.rating).collect_vec();
            (conference.to_string(), std_dev(&ratings))
        })
        .collect()
}

fn members_by_conference(store: &TeamStore) -> IndexMap<&str, Vec<&TeamState>> {
    let mut members: IndexMap<&str, Vec<&TeamState>> = IndexMap::new();

    for team in store.iter() {
        match team.conference.as_deref() {
            Some(c) if !is_independent(Some(c)) => members.entry(c).or_default().push(team),
            _ => {}
        }
    }

    members
}

/// Average quality of the conferences of the opponents an independent actually
/// played. Opponents without a conference are skipped; 0 when none remain.
fn synthetic_quality(team: &TeamState, store: &TeamStore, conferences: &IndexMap<String, f64>) -> f64 {
    let qualities = team
        .opponents
        .iter()
        .filter_map(|opponent| store.get(opponent))
        .filter_map(|opponent| opponent.conference.as_deref())
        .filter(|c| !is_independent(Some(*c)))
        .map(|c| conferences.get(c).copied().unwrap_or(0.0))
        .collect_vec();

    mean(&qualities).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::{
        model::{
            classification::INDEPENDENTS,
            conference_quality::{compute, conference_std_devs, hybrid_average, out_of_conference_multiplier},
            config::{ConferenceConfig, RankingConfig},
            rating_update::RatingUpdater,
            structures::{conference_class::ConferenceClass, team_state::ClassRecord, Priors},
            team_store::TeamStore
        },
        utils::test_utils::generate_game
    };
    use approx::assert_abs_diff_eq;

    fn store_with(teams: &[(&str, Option<&str>, ConferenceClass, f64)]) -> TeamStore {
        let mut store = TeamStore::new();
        for (name, conference, class, rating) in teams {
            store.get_or_insert(name, *conference, *class, |_| *rating);
        }
        store
    }

    #[test]
    fn test_hybrid_average() {
        assert_eq!(hybrid_average(&[], 0.7, 0.3), 0.0);
        assert_abs_diff_eq!(hybrid_average(&[1500.0], 0.7, 0.3), 1500.0);

        // Top half of 5 (rounded up) is [1700, 1600, 1500]
        let ratings = [1300.0, 1700.0, 1400.0, 1500.0, 1600.0];
        let expected = 0.7 * 1600.0 + 0.3 * 1500.0;
        assert_abs_diff_eq!(hybrid_average(&ratings, 0.7, 0.3), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_out_of_conference_multiplier_band() {
        let config = ConferenceConfig::default();
        assert_eq!(out_of_conference_multiplier(&ClassRecord::default(), &config), 1.0);

        let mut record = ClassRecord::default();
        record.top.wins = 3;
        assert_abs_diff_eq!(out_of_conference_multiplier(&record, &config), 1.2, epsilon = 1e-12);

        let mut record = ClassRecord::default();
        record.top.losses = 3;
        assert_abs_diff_eq!(out_of_conference_multiplier(&record, &config), 0.8, epsilon = 1e-12);

        // One win over a top team (1.0) against two losses to bottom teams (0.2)
        let mut record = ClassRecord::default();
        record.top.wins = 1;
        record.bottom.losses = 2;
        let ratio = 1.0 / 1.2;
        assert_abs_diff_eq!(
            out_of_conference_multiplier(&record, &config),
            0.8 + 0.4 * ratio,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_single_team_conference_has_no_spread() {
        let store = store_with(&[("Solo", Some("Lonely"), ConferenceClass::Mid, 1234.0)]);
        assert_eq!(conference_std_devs(&store).get("Lonely"), Some(&0.0));

        let quality = compute(&store, &ConferenceConfig::default(), None);
        assert_abs_diff_eq!(quality.conferences["Lonely"], 1234.0, epsilon = 1e-9);
    }

    #[test]
    fn test_chaos_tax() {
        let store = store_with(&[
            ("A", Some("Wild"), ConferenceClass::Top, 1900.0),
            ("B", Some("Wild"), ConferenceClass::Top, 1100.0)
        ]);
        let config = ConferenceConfig::default();
        let raw = hybrid_average(&[1900.0, 1100.0], 0.7, 0.3);

        let taxed = compute(&store, &config, None);
        assert_abs_diff_eq!(taxed.conferences["Wild"], raw * 0.9, epsilon = 1e-9);

        // A previous pass with a calm spread overrides the current snapshot
        let calm = HashMap::from([("Wild".to_string(), 10.0)]);
        let untaxed = compute(&store, &config, Some(&calm));
        assert_abs_diff_eq!(untaxed.conferences["Wild"], raw, epsilon = 1e-9);
    }

    #[test]
    fn test_independents_are_not_a_conference() {
        let store = store_with(&[
            ("Notre Dame", Some(INDEPENDENTS), ConferenceClass::Top, 1600.0),
            ("UConn", Some(INDEPENDENTS), ConferenceClass::Top, 1100.0)
        ]);

        let quality = compute(&store, &ConferenceConfig::default(), None);
        assert!(quality.conferences.is_empty());
        // Neither has played anyone
        assert_eq!(quality.independents["Notre Dame"], 0.0);
    }

    #[test]
    fn test_independent_gets_opponent_conference_quality() {
        let config = RankingConfig::default();
        let priors = Priors::new();
        let updater = RatingUpdater::new(&config, &priors, None);
        let mut store = TeamStore::new();

        // A bottom-tier conference playing itself, plus an independent that only plays its members
        let games = [
            generate_game(1, ("Montana", "Big Sky"), 21, ("Idaho", "Big Sky"), 14),
            generate_game(2, ("Idaho", "Big Sky"), 28, ("Weber State", "Big Sky"), 24),
            generate_game(3, ("Army", INDEPENDENTS), 35, ("Montana", "Big Sky"), 10),
            generate_game(4, ("Army", INDEPENDENTS), 42, ("Weber State", "Big Sky"), 3)
        ];
        for game in &games {
            updater.apply(game, &mut store);
        }

        let quality = compute(&store, &config.conference, None);
        let big_sky = quality.conferences["Big Sky"];
        let army = quality.for_team(store.get("Army").unwrap());

        assert_abs_diff_eq!(army, big_sky, epsilon = 1e-9);
        // Far below what a top-tier conference would be worth
        assert!(army < config.tier_bases.mid);
    }

    #[test]
    fn test_team_without_conference_uses_synthetic_quality() {
        let store = store_with(&[("Nomad", None, ConferenceClass::Bottom, 900.0)]);
        let quality = compute(&store, &ConferenceConfig::default(), None);

        assert_eq!(quality.for_team(store.get("Nomad").unwrap()), 0.0);
        assert!(quality.independents.contains_key("Nomad"));
    }
}
