use cfb_ranker::{
    model::{
        aggregator::calculate_final_rankings,
        config::RankingConfig,
        ranking_model::RankingModel,
        rating_update::RatingUpdater,
        resume::LeagueThresholds,
        structures::{ranking_result::SeasonRankings, Priors},
        team_store::TeamStore
    },
    utils::test_utils::generate_season
};

use crate::common::{init_test_env, tiered_season};

fn rank(config: RankingConfig) -> SeasonRankings {
    RankingModel::new(config, Priors::new()).run(&tiered_season())
}

fn replay_once(config: &RankingConfig) -> TeamStore {
    let priors = Priors::new();
    let updater = RatingUpdater::new(config, &priors, None);
    let mut store = TeamStore::new();
    for game in generate_season(60, 12) {
        updater.apply(&game, &mut store);
    }
    store
}

#[test]
fn test_recomputation_is_bit_identical() {
    init_test_env();

    let first = rank(RankingConfig::default());
    let second = rank(RankingConfig::default());

    let scores = |r: &SeasonRankings| r.teams.iter().map(|t| t.final_score.to_bits()).collect::<Vec<_>>();
    assert_eq!(scores(&first), scores(&second));
    assert_eq!(first, second);
}

#[test]
fn test_bottom_tier_team_stays_below_undefeated_top_tier_team() {
    init_test_env();
    let rankings = rank(RankingConfig::default());

    let juggernaut = rankings.team("Juggernaut").unwrap();
    let minnow = rankings.team("Minnow").unwrap();

    assert_eq!(juggernaut.record.overall.losses, 0);
    assert_eq!(minnow.record.overall.losses, 0);
    assert!(juggernaut.rating > minnow.rating);
    assert!(juggernaut.rank < minnow.rank);
    assert_eq!(juggernaut.rank, 1);
}

#[test]
fn test_normalized_scores_span_zero_to_hundred() {
    init_test_env();
    let rankings = rank(RankingConfig::default());

    assert!(rankings.teams.iter().all(|t| (0.0..=100.0).contains(&t.normalized_score)));
    assert_eq!(rankings.teams.iter().filter(|t| t.normalized_score == 100.0).count(), 1);
    assert_eq!(rankings.teams.iter().filter(|t| t.normalized_score == 0.0).count(), 1);
}

#[test]
fn test_independent_quality_tracks_its_opponents() {
    init_test_env();
    let config = RankingConfig::default();
    let rankings = rank(config.clone());

    let army = rankings.team("Army").unwrap();
    let big_sky = rankings.conference("Big Sky").unwrap();

    assert!((army.conference_quality - big_sky.quality).abs() < 1e-6);
    assert!(army.conference_quality < config.tier_bases.mid);
    assert!(rankings.conference("FBS Independents").is_none());
}

#[test]
fn test_conference_table() {
    init_test_env();
    let rankings = rank(RankingConfig::default());

    let ranks = rankings.conferences.iter().map(|c| c.rank).collect::<Vec<_>>();
    assert_eq!(ranks, vec![1, 2, 3]);

    let big_sky = rankings.conference("Big Sky").unwrap();
    assert_eq!(big_sky.team_count, 3);
    assert_eq!(big_sky.rank, 3);
    // Three losses to SEC teams and two to Army
    assert_eq!(big_sky.record_vs_class.top.losses, 5);
    assert_eq!(big_sky.record_vs_class.top.wins, 0);
}

#[test]
fn test_threshold_flags_only_change_at_the_boundary() {
    init_test_env();
    let config = RankingConfig::default();
    let mut store = replay_once(&config);

    let before = calculate_final_rankings(&store, &config, None);
    let before_thresholds = LeagueThresholds::from_store(&store, &config.resume);

    let moved = "Team 7";
    if let Some(team) = store.get_mut(moved) {
        team.rating += 40.0;
    }

    let after = calculate_final_rankings(&store, &config, None);
    let after_thresholds = LeagueThresholds::from_store(&store, &config.resume);

    let between = |r: f64, a: f64, b: f64| r >= a.min(b) && r <= a.max(b);

    for team in &before.teams {
        let updated = after.team(&team.team).unwrap();

        for (old, new) in team.wins.iter().zip(&updated.wins) {
            if old.is_quality_win != new.is_quality_win {
                assert!(
                    old.opponent == moved
                        || between(old.opponent_rating, before_thresholds.quality_win, after_thresholds.quality_win)
                );
            }
        }

        for (old, new) in team.losses.iter().zip(&updated.losses) {
            if old.is_bad_loss != new.is_bad_loss {
                assert!(
                    old.opponent == moved
                        || between(old.opponent_rating, before_thresholds.bad_loss, after_thresholds.bad_loss)
                );
            }
            if old.is_quality_loss != new.is_quality_loss {
                assert!(
                    old.opponent == moved
                        || between(old.opponent_rating, before_thresholds.quality_loss, after_thresholds.quality_loss)
                );
            }
        }
    }
}

#[test]
fn test_second_pass_uses_first_pass_ratings() {
    init_test_env();

    let single = rank(RankingConfig {
        passes: 1,
        ..RankingConfig::default()
    });
    let double = rank(RankingConfig::default());

    let juggernaut = |r: &SeasonRankings| r.team("Juggernaut").map(|t| t.rating).unwrap_or_default();
    assert_ne!(juggernaut(&single), juggernaut(&double));
}

#[test]
fn test_history_priors_lift_last_seasons_winner() {
    init_test_env();
    let config = RankingConfig::default();

    let model = RankingModel::new(config.clone(), Priors::new());
    let priors = model.run_history(&[tiered_season()]);
    assert!(priors["Juggernaut"] > priors["Minnow"]);

    let season = generate_season(12, 1);
    let without = RankingModel::new(config.clone(), Priors::new()).run(&season);
    let renamed_priors = Priors::from([("Team 0".to_string(), priors["Juggernaut"])]);
    let with = RankingModel::new(config, renamed_priors).run(&season);

    let team_0 = |r: &SeasonRankings| r.team("Team 0").map(|t| t.rating).unwrap_or_default();
    assert_ne!(team_0(&without), team_0(&with));
}
