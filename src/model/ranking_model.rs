use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    model::{
        aggregator::{calculate_final_rankings, calculate_priors, normalize_scores},
        conference_quality::conference_std_devs,
        config::RankingConfig,
        rating_update::RatingUpdater,
        structures::{game::Game, ranking_result::SeasonRankings, Priors, ReferenceRatings},
        team_store::TeamStore
    },
    utils::progress_utils::progress_bar
};

/// Output of a single replay of the season.
struct PassResult {
    rankings: SeasonRankings,
    end_ratings: ReferenceRatings,
    std_devs: HashMap<String, f64>
}

pub struct RankingModel {
    pub config: RankingConfig,
    pub priors: Priors
}

impl RankingModel {
    pub fn new(config: RankingConfig, priors: Priors) -> RankingModel {
        RankingModel { config, priors }
    }

    /// # Season ranking
    ///
    /// Replays the season `passes` times. Every pass starts from an empty
    /// [`TeamStore`]; only the previous pass's end ratings (as the expected-score
    /// reference) and its conference spreads (as the chaos-tax input) carry over.
    ///
    /// Games are ordered by week with a stable sort, so games within a week keep
    /// their feed order. The last pass also records a rating snapshot after every
    /// week, and its rankings are normalized.
    pub fn run(&self, games: &[Game]) -> SeasonRankings {
        if games.is_empty() {
            info!("No games to rank");
            return SeasonRankings::default();
        }

        let mut ordered = games.iter().collect::<Vec<_>>();
        ordered.sort_by_key(|g| g.week);

        let passes = self.config.passes.max(1);
        let mut reference: Option<ReferenceRatings> = None;
        let mut std_devs: Option<HashMap<String, f64>> = None;
        let mut weekly_ratings = BTreeMap::new();
        let mut rankings = SeasonRankings::default();

        for pass in 1..=passes {
            info!(pass, passes, games = ordered.len(), "Starting ranking pass");

            let snapshots = if pass == passes {
                Some(&mut weekly_ratings)
            } else {
                None
            };
            let result = self.run_pass(&ordered, reference.as_ref(), std_devs.as_ref(), snapshots);

            info!(pass, teams = result.rankings.teams.len(), "Finished ranking pass");

            rankings = result.rankings;
            reference = Some(result.end_ratings);
            std_devs = Some(result.std_devs);
        }

        normalize_scores(&mut rankings);
        rankings.weekly_ratings = weekly_ratings;

        rankings
    }

    /// Ranks previous seasons (most recent first) without priors and blends their
    /// final scores into priors for this model's season. Seasons are independent,
    /// so they are ranked in parallel.
    pub fn run_history(&self, seasons: &[Vec<Game>]) -> Priors {
        if seasons.is_empty() {
            return Priors::new();
        }

        let used = &seasons[..seasons.len().min(self.config.prior_weights.len())];
        if used.len() < seasons.len() {
            debug!(
                ignored = seasons.len() - used.len(),
                "More history seasons than prior weights"
            );
        }

        let history_model = RankingModel::new(self.config.clone(), Priors::new());
        let history = used
            .par_iter()
            .map(|season| history_model.run(season))
            .collect::<Vec<_>>();

        info!(seasons = history.len(), "Computed history rankings");

        calculate_priors(&history, &self.config.prior_weights)
    }

    fn run_pass(
        &self,
        games: &[&Game],
        reference: Option<&ReferenceRatings>,
        prior_pass_std_devs: Option<&HashMap<String, f64>>,
        mut weekly_ratings: Option<&mut BTreeMap<u32, IndexMap<String, f64>>>
    ) -> PassResult {
        let updater = RatingUpdater::new(&self.config, &self.priors, reference);
        let mut store = TeamStore::new();
        let bar = progress_bar(games.len() as u64, "Replaying games".to_string());

        for (i, game) in games.iter().enumerate() {
            updater.apply(game, &mut store);

            let week_finished = games.get(i + 1).map_or(true, |next| next.week != game.week);
            if week_finished {
                if let Some(weekly) = weekly_ratings.as_deref_mut() {
                    weekly.insert(game.week, store.iter().map(|t| (t.name.clone(), t.rating)).collect());
                }
            }

            if let Some(bar) = &bar {
                bar.inc(1);
            }
        }

        if let Some(bar) = &bar {
            bar.finish_and_clear();
        }

        // Statistics come from the frozen end-of-pass snapshot
        let rankings = calculate_final_rankings(&store, &self.config, prior_pass_std_devs);

        PassResult {
            rankings,
            end_ratings: store.rating_snapshot(),
            std_devs: conference_std_devs(&store)
        }
    }
}
