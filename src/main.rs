use std::{
    io::{stderr, IsTerminal},
    path::Path,
    process::ExitCode
};

use cfb_ranker::{
    args::Args,
    error::Result,
    feed::{filter_games, games_through_week, load_games, validate_games, write_rankings},
    model::{
        config::RankingConfig,
        ranking_model::RankingModel,
        structures::{game::Game, ranking_result::SeasonRankings, Priors}
    }
};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log_level))
        .with_writer(stderr)
        .with_ansi(stderr().is_terminal())
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    info!(
        passes = config.passes,
        prior_strength = config.prior_strength(),
        "Loaded ranking configuration"
    );

    let priors = if args.history.is_empty() {
        Priors::new()
    } else {
        let seasons = args
            .history
            .iter()
            .map(|path| load_season(path, args.exclude_bottom_tier))
            .collect::<Result<Vec<_>>>()?;

        RankingModel::new(config.clone(), Priors::new()).run_history(&seasons)
    };

    let games = games_through_week(load_season(&args.games, args.exclude_bottom_tier)?, args.through_week);
    let rankings = RankingModel::new(config, priors).run(&games);

    if rankings.is_empty() {
        info!("No games to rank");
        return Ok(());
    }

    print_teams(&rankings, args.top, args.all_divisions);
    print_conferences(&rankings);

    if let Some(path) = &args.output {
        write_rankings(path, &rankings)?;
    }

    Ok(())
}

/// File (or defaults), then command-line overrides. When neither fixes a prior
/// strength, it fades with the week being ranked.
fn load_config(args: &Args) -> Result<RankingConfig> {
    let mut config = match &args.config {
        Some(path) => RankingConfig::from_file(path)?,
        None => RankingConfig::default()
    };

    if let Some(passes) = args.passes {
        config.passes = passes;
    }
    if let Some(strength) = args.prior_strength {
        config.prior_strength = Some(strength);
    }
    let config = config.or_dynamic_prior_strength(args.through_week);

    config.validate()?;
    Ok(config)
}

fn load_season(path: &Path, exclude_bottom_tier: bool) -> Result<Vec<Game>> {
    Ok(filter_games(validate_games(load_games(path)?), exclude_bottom_tier))
}

/// Ranks stay those of the full table, so filtering leaves gaps.
fn print_teams(rankings: &SeasonRankings, top: usize, all_divisions: bool) {
    println!(
        "{:>4}  {:<28} {:<20} {:>8} {:>8} {:>8} {:>8} {:>6}",
        "Rank", "Team", "Conference", "Record", "Rating", "Conf", "Resume", "Score"
    );

    let shown = rankings
        .teams
        .iter()
        .filter(|t| all_divisions || t.conference_class.is_major())
        .take(top);

    for team in shown {
        let record = &team.record;
        let record = if record.ties > 0 {
            format!("{}-{}-{}", record.overall.wins, record.overall.losses, record.ties)
        } else {
            format!("{}-{}", record.overall.wins, record.overall.losses)
        };

        println!(
            "{:>4}  {:<28} {:<20} {:>8} {:>8.1} {:>8.1} {:>8.1} {:>6.1}",
            team.rank,
            team.team,
            team.conference.as_deref().unwrap_or("-"),
            record,
            team.rating,
            team.conference_quality,
            team.resume_score,
            team.normalized_score
        );
    }
}

fn print_conferences(rankings: &SeasonRankings) {
    println!();
    println!(
        "{:>4}  {:<20} {:<10} {:>6} {:>9}",
        "Rank", "Conference", "Class", "Teams", "Quality"
    );

    for conference in &rankings.conferences {
        println!(
            "{:>4}  {:<20} {:<10} {:>6} {:>9.1}",
            conference.rank,
            conference.conference,
            conference.conference_class.to_string(),
            conference.team_count,
            conference.quality
        );
    }
}
