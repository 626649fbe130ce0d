use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output}
};

use cfb_ranker::model::structures::ranking_result::SeasonRankings;
use tempfile::TempDir;

use crate::common::{init_test_env, tiered_season};

fn binary() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_cfb-ranker"));
    command
        .env_remove("GAMES_FILE")
        .env_remove("RANKING_CONFIG")
        .env("RUST_LOG", "error");
    command
}

/// Writes the tiered season feed into `dir`
fn write_season(dir: &Path) -> PathBuf {
    let games = dir.join("games.json");
    fs::write(&games, serde_json::to_string(&tiered_season()).unwrap()).unwrap();
    games
}

fn run_with(games: &Path, args: &[&str]) -> Output {
    binary()
        .arg("--games")
        .arg(games)
        .args(args)
        .output()
        .expect("Failed to execute cfb-ranker")
}

/// The binary must exit with an error code when the game feed is missing
#[test]
fn test_exits_on_missing_games_file() {
    init_test_env();

    let output = binary()
        .args(["--games", "/nonexistent/cfb-ranker/games.json"])
        .output()
        .expect("Failed to execute cfb-ranker");

    assert!(!output.status.success(), "Process should fail without a game feed");
    assert!(String::from_utf8_lossy(&output.stderr).contains("games.json"));
}

#[test]
fn test_exits_on_invalid_config() {
    init_test_env();

    let dir = TempDir::new().unwrap();
    let games = write_season(dir.path());
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"passes": 0}"#).unwrap();

    let output = run_with(&games, &["--config", config.to_str().unwrap()]);

    assert!(!output.status.success(), "Process should reject zero passes");
}

#[test]
fn test_ranks_and_writes_output() {
    init_test_env();

    let dir = TempDir::new().unwrap();
    let games = write_season(dir.path());
    let output_path = dir.path().join("rankings.json");

    let output = run_with(&games, &["--output", output_path.to_str().unwrap(), "--top", "5"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Juggernaut"));
    assert!(!stdout.contains("Minnow"));

    let rankings: SeasonRankings = serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(rankings.teams[0].team, "Juggernaut");
    assert!(!rankings.weekly_ratings.is_empty());

    drop(dir);
    assert!(!output_path.exists(), "Written rankings should go with the temp dir");
}

#[test]
fn test_exclude_bottom_tier() {
    init_test_env();

    let dir = TempDir::new().unwrap();
    let games = write_season(dir.path());
    let output_path = dir.path().join("rankings.json");

    let output = run_with(&games, &["--output", output_path.to_str().unwrap(), "--exclude-bottom-tier"]);

    assert!(output.status.success());

    let rankings: SeasonRankings = serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    assert!(rankings.team("Minnow").is_none());
    assert!(rankings.team("Montana").is_none());
    assert!(rankings.conference("Big Sky").is_none());
}

/// A config file without `prior_strength` still gets the week-dependent default
#[test]
fn test_config_without_prior_strength_fades_with_week() {
    init_test_env();

    let dir = TempDir::new().unwrap();
    let games = write_season(dir.path());
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"passes": 2}"#).unwrap();

    let output = run_with(
        &games,
        &["--config", config.to_str().unwrap(), "--through-week", "1", "--log-level", "info"]
    );

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("prior_strength=0.1866"), "{stderr}");
    assert!(!stderr.contains("prior_strength=0.15"), "{stderr}");
}

#[test]
fn test_config_prior_strength_is_kept() {
    init_test_env();

    let dir = TempDir::new().unwrap();
    let games = write_season(dir.path());
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"prior_strength": 0.15}"#).unwrap();

    let output = run_with(
        &games,
        &["--config", config.to_str().unwrap(), "--through-week", "1", "--log-level", "info"]
    );

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stderr).contains("prior_strength=0.15"));
}

#[test]
fn test_table_lists_major_divisions_by_default() {
    init_test_env();

    let dir = TempDir::new().unwrap();
    let games = write_season(dir.path());

    let output = run_with(&games, &["--top", "20"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Juggernaut"));
    assert!(stdout.contains("Army"));
    assert!(!stdout.contains("Minnow"));

    let output = run_with(&games, &["--top", "20", "--all-divisions"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Minnow"));
    assert!(stdout.contains("Montana"));
}
