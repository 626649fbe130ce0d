use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Clone, Debug)]
#[command(
    display_name = "CFB Ranker",
    long_about = "Ranks college football teams from a season of game results"
)]
pub struct Args {
    /// JSON array of game records for the season being ranked
    #[arg(short, long, env = "GAMES_FILE", help = "Season game feed")]
    pub games: PathBuf,

    /// Previous seasons used as priors, most recent first. Only as many
    /// seasons as there are prior weights are used.
    #[arg(long = "history", help = "Previous season game feed (repeatable)")]
    pub history: Vec<PathBuf>,

    /// JSON ranking configuration. Missing keys take their defaults.
    #[arg(short, long, env = "RANKING_CONFIG", help = "Ranking configuration file")]
    pub config: Option<PathBuf>,

    /// Only games up to and including this week are ranked
    #[arg(short = 'w', long)]
    pub through_week: Option<u32>,

    #[arg(short, long, help = "Number of convergence passes")]
    pub passes: Option<usize>,

    /// Weight of the priors against the tier base ratings. Defaults to a value
    /// that fades out as the season progresses.
    #[arg(long)]
    pub prior_strength: Option<f64>,

    /// Drops every game involving a team outside the major division
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub exclude_bottom_tier: bool,

    #[arg(short, long, default_value_t = 25, help = "Number of teams to print")]
    pub top: usize,

    /// Lists teams from every division in the printed table. By default only
    /// major-division teams are printed; the JSON output always has every team.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub all_divisions: bool,

    #[arg(short, long, help = "Writes the full rankings as JSON")]
    pub output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        env = "RUST_LOG",
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        help = "Sets the logging verbosity"
    )]
    pub log_level: String
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use crate::args::Args;

    #[test]
    fn test_parse_full_command_line() {
        let args = Args::try_parse_from([
            "cfb-ranker",
            "--games",
            "2024.json",
            "--history",
            "2023.json",
            "--history",
            "2022.json",
            "--through-week",
            "9",
            "--passes",
            "3",
            "--exclude-bottom-tier",
            "--top",
            "10",
            "--all-divisions",
            "--log-level",
            "debug"
        ])
        .unwrap();

        assert_eq!(args.games, PathBuf::from("2024.json"));
        assert_eq!(args.history, vec![PathBuf::from("2023.json"), PathBuf::from("2022.json")]);
        assert_eq!(args.through_week, Some(9));
        assert_eq!(args.passes, Some(3));
        assert!(args.exclude_bottom_tier);
        assert_eq!(args.top, 10);
        assert!(args.all_divisions);
        assert_eq!(args.log_level, "debug");
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["cfb-ranker", "--games", "g.json"]).unwrap();

        assert_eq!(args.top, 25);
        assert!(!args.all_divisions);
        assert!(!args.exclude_bottom_tier);
        assert_eq!(args.prior_strength, None);
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let parsed = Args::try_parse_from(["cfb-ranker", "--games", "g.json", "--log-level", "loud"]);
        assert!(parsed.is_err());
    }
}
