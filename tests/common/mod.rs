use std::sync::Once;

use cfb_ranker::{model::structures::game::Game, utils::test_utils::generate_game};

static INIT: Once = Once::new();

/// Installs a warn-level subscriber once per test binary
pub fn init_test_env() {
    INIT.call_once(|| {
        std::env::set_var("RUST_LOG", "warn");
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Eight top-tier teams in two conferences, three bottom-tier teams and an
/// independent. "Juggernaut" beats every top-tier team it plays; "Minnow" only
/// plays (and beats) its bottom-tier conference mates.
pub fn tiered_season() -> Vec<Game> {
    let sec = ["Juggernaut", "Georgia", "LSU", "Alabama"];
    let big_ten = ["Ohio State", "Michigan", "Penn State", "Oregon"];
    let big_sky = ["Minnow", "Montana", "Idaho"];

    let mut games = Vec::new();
    let mut week = 1;

    for opponent in sec[1..].iter().chain(big_ten.iter()) {
        let conference = if sec.contains(opponent) { "SEC" } else { "Big Ten" };
        games.push(generate_game(week, ("Juggernaut", "SEC"), 31, (*opponent, conference), 17));
        week += 1;
    }

    for (i, home) in big_ten.iter().enumerate() {
        let away = big_ten[(i + 1) % big_ten.len()];
        games.push(generate_game(1 + i as u32, (*home, "Big Ten"), 24, (away, "Big Ten"), 20));
    }
    for (i, home) in sec[1..].iter().enumerate() {
        games.push(generate_game(2 + i as u32, (*home, "SEC"), 28, ("Montana", "Big Sky"), 14));
    }

    for week in 1..=4 {
        games.push(generate_game(week, ("Minnow", "Big Sky"), 35, ("Idaho", "Big Sky"), 7));
    }
    games.push(generate_game(5, ("Minnow", "Big Sky"), 42, ("Montana", "Big Sky"), 10));

    games.push(generate_game(3, ("Army", "FBS Independents"), 24, ("Idaho", "Big Sky"), 10));
    games.push(generate_game(6, ("Army", "FBS Independents"), 21, ("Montana", "Big Sky"), 13));

    games
}
