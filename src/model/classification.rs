use std::collections::HashSet;

use lazy_static::lazy_static;

use crate::model::structures::{conference_class::ConferenceClass, game::SeasonType};

/// Pseudo-conference the feed uses for major-division teams without a conference
pub const INDEPENDENTS: &str = "FBS Independents";

const NEUTRAL_SITE_KEYWORDS: [&str; 2] = ["neutral", "kickoff"];
const POSTSEASON_KEYWORDS: [&str; 3] = ["bowl", "playoff", "championship"];
const CHAMPIONSHIP_KEYWORDS: [&str; 1] = ["championship"];

lazy_static! {
    static ref TOP_CONFERENCES: HashSet<&'static str> = HashSet::from(["SEC", "Big Ten", "ACC", "Big 12", "Pac-12"]);
    static ref MID_CONFERENCES: HashSet<&'static str> = HashSet::from([
        "American Athletic",
        "Conference USA",
        "Mid-American",
        "Mountain West",
        "Sun Belt"
    ]);
}

/// Maps a conference name onto its tier. Independents compete at the top tier;
/// unknown or missing conferences are bottom tier.
pub fn classify_conference(conference: Option<&str>) -> ConferenceClass {
    match conference {
        Some(c) if TOP_CONFERENCES.contains(c) || c == INDEPENDENTS => ConferenceClass::Top,
        Some(c) if MID_CONFERENCES.contains(c) => ConferenceClass::Mid,
        _ => ConferenceClass::Bottom
    }
}

/// Teams without a real conference: no conference at all, or the independents
/// pseudo-conference.
pub fn is_independent(conference: Option<&str>) -> bool {
    match conference {
        None => true,
        Some(c) => c == INDEPENDENTS
    }
}

/// What the free-text notes (and season type) say about where and when a game was played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameContext {
    pub neutral_site: bool,
    pub postseason: bool
}

impl GameContext {
    pub fn classify(notes: Option<&str>, season_type: SeasonType) -> GameContext {
        let notes = notes.unwrap_or_default().to_lowercase();

        GameContext {
            neutral_site: contains_any(&notes, &NEUTRAL_SITE_KEYWORDS),
            postseason: season_type == SeasonType::Postseason || contains_any(&notes, &POSTSEASON_KEYWORDS)
        }
    }
}

pub fn is_championship(notes: Option<&str>) -> bool {
    notes.is_some_and(|n| contains_any(&n.to_lowercase(), &CHAMPIONSHIP_KEYWORDS))
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}
