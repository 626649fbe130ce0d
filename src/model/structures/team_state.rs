use serde::{Deserialize, Serialize};

use crate::model::structures::conference_class::ConferenceClass;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WinLoss {
    pub wins: u32,
    pub losses: u32
}

impl WinLoss {
    pub fn record(&mut self, won: bool) {
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
    }
}

/// Win/loss record split by the opponent's conference class.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassRecord {
    pub top: WinLoss,
    pub mid: WinLoss,
    pub bottom: WinLoss
}

impl ClassRecord {
    pub fn get(&self, class: ConferenceClass) -> &WinLoss {
        match class {
            ConferenceClass::Top => &self.top,
            ConferenceClass::Mid => &self.mid,
            ConferenceClass::Bottom => &self.bottom
        }
    }

    pub fn get_mut(&mut self, class: ConferenceClass) -> &mut WinLoss {
        match class {
            ConferenceClass::Top => &mut self.top,
            ConferenceClass::Mid => &mut self.mid,
            ConferenceClass::Bottom => &mut self.bottom
        }
    }

    /// Adds `other` into this record, class by class.
    pub fn absorb(&mut self, other: &ClassRecord) {
        for (mine, theirs) in [
            (&mut self.top, &other.top),
            (&mut self.mid, &other.mid),
            (&mut self.bottom, &other.bottom)
        ] {
            mine.wins += theirs.wins;
            mine.losses += theirs.losses;
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WinEvent {
    pub opponent: String,
    pub was_road: bool,
    pub margin: u32,
    pub notes: Option<String>
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LossEvent {
    pub opponent: String,
    pub was_home: bool,
    pub margin: u32,
    pub notes: Option<String>
}

/// Mutable per-team record for a single convergence pass.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TeamState {
    pub name: String,
    pub rating: f64,
    pub conference: Option<String>,
    pub conference_class: ConferenceClass,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub conference_wins: u32,
    pub conference_losses: u32,
    pub road_wins: u32,
    /// Every decided game, keyed by opponent class
    pub record_vs_class: ClassRecord,
    /// Only games against a different conference
    pub inter_class_record: ClassRecord,
    pub win_events: Vec<WinEvent>,
    pub loss_events: Vec<LossEvent>,
    /// Opponents of decided games, in the order they were played
    pub opponents: Vec<String>
}

impl TeamState {
    pub fn new(name: &str, conference: Option<String>, conference_class: ConferenceClass, rating: f64) -> TeamState {
        TeamState {
            name: name.to_string(),
            rating,
            conference,
            conference_class,
            games_played: 0,
            wins: 0,
            losses: 0,
            ties: 0,
            conference_wins: 0,
            conference_losses: 0,
            road_wins: 0,
            record_vs_class: ClassRecord::default(),
            inter_class_record: ClassRecord::default(),
            win_events: Vec::new(),
            loss_events: Vec::new(),
            opponents: Vec::new()
        }
    }

    pub fn decided_games(&self) -> u32 {
        self.wins + self.losses
    }

    pub fn home_wins(&self) -> u32 {
        self.wins - self.road_wins
    }
}
