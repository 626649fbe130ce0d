use std::collections::HashMap;

use indexmap::IndexMap;

use crate::model::structures::{conference_class::ConferenceClass, team_state::TeamState};

/// Caller-owned set of team states for one convergence pass.
///
/// Teams are kept in order of first appearance, which is also the tie-break
/// order of the final ranking.
#[derive(Debug, Clone, Default)]
pub struct TeamStore {
    teams: IndexMap<String, TeamState>
}

impl TeamStore {
    pub fn new() -> TeamStore {
        TeamStore { teams: IndexMap::new() }
    }

    /// Returns the team, creating it with `seed(class)` as its rating the first
    /// time it is seen. A team first seen without a conference picks up the
    /// conference (and class) from the first game that supplies one; its rating
    /// is left alone.
    pub fn get_or_insert(
        &mut self,
        name: &str,
        conference: Option<&str>,
        class: ConferenceClass,
        seed: impl FnOnce(ConferenceClass) -> f64
    ) -> &mut TeamState {
        if !self.teams.contains_key(name) {
            let team = TeamState::new(name, conference.map(str::to_string), class, seed(class));
            self.teams.insert(name.to_string(), team);
        }

        let team = &mut self.teams[name];
        if team.conference.is_none() {
            if let Some(c) = conference {
                team.conference = Some(c.to_string());
                team.conference_class = class;
            }
        }

        team
    }

    pub fn get(&self, name: &str) -> Option<&TeamState> {
        self.teams.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut TeamState> {
        self.teams.get_mut(name)
    }

    pub fn rating(&self, name: &str) -> Option<f64> {
        self.teams.get(name).map(|t| t.rating)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TeamState> {
        self.teams.values()
    }

    pub fn ratings(&self) -> Vec<f64> {
        self.teams.values().map(|t| t.rating).collect()
    }

    /// Team -> current rating, used as the next pass's reference.
    pub fn rating_snapshot(&self) -> HashMap<String, f64> {
        self.teams.iter().map(|(name, t)| (name.clone(), t.rating)).collect()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}
