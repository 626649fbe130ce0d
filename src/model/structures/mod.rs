use std::collections::HashMap;

pub mod conference_class;
pub mod game;
pub mod ranking_result;
pub mod team_state;

/// Team -> blended rating from previous seasons
pub type Priors = HashMap<String, f64>;

/// Team -> end-of-pass rating from the previous convergence pass
pub type ReferenceRatings = HashMap<String, f64>;
