//! The rating engine. Everything here is synchronous and free of I/O; a season is
//! ranked by replaying its games into a fresh [`team_store::TeamStore`] per pass.

pub mod aggregator;
pub mod classification;
pub mod conference_quality;
pub mod config;
pub mod constants;
pub mod ranking_model;
pub mod rating_update;
pub mod resume;
pub mod statistics;
pub mod structures;
pub mod team_store;
