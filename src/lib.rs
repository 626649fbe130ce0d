pub mod args;
pub mod error;
pub mod feed;
pub mod model;
pub mod utils;
