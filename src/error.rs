use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RankingError {
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error
    },

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String)
}

pub type Result<T> = std::result::Result<T, RankingError>;
