use thiserror::Error;

use crate::scoring::ScoringError;

#[derive(Debug, Error)]
pub enum RankingError {
    #[error("similarity scoring failed: {0}")]
    Scoring(#[from] ScoringError),

    #[error("invalid ranker configuration: {reason}")]
    Config { reason: String },

    #[error("search backend failed: {reason}")]
    Backend { reason: String },
}
