use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoringError {
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("{scores} scores cannot combine with {weights} weights")]
    WeightCountMismatch { scores: usize, weights: usize },
}
