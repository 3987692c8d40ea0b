use thiserror::Error;

use crate::scoring::ScoringError;

pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

/// Input-contract violations surfaced to callers.
///
/// Backend flakiness never appears here: network-level failures are absorbed
/// into degraded fallback vectors (see [`TransportError`] for the absorbed
/// taxonomy). The only errors that escape are ones the caller can fix.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Text was empty or whitespace-only.
    #[error("text must not be empty")]
    EmptyText,

    /// Batch request exceeded the fixed ceiling. Rejected before any network call.
    #[error("batch of {len} texts exceeds the limit of {max}")]
    BatchSizeExceeded { len: usize, max: usize },

    /// Tier configuration failed validation.
    #[error("invalid tier configuration: {reason}")]
    Config { reason: String },

    /// Similarity computation over produced embeddings failed.
    #[error("similarity scoring failed: {0}")]
    Scoring(#[from] ScoringError),
}

/// Failure modes of one outbound tier call.
///
/// These never cross the tier client boundary: each one is logged and replaced
/// by a fallback vector so downstream ranking stays total.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("tier returned status {status}")]
    Status { status: u16 },

    #[error("malformed reply: {reason}")]
    MalformedReply { reason: String },

    #[error("backend unavailable: {reason}")]
    Unavailable { reason: String },
}
