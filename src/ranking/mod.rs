//! Hybrid and cross-entity similarity ranking.
//!
//! [`EntityRanker`] scores candidate entities against a query embedding,
//! filters by per-kind thresholds, and merges per-kind groups into one
//! presentation-ready list. [`SearchBackend`] abstracts where the candidates
//! come from.

pub mod backend;
pub mod config;
pub mod entity;
mod error;
pub mod ranker;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use backend::SearchBackend;
pub use config::RankerConfig;
pub use entity::{EntityKind, EntityRecord};
pub use error::RankingError;
pub use ranker::{EntityRanker, merge_ranked};
pub use types::RankedResult;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockSearchBackend;
