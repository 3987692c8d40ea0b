//! Similarity scoring over embedding vectors.
//!
//! Cosine similarity per tier, weighted composites across signals, and a
//! fixed interpretation scale for presenting scores to humans. All weights
//! and band boundaries live in [`crate::constants`].

pub mod error;
pub mod scorer;
pub mod types;


pub use error::ScoringError;
pub use scorer::{
    compare_multi_tier, compare_single_tier, cosine_similarity, interpret, weighted_composite,
};
pub use types::{Interpretation, ScoreFormula, SimilarityScore, TextComparison, TierSimilarity};
