//! Similarity math over embedding vectors.

use crate::constants::{ACCURATE_TIER_WEIGHT, FAST_TIER_WEIGHT};
use crate::embedding::vector::{EmbeddingVector, MultiTierEmbedding, TierId};

use super::error::ScoringError;
use super::types::{Interpretation, TextComparison, TierSimilarity};

/// Cosine similarity between two vectors of equal dimension.
///
/// A zero-norm vector has no direction, so comparisons against it score 0.0
/// instead of erroring. Zero-policy fallback vectors ride on this: they
/// compare as maximally dissimilar to everything.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, ScoringError> {
    if a.len() != b.len() {
        return Err(ScoringError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

/// Weighted sum of scores. Score and weight counts must match.
pub fn weighted_composite(scores: &[f32], weights: &[f32]) -> Result<f32, ScoringError> {
    if scores.len() != weights.len() {
        return Err(ScoringError::WeightCountMismatch {
            scores: scores.len(),
            weights: weights.len(),
        });
    }

    Ok(scores.iter().zip(weights.iter()).map(|(s, w)| s * w).sum())
}

/// Maps a score onto the interpretation scale.
#[inline]
pub fn interpret(score: f32) -> Interpretation {
    Interpretation::from_score(score)
}

/// Scores two vectors from the same tier.
pub fn compare_single_tier(
    a: &EmbeddingVector,
    b: &EmbeddingVector,
) -> Result<TextComparison, ScoringError> {
    let score = cosine_similarity(a.values(), b.values())?;
    let degraded = a.is_degraded() || b.is_degraded();
    let similarity = TierSimilarity {
        tier: a.tier(),
        score,
        degraded,
    };

    let (fast, accurate) = match a.tier() {
        TierId::Fast => (Some(similarity), None),
        TierId::Accurate => (None, Some(similarity)),
    };

    Ok(TextComparison {
        fast,
        accurate,
        combined: None,
        interpretation: interpret(score),
        degraded,
    })
}

/// Scores two multi-tier embeddings per tier and blends the result, with the
/// accurate tier carrying most of the weight.
pub fn compare_multi_tier(
    a: &MultiTierEmbedding,
    b: &MultiTierEmbedding,
) -> Result<TextComparison, ScoringError> {
    let fast_score = cosine_similarity(a.fast.values(), b.fast.values())?;
    let accurate_score = cosine_similarity(a.accurate.values(), b.accurate.values())?;

    let combined = weighted_composite(
        &[fast_score, accurate_score],
        &[FAST_TIER_WEIGHT, ACCURATE_TIER_WEIGHT],
    )?;

    let fast = TierSimilarity {
        tier: TierId::Fast,
        score: fast_score,
        degraded: a.fast.is_degraded() || b.fast.is_degraded(),
    };
    let accurate = TierSimilarity {
        tier: TierId::Accurate,
        score: accurate_score,
        degraded: a.accurate.is_degraded() || b.accurate.is_degraded(),
    };
    let degraded = fast.degraded || accurate.degraded;

    Ok(TextComparison {
        fast: Some(fast),
        accurate: Some(accurate),
        combined: Some(combined),
        interpretation: interpret(combined),
        degraded,
    })
}
