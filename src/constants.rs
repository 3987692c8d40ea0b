//! Cross-cutting, shared constants.
//!
//! Weight pairs and interpretation thresholds are fixed policy, not tunables:
//! every call site that combines scores names the pair it uses, and the pairs
//! sum to 1 so composites stay in the same range as their inputs.

/// Vector dimension of the fast tier (asymmetric query/passage space).
pub const FAST_TIER_DIM: usize = 1024;

/// Vector dimension of the accurate tier (symmetric space).
pub const ACCURATE_TIER_DIM: usize = 1536;

/// Maximum number of texts accepted by a single batch request.
pub const MAX_BATCH_SIZE: usize = 100;

/// Weight of a light (fast, low-dimensional) field signal.
pub const LIGHT_FIELD_WEIGHT: f32 = 0.3;
/// Weight of a heavy (slow, high-fidelity) field signal.
pub const HEAVY_FIELD_WEIGHT: f32 = 0.7;

/// Weight of the fast tier in a combined two-tier similarity.
pub const FAST_TIER_WEIGHT: f32 = 0.4;
/// Weight of the accurate tier in a combined two-tier similarity.
pub const ACCURATE_TIER_WEIGHT: f32 = 0.6;

/// Weight of the semantic signal in a hybrid score.
pub const SEMANTIC_WEIGHT: f32 = 0.7;
/// Weight of the lexical signal in a hybrid score.
pub const LEXICAL_WEIGHT: f32 = 0.3;

/// Scores strictly above this read as "very similar".
pub const VERY_SIMILAR_THRESHOLD: f32 = 0.9;
/// Scores strictly above this read as "similar".
pub const SIMILAR_THRESHOLD: f32 = 0.7;
/// Scores strictly above this read as "somewhat related".
pub const SOMEWHAT_RELATED_THRESHOLD: f32 = 0.5;

/// Default per-kind similarity cutoff for cross-entity search.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.7;

/// Hybrid results must clear this semantic floor or carry any lexical signal.
pub const HYBRID_SEMANTIC_FLOOR: f32 = 0.5;

/// Default cap on a merged result list.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Default capacity of the in-memory embedding cache.
pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// Default per-request timeout for tier HTTP calls, in milliseconds.
pub const DEFAULT_TIER_TIMEOUT_MS: u64 = 30_000;

/// Magnitude ceiling for noise-policy fallback vectors.
pub const FALLBACK_NOISE_AMPLITUDE: f32 = 0.1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_pairs_sum_to_one() {
        assert!((LIGHT_FIELD_WEIGHT + HEAVY_FIELD_WEIGHT - 1.0).abs() < f32::EPSILON);
        assert!((FAST_TIER_WEIGHT + ACCURATE_TIER_WEIGHT - 1.0).abs() < f32::EPSILON);
        assert!((SEMANTIC_WEIGHT + LEXICAL_WEIGHT - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_interpretation_thresholds_are_ordered() {
        assert!(VERY_SIMILAR_THRESHOLD > SIMILAR_THRESHOLD);
        assert!(SIMILAR_THRESHOLD > SOMEWHAT_RELATED_THRESHOLD);
        assert!(SOMEWHAT_RELATED_THRESHOLD > 0.0);
    }

    #[test]
    fn test_tier_dimensions_differ() {
        // Comparing across tiers must be impossible by accident.
        assert_ne!(FAST_TIER_DIM, ACCURATE_TIER_DIM);
    }

    #[test]
    fn test_batch_ceiling_is_positive() {
        assert!(MAX_BATCH_SIZE > 0);
    }
}
