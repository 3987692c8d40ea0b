//! Tier identifiers and embedding result types.

use crate::constants::{ACCURATE_TIER_DIM, FAST_TIER_DIM};

/// One of the configured embedding tiers.
///
/// The set is closed: adding a tier means touching every exhaustive match,
/// which is the point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TierId {
    /// Low-latency tier with an asymmetric query/passage embedding space.
    Fast,
    /// Higher-fidelity tier with a symmetric embedding space.
    Accurate,
}

impl TierId {
    pub const ALL: [TierId; 2] = [TierId::Fast, TierId::Accurate];

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            TierId::Fast => "fast",
            TierId::Accurate => "accurate",
        }
    }

    /// Returns the dimension this tier produces by default.
    #[inline]
    pub fn default_dimension(&self) -> usize {
        match self {
            TierId::Fast => FAST_TIER_DIM,
            TierId::Accurate => ACCURATE_TIER_DIM,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "fast" => Some(TierId::Fast),
            "accurate" => Some(TierId::Accurate),
            _ => None,
        }
    }
}

impl std::fmt::Display for TierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which tiers a request should fan out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TierSelect {
    Fast,
    Accurate,
    #[default]
    Both,
}

impl TierSelect {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "fast" => Some(TierSelect::Fast),
            "accurate" => Some(TierSelect::Accurate),
            "both" => Some(TierSelect::Both),
            _ => None,
        }
    }

    #[inline]
    pub fn includes(&self, tier: TierId) -> bool {
        matches!(
            (self, tier),
            (TierSelect::Both, _)
                | (TierSelect::Fast, TierId::Fast)
                | (TierSelect::Accurate, TierId::Accurate)
        )
    }
}

/// Disambiguates asymmetric embedding use: a search query and a stored passage
/// embed differently on tiers whose space is asymmetric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsagePrefix {
    Query,
    Passage,
}

impl UsagePrefix {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            UsagePrefix::Query => "query",
            UsagePrefix::Passage => "passage",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "query" => Some(UsagePrefix::Query),
            "passage" => Some(UsagePrefix::Passage),
            _ => None,
        }
    }
}

impl std::fmt::Display for UsagePrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One embedding, tagged with its producing tier.
///
/// `degraded` is `true` when the values are a synthesized fallback rather than
/// a genuine backend response. Degraded vectors keep the tier's declared
/// dimension so every downstream comparison stays total; with the zero
/// fallback policy they also compare as maximally dissimilar to everything.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingVector {
    tier: TierId,
    values: Vec<f32>,
    degraded: bool,
}

impl EmbeddingVector {
    /// Wraps a genuine backend response.
    #[inline]
    pub fn genuine(tier: TierId, values: Vec<f32>) -> Self {
        Self {
            tier,
            values,
            degraded: false,
        }
    }

    /// Wraps a synthesized fallback.
    #[inline]
    pub fn fallback(tier: TierId, values: Vec<f32>) -> Self {
        Self {
            tier,
            values,
            degraded: true,
        }
    }

    #[inline]
    pub fn tier(&self) -> TierId {
        self.tier
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    #[inline]
    pub fn into_values(self) -> Vec<f32> {
        self.values
    }

    #[inline]
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }
}

/// Composite result of one logical embedding request fanned out to all tiers.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiTierEmbedding {
    pub fast: EmbeddingVector,
    pub accurate: EmbeddingVector,
}

impl MultiTierEmbedding {
    #[inline]
    pub fn get(&self, tier: TierId) -> &EmbeddingVector {
        match tier {
            TierId::Fast => &self.fast,
            TierId::Accurate => &self.accurate,
        }
    }

    /// Returns `true` if any tier's contribution is a fallback.
    #[inline]
    pub fn any_degraded(&self) -> bool {
        self.fast.is_degraded() || self.accurate.is_degraded()
    }
}

/// Aggregate token usage reported by tiers that count tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageCounters {
    pub fast_tokens: u64,
    pub accurate_tokens: u64,
}

impl UsageCounters {
    #[inline]
    pub fn total(&self) -> u64 {
        self.fast_tokens + self.accurate_tokens
    }
}

/// Liveness and identity of one tier, as reported by a health probe.
#[derive(Debug, Clone, PartialEq)]
pub struct TierStatus {
    pub tier: TierId,
    pub healthy: bool,
    pub model: String,
    pub dimension: usize,
}

/// Aggregate health over all configured tiers.
///
/// Partial failure is data, never an error: a probe that cannot reach a tier
/// reports that tier unhealthy and leaves the others untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct TierHealth {
    pub fast: TierStatus,
    pub accurate: TierStatus,
}

impl TierHealth {
    /// `true` iff every tier reports healthy.
    #[inline]
    pub fn fully_operational(&self) -> bool {
        self.fast.healthy && self.accurate.healthy
    }

    #[inline]
    pub fn statuses(&self) -> [&TierStatus; 2] {
        [&self.fast, &self.accurate]
    }
}
