//! Per-tier connection and fallback settings.

use std::time::Duration;

use crate::constants::{ACCURATE_TIER_DIM, DEFAULT_TIER_TIMEOUT_MS, FAST_TIER_DIM};
use crate::embedding::error::{EmbeddingError, EmbeddingResult};
use crate::embedding::vector::TierId;

/// Default base URL for the fast tier backend.
pub const DEFAULT_FAST_TIER_URL: &str = "http://embeddings:8000";
/// Default model served by the fast tier.
pub const DEFAULT_FAST_TIER_MODEL: &str = "intfloat/e5-large-v2";
/// Default base URL for the accurate tier backend.
pub const DEFAULT_ACCURATE_TIER_URL: &str = "http://embeddings-ada002:8001";
/// Default model served by the accurate tier.
pub const DEFAULT_ACCURATE_TIER_MODEL: &str = "text-embedding-ada-002";

/// What a tier client synthesizes when the backend cannot answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// All-zero vector. Scores 0.0 against everything, so degraded results
    /// sink to the bottom of any ranking.
    #[default]
    Zero,
    /// Small deterministic noise derived from the request key. Keeps repeated
    /// requests for the same text stable while avoiding zero-norm vectors.
    Noise,
}

impl FallbackPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackPolicy::Zero => "zero",
            FallbackPolicy::Noise => "noise",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "zero" => Some(FallbackPolicy::Zero),
            "noise" => Some(FallbackPolicy::Noise),
            _ => None,
        }
    }
}

/// Connection settings for one embedding tier.
#[derive(Debug, Clone, PartialEq)]
pub struct TierConfig {
    pub tier: TierId,
    pub base_url: String,
    pub model: String,
    pub dimension: usize,
    /// Asymmetric tiers embed queries and passages into distinct subspaces
    /// and need a usage prefix on the wire; symmetric tiers take a model name.
    pub asymmetric: bool,
    pub timeout: Duration,
    pub fallback_policy: FallbackPolicy,
}

impl TierConfig {
    /// Defaults for the low-latency tier.
    pub fn fast() -> Self {
        Self {
            tier: TierId::Fast,
            base_url: DEFAULT_FAST_TIER_URL.to_string(),
            model: DEFAULT_FAST_TIER_MODEL.to_string(),
            dimension: FAST_TIER_DIM,
            asymmetric: true,
            timeout: Duration::from_millis(DEFAULT_TIER_TIMEOUT_MS),
            fallback_policy: FallbackPolicy::default(),
        }
    }

    /// Defaults for the high-fidelity tier.
    pub fn accurate() -> Self {
        Self {
            tier: TierId::Accurate,
            base_url: DEFAULT_ACCURATE_TIER_URL.to_string(),
            model: DEFAULT_ACCURATE_TIER_MODEL.to_string(),
            dimension: ACCURATE_TIER_DIM,
            asymmetric: false,
            timeout: Duration::from_millis(DEFAULT_TIER_TIMEOUT_MS),
            fallback_policy: FallbackPolicy::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_timeout_ms(mut self, millis: u64) -> Self {
        self.timeout = Duration::from_millis(millis);
        self
    }

    pub fn with_fallback_policy(mut self, policy: FallbackPolicy) -> Self {
        self.fallback_policy = policy;
        self
    }

    /// Rejects configurations that could never produce a usable client.
    pub fn validate(&self) -> EmbeddingResult<()> {
        if self.dimension == 0 {
            return Err(EmbeddingError::Config {
                reason: format!("{} tier dimension must be non-zero", self.tier),
            });
        }
        if self.base_url.trim().is_empty() {
            return Err(EmbeddingError::Config {
                reason: format!("{} tier base URL must not be empty", self.tier),
            });
        }
        if self.timeout.is_zero() {
            return Err(EmbeddingError::Config {
                reason: format!("{} tier timeout must be non-zero", self.tier),
            });
        }
        Ok(())
    }
}
