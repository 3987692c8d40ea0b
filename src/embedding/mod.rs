//! Multi-tier embedding generation.
//!
//! - [`tier`] wraps one backend with caching and silent fallback.
//! - [`multitier`] fans requests out across every configured tier.
//! - [`transport`] speaks the embed service HTTP protocol.

pub mod cache;
pub mod config;
mod error;
pub mod multitier;
pub mod tier;
pub mod transport;
pub mod vector;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use cache::{VectorCache, VectorCacheHandle};
pub use config::{
    DEFAULT_ACCURATE_TIER_MODEL, DEFAULT_ACCURATE_TIER_URL, DEFAULT_FAST_TIER_MODEL,
    DEFAULT_FAST_TIER_URL, FallbackPolicy, TierConfig,
};
pub use error::{EmbeddingError, EmbeddingResult, TransportError};
pub use multitier::{MultiTierBatch, MultiTierEmbedder};
pub use tier::{TierBatch, TierClient};
pub use transport::{EmbedBatchReply, EmbedReply, HealthReply, HttpTransport, TierTransport};
pub use vector::{
    EmbeddingVector, MultiTierEmbedding, TierHealth, TierId, TierSelect, TierStatus, UsageCounters,
    UsagePrefix,
};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;
