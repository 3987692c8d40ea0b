//! Lodestone library crate (used by the server binary and integration tests).
//!
//! # Public API Surface
//!
//! The exports are organized by module:
//!
//! ## Core Types (Stable)
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`MultiTierEmbedder`] - Concurrent fan-out across both embedding tiers
//! - [`TierClient`], [`TierConfig`] - One tier's caching HTTP client
//! - [`EntityRanker`], [`SearchBackend`] - Cross-entity search and hybrid ranking
//!
//! ## Embedding & Scoring
//! - [`EmbeddingVector`], [`MultiTierEmbedding`] - Tier-tagged vectors carrying
//!   degraded flags
//! - [`VectorCache`], [`VectorCacheHandle`] - Bounded in-memory embedding cache
//! - [`cosine_similarity`], [`weighted_composite`], [`interpret`] - Scoring
//!   primitives
//!
//! ## Gateway
//! - [`create_router`], [`HandlerState`] - Axum router over the `/v2` routes
//!
//! ## Utilities
//! - Hashing functions for embedding cache keys and deterministic fallback
//!   vectors
//!
//! ## Constants
//! Tier dimensions, weight pairs, and interpretation thresholds are exported so
//! callers combine scores the same way the crate does internally.
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod gateway;
pub mod hashing;
pub mod ranking;
pub mod scoring;

pub use config::{Config, ConfigError};

#[cfg(any(test, feature = "mock"))]
pub use embedding::MockTransport;
pub use embedding::{
    EmbedBatchReply, EmbedReply, EmbeddingError, EmbeddingResult, EmbeddingVector, FallbackPolicy,
    HealthReply, HttpTransport, MultiTierBatch, MultiTierEmbedder, MultiTierEmbedding, TierBatch,
    TierClient, TierConfig, TierHealth, TierId, TierSelect, TierStatus, TierTransport,
    TransportError, UsageCounters, UsagePrefix, VectorCache, VectorCacheHandle,
};

pub use gateway::{
    GatewayError, HandlerState, LODESTONE_STATUS_ERROR, LODESTONE_STATUS_HEADER, LodestoneStatus,
    create_router,
};

pub use hashing::{hash_embedding_key, keyed_unit_floats};

#[cfg(any(test, feature = "mock"))]
pub use ranking::MockSearchBackend;
pub use ranking::{
    EntityKind, EntityRanker, EntityRecord, RankedResult, RankerConfig, RankingError,
    SearchBackend, merge_ranked,
};

pub use scoring::{
    Interpretation, ScoreFormula, ScoringError, SimilarityScore, TextComparison, TierSimilarity,
    compare_multi_tier, compare_single_tier, cosine_similarity, interpret, weighted_composite,
};
