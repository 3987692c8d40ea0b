//! Client for one embedding tier: caching, validation, and fallback.
//!
//! Transport failures never surface to callers. A failed or malformed reply
//! becomes a degraded fallback vector of the tier's declared dimension, so a
//! backend outage degrades result quality instead of failing requests.
//! Validation failures (empty text, oversized batch) are caller errors and do
//! surface.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::constants::{FALLBACK_NOISE_AMPLITUDE, MAX_BATCH_SIZE};
use crate::embedding::cache::VectorCacheHandle;
use crate::embedding::config::{FallbackPolicy, TierConfig};
use crate::embedding::error::{EmbeddingError, EmbeddingResult};
use crate::embedding::transport::{HttpTransport, TierTransport};
use crate::embedding::vector::{EmbeddingVector, TierId, UsagePrefix};
use crate::hashing::{hash_embedding_key, keyed_unit_floats};

/// Result of one batch request against a single tier.
#[derive(Debug, Clone, PartialEq)]
pub struct TierBatch {
    /// One vector per input text, in input order.
    pub vectors: Vec<EmbeddingVector>,
    /// Tokens the backend reported for this call; 0 when the tier does not
    /// count tokens or when every vector came from cache or fallback.
    pub total_tokens: u64,
}

/// One tier's embedding client.
pub struct TierClient {
    config: TierConfig,
    transport: Arc<dyn TierTransport>,
    cache: VectorCacheHandle,
}

impl TierClient {
    /// Creates a client over an explicit transport.
    pub fn new(
        config: TierConfig,
        transport: Arc<dyn TierTransport>,
        cache: VectorCacheHandle,
    ) -> EmbeddingResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            transport,
            cache,
        })
    }

    /// Creates a client backed by an HTTP transport.
    pub fn from_config(config: TierConfig, cache: VectorCacheHandle) -> EmbeddingResult<Self> {
        let transport: Arc<dyn TierTransport> = Arc::new(HttpTransport::from_config(&config));
        Self::new(config, transport, cache)
    }

    #[inline]
    pub fn tier(&self) -> TierId {
        self.config.tier
    }

    #[inline]
    pub fn config(&self) -> &TierConfig {
        &self.config
    }

    /// Embeds one text, consulting the cache first.
    #[instrument(skip(self, text), fields(tier = %self.config.tier, text_len = text.len()))]
    pub async fn embed(
        &self,
        text: &str,
        prefix: Option<UsagePrefix>,
    ) -> EmbeddingResult<EmbeddingVector> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyText);
        }

        let key = self.cache_key(text, prefix);
        if let Some(hit) = self.cache.lookup(&key) {
            debug!(tier = %self.config.tier, "embedding cache hit");
            return Ok(hit);
        }

        match self.transport.embed(text, prefix).await {
            Ok(reply) => Ok(self.accept_values(&key, reply.embedding)),
            Err(err) => {
                warn!(
                    tier = %self.config.tier,
                    error = %err,
                    "embed failed, substituting fallback vector"
                );
                Ok(self.fallback_vector(&key))
            }
        }
    }

    /// Embeds a batch of texts, preserving input order.
    ///
    /// Cached texts are served locally; only the misses go on the wire. If
    /// the backend call fails, every miss gets a fallback vector while the
    /// cached hits stay genuine.
    #[instrument(skip(self, texts), fields(tier = %self.config.tier, batch_len = texts.len()))]
    pub async fn embed_batch(
        &self,
        texts: &[String],
        prefix: Option<UsagePrefix>,
    ) -> EmbeddingResult<TierBatch> {
        if texts.len() > MAX_BATCH_SIZE {
            return Err(EmbeddingError::BatchSizeExceeded {
                len: texts.len(),
                max: MAX_BATCH_SIZE,
            });
        }
        if texts.iter().any(|text| text.trim().is_empty()) {
            return Err(EmbeddingError::EmptyText);
        }

        let keys: Vec<[u8; 32]> = texts
            .iter()
            .map(|text| self.cache_key(text, prefix))
            .collect();
        let mut slots: Vec<Option<EmbeddingVector>> =
            keys.iter().map(|key| self.cache.lookup(key)).collect();

        let missing: Vec<usize> = slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.is_none().then_some(i))
            .collect();

        let mut total_tokens = 0u64;

        if !missing.is_empty() {
            let wire_texts: Vec<String> = missing.iter().map(|&i| texts[i].clone()).collect();

            match self.transport.embed_batch(&wire_texts, prefix).await {
                Ok(reply) if reply.embeddings.len() == wire_texts.len() => {
                    total_tokens = reply.total_tokens.unwrap_or(0);
                    for (&i, values) in missing.iter().zip(reply.embeddings) {
                        slots[i] = Some(self.accept_values(&keys[i], values));
                    }
                }
                Ok(reply) => {
                    warn!(
                        tier = %self.config.tier,
                        expected = wire_texts.len(),
                        actual = reply.embeddings.len(),
                        "batch reply length mismatch, substituting fallback vectors"
                    );
                    for &i in &missing {
                        slots[i] = Some(self.fallback_vector(&keys[i]));
                    }
                }
                Err(err) => {
                    warn!(
                        tier = %self.config.tier,
                        error = %err,
                        "batch embed failed, substituting fallback vectors"
                    );
                    for &i in &missing {
                        slots[i] = Some(self.fallback_vector(&keys[i]));
                    }
                }
            }
        }

        let vectors = slots.into_iter().flatten().collect();
        Ok(TierBatch {
            vectors,
            total_tokens,
        })
    }

    /// Probes the backend. Unreachable counts as unhealthy, never an error.
    pub async fn healthy(&self) -> bool {
        match self.transport.health().await {
            Ok(reply) => {
                let healthy = reply.is_healthy();
                if !healthy {
                    debug!(
                        tier = %self.config.tier,
                        status = %reply.status,
                        "tier reports unhealthy status"
                    );
                }
                healthy
            }
            Err(err) => {
                debug!(tier = %self.config.tier, error = %err, "tier health probe failed");
                false
            }
        }
    }

    /// Validates dimension, caches on success, falls back otherwise.
    fn accept_values(&self, key: &[u8; 32], values: Vec<f32>) -> EmbeddingVector {
        if values.len() != self.config.dimension {
            warn!(
                tier = %self.config.tier,
                expected = self.config.dimension,
                actual = values.len(),
                "reply dimension mismatch, substituting fallback vector"
            );
            return self.fallback_vector(key);
        }

        let vector = EmbeddingVector::genuine(self.config.tier, values);
        self.cache.insert(*key, vector.clone());
        vector
    }

    /// Synthesizes a degraded stand-in of the declared dimension. Never
    /// cached: the next request for the same text hits the backend again.
    fn fallback_vector(&self, key: &[u8; 32]) -> EmbeddingVector {
        let values = match self.config.fallback_policy {
            FallbackPolicy::Zero => vec![0.0; self.config.dimension],
            FallbackPolicy::Noise => keyed_unit_floats(key, self.config.dimension)
                .into_iter()
                .map(|x| x * FALLBACK_NOISE_AMPLITUDE)
                .collect(),
        };
        EmbeddingVector::fallback(self.config.tier, values)
    }

    /// Cache key for one request. Symmetric tiers embed queries and passages
    /// identically, so their keys ignore the prefix.
    fn cache_key(&self, text: &str, prefix: Option<UsagePrefix>) -> [u8; 32] {
        let effective = if self.config.asymmetric { prefix } else { None };
        hash_embedding_key(
            self.config.tier.as_str(),
            effective.map(|p| p.as_str()),
            text,
        )
    }
}

impl std::fmt::Debug for TierClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TierClient")
            .field("tier", &self.config.tier)
            .field("base_url", &self.config.base_url)
            .finish()
    }
}
