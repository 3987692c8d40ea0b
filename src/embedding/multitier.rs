//! Fan-out across every configured tier.
//!
//! Each logical request runs against all tiers concurrently. Because tier
//! clients absorb transport failures into degraded vectors, the join here is
//! effectively settle-all: one slow or dead tier never poisons the other's
//! result.

use tracing::instrument;

use crate::config::Config;
use crate::embedding::cache::VectorCacheHandle;
use crate::embedding::error::{EmbeddingError, EmbeddingResult};
use crate::embedding::tier::{TierBatch, TierClient};
use crate::embedding::vector::{
    EmbeddingVector, MultiTierEmbedding, TierHealth, TierId, TierSelect, TierStatus, UsageCounters,
    UsagePrefix,
};
use crate::scoring::{TextComparison, compare_multi_tier, compare_single_tier};

/// Result of one batch request fanned out to all tiers.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiTierBatch {
    /// One composite embedding per input text, in input order.
    pub embeddings: Vec<MultiTierEmbedding>,
    pub usage: UsageCounters,
}

/// Orchestrates the full tier set behind one interface.
#[derive(Debug)]
pub struct MultiTierEmbedder {
    fast: TierClient,
    accurate: TierClient,
}

impl MultiTierEmbedder {
    /// Creates an orchestrator from two tier clients.
    pub fn new(fast: TierClient, accurate: TierClient) -> EmbeddingResult<Self> {
        if fast.tier() != TierId::Fast {
            return Err(EmbeddingError::Config {
                reason: format!("fast slot holds a {} tier client", fast.tier()),
            });
        }
        if accurate.tier() != TierId::Accurate {
            return Err(EmbeddingError::Config {
                reason: format!("accurate slot holds a {} tier client", accurate.tier()),
            });
        }
        Ok(Self { fast, accurate })
    }

    /// Builds HTTP-backed clients for both tiers over one shared cache.
    pub fn from_config(config: &Config) -> EmbeddingResult<Self> {
        let cache = VectorCacheHandle::with_capacity(config.cache_capacity);
        let fast = TierClient::from_config(config.tier_config(TierId::Fast), cache.clone())?;
        let accurate = TierClient::from_config(config.tier_config(TierId::Accurate), cache)?;
        Self::new(fast, accurate)
    }

    #[inline]
    pub fn client(&self, tier: TierId) -> &TierClient {
        match tier {
            TierId::Fast => &self.fast,
            TierId::Accurate => &self.accurate,
        }
    }

    /// Embeds one text on every tier concurrently.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn embed_multi_tier(
        &self,
        text: &str,
        prefix: Option<UsagePrefix>,
    ) -> EmbeddingResult<MultiTierEmbedding> {
        let (fast, accurate) = tokio::join!(
            self.fast.embed(text, prefix),
            self.accurate.embed(text, prefix),
        );
        Ok(MultiTierEmbedding {
            fast: fast?,
            accurate: accurate?,
        })
    }

    /// Embeds a batch on every tier concurrently, zipping results by
    /// position and summing per-tier token usage.
    #[instrument(skip(self, texts), fields(batch_len = texts.len()))]
    pub async fn embed_multi_tier_batch(
        &self,
        texts: &[String],
        prefix: Option<UsagePrefix>,
    ) -> EmbeddingResult<MultiTierBatch> {
        let (fast, accurate) = tokio::join!(
            self.fast.embed_batch(texts, prefix),
            self.accurate.embed_batch(texts, prefix),
        );
        let (fast, accurate) = (fast?, accurate?);

        let usage = UsageCounters {
            fast_tokens: fast.total_tokens,
            accurate_tokens: accurate.total_tokens,
        };

        let embeddings = fast
            .vectors
            .into_iter()
            .zip(accurate.vectors)
            .map(|(fast, accurate)| MultiTierEmbedding { fast, accurate })
            .collect();

        Ok(MultiTierBatch { embeddings, usage })
    }

    /// Embeds one text on a single tier.
    pub async fn embed_one(
        &self,
        tier: TierId,
        text: &str,
        prefix: Option<UsagePrefix>,
    ) -> EmbeddingResult<EmbeddingVector> {
        self.client(tier).embed(text, prefix).await
    }

    /// Embeds a batch on a single tier.
    pub async fn embed_batch(
        &self,
        tier: TierId,
        texts: &[String],
        prefix: Option<UsagePrefix>,
    ) -> EmbeddingResult<TierBatch> {
        self.client(tier).embed_batch(texts, prefix).await
    }

    /// Embeds two texts and scores their similarity on the selected tiers.
    #[instrument(skip(self, text_a, text_b), fields(select = ?select))]
    pub async fn compare(
        &self,
        text_a: &str,
        text_b: &str,
        select: TierSelect,
    ) -> EmbeddingResult<TextComparison> {
        let prefix = Some(UsagePrefix::Query);

        match select {
            TierSelect::Both => {
                let (a, b) = tokio::join!(
                    self.embed_multi_tier(text_a, prefix),
                    self.embed_multi_tier(text_b, prefix),
                );
                Ok(compare_multi_tier(&a?, &b?)?)
            }
            TierSelect::Fast => {
                let (a, b) = tokio::join!(
                    self.fast.embed(text_a, prefix),
                    self.fast.embed(text_b, prefix),
                );
                Ok(compare_single_tier(&a?, &b?)?)
            }
            TierSelect::Accurate => {
                let (a, b) = tokio::join!(
                    self.accurate.embed(text_a, prefix),
                    self.accurate.embed(text_b, prefix),
                );
                Ok(compare_single_tier(&a?, &b?)?)
            }
        }
    }

    /// Probes every tier concurrently. Probes are infallible per tier, so
    /// one unreachable backend still yields a status for the other.
    #[instrument(skip(self))]
    pub async fn check_health(&self) -> TierHealth {
        let (fast, accurate) = tokio::join!(self.fast.healthy(), self.accurate.healthy());

        TierHealth {
            fast: Self::tier_status(&self.fast, fast),
            accurate: Self::tier_status(&self.accurate, accurate),
        }
    }

    fn tier_status(client: &TierClient, healthy: bool) -> TierStatus {
        let config = client.config();
        TierStatus {
            tier: config.tier,
            healthy,
            model: config.model.clone(),
            dimension: config.dimension,
        }
    }
}
