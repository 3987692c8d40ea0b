//! Deterministic in-memory transport used by tests and offline development.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::embedding::error::TransportError;
use crate::embedding::transport::{EmbedBatchReply, EmbedReply, HealthReply, TierTransport};
use crate::embedding::vector::{TierId, UsagePrefix};
use crate::hashing::{hash_embedding_key, keyed_unit_floats};

/// Transport that synthesizes embeddings from a hash of the request.
///
/// The same `(tier, prefix, text)` always produces the same vector, so tests
/// can assert on batch ordering and cache behavior without a live backend.
/// Failure toggles flip at runtime to simulate an outage mid-test.
pub struct MockTransport {
    tier: TierId,
    dimension: usize,
    asymmetric: bool,
    fail_requests: AtomicBool,
    fail_health: AtomicBool,
    /// Tokens reported per embedded text; 0 means the tier does not count.
    tokens_per_text: AtomicU64,
    /// Dimension of synthesized replies; 0 means honest (the configured one).
    reply_dimension: AtomicUsize,
    embed_calls: AtomicUsize,
    batch_calls: AtomicUsize,
    health_calls: AtomicUsize,
}

impl MockTransport {
    pub fn new(tier: TierId, dimension: usize) -> Self {
        Self {
            tier,
            dimension,
            asymmetric: matches!(tier, TierId::Fast),
            fail_requests: AtomicBool::new(false),
            fail_health: AtomicBool::new(false),
            tokens_per_text: AtomicU64::new(0),
            reply_dimension: AtomicUsize::new(0),
            embed_calls: AtomicUsize::new(0),
            batch_calls: AtomicUsize::new(0),
            health_calls: AtomicUsize::new(0),
        }
    }

    /// Reports `tokens` per embedded text, like a backend that meters usage.
    pub fn with_tokens_per_text(self, tokens: u64) -> Self {
        self.tokens_per_text.store(tokens, Ordering::Relaxed);
        self
    }

    /// Makes embed calls fail (or recover) from now on.
    pub fn fail_requests(&self, fail: bool) {
        self.fail_requests.store(fail, Ordering::Relaxed);
    }

    /// Makes health probes fail (or recover) from now on.
    pub fn fail_health(&self, fail: bool) {
        self.fail_health.store(fail, Ordering::Relaxed);
    }

    /// Makes replies carry `dimension` values instead of the configured
    /// dimension. Pass 0 to go back to honest replies.
    pub fn set_reply_dimension(&self, dimension: usize) {
        self.reply_dimension.store(dimension, Ordering::Relaxed);
    }

    pub fn embed_calls(&self) -> usize {
        self.embed_calls.load(Ordering::Relaxed)
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::Relaxed)
    }

    pub fn health_calls(&self) -> usize {
        self.health_calls.load(Ordering::Relaxed)
    }

    /// The exact values this mock synthesizes for a request. Exposed so tests
    /// can predict replies without duplicating the derivation.
    pub fn deterministic_values(
        tier: TierId,
        dimension: usize,
        prefix: Option<UsagePrefix>,
        text: &str,
    ) -> Vec<f32> {
        let key = hash_embedding_key(tier.as_str(), prefix.map(|p| p.as_str()), text);
        keyed_unit_floats(&key, dimension)
            .into_iter()
            .map(|x| (x - 0.5) * 0.1)
            .collect()
    }

    fn effective_prefix(&self, prefix: Option<UsagePrefix>) -> Option<UsagePrefix> {
        if self.asymmetric { prefix } else { None }
    }

    fn reply_values(&self, prefix: Option<UsagePrefix>, text: &str) -> Vec<f32> {
        let dimension = match self.reply_dimension.load(Ordering::Relaxed) {
            0 => self.dimension,
            d => d,
        };
        Self::deterministic_values(self.tier, dimension, self.effective_prefix(prefix), text)
    }

    fn tokens_for(&self, texts: u64) -> Option<u64> {
        match self.tokens_per_text.load(Ordering::Relaxed) {
            0 => None,
            per_text => Some(per_text * texts),
        }
    }

    fn outage() -> TransportError {
        TransportError::Unavailable {
            reason: "mock transport failure".to_string(),
        }
    }
}

#[async_trait]
impl TierTransport for MockTransport {
    async fn embed(
        &self,
        text: &str,
        prefix: Option<UsagePrefix>,
    ) -> Result<EmbedReply, TransportError> {
        self.embed_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_requests.load(Ordering::Relaxed) {
            return Err(Self::outage());
        }

        let embedding = self.reply_values(prefix, text);
        let dimension = Some(embedding.len());
        Ok(EmbedReply {
            embedding,
            dimension,
            tokens: self.tokens_for(1),
        })
    }

    async fn embed_batch(
        &self,
        texts: &[String],
        prefix: Option<UsagePrefix>,
    ) -> Result<EmbedBatchReply, TransportError> {
        self.batch_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_requests.load(Ordering::Relaxed) {
            return Err(Self::outage());
        }

        let embeddings = texts
            .iter()
            .map(|text| self.reply_values(prefix, text))
            .collect::<Vec<_>>();
        Ok(EmbedBatchReply {
            total_tokens: self.tokens_for(embeddings.len() as u64),
            embeddings,
        })
    }

    async fn health(&self) -> Result<HealthReply, TransportError> {
        self.health_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_health.load(Ordering::Relaxed) {
            return Err(Self::outage());
        }

        Ok(HealthReply {
            status: "healthy".to_string(),
            model: None,
            dimension: Some(self.dimension),
        })
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("tier", &self.tier)
            .field("dimension", &self.dimension)
            .field("embed_calls", &self.embed_calls())
            .field("batch_calls", &self.batch_calls())
            .finish()
    }
}
