//! Wire shapes for the `/v2` routes.

use serde::{Deserialize, Serialize};

use crate::embedding::{EmbeddingVector, TierSelect, UsageCounters, UsagePrefix};
use crate::gateway::error::GatewayError;
use crate::scoring::TextComparison;

#[derive(Debug, Clone, Deserialize)]
pub struct EmbedRequest {
    pub text: String,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub tier: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbedBatchRequest {
    pub texts: Vec<String>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub tier: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompareRequest {
    pub text_a: String,
    pub text_b: String,
    #[serde(default)]
    pub tier: Option<String>,
}

/// One tier's embedding as serialized to callers.
#[derive(Debug, Clone, Serialize)]
pub struct TierEmbedding {
    pub tier: &'static str,
    pub dimension: usize,
    pub degraded: bool,
    pub embedding: Vec<f32>,
}

impl TierEmbedding {
    pub fn from_vector(vector: EmbeddingVector) -> Self {
        Self {
            tier: vector.tier().as_str(),
            dimension: vector.dimension(),
            degraded: vector.is_degraded(),
            embedding: vector.into_values(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EmbedResponse {
    pub embeddings: Vec<TierEmbedding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct BatchItem {
    pub embeddings: Vec<TierEmbedding>,
}

#[derive(Debug, Serialize)]
pub struct UsagePayload {
    pub fast_tokens: u64,
    pub accurate_tokens: u64,
    pub total_tokens: u64,
}

impl UsagePayload {
    pub fn from_counters(usage: UsageCounters) -> Self {
        Self {
            fast_tokens: usage.fast_tokens,
            accurate_tokens: usage.accurate_tokens,
            total_tokens: usage.total(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EmbedBatchResponse {
    /// One item per input text, in input order.
    pub results: Vec<BatchItem>,
    pub count: usize,
    pub usage: UsagePayload,
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fast_similarity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accurate_similarity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combined_similarity: Option<f32>,
    pub interpretation: &'static str,
    pub degraded: bool,
}

impl CompareResponse {
    pub fn from_comparison(comparison: TextComparison) -> Self {
        Self {
            fast_similarity: comparison.fast.map(|t| t.score),
            accurate_similarity: comparison.accurate.map(|t| t.score),
            combined_similarity: comparison.combined,
            interpretation: comparison.interpretation.as_str(),
            degraded: comparison.degraded,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TierHealthPayload {
    pub tier: &'static str,
    pub model: String,
    pub dimension: usize,
    pub healthy: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub fully_operational: bool,
    pub tiers: Vec<TierHealthPayload>,
}

pub(crate) fn parse_prefix(raw: Option<&str>) -> Result<Option<UsagePrefix>, GatewayError> {
    match raw {
        None => Ok(None),
        Some(name) => UsagePrefix::from_name(name).map(Some).ok_or_else(|| {
            GatewayError::InvalidRequest(format!(
                "unknown prefix '{}': expected 'query' or 'passage'",
                name
            ))
        }),
    }
}

pub(crate) fn parse_tier(raw: Option<&str>) -> Result<TierSelect, GatewayError> {
    match raw {
        None => Ok(TierSelect::default()),
        Some(name) => TierSelect::from_name(name).ok_or_else(|| {
            GatewayError::InvalidRequest(format!(
                "unknown tier '{}': expected 'fast', 'accurate', or 'both'",
                name
            ))
        }),
    }
}
