//! Wire-level access to one embedding backend.
//!
//! The two tiers speak the same shape of HTTP API but disagree on one field:
//! asymmetric tiers take a `prefix` on embed calls, symmetric tiers take a
//! `model` name. [`HttpTransport`] folds that difference away so the client
//! layer never sees it.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::embedding::config::TierConfig;
use crate::embedding::error::TransportError;
use crate::embedding::vector::UsagePrefix;

/// Reply to a single-text embed call.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbedReply {
    pub embedding: Vec<f32>,
    #[serde(default)]
    pub dimension: Option<usize>,
    #[serde(default)]
    pub tokens: Option<u64>,
}

/// Reply to a batch embed call.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbedBatchReply {
    pub embeddings: Vec<Vec<f32>>,
    #[serde(default)]
    pub total_tokens: Option<u64>,
}

/// Reply to a health probe.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthReply {
    pub status: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub dimension: Option<usize>,
}

impl HealthReply {
    #[inline]
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[derive(Debug, Serialize)]
struct EmbedCall<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    prefix: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct EmbedBatchCall<'a> {
    texts: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    prefix: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[async_trait]
/// Raw calls against one tier backend. No caching, no fallback.
pub trait TierTransport: Send + Sync {
    /// Embeds one text.
    async fn embed(
        &self,
        text: &str,
        prefix: Option<UsagePrefix>,
    ) -> Result<EmbedReply, TransportError>;

    /// Embeds a batch of texts, preserving order.
    async fn embed_batch(
        &self,
        texts: &[String],
        prefix: Option<UsagePrefix>,
    ) -> Result<EmbedBatchReply, TransportError>;

    /// Probes backend liveness.
    async fn health(&self) -> Result<HealthReply, TransportError>;
}

/// HTTP transport speaking the embed service protocol.
pub struct HttpTransport {
    http: HttpClient,
    base_url: String,
    model: String,
    asymmetric: bool,
}

impl HttpTransport {
    /// Builds a transport from a tier's connection settings.
    pub fn from_config(config: &TierConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| HttpClient::new());

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            asymmetric: config.asymmetric,
        }
    }

    /// Prefix goes on the wire only for asymmetric tiers.
    fn wire_prefix(&self, prefix: Option<UsagePrefix>) -> Option<&'static str> {
        if self.asymmetric {
            prefix.map(|p| p.as_str())
        } else {
            None
        }
    }

    /// Symmetric tiers name their model instead.
    fn wire_model(&self) -> Option<&str> {
        if self.asymmetric {
            None
        } else {
            Some(&self.model)
        }
    }

    async fn post_json<C, R>(&self, path: &str, call: &C) -> Result<R, TransportError>
    where
        C: Serialize + Sync,
        R: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.http.post(&url).json(call).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        resp.json::<R>()
            .await
            .map_err(|e| TransportError::MalformedReply {
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl TierTransport for HttpTransport {
    async fn embed(
        &self,
        text: &str,
        prefix: Option<UsagePrefix>,
    ) -> Result<EmbedReply, TransportError> {
        let call = EmbedCall {
            text,
            prefix: self.wire_prefix(prefix),
            model: self.wire_model(),
        };
        self.post_json("/embed", &call).await
    }

    async fn embed_batch(
        &self,
        texts: &[String],
        prefix: Option<UsagePrefix>,
    ) -> Result<EmbedBatchReply, TransportError> {
        let call = EmbedBatchCall {
            texts,
            prefix: self.wire_prefix(prefix),
            model: self.wire_model(),
        };
        self.post_json("/embed/batch", &call).await
    }

    async fn health(&self) -> Result<HealthReply, TransportError> {
        let url = format!("{}/health", self.base_url);
        let resp = self.http.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        resp.json::<HealthReply>()
            .await
            .map_err(|e| TransportError::MalformedReply {
                reason: e.to_string(),
            })
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("asymmetric", &self.asymmetric)
            .finish()
    }
}
