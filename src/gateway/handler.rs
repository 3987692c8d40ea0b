use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::instrument;

use crate::embedding::{EmbeddingVector, TierId, TierSelect, UsageCounters, UsagePrefix};
use crate::gateway::error::GatewayError;
use crate::gateway::payload::{
    BatchItem, CompareRequest, CompareResponse, EmbedBatchRequest, EmbedBatchResponse,
    EmbedRequest, EmbedResponse, HealthResponse, TierEmbedding, TierHealthPayload, UsagePayload,
    parse_prefix, parse_tier,
};
use crate::gateway::state::HandlerState;
use crate::gateway::{LODESTONE_STATUS_HEADER, LodestoneStatus};

#[instrument(skip(state, request), fields(tier = tracing::field::Empty))]
pub async fn embed_handler(
    State(state): State<HandlerState>,
    Json(request): Json<EmbedRequest>,
) -> Result<Response, GatewayError> {
    let prefix = parse_prefix(request.prefix.as_deref())?;
    let select = parse_tier(request.tier.as_deref())?;
    tracing::Span::current().record("tier", tracing::field::debug(&select));

    let (embeddings, degraded) = match select {
        TierSelect::Both => {
            let multi = state
                .embedder
                .embed_multi_tier(&request.text, prefix)
                .await?;
            let degraded = multi.any_degraded();
            let embeddings = vec![
                TierEmbedding::from_vector(multi.fast),
                TierEmbedding::from_vector(multi.accurate),
            ];
            (embeddings, degraded)
        }
        TierSelect::Fast => single_embedding(&state, TierId::Fast, &request.text, prefix).await?,
        TierSelect::Accurate => {
            single_embedding(&state, TierId::Accurate, &request.text, prefix).await?
        }
    };

    let body = EmbedResponse {
        embeddings,
        prefix: prefix.map(|p| p.as_str()),
    };

    Ok(tagged_response(LodestoneStatus::from_degraded(degraded), body))
}

#[instrument(skip(state, request), fields(batch_len = request.texts.len()))]
pub async fn embed_batch_handler(
    State(state): State<HandlerState>,
    Json(request): Json<EmbedBatchRequest>,
) -> Result<Response, GatewayError> {
    let prefix = parse_prefix(request.prefix.as_deref())?;
    let select = parse_tier(request.tier.as_deref())?;

    let (results, usage, degraded) = match select {
        TierSelect::Both => {
            let batch = state
                .embedder
                .embed_multi_tier_batch(&request.texts, prefix)
                .await?;
            let degraded = batch.embeddings.iter().any(|multi| multi.any_degraded());
            let results = batch
                .embeddings
                .into_iter()
                .map(|multi| BatchItem {
                    embeddings: vec![
                        TierEmbedding::from_vector(multi.fast),
                        TierEmbedding::from_vector(multi.accurate),
                    ],
                })
                .collect();
            (results, batch.usage, degraded)
        }
        TierSelect::Fast => single_batch(&state, TierId::Fast, &request.texts, prefix).await?,
        TierSelect::Accurate => {
            single_batch(&state, TierId::Accurate, &request.texts, prefix).await?
        }
    };

    let body = EmbedBatchResponse {
        count: results.len(),
        results,
        usage: UsagePayload::from_counters(usage),
    };

    Ok(tagged_response(LodestoneStatus::from_degraded(degraded), body))
}

#[instrument(skip(state, request), fields(tier = tracing::field::Empty))]
pub async fn compare_handler(
    State(state): State<HandlerState>,
    Json(request): Json<CompareRequest>,
) -> Result<Response, GatewayError> {
    let select = parse_tier(request.tier.as_deref())?;
    tracing::Span::current().record("tier", tracing::field::debug(&select));

    let comparison = state
        .embedder
        .compare(&request.text_a, &request.text_b, select)
        .await?;

    let status = LodestoneStatus::from_degraded(comparison.degraded);
    Ok(tagged_response(
        status,
        CompareResponse::from_comparison(comparison),
    ))
}

#[instrument(skip(state))]
pub async fn health_handler(State(state): State<HandlerState>) -> Response {
    let health = state.embedder.check_health().await;
    let fully_operational = health.fully_operational();

    let tiers = health
        .statuses()
        .into_iter()
        .map(|status| TierHealthPayload {
            tier: status.tier.as_str(),
            model: status.model.clone(),
            dimension: status.dimension,
            healthy: status.healthy,
        })
        .collect();

    let status = LodestoneStatus::from_degraded(!fully_operational);
    let code = if fully_operational {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = HealthResponse {
        status: status.as_header_value(),
        fully_operational,
        tiers,
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        LODESTONE_STATUS_HEADER,
        HeaderValue::from_static(status.as_header_value()),
    );
    (code, headers, Json(body)).into_response()
}

async fn single_embedding(
    state: &HandlerState,
    tier: TierId,
    text: &str,
    prefix: Option<UsagePrefix>,
) -> Result<(Vec<TierEmbedding>, bool), GatewayError> {
    let vector = state.embedder.embed_one(tier, text, prefix).await?;
    let degraded = vector.is_degraded();
    Ok((vec![TierEmbedding::from_vector(vector)], degraded))
}

async fn single_batch(
    state: &HandlerState,
    tier: TierId,
    texts: &[String],
    prefix: Option<UsagePrefix>,
) -> Result<(Vec<BatchItem>, UsageCounters, bool), GatewayError> {
    let batch = state.embedder.embed_batch(tier, texts, prefix).await?;
    let degraded = batch.vectors.iter().any(EmbeddingVector::is_degraded);

    let usage = match tier {
        TierId::Fast => UsageCounters {
            fast_tokens: batch.total_tokens,
            accurate_tokens: 0,
        },
        TierId::Accurate => UsageCounters {
            fast_tokens: 0,
            accurate_tokens: batch.total_tokens,
        },
    };

    let results = batch
        .vectors
        .into_iter()
        .map(|vector| BatchItem {
            embeddings: vec![TierEmbedding::from_vector(vector)],
        })
        .collect();

    Ok((results, usage, degraded))
}

pub(crate) fn tagged_response<T: Serialize>(status: LodestoneStatus, body: T) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        LODESTONE_STATUS_HEADER,
        HeaderValue::from_static(status.as_header_value()),
    );
    (StatusCode::OK, headers, Json(body)).into_response()
}
