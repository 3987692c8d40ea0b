//! Scoring, filtering, and ordering of candidate entities.

use std::cmp::Ordering;

use futures_util::future::try_join_all;
use tracing::{debug, instrument};

use crate::constants::{HYBRID_SEMANTIC_FLOOR, LEXICAL_WEIGHT, SEMANTIC_WEIGHT};
use crate::embedding::vector::EmbeddingVector;
use crate::scoring::{SimilarityScore, weighted_composite};

use super::backend::SearchBackend;
use super::config::RankerConfig;
use super::entity::{EntityKind, EntityRecord};
use super::error::RankingError;
use super::types::RankedResult;

/// Ranks entities of any kind against one query.
///
/// Per-kind candidate loads run concurrently; each kind is thresholded,
/// sorted, and capped on its own before the groups merge into one list
/// under the same cap.
pub struct EntityRanker<B: SearchBackend> {
    backend: B,
    config: RankerConfig,
}

impl<B: SearchBackend> EntityRanker<B> {
    pub fn new(backend: B, config: RankerConfig) -> Result<Self, RankingError> {
        config.validate()?;
        Ok(Self { backend, config })
    }

    #[inline]
    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Pure-semantic search across `kinds`, merged into one capped list.
    #[instrument(skip(self, query, kinds), fields(kinds = kinds.len(), tier = %query.tier()))]
    pub async fn cross_entity_search(
        &self,
        query: &EmbeddingVector,
        kinds: &[EntityKind],
    ) -> Result<Vec<RankedResult>, RankingError> {
        let groups =
            try_join_all(kinds.iter().map(|&kind| self.kind_matches(query, kind))).await?;

        Ok(merge_ranked(groups, self.config.limit))
    }

    /// Hybrid semantic + lexical search across `kinds`.
    ///
    /// Either signal alone can surface an entity: the composite treats a
    /// missing signal as 0, and the filter admits anything whose semantic
    /// score clears the floor or that has any lexical hit at all.
    #[instrument(skip(self, query_vector, query_text, kinds), fields(kinds = kinds.len()))]
    pub async fn hybrid_search(
        &self,
        query_vector: &EmbeddingVector,
        query_text: &str,
        kinds: &[EntityKind],
    ) -> Result<Vec<RankedResult>, RankingError> {
        let groups = try_join_all(
            kinds
                .iter()
                .map(|&kind| self.kind_hybrid_matches(query_vector, query_text, kind)),
        )
        .await?;

        Ok(merge_ranked(groups, self.config.limit))
    }

    async fn kind_matches(
        &self,
        query: &EmbeddingVector,
        kind: EntityKind,
    ) -> Result<Vec<RankedResult>, RankingError> {
        let threshold = self
            .config
            .threshold
            .unwrap_or_else(|| kind.default_threshold());
        let records = self.backend.records(kind).await?;

        let mut results = Vec::new();
        for record in records {
            let Some(semantic) = self.semantic_component(query, &record)? else {
                continue;
            };
            if semantic <= threshold {
                continue;
            }
            results.push(RankedResult {
                kind,
                id: record.id(),
                preview: record.preview(semantic),
                semantic: Some(semantic),
                lexical: None,
                score: SimilarityScore::single_tier(query.tier(), semantic),
            });
        }

        sort_ranked(&mut results);
        results.truncate(self.config.limit);

        debug!(kind = %kind, matches = results.len(), "ranked kind candidates");
        Ok(results)
    }

    async fn kind_hybrid_matches(
        &self,
        query_vector: &EmbeddingVector,
        query_text: &str,
        kind: EntityKind,
    ) -> Result<Vec<RankedResult>, RankingError> {
        let (records, lexical) = tokio::join!(
            self.backend.records(kind),
            self.backend.lexical_matches(kind, query_text),
        );
        let (records, lexical) = (records?, lexical?);

        let mut results = Vec::new();
        for record in records {
            let semantic = self.semantic_component(query_vector, &record)?;
            let lexical_score = lexical.get(&record.id()).copied();

            let admitted = semantic.is_some_and(|s| s > HYBRID_SEMANTIC_FLOOR)
                || lexical_score.is_some_and(|l| l > 0.0);
            if !admitted {
                continue;
            }

            let composite = weighted_composite(
                &[semantic.unwrap_or(0.0), lexical_score.unwrap_or(0.0)],
                &[SEMANTIC_WEIGHT, LEXICAL_WEIGHT],
            )?;

            results.push(RankedResult {
                kind,
                id: record.id(),
                preview: record.preview(composite),
                semantic,
                lexical: lexical_score,
                score: SimilarityScore::hybrid(composite),
            });
        }

        sort_ranked(&mut results);
        results.truncate(self.config.limit);

        debug!(kind = %kind, matches = results.len(), "ranked hybrid candidates");
        Ok(results)
    }

    /// The semantic signal for one record, or `None` when the record has no
    /// embedding or degraded queries are excluded.
    fn semantic_component(
        &self,
        query: &EmbeddingVector,
        record: &EntityRecord,
    ) -> Result<Option<f32>, RankingError> {
        if self.config.exclude_degraded && query.is_degraded() {
            return Ok(None);
        }
        Ok(record.semantic_similarity(query.values())?)
    }
}

impl<B: SearchBackend> std::fmt::Debug for EntityRanker<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityRanker")
            .field("config", &self.config)
            .finish()
    }
}

/// Concatenates per-kind groups in their given order, then sorts by score
/// descending and caps the result. The sort is stable, so ties keep the
/// callers' kind order.
pub fn merge_ranked(groups: Vec<Vec<RankedResult>>, limit: usize) -> Vec<RankedResult> {
    let mut merged: Vec<RankedResult> = groups.into_iter().flatten().collect();
    sort_ranked(&mut merged);
    merged.truncate(limit);
    merged
}

fn sort_ranked(results: &mut [RankedResult]) {
    results.sort_by(|a, b| {
        b.score
            .value()
            .partial_cmp(&a.score.value())
            .unwrap_or(Ordering::Equal)
    });
}
