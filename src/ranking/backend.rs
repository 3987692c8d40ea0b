use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use super::entity::{EntityKind, EntityRecord};
use super::error::RankingError;

#[async_trait]
/// Source of candidate entities and lexical match evidence.
///
/// Implementations load per-kind candidates however they are stored; the
/// ranker owns scoring, filtering, and ordering.
pub trait SearchBackend: Send + Sync {
    /// All candidate records of one kind.
    async fn records(&self, kind: EntityKind) -> Result<Vec<EntityRecord>, RankingError>;

    /// Lexical match strength per entity id for one kind, normalized to
    /// [0, 1]. Entities with no match are absent, never zero-scored.
    async fn lexical_matches(
        &self,
        kind: EntityKind,
        query: &str,
    ) -> Result<HashMap<Uuid, f32>, RankingError>;
}
