//! In-memory search backend used by tests.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use super::backend::SearchBackend;
use super::entity::{EntityKind, EntityRecord};
use super::error::RankingError;

/// Backend over a flat in-memory record list.
///
/// Lexical matching is the fraction of query terms contained in the record's
/// searchable text, case-insensitive. Zero hits means no entry at all,
/// mirroring a keyword index that only reports matching rows.
#[derive(Default)]
pub struct MockSearchBackend {
    records: RwLock<Vec<EntityRecord>>,
}

impl MockSearchBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: EntityRecord) {
        self.records.write().push(record);
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl SearchBackend for MockSearchBackend {
    async fn records(&self, kind: EntityKind) -> Result<Vec<EntityRecord>, RankingError> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|record| record.kind() == kind)
            .cloned()
            .collect())
    }

    async fn lexical_matches(
        &self,
        kind: EntityKind,
        query: &str,
    ) -> Result<HashMap<Uuid, f32>, RankingError> {
        let terms: Vec<String> = query
            .split_whitespace()
            .map(|term| term.to_lowercase())
            .collect();
        if terms.is_empty() {
            return Ok(HashMap::new());
        }

        let mut matches = HashMap::new();
        for record in self.records.read().iter() {
            if record.kind() != kind {
                continue;
            }
            let text = record.searchable_text().to_lowercase();
            let hits = terms
                .iter()
                .filter(|term| text.contains(term.as_str()))
                .count();
            if hits > 0 {
                matches.insert(record.id(), hits as f32 / terms.len() as f32);
            }
        }
        Ok(matches)
    }
}

impl std::fmt::Debug for MockSearchBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSearchBackend")
            .field("records", &self.len())
            .finish()
    }
}
