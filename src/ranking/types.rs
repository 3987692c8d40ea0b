use uuid::Uuid;

use super::entity::EntityKind;
use crate::scoring::SimilarityScore;

#[derive(Debug, Clone, PartialEq)]
/// One entity surfaced by a search, ready for presentation.
pub struct RankedResult {
    pub kind: EntityKind,
    pub id: Uuid,
    /// One-line summary in the kind's preview format.
    pub preview: String,
    /// Raw semantic signal, when the entity had an embedding to compare.
    pub semantic: Option<f32>,
    /// Raw lexical signal, when the backend reported a keyword match.
    pub lexical: Option<f32>,
    /// The ranking score and the formula that produced it.
    pub score: SimilarityScore,
}
