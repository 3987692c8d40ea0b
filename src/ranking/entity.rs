//! Entity kinds and the candidate records the ranker scores.

use uuid::Uuid;

use crate::constants::DEFAULT_SIMILARITY_THRESHOLD;
use crate::scoring::{ScoringError, cosine_similarity};

/// The kinds of entity a search can range over.
///
/// Closed set: every kind carries its own preview format and score floor,
/// and exhaustive matches keep additions honest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A named plan with a slug, embedded on both name and content.
    Blueprint,
    /// One numbered run of a blueprint, embedded on its summary.
    Execution,
    /// A reusable problem/solution pair, embedded on both sides.
    Pattern,
    /// A work item; its description embedding is optional.
    Work,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Blueprint,
        EntityKind::Execution,
        EntityKind::Pattern,
        EntityKind::Work,
    ];

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Blueprint => "blueprint",
            EntityKind::Execution => "execution",
            EntityKind::Pattern => "pattern",
            EntityKind::Work => "work",
        }
    }

    /// Accepts both singular and plural spellings.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "blueprint" | "blueprints" => Some(EntityKind::Blueprint),
            "execution" | "executions" => Some(EntityKind::Execution),
            "pattern" | "patterns" => Some(EntityKind::Pattern),
            "work" | "work_items" => Some(EntityKind::Work),
            _ => None,
        }
    }

    /// Score floor applied when the caller does not override it.
    pub fn default_threshold(&self) -> f32 {
        match self {
            EntityKind::Blueprint | EntityKind::Execution | EntityKind::Pattern => {
                DEFAULT_SIMILARITY_THRESHOLD
            }
            EntityKind::Work => 0.5,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One candidate entity with the embeddings its kind carries.
///
/// Multi-embedding kinds score as the best of their fields, so a record
/// surfaces when any of its embedded aspects matches the query.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityRecord {
    Blueprint {
        id: Uuid,
        slug: String,
        name: String,
        name_embedding: Vec<f32>,
        content_embedding: Vec<f32>,
    },
    Execution {
        id: Uuid,
        tide_number: u32,
        blueprint_slug: String,
        status: String,
        summary_embedding: Vec<f32>,
    },
    Pattern {
        id: Uuid,
        problem: String,
        solution: String,
        applicability_score: f32,
        problem_embedding: Vec<f32>,
        solution_embedding: Vec<f32>,
    },
    Work {
        id: Uuid,
        title: String,
        description: String,
        description_embedding: Option<Vec<f32>>,
    },
}

impl EntityRecord {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRecord::Blueprint { .. } => EntityKind::Blueprint,
            EntityRecord::Execution { .. } => EntityKind::Execution,
            EntityRecord::Pattern { .. } => EntityKind::Pattern,
            EntityRecord::Work { .. } => EntityKind::Work,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            EntityRecord::Blueprint { id, .. }
            | EntityRecord::Execution { id, .. }
            | EntityRecord::Pattern { id, .. }
            | EntityRecord::Work { id, .. } => *id,
        }
    }

    /// Best cosine similarity between the query and this record's
    /// embeddings. `None` when the record has nothing to compare.
    pub fn semantic_similarity(&self, query: &[f32]) -> Result<Option<f32>, ScoringError> {
        match self {
            EntityRecord::Blueprint {
                name_embedding,
                content_embedding,
                ..
            } => {
                let name = cosine_similarity(query, name_embedding)?;
                let content = cosine_similarity(query, content_embedding)?;
                Ok(Some(name.max(content)))
            }
            EntityRecord::Execution {
                summary_embedding, ..
            } => Ok(Some(cosine_similarity(query, summary_embedding)?)),
            EntityRecord::Pattern {
                problem_embedding,
                solution_embedding,
                ..
            } => {
                let problem = cosine_similarity(query, problem_embedding)?;
                let solution = cosine_similarity(query, solution_embedding)?;
                Ok(Some(problem.max(solution)))
            }
            EntityRecord::Work {
                description_embedding,
                ..
            } => description_embedding
                .as_ref()
                .map(|values| cosine_similarity(query, values))
                .transpose(),
        }
    }

    /// One-line presentation of this record at a given score.
    pub fn preview(&self, score: f32) -> String {
        match self {
            EntityRecord::Blueprint { slug, name, .. } => {
                format!("[Blueprint] {name} ({slug}) - Similarity: {score:.3}")
            }
            EntityRecord::Execution {
                tide_number,
                blueprint_slug,
                status,
                ..
            } => format!(
                "[Execution] TIDE {tide_number} of {blueprint_slug} - Status: {status} - Similarity: {score:.3}"
            ),
            EntityRecord::Pattern {
                problem,
                applicability_score,
                ..
            } => {
                let excerpt: String = problem.chars().take(100).collect();
                format!(
                    "[Pattern] {excerpt}... - Score: {applicability_score} - Similarity: {score:.3}"
                )
            }
            EntityRecord::Work { title, .. } => {
                format!("[Work] {title} - Similarity: {score:.3}")
            }
        }
    }

    /// Text a lexical matcher can scan.
    pub fn searchable_text(&self) -> String {
        match self {
            EntityRecord::Blueprint { slug, name, .. } => format!("{name} {slug}"),
            EntityRecord::Execution {
                blueprint_slug,
                status,
                ..
            } => format!("{blueprint_slug} {status}"),
            EntityRecord::Pattern {
                problem, solution, ..
            } => format!("{problem} {solution}"),
            EntityRecord::Work {
                title, description, ..
            } => format!("{title} {description}"),
        }
    }
}
