use crate::constants::{SIMILAR_THRESHOLD, SOMEWHAT_RELATED_THRESHOLD, VERY_SIMILAR_THRESHOLD};
use crate::embedding::vector::TierId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Human-readable band for a similarity score.
pub enum Interpretation {
    VerySimilar,
    Similar,
    SomewhatRelated,
    Different,
}

impl Interpretation {
    /// Band boundaries are strict: a score exactly at a boundary falls into
    /// the band below it.
    pub fn from_score(score: f32) -> Self {
        if score > VERY_SIMILAR_THRESHOLD {
            Interpretation::VerySimilar
        } else if score > SIMILAR_THRESHOLD {
            Interpretation::Similar
        } else if score > SOMEWHAT_RELATED_THRESHOLD {
            Interpretation::SomewhatRelated
        } else {
            Interpretation::Different
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Interpretation::VerySimilar => "Very similar",
            Interpretation::Similar => "Similar",
            Interpretation::SomewhatRelated => "Somewhat related",
            Interpretation::Different => "Different",
        }
    }
}

impl std::fmt::Display for Interpretation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Which formula produced a score.
pub enum ScoreFormula {
    /// Cosine similarity on one tier's vectors.
    SingleTier(TierId),
    /// Weighted blend of per-tier cosine similarities.
    MultiTierWeighted,
    /// Weighted blend of semantic and lexical signals.
    Hybrid,
}

impl ScoreFormula {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreFormula::SingleTier(TierId::Fast) => "fast-tier",
            ScoreFormula::SingleTier(TierId::Accurate) => "accurate-tier",
            ScoreFormula::MultiTierWeighted => "multi-tier-weighted",
            ScoreFormula::Hybrid => "semantic-lexical-hybrid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// A similarity value paired with the formula that produced it.
pub struct SimilarityScore {
    value: f32,
    formula: ScoreFormula,
}

impl SimilarityScore {
    pub fn single_tier(tier: TierId, value: f32) -> Self {
        Self {
            value,
            formula: ScoreFormula::SingleTier(tier),
        }
    }

    pub fn multi_tier(value: f32) -> Self {
        Self {
            value,
            formula: ScoreFormula::MultiTierWeighted,
        }
    }

    pub fn hybrid(value: f32) -> Self {
        Self {
            value,
            formula: ScoreFormula::Hybrid,
        }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn formula(&self) -> ScoreFormula {
        self.formula
    }

    pub fn interpret(&self) -> Interpretation {
        Interpretation::from_score(self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// One tier's contribution to a comparison.
pub struct TierSimilarity {
    pub tier: TierId,
    pub score: f32,
    /// `true` when either side of the comparison was a fallback vector.
    pub degraded: bool,
}

#[derive(Debug, Clone, PartialEq)]
/// Result of comparing two texts.
pub struct TextComparison {
    pub fast: Option<TierSimilarity>,
    pub accurate: Option<TierSimilarity>,
    /// Weighted blend across tiers; present only when every tier scored.
    pub combined: Option<f32>,
    pub interpretation: Interpretation,
    /// `true` when any participating vector was a fallback.
    pub degraded: bool,
}

impl TextComparison {
    /// The single number this comparison settles on: the combined score when
    /// every tier contributed, otherwise the one tier that did.
    pub fn score(&self) -> f32 {
        self.combined
            .or(self.fast.map(|t| t.score))
            .or(self.accurate.map(|t| t.score))
            .unwrap_or(0.0)
    }
}
