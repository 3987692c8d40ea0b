use crate::constants::DEFAULT_SEARCH_LIMIT;

use super::error::RankingError;

#[derive(Debug, Clone, PartialEq)]
/// Knobs for one ranker instance.
pub struct RankerConfig {
    /// Cap per kind and on the merged list.
    pub limit: usize,
    /// Overrides every kind's default score floor when set.
    pub threshold: Option<f32>,
    /// Withhold the semantic signal when the query vector is degraded, so
    /// fallback queries rank on lexical evidence only.
    pub exclude_degraded: bool,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SEARCH_LIMIT,
            threshold: None,
            exclude_degraded: false,
        }
    }
}

impl RankerConfig {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn with_exclude_degraded(mut self, exclude: bool) -> Self {
        self.exclude_degraded = exclude;
        self
    }

    pub fn validate(&self) -> Result<(), RankingError> {
        if self.limit == 0 {
            return Err(RankingError::Config {
                reason: "limit must be non-zero".to_string(),
            });
        }
        if let Some(threshold) = self.threshold {
            if !(-1.0..=1.0).contains(&threshold) {
                return Err(RankingError::Config {
                    reason: format!("threshold {threshold} outside [-1, 1]"),
                });
            }
        }
        Ok(())
    }
}
