use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// Default length of a face embedding.
pub const DEFAULT_EMBEDDING_DIMENSION: usize = 512;
/// Default minimum similarity for a match to be accepted.
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.5;

/// Parameters for face matching, passed explicitly into every
/// registration, verification and match call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Required length of every embedding.
    pub embedding_dimension: usize,
    /// Minimum cosine similarity, in (0, 1], for a match to be accepted.
    pub match_threshold: f64,
}

impl MatchConfig {
    pub fn new(embedding_dimension: usize, match_threshold: f64) -> Self {
        MatchConfig {
            embedding_dimension,
            match_threshold,
        }
    }

    /// Validates the configuration parameters.
    ///
    /// Checked at the start of every workflow call, not only at startup.
    pub fn validate(&self) -> CoreResult<()> {
        if self.embedding_dimension == 0 {
            return Err(CoreError::Misconfigured(
                "embedding_dimension must be greater than 0".to_string(),
            ));
        }
        if !self.match_threshold.is_finite()
            || self.match_threshold <= 0.0
            || self.match_threshold > 1.0
        {
            return Err(CoreError::Misconfigured(format!(
                "match_threshold must be in (0, 1], got {}",
                self.match_threshold
            )));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            embedding_dimension: DEFAULT_EMBEDDING_DIMENSION,
            match_threshold: DEFAULT_MATCH_THRESHOLD,
        }
    }
}
