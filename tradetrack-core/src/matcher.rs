//! Face matching over normalized embeddings.
//!
//! Two modes share the same scoring: [`verify`] compares a query against one
//! stored embedding, [`best_match`] scans a candidate set linearly and keeps
//! the first candidate holding the highest score.

use crate::config::MatchConfig;
use crate::error::{CoreError, CoreResult};
use crate::similarity::normalize;
use ndarray::{Array1, ArrayView1};
use tracing::debug;

/// The winning candidate of a best-match scan and its similarity score.
#[derive(Debug, Clone, PartialEq)]
pub struct BestMatch<T> {
    pub candidate: T,
    pub score: f64,
}

/// Checks a caller-supplied embedding against the configured dimension and
/// normalizes it.
///
/// Wrong length is `WrongDimension`; a degenerate vector is `InvalidVector`.
pub fn prepare_input(query: ArrayView1<f64>, config: &MatchConfig) -> CoreResult<Array1<f64>> {
    if query.len() != config.embedding_dimension {
        return Err(CoreError::WrongDimension {
            expected: config.embedding_dimension,
            actual: query.len(),
        });
    }
    normalize(query)
}

/// Normalizes an embedding read back from the store.
///
/// Any failure here indicates corrupt persisted state and is reported as
/// `Misconfigured`.
pub fn prepare_stored(stored: ArrayView1<f64>, config: &MatchConfig) -> CoreResult<Array1<f64>> {
    if stored.len() != config.embedding_dimension {
        return Err(CoreError::Misconfigured(format!(
            "Stored embedding has {} components, expected {}",
            stored.len(),
            config.embedding_dimension
        )));
    }
    normalize(stored).map_err(|e| CoreError::Misconfigured(format!("Stored embedding is invalid: {}", e)))
}

fn check_threshold(score: f64, config: &MatchConfig) -> CoreResult<()> {
    // Equal to the threshold is accepted.
    if score < config.match_threshold {
        return Err(CoreError::LowConfidence(format!(
            "Match confidence {:.4} below threshold {:.4}",
            score, config.match_threshold
        )));
    }
    Ok(())
}

/// One-to-one verification. Returns the similarity score when it reaches the
/// configured threshold, `LowConfidence` otherwise.
pub fn verify(query: ArrayView1<f64>, stored: ArrayView1<f64>, config: &MatchConfig) -> CoreResult<f64> {
    config.validate()?;
    let unit_query = prepare_input(query, config)?;
    let unit_stored = prepare_stored(stored, config)?;
    let score = unit_query.dot(&unit_stored);
    debug!(score, threshold = config.match_threshold, "Verify score computed");
    check_threshold(score, config)?;
    Ok(score)
}

/// One-to-many match over `candidates`, in iteration order.
///
/// The running best is only replaced by a strictly higher score, so among
/// equal scores the earliest candidate wins. An empty candidate set is
/// `NoCandidates`, checked before the query is looked at.
pub fn best_match<'a, T, I>(
    query: ArrayView1<f64>,
    candidates: I,
    config: &MatchConfig,
) -> CoreResult<BestMatch<T>>
where
    I: IntoIterator<Item = (T, ArrayView1<'a, f64>)>,
{
    config.validate()?;
    let mut candidates = candidates.into_iter().peekable();
    if candidates.peek().is_none() {
        return Err(CoreError::NoCandidates);
    }

    let unit_query = prepare_input(query, config)?;

    let mut best: Option<BestMatch<T>> = None;
    let mut scanned = 0usize;
    for (candidate, embedding) in candidates {
        let unit_candidate = prepare_stored(embedding, config)?;
        let score = unit_query.dot(&unit_candidate);
        scanned += 1;
        if best.as_ref().map_or(true, |current| score > current.score) {
            best = Some(BestMatch { candidate, score });
        }
    }

    let best = best.ok_or(CoreError::NoCandidates)?;
    debug!(scanned, score = best.score, threshold = config.match_threshold, "Best match scan finished");
    check_threshold(best.score, config)?;
    Ok(best)
}
