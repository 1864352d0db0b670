//! Vector math used by the face matcher: L2 normalization and cosine similarity.

use crate::error::{CoreError, CoreResult};
use ndarray::{Array1, ArrayView1};

/// Scales `v` to unit Euclidean length.
///
/// Returns `CoreError::InvalidVector` if any component is non-finite or the
/// norm is zero (this includes empty and all-zero vectors) or overflows.
pub fn normalize(v: ArrayView1<f64>) -> CoreResult<Array1<f64>> {
    if v.iter().any(|x| !x.is_finite()) {
        return Err(CoreError::InvalidVector(
            "Vector contains non-finite components".to_string(),
        ));
    }
    let norm = v.dot(&v).sqrt();
    if norm == 0.0 {
        return Err(CoreError::InvalidVector("Vector has zero magnitude".to_string()));
    }
    if !norm.is_finite() {
        return Err(CoreError::InvalidVector("Vector magnitude overflows".to_string()));
    }
    Ok(v.mapv(|x| x / norm))
}

/// Cosine similarity of two vectors of equal length.
///
/// Both inputs are normalized internally, so callers may pass raw embeddings.
/// The result lies in [-1, 1] up to float precision and is not clamped.
/// Returns `CoreError::WrongDimension` if the lengths differ and
/// `CoreError::InvalidVector` if either input cannot be normalized.
pub fn cosine_similarity(a: ArrayView1<f64>, b: ArrayView1<f64>) -> CoreResult<f64> {
    if a.len() != b.len() {
        return Err(CoreError::WrongDimension {
            expected: a.len(),
            actual: b.len(),
        });
    }
    let unit_a = normalize(a)?;
    let unit_b = normalize(b)?;
    Ok(unit_a.dot(&unit_b))
}
