//! Face verification (one-to-one) and identification (one-to-many).
//!
//! Both workflows report a malformed query the same way as a face that does
//! not match: `LowConfidence`. Only configuration or stored-data problems
//! surface as distinct errors.

use crate::config::MatchConfig;
use crate::employee::MatchResult;
use crate::error::{CoreError, CoreResult};
use crate::matcher;
use crate::storage::EmployeeDirectory;
use crate::vector::Embedding;
use tracing::{info, warn};

fn fold_query_error(e: CoreError) -> CoreError {
    match e {
        CoreError::WrongDimension { .. } | CoreError::InvalidVector(_) => {
            CoreError::LowConfidence(format!("Query rejected: {}", e))
        }
        other => other,
    }
}

/// Checks that `query` belongs to `employee_id` and returns the score.
///
/// The query length is checked before the employee is looked up.
pub fn verify_face(
    directory: &dyn EmployeeDirectory,
    employee_id: &str,
    query: &Embedding,
    config: &MatchConfig,
) -> CoreResult<f64> {
    config.validate()?;
    if query.len() != config.embedding_dimension {
        warn!(
            employee_id,
            expected = config.embedding_dimension,
            actual = query.len(),
            "Verification rejected: query has wrong dimension"
        );
        return Err(CoreError::LowConfidence(format!(
            "Query has {} components, expected {}",
            query.len(),
            config.embedding_dimension
        )));
    }

    let employee = directory.get_by_id(employee_id)?;
    match matcher::verify(query.view(), employee.embedding.view(), config).map_err(fold_query_error) {
        Ok(score) => {
            info!(employee_id, score, "Face verified");
            Ok(score)
        }
        Err(e) => {
            warn!(employee_id, error = %e, "Face verification failed");
            Err(e)
        }
    }
}

/// Finds the registered employee whose embedding is closest to `query`.
///
/// Candidates are scanned in directory order; ties keep the earlier record.
pub fn find_best_match(
    directory: &dyn EmployeeDirectory,
    query: &Embedding,
    config: &MatchConfig,
) -> CoreResult<MatchResult> {
    config.validate()?;
    let employees = directory.get_all()?;
    if employees.is_empty() {
        warn!("Best match requested with no registered employees");
        return Err(CoreError::NoCandidates);
    }

    let candidates = employees.iter().map(|e| (e, e.embedding.view()));
    match matcher::best_match(query.view(), candidates, config).map_err(fold_query_error) {
        Ok(best) => {
            info!(employee_id = %best.candidate.employee_id, score = best.score, "Best match found");
            Ok(MatchResult::new(best.candidate, best.score))
        }
        Err(e) => {
            warn!(candidates = employees.len(), error = %e, "Best match failed");
            Err(e)
        }
    }
}
