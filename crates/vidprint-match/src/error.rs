//! Error types for the comparison engine.

use thiserror::Error;

use vidprint_models::MetricError;
use vidprint_store::StoreError;

/// Result type for comparison operations.
pub type MatchResult<T> = Result<T, MatchError>;

/// Errors that can occur while running a match session.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("corpus contains no videos to compare against")]
    EmptyCorpus,

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("metric error: {0}")]
    Metric(#[from] MetricError),
}
