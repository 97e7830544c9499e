//! Oracle errors.

use super::ModelError;

/// Errors raised while constructing or querying an oracle.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OracleError {
    #[error("failure probability must lie in (0, 1), got {value}")]
    InvalidFailureProbability { value: f64 },

    #[error("ground truth has no spread: maximum pairwise distance is {max_distance}")]
    DegenerateGroundTruth { max_distance: f64 },

    #[error("oracle response weights sum to zero")]
    ZeroWeights,

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type OracleResult<T> = Result<T, OracleError>;
