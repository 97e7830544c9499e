//! Metric learner errors.

use super::ModelError;

/// Errors raised while fitting an embedding.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LearnerError {
    #[error("cannot fit an embedding without constraints")]
    EmptyConstraints,

    #[error("constraint references item {index} but the embedding has {n_items} items")]
    ItemOutOfRange { index: usize, n_items: usize },

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type LearnerResult<T> = Result<T, LearnerError>;
