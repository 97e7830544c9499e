//! Body selector errors.

use super::ModelError;

/// Errors raised by body selection strategies.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectorError {
    #[error("no candidate tuples to select from")]
    EmptyCandidates,

    #[error("downsample rate must lie in (0, 1], got {rate}")]
    InvalidDownsampleRate { rate: f64 },

    #[error("{body_size}-item bodies over {n_items} items have too many orderings to enumerate")]
    TooManyCandidates { n_items: usize, body_size: usize },

    #[error(transparent)]
    Model(#[from] ModelError),
}

pub type SelectorResult<T> = Result<T, SelectorError>;
