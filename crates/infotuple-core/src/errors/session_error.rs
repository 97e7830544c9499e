//! Experiment engine errors.

use super::{LearnerError, ModelError, RngStateError, SelectorError};

/// Errors surfaced by the experiment entry points.
///
/// State inconsistencies are fatal preconditions and are never recovered
/// internally.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("dimension mismatch: aggregate has {expected} dims, participant {participant} has {actual}")]
    DimensionMismatch {
        participant: String,
        expected: usize,
        actual: usize,
    },

    #[error("item count mismatch: aggregate has {expected} items, participant {participant} has {actual}")]
    ItemCountMismatch {
        participant: String,
        expected: usize,
        actual: usize,
    },

    #[error("participant not found: {0}")]
    ParticipantNotFound(String),

    #[error("response head {found} does not match participant {participant} head {expected}")]
    HeadMismatch {
        participant: String,
        expected: usize,
        found: usize,
    },

    #[error("invalid response: {reason}")]
    InvalidResponse { reason: String },

    #[error("aggregate state lock poisoned")]
    LockPoisoned,

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Selector(#[from] SelectorError),

    #[error(transparent)]
    Learner(#[from] LearnerError),

    #[error(transparent)]
    RngState(#[from] RngStateError),
}

pub type SessionResult<T> = Result<T, SessionError>;
