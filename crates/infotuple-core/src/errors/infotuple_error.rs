//! Top-level error aggregating every subsystem.

use super::{
    ConfigError, LearnerError, ModelError, OracleError, RngStateError, SelectorError, SessionError,
};

/// Workspace-wide error type.
#[derive(Debug, thiserror::Error)]
pub enum InfoTupleError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("selector error: {0}")]
    Selector(#[from] SelectorError),

    #[error("learner error: {0}")]
    Learner(#[from] LearnerError),

    #[error("session error: {0}")]
    Session(#[from] SessionError),

    #[error("rng state error: {0}")]
    RngState(#[from] RngStateError),
}

pub type InfoTupleResult<T> = Result<T, InfoTupleError>;
