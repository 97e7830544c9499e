//! Data model and response model errors.

/// Errors raised by the data model and the probabilistic response model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("shape mismatch: expected {expected} coordinates, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("invalid tuple: {reason}")]
    InvalidTuple { reason: String },

    #[error("item {index} out of range for {n_items} items")]
    ItemOutOfRange { index: usize, n_items: usize },

    #[error("degenerate response model denominator (b = {b_dist}, c = {c_dist}, mu = {mu})")]
    DegenerateDenominator { b_dist: f64, c_dist: f64, mu: f64 },

    #[error("degenerate sample: every ordering has zero probability mass")]
    DegenerateSample,

    #[error("distance sequence too short: need at least 2, got {len}")]
    SequenceTooShort { len: usize },

    #[error("insufficient items: need at least {required}, got {actual}")]
    InsufficientItems { required: usize, actual: usize },
}

pub type ModelResult<T> = Result<T, ModelError>;
