use crate::errors::OracleResult;
use crate::models::{Response, Tuple};

/// A judge that ranks a tuple's body by similarity to its head.
///
/// Stochastic oracles own their randomness, so the call takes `&mut self`.
pub trait IOracle: Send {
    fn respond(&mut self, tuple: &Tuple) -> OracleResult<Response>;
}
