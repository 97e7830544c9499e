//! # infotuple-oracle
//!
//! Simulated judges. Each answers a [`Tuple`](infotuple_core::Tuple) by
//! ranking its body by closeness to the head in a ground-truth embedding.

pub mod deterministic;
pub mod plackett_luce;
pub mod simulated;

pub use deterministic::DeterministicOracle;
pub use plackett_luce::PlackettLuceOracle;
pub use simulated::SimulatedOracle;

use infotuple_core::errors::OracleResult;
use infotuple_core::models::{Embedding, Tuple};

/// Every index in `tuple` must be a row of `ground_truth`.
pub(crate) fn check_tuple(ground_truth: &Embedding, tuple: &Tuple) -> OracleResult<()> {
    for &item in tuple.items() {
        ground_truth.check_index(item)?;
    }
    Ok(())
}
