//! Plain numeric data structures exchanged between the engine and its callers.

pub mod embedding;
pub mod fit;
pub mod rng_state;
pub mod selection;
pub mod tuple;

pub use embedding::Embedding;
pub use fit::{CancellationToken, FitBudget, FitOutcome, FitStatus, IterationReport};
pub use rng_state::{RngState, RNG_STATE_VERSION};
pub use selection::Selection;
pub use tuple::{decompose_all, Response, Triplet, Tuple};
