//! # infotuple-learner
//!
//! Probabilistic multidimensional scaling: gradient descent on the mean
//! negative log response probability of a set of triplet constraints,
//! with the embedding renormalized to unit Frobenius norm after each step.

pub mod engine;
pub mod gradient;
pub mod loss;

pub use engine::ProbabilisticMds;
pub use gradient::gradient;
pub use loss::{empirical_loss, log_loss, selection_loss};

use infotuple_core::errors::{LearnerError, LearnerResult};
use infotuple_core::models::{Embedding, Triplet};

/// Fails on the first triplet referencing a row `embedding` doesn't have.
pub fn check_triplets(embedding: &Embedding, triplets: &[Triplet]) -> LearnerResult<()> {
    let n_items = embedding.n_items();
    match triplets.iter().map(Triplet::max_index).find(|&i| i >= n_items) {
        Some(index) => Err(LearnerError::ItemOutOfRange { index, n_items }),
        None => Ok(()),
    }
}
