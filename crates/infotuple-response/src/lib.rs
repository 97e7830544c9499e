//! # infotuple-response
//!
//! The probabilistic law relating head-to-body distances to the probability
//! of an observed ranking, and the Monte-Carlo estimate of how much a
//! candidate query is expected to reveal about the embedding.

pub mod estimator;
pub mod model;

pub use estimator::{
    distance_spread, estimate, information_gain, information_gain_batched, samples_for,
};
pub use model::{
    entropy, normalize_in_place, ordering_distribution, pair_probability, tuple_probability,
};
