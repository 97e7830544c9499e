use serde::{Deserialize, Serialize};

use super::defaults;

/// Shape and schedule of one experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Number of items N.
    pub n_items: usize,
    /// Embedding dimensionality d.
    pub dims: usize,
    /// Number of body items k shown with each head.
    pub body_size: usize,
    /// Burn-in sweeps served with random bodies.
    pub burn_in: usize,
    /// Total sweeps per participant (burn-in included) or main-loop
    /// iterations for the offline driver.
    pub iterations: usize,
    /// Seed of the query-selection RNG stream.
    pub seed: u64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            n_items: defaults::DEFAULT_N_ITEMS,
            dims: defaults::DEFAULT_DIMS,
            body_size: defaults::DEFAULT_BODY_SIZE,
            burn_in: defaults::DEFAULT_BURN_IN,
            iterations: defaults::DEFAULT_ITERATIONS,
            seed: defaults::DEFAULT_SEED,
        }
    }
}
