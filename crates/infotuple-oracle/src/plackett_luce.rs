//! Noisy judge following a Plackett–Luce model with Pareto weights.
//!
//! With `P = 1 - failure_probability` and `D` the largest pairwise distance
//! in the ground truth,
//!
//! ```text
//! alpha = -ln(1 - P) / ln(D + 1)
//! w(d)  = alpha / (d + 1)^(alpha + 1)
//! ```
//!
//! Body items are drawn one at a time without replacement, each with
//! probability proportional to its weight among those still remaining.

use infotuple_core::errors::{ModelError, OracleError, OracleResult};
use infotuple_core::models::{Embedding, Response, Tuple};
use infotuple_core::traits::IOracle;
use rand::distributions::{Distribution, WeightedIndex};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::check_tuple;

#[derive(Debug, Clone)]
pub struct PlackettLuceOracle {
    ground_truth: Embedding,
    alpha: f64,
    rng: ChaCha8Rng,
}

impl PlackettLuceOracle {
    /// Build an oracle with its own stream seeded from `seed`.
    pub fn new(ground_truth: Embedding, failure_probability: f64, seed: u64) -> OracleResult<Self> {
        if !(failure_probability > 0.0 && failure_probability < 1.0) {
            return Err(OracleError::InvalidFailureProbability {
                value: failure_probability,
            });
        }
        if ground_truth.n_items() < 2 {
            return Err(ModelError::InsufficientItems {
                required: 2,
                actual: ground_truth.n_items(),
            }
            .into());
        }
        let max_distance = ground_truth
            .pairwise_distances()
            .into_iter()
            .fold(0.0_f64, f64::max);
        if !(max_distance.is_finite() && max_distance > 0.0) {
            return Err(OracleError::DegenerateGroundTruth { max_distance });
        }

        let confidence = 1.0 - failure_probability;
        let alpha = -(1.0 - confidence).ln() / (max_distance + 1.0).ln();
        debug!(alpha, max_distance, "plackett-luce oracle ready");

        Ok(Self {
            ground_truth,
            alpha,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Unnormalized Pareto weight of an item at `distance` from the head.
    pub fn weight(&self, distance: f64) -> f64 {
        self.alpha / (distance + 1.0).powf(self.alpha + 1.0)
    }

    pub fn ground_truth(&self) -> &Embedding {
        &self.ground_truth
    }
}

impl IOracle for PlackettLuceOracle {
    fn respond(&mut self, tuple: &Tuple) -> OracleResult<Response> {
        check_tuple(&self.ground_truth, tuple)?;
        let head = tuple.head();
        let mut remaining: Vec<usize> = tuple.body().to_vec();
        let mut weights: Vec<f64> = remaining
            .iter()
            .map(|&b| self.weight(self.ground_truth.distance(head, b)))
            .collect();

        let mut ranked = Vec::with_capacity(remaining.len());
        while !remaining.is_empty() {
            let pick = WeightedIndex::new(&weights)
                .map_err(|_| OracleError::ZeroWeights)?
                .sample(&mut self.rng);
            ranked.push(remaining.remove(pick));
            weights.remove(pick);
        }
        Ok(Response::new(head, ranked)?)
    }
}
