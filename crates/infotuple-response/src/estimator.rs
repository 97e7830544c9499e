//! Monte-Carlo mutual information between noisy distance observations and
//! the ranking a judge would return for `(head, body)`.
//!
//! Each sample perturbs every head-to-body distance with Gaussian noise,
//! scores all `|body|!` orderings with the response model, and normalizes
//! them into a distribution over rankings. The estimate is
//!
//! ```text
//! H(mean over samples of p) - mean over samples of H(p)
//! ```
//!
//! which is non-negative by concavity of entropy, up to rounding.
//!
//! Two implementations share one RNG draw order (sample, then ordering,
//! then body position) and therefore agree for the same stream:
//! [`information_gain`] walks orderings one at a time, and
//! [`information_gain_batched`] lays each sample out as one
//! `orderings × positions` matrix.

use infotuple_core::config::EstimatorKind;
use infotuple_core::errors::{ModelError, ModelResult};
use infotuple_core::models::Embedding;
use infotuple_core::permutations::permutations;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::model::{entropy, normalize_in_place, pair_probability, tuple_probability};

/// Population standard deviation of all pairwise distances in `embedding`.
pub fn distance_spread(embedding: &Embedding) -> ModelResult<f64> {
    if embedding.n_items() < 2 {
        return Err(ModelError::InsufficientItems {
            required: 2,
            actual: embedding.n_items(),
        });
    }
    let distances = embedding.pairwise_distances();
    let n = distances.len() as f64;
    let mean = distances.iter().sum::<f64>() / n;
    let variance = distances.iter().map(|d| (d - mean) * (d - mean)).sum::<f64>() / n;
    Ok(variance.sqrt())
}

/// Monte-Carlo sample count for an embedding of `n_items`:
/// `max(1, n_items / divisor)`.
pub fn samples_for(n_items: usize, divisor: usize) -> usize {
    (n_items / divisor.max(1)).max(1)
}

/// Dispatch to the configured estimator.
#[allow(clippy::too_many_arguments)]
pub fn estimate<R: Rng + ?Sized>(
    kind: EstimatorKind,
    embedding: &Embedding,
    head: usize,
    body: &[usize],
    n_samples: usize,
    dist_std: f64,
    mu: f64,
    rng: &mut R,
) -> ModelResult<f64> {
    match kind {
        EstimatorKind::Reference => {
            information_gain(embedding, head, body, n_samples, dist_std, mu, rng)
        }
        EstimatorKind::Batched => {
            information_gain_batched(embedding, head, body, n_samples, dist_std, mu, rng)
        }
    }
}

fn head_distances(embedding: &Embedding, head: usize, body: &[usize]) -> ModelResult<Vec<f64>> {
    if body.len() < 2 {
        return Err(ModelError::SequenceTooShort { len: body.len() });
    }
    embedding.check_index(head)?;
    body.iter()
        .map(|&b| {
            embedding.check_index(b)?;
            Ok(embedding.distance(head, b))
        })
        .collect()
}

#[inline]
fn perturb<R: Rng + ?Sized>(mean: f64, std: f64, rng: &mut R) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    (mean + std * z).abs()
}

/// Running sums shared by both estimators.
struct GainAccumulator {
    marginal: Vec<f64>,
    entropy_sum: f64,
    samples: usize,
}

impl GainAccumulator {
    fn new(orderings: usize) -> Self {
        Self {
            marginal: vec![0.0; orderings],
            entropy_sum: 0.0,
            samples: 0,
        }
    }

    fn push(&mut self, sample: &mut [f64]) -> ModelResult<()> {
        normalize_in_place(sample)?;
        self.entropy_sum += entropy(sample);
        for (m, p) in self.marginal.iter_mut().zip(sample.iter()) {
            *m += p;
        }
        self.samples += 1;
        Ok(())
    }

    fn finish(mut self) -> f64 {
        let n = self.samples as f64;
        for m in &mut self.marginal {
            *m /= n;
        }
        entropy(&self.marginal) - self.entropy_sum / n
    }
}

/// Reference estimator: one ordering at a time.
pub fn information_gain<R: Rng + ?Sized>(
    embedding: &Embedding,
    head: usize,
    body: &[usize],
    n_samples: usize,
    dist_std: f64,
    mu: f64,
    rng: &mut R,
) -> ModelResult<f64> {
    let true_distances = head_distances(embedding, head, body)?;
    let positions: Vec<usize> = (0..body.len()).collect();
    let orderings = permutations(&positions);

    let mut acc = GainAccumulator::new(orderings.len());
    let mut sample = Vec::with_capacity(orderings.len());
    let mut noisy = vec![0.0; body.len()];

    for _ in 0..n_samples.max(1) {
        sample.clear();
        for ordering in &orderings {
            for (slot, &pos) in noisy.iter_mut().zip(ordering) {
                *slot = perturb(true_distances[pos], dist_std, rng);
            }
            sample.push(tuple_probability(&noisy, mu)?);
        }
        acc.push(&mut sample)?;
    }
    Ok(acc.finish())
}

/// Batched estimator: each sample is one flat `orderings × positions`
/// matrix of noisy distances, reduced through windowed pair probabilities.
pub fn information_gain_batched<R: Rng + ?Sized>(
    embedding: &Embedding,
    head: usize,
    body: &[usize],
    n_samples: usize,
    dist_std: f64,
    mu: f64,
    rng: &mut R,
) -> ModelResult<f64> {
    let true_distances = head_distances(embedding, head, body)?;
    let k = body.len();
    let positions: Vec<usize> = (0..k).collect();
    let orderings = permutations(&positions);
    let rows = orderings.len();

    let base: Vec<f64> = orderings
        .iter()
        .flat_map(|ordering| ordering.iter().map(|&pos| true_distances[pos]))
        .collect();
    let mut noisy = vec![0.0; rows * k];
    let mut pairs = vec![0.0; rows * (k - 1)];
    let mut probs = vec![0.0; rows];
    let mut acc = GainAccumulator::new(rows);

    for _ in 0..n_samples.max(1) {
        for (slot, &mean) in noisy.iter_mut().zip(&base) {
            *slot = perturb(mean, dist_std, rng);
        }
        for (row, out) in noisy.chunks_exact(k).zip(pairs.chunks_exact_mut(k - 1)) {
            for (w, o) in row.windows(2).zip(out.iter_mut()) {
                *o = pair_probability(w[0], w[1], mu)?;
            }
        }
        for (p, row) in probs.iter_mut().zip(pairs.chunks_exact(k - 1)) {
            *p = row.iter().fold(1.0, |acc, x| acc * x);
        }
        acc.push(&mut probs)?;
    }
    Ok(acc.finish())
}
