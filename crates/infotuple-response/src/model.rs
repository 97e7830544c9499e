//! Tuplewise response model.
//!
//! For a head `a` and adjacent ranked items `b` (earlier) and `c` (later):
//!
//! ```text
//! P(b before c) = (mu + |a - c|^2) / (2 mu + |a - b|^2 + |a - c|^2)
//! ```
//!
//! A full ranking's probability is the product over its adjacent pairs.

use infotuple_core::errors::{ModelError, ModelResult};

/// Probability that the item at `b_dist` is ranked ahead of the item at
/// `c_dist`.
///
/// Fails instead of returning `NaN` when `b_dist == c_dist == 0` and
/// `mu == 0`.
pub fn pair_probability(b_dist: f64, c_dist: f64, mu: f64) -> ModelResult<f64> {
    let c_sq = c_dist * c_dist;
    let denominator = 2.0 * mu + b_dist * b_dist + c_sq;
    if !denominator.is_finite() || denominator <= 0.0 {
        return Err(ModelError::DegenerateDenominator { b_dist, c_dist, mu });
    }
    Ok((mu + c_sq) / denominator)
}

/// Joint probability of the ranking whose head distances are `distances`,
/// in ranked order.
pub fn tuple_probability(distances: &[f64], mu: f64) -> ModelResult<f64> {
    if distances.len() < 2 {
        return Err(ModelError::SequenceTooShort {
            len: distances.len(),
        });
    }
    distances
        .windows(2)
        .try_fold(1.0, |acc, w| Ok(acc * pair_probability(w[0], w[1], mu)?))
}

/// Scale `weights` to sum to one.
///
/// A set with no mass is reported as [`ModelError::DegenerateSample`]
/// rather than replaced with a uniform guess.
pub fn normalize_in_place(weights: &mut [f64]) -> ModelResult<()> {
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(ModelError::DegenerateSample);
    }
    for w in weights.iter_mut() {
        *w /= total;
    }
    Ok(())
}

/// Normalized distribution over a set of orderings, each given as its
/// ranked head distances.
pub fn ordering_distribution<D: AsRef<[f64]>>(orderings: &[D], mu: f64) -> ModelResult<Vec<f64>> {
    let mut weights = orderings
        .iter()
        .map(|distances| tuple_probability(distances.as_ref(), mu))
        .collect::<ModelResult<Vec<f64>>>()?;
    normalize_in_place(&mut weights)?;
    Ok(weights)
}

/// Shannon entropy in nats; zero-probability terms contribute nothing.
pub fn entropy(distribution: &[f64]) -> f64 {
    -distribution
        .iter()
        .filter(|&&p| p > 0.0)
        .map(|&p| p * p.ln())
        .sum::<f64>()
}
