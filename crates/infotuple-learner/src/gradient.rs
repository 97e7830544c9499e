//! Analytic gradient of [`log_loss`](crate::log_loss).
//!
//! For one triplet with `b = x_h - x_j` (closer) and `c = x_h - x_k`
//! (farther), the loss is `ln D - ln N` with `N = mu + |c|^2` and
//! `D = 2 mu + |b|^2 + |c|^2`:
//!
//! ```text
//! dL/dx_h = -2c/N + (2b + 2c)/D
//! dL/dx_j = -2b/D
//! dL/dx_k =  2c/N - 2c/D
//! ```
//!
//! Triplets where `N` vanishes (head and farther item coincide with
//! `mu = 0`) contribute nothing to the step.

use infotuple_core::errors::{LearnerError, LearnerResult};
use infotuple_core::models::{Embedding, Triplet};

/// Mean gradient over `triplets`, laid out like [`Embedding::as_slice`].
pub fn gradient(embedding: &Embedding, triplets: &[Triplet], mu: f64) -> LearnerResult<Vec<f64>> {
    if triplets.is_empty() {
        return Err(LearnerError::EmptyConstraints);
    }
    let dims = embedding.dims();
    let mut grad = vec![0.0; embedding.as_slice().len()];
    let mut b = vec![0.0; dims];
    let mut c = vec![0.0; dims];

    for t in triplets {
        let (xh, xj, xk) = (
            embedding.row(t.head),
            embedding.row(t.closer),
            embedding.row(t.farther),
        );
        for d in 0..dims {
            b[d] = xh[d] - xj[d];
            c[d] = xh[d] - xk[d];
        }
        let b_sq: f64 = b.iter().map(|v| v * v).sum();
        let c_sq: f64 = c.iter().map(|v| v * v).sum();
        let numerator = mu + c_sq;
        let denominator = 2.0 * mu + b_sq + c_sq;
        if !(numerator > 0.0 && denominator.is_finite()) {
            continue;
        }

        let over_n = 2.0 / numerator;
        let over_d = 2.0 / denominator;
        for d in 0..dims {
            grad[t.head * dims + d] += -c[d] * over_n + (b[d] + c[d]) * over_d;
            grad[t.closer * dims + d] += -b[d] * over_d;
            grad[t.farther * dims + d] += c[d] * over_n - c[d] * over_d;
        }
    }

    let scale = 1.0 / triplets.len() as f64;
    for g in &mut grad {
        *g *= scale;
    }
    Ok(grad)
}
