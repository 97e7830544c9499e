//! Losses over triplet constraints.

use infotuple_core::config::SelectionLoss;
use infotuple_core::errors::{LearnerError, LearnerResult};
use infotuple_core::models::{Embedding, Triplet};
use infotuple_response::pair_probability;

/// Fraction of triplets whose `closer` item is strictly farther from the
/// head than `farther`.
pub fn empirical_loss(embedding: &Embedding, triplets: &[Triplet]) -> LearnerResult<f64> {
    if triplets.is_empty() {
        return Err(LearnerError::EmptyConstraints);
    }
    let violated = triplets
        .iter()
        .filter(|t| {
            embedding.distance(t.head, t.closer) > embedding.distance(t.head, t.farther)
        })
        .count();
    Ok(violated as f64 / triplets.len() as f64)
}

/// Mean negative log probability of the triplets under the response model.
pub fn log_loss(embedding: &Embedding, triplets: &[Triplet], mu: f64) -> LearnerResult<f64> {
    if triplets.is_empty() {
        return Err(LearnerError::EmptyConstraints);
    }
    let mut total = 0.0;
    for t in triplets {
        let p = pair_probability(
            embedding.distance(t.head, t.closer),
            embedding.distance(t.head, t.farther),
            mu,
        )?;
        total -= p.ln();
    }
    Ok(total / triplets.len() as f64)
}

/// The loss used to rank iterates.
pub fn selection_loss(
    kind: SelectionLoss,
    embedding: &Embedding,
    triplets: &[Triplet],
    mu: f64,
) -> LearnerResult<f64> {
    match kind {
        SelectionLoss::Empirical => empirical_loss(embedding, triplets),
        SelectionLoss::Log => log_loss(embedding, triplets, mu),
    }
}
