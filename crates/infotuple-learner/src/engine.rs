//! ProbabilisticMds: implements IMetricLearner.

use infotuple_core::config::{LearnerConfig, SelectionLoss};
use infotuple_core::errors::{LearnerError, LearnerResult, ModelError};
use infotuple_core::models::{
    decompose_all, Embedding, FitBudget, FitOutcome, FitStatus, IterationReport, Response, Triplet,
};
use infotuple_core::traits::IMetricLearner;
use tracing::{debug, info, warn};

use crate::{check_triplets, gradient, selection_loss};

/// Scores a degenerate model denominator as an infinitely bad iterate.
fn finite_or_worst(loss: LearnerResult<f64>) -> LearnerResult<f64> {
    match loss {
        Err(LearnerError::Model(ModelError::DegenerateDenominator { .. })) => Ok(f64::INFINITY),
        other => other,
    }
}

/// Gradient-descent metric learner with momentum and unit-norm projection.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilisticMds {
    mu: f64,
    iterations: usize,
    learning_rate: f64,
    momentum: f64,
    selection_loss: SelectionLoss,
}

impl Default for ProbabilisticMds {
    fn default() -> Self {
        Self::from_config(&LearnerConfig::default())
    }
}

impl ProbabilisticMds {
    pub fn from_config(config: &LearnerConfig) -> Self {
        Self {
            mu: config.mu,
            iterations: config.iterations,
            learning_rate: config.learning_rate,
            momentum: config.momentum,
            selection_loss: config.selection_loss,
        }
    }

    pub fn with_mu(mut self, mu: f64) -> Self {
        self.mu = mu;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_momentum(mut self, momentum: f64) -> Self {
        self.momentum = momentum;
        self
    }

    pub fn with_selection_loss(mut self, selection_loss: SelectionLoss) -> Self {
        self.selection_loss = selection_loss;
        self
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Fit directly on decomposed triplets.
    pub fn fit_triplets(
        &self,
        initial: &Embedding,
        triplets: &[Triplet],
        evaluation: Option<&[Triplet]>,
        budget: &FitBudget,
    ) -> LearnerResult<FitOutcome> {
        if triplets.is_empty() {
            return Err(LearnerError::EmptyConstraints);
        }
        check_triplets(initial, triplets)?;
        let evaluation = evaluation.filter(|e| !e.is_empty());
        if let Some(eval) = evaluation {
            check_triplets(initial, eval)?;
        }
        let score = |x: &Embedding| -> LearnerResult<f64> {
            finite_or_worst(selection_loss(
                self.selection_loss,
                x,
                evaluation.unwrap_or(triplets),
                self.mu,
            ))
        };

        let iterations = self.iterations.max(1);
        let initial_loss = score(initial)?;
        let mut x = initial.clone();
        let mut best = initial.clone();
        let mut best_loss = initial_loss;
        let mut previous = vec![0.0; x.as_slice().len()];
        let mut trajectory = Vec::with_capacity(iterations);

        for iteration in 0..iterations {
            if let Some(status) = budget.exceeded() {
                warn!(
                    ?status,
                    iteration,
                    n_triplets = triplets.len(),
                    "fit stopped early, reverting to the initial embedding"
                );
                return Ok(FitOutcome {
                    embedding: initial.clone(),
                    best_loss: initial_loss,
                    iterations_run: iteration,
                    status,
                    trajectory,
                });
            }

            let grad = gradient(&x, triplets, self.mu)?;
            for ((xi, g), prev) in x.as_mut_slice().iter_mut().zip(&grad).zip(&previous) {
                *xi -= self.learning_rate * g + self.momentum * prev;
            }
            previous = grad;

            if !x.normalize() {
                warn!(iteration, "embedding collapsed to zero norm, keeping best iterate");
                break;
            }

            let training_loss =
                finite_or_worst(selection_loss(self.selection_loss, &x, triplets, self.mu))?;
            let loss = match evaluation {
                Some(_) => score(&x)?,
                None => training_loss,
            };
            trajectory.push(IterationReport {
                iteration,
                training_loss,
                frobenius_norm: x.frobenius_norm(),
            });
            debug!(iteration, training_loss, loss, "fit step");

            if loss < best_loss {
                best_loss = loss;
                best.clone_from(&x);
            }
        }

        info!(
            n_triplets = triplets.len(),
            iterations_run = trajectory.len(),
            initial_loss,
            best_loss,
            "fit complete"
        );
        Ok(FitOutcome {
            embedding: best,
            best_loss,
            iterations_run: trajectory.len(),
            status: FitStatus::Completed,
            trajectory,
        })
    }
}

impl IMetricLearner for ProbabilisticMds {
    fn fit(
        &self,
        initial: &Embedding,
        constraints: &[Response],
        evaluation: Option<&[Triplet]>,
        budget: &FitBudget,
    ) -> LearnerResult<FitOutcome> {
        let triplets = decompose_all(constraints);
        self.fit_triplets(initial, &triplets, evaluation, budget)
    }
}
