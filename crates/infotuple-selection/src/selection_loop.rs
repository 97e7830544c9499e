//! Offline active learning driver.
//!
//! Burn-in rounds query random bodies for every head, then each main-loop
//! iteration sweeps every head through the selector and the oracle and
//! refits on the whole accumulated history.

use std::time::Duration;

use infotuple_core::config::ExperimentConfig;
use infotuple_core::errors::InfoTupleResult;
use infotuple_core::models::{Embedding, FitBudget, Response, Tuple};
use infotuple_core::traits::{IBodySelector, IMetricLearner, IOracle};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{candidate_tuples, random_tuple};

/// Per-run trace. Recorded for inspection only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Embedding at the start of each iteration, plus the final one.
    pub embeddings: Vec<Embedding>,
    pub burn_in_responses: Vec<Response>,
    pub selections: Vec<Tuple>,
    pub gains: Vec<Vec<f64>>,
    pub responses: Vec<Response>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopOutcome {
    pub embedding: Embedding,
    /// Burn-in triplets (as length-3 responses) followed by every
    /// main-loop response, in query order.
    pub history: Vec<Response>,
    pub diagnostics: Option<Diagnostics>,
}

pub struct SelectionLoop<O, L, S> {
    oracle: O,
    learner: L,
    selector: S,
    body_size: usize,
    burn_in: usize,
    iterations: usize,
    refit_budget: Option<Duration>,
    record_diagnostics: bool,
}

impl<O, L, S> SelectionLoop<O, L, S>
where
    O: IOracle,
    L: IMetricLearner,
    S: IBodySelector,
{
    pub fn new(experiment: &ExperimentConfig, oracle: O, learner: L, selector: S) -> Self {
        Self {
            oracle,
            learner,
            selector,
            body_size: experiment.body_size,
            burn_in: experiment.burn_in,
            iterations: experiment.iterations,
            refit_budget: None,
            record_diagnostics: false,
        }
    }

    /// Soft wall-clock limit per refit; an exhausted refit keeps the
    /// pre-refit embedding.
    pub fn with_refit_budget(mut self, budget: Duration) -> Self {
        self.refit_budget = Some(budget);
        self
    }

    pub fn with_diagnostics(mut self, record: bool) -> Self {
        self.record_diagnostics = record;
        self
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn run(
        &mut self,
        initial: &Embedding,
        rng: &mut dyn RngCore,
    ) -> InfoTupleResult<LoopOutcome> {
        let n_items = initial.n_items();
        let mut diagnostics = self.record_diagnostics.then(Diagnostics::default);
        let mut history: Vec<Response> = Vec::new();

        info!(n_items, burn_in = self.burn_in, "burn-in started");
        for _ in 0..self.burn_in {
            for head in 0..n_items {
                let tuple = random_tuple(n_items, head, self.body_size, rng)?;
                let response = self.oracle.respond(&tuple)?;
                history.extend(response.decompose().into_iter().map(Response::from));
                if let Some(d) = diagnostics.as_mut() {
                    d.burn_in_responses.push(response);
                }
            }
        }

        let mut embedding = initial.clone();
        if !history.is_empty() {
            embedding = self.refit(&embedding, &history)?;
        }

        for iteration in 0..self.iterations {
            info!(iteration, constraints = history.len(), "selection sweep");
            if let Some(d) = diagnostics.as_mut() {
                d.embeddings.push(embedding.clone());
            }
            for head in 0..n_items {
                let candidates = candidate_tuples(n_items, head, self.body_size)?;
                let selection = self.selector.select(&embedding, candidates, rng)?;
                let response = self.oracle.respond(&selection.tuple)?;
                debug!(head, response = ?response.items(), "oracle answered");
                if let Some(d) = diagnostics.as_mut() {
                    d.selections.push(selection.tuple);
                    d.gains.push(selection.gains);
                    d.responses.push(response.clone());
                }
                history.push(response);
            }
            embedding = self.refit(&embedding, &history)?;
        }

        if let Some(d) = diagnostics.as_mut() {
            d.embeddings.push(embedding.clone());
        }
        Ok(LoopOutcome {
            embedding,
            history,
            diagnostics,
        })
    }

    fn refit(&self, warm_start: &Embedding, history: &[Response]) -> InfoTupleResult<Embedding> {
        let budget = match self.refit_budget {
            Some(limit) => FitBudget::with_time_limit(limit),
            None => FitBudget::unlimited(),
        };
        let outcome = self.learner.fit(warm_start, history, None, &budget)?;
        if !outcome.is_completed() {
            warn!(status = ?outcome.status, "refit did not complete, keeping previous embedding");
            return Ok(warm_start.clone());
        }
        Ok(outcome.embedding)
    }
}
