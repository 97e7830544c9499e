//! Body selection strategies.

use infotuple_core::config::{EstimatorKind, ResponseModelConfig, SelectorConfig, SelectorStrategy};
use infotuple_core::errors::{SelectorError, SelectorResult};
use infotuple_core::models::{Embedding, Selection, Tuple};
use infotuple_core::traits::IBodySelector;
use infotuple_response::{distance_spread, estimate, samples_for, tuple_probability};
use rand::seq::index::sample;
use rand::{Rng, RngCore};
use tracing::debug;

/// Parameters of the information-maximizing strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainSettings {
    pub mu: f64,
    /// Fraction of candidates evaluated, in (0, 1].
    pub downsample_rate: f64,
    pub samples_divisor: usize,
    pub estimator: EstimatorKind,
}

impl GainSettings {
    pub fn from_config(selector: &SelectorConfig, response_model: &ResponseModelConfig) -> Self {
        Self {
            mu: response_model.mu,
            downsample_rate: selector.downsample_rate,
            samples_divisor: selector.samples_divisor,
            estimator: selector.estimator,
        }
    }
}

/// The closed set of selection strategies, chosen at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodySelector {
    InformationMaximizing(GainSettings),
    /// Uniform baseline.
    Random,
}

impl BodySelector {
    pub fn from_config(selector: &SelectorConfig, response_model: &ResponseModelConfig) -> Self {
        match selector.strategy {
            SelectorStrategy::InformationGain => {
                Self::InformationMaximizing(GainSettings::from_config(selector, response_model))
            }
            SelectorStrategy::Random => Self::Random,
        }
    }
}

impl IBodySelector for BodySelector {
    fn select(
        &self,
        embedding: &Embedding,
        candidates: Vec<Tuple>,
        rng: &mut dyn RngCore,
    ) -> SelectorResult<Selection> {
        match self {
            Self::InformationMaximizing(settings) => {
                select_body(embedding, candidates, settings, rng)
            }
            Self::Random => select_random(candidates, rng),
        }
    }
}

/// Keep `max(1, floor(len * rate))` candidates, drawn without replacement.
/// At rate 1 every candidate is kept in its original order.
fn downsample<R: Rng + ?Sized>(
    candidates: Vec<Tuple>,
    rate: f64,
    rng: &mut R,
) -> SelectorResult<Vec<Tuple>> {
    if !(rate > 0.0 && rate <= 1.0) {
        return Err(SelectorError::InvalidDownsampleRate { rate });
    }
    let len = candidates.len();
    let keep = ((len as f64 * rate).floor() as usize).clamp(1, len);
    if keep == len {
        return Ok(candidates);
    }
    let mut slots: Vec<Option<Tuple>> = candidates.into_iter().map(Some).collect();
    Ok(sample(rng, len, keep)
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect())
}

/// Pick the candidate with the largest estimated information gain.
///
/// Ties go to the earliest survivor. `probabilities[i]` is the response
/// model probability of survivor `i`'s own ordering under `embedding`.
pub fn select_body<R: Rng + ?Sized>(
    embedding: &Embedding,
    candidates: Vec<Tuple>,
    settings: &GainSettings,
    rng: &mut R,
) -> SelectorResult<Selection> {
    if candidates.is_empty() {
        return Err(SelectorError::EmptyCandidates);
    }
    let survivors = downsample(candidates, settings.downsample_rate, rng)?;
    let dist_std = distance_spread(embedding)?;
    let n_samples = samples_for(embedding.n_items(), settings.samples_divisor);

    let mut gains = Vec::with_capacity(survivors.len());
    let mut probabilities = Vec::with_capacity(survivors.len());
    for tuple in &survivors {
        let head = tuple.head();
        gains.push(estimate(
            settings.estimator,
            embedding,
            head,
            tuple.body(),
            n_samples,
            dist_std,
            settings.mu,
            rng,
        )?);
        let distances: Vec<f64> = tuple
            .body()
            .iter()
            .map(|&b| embedding.distance(head, b))
            .collect();
        probabilities.push(tuple_probability(&distances, settings.mu)?);
    }

    let mut best = 0;
    for (i, &gain) in gains.iter().enumerate().skip(1) {
        if gain > gains[best] {
            best = i;
        }
    }
    debug!(
        head = survivors[best].head(),
        evaluated = survivors.len(),
        gain = gains[best],
        "selected body"
    );

    let mut survivors = survivors;
    Ok(Selection {
        tuple: survivors.swap_remove(best),
        gains,
        probabilities,
    })
}

/// Uniformly random candidate; gains and probabilities stay empty.
pub fn select_random<R: Rng + ?Sized>(
    candidates: Vec<Tuple>,
    rng: &mut R,
) -> SelectorResult<Selection> {
    if candidates.is_empty() {
        return Err(SelectorError::EmptyCandidates);
    }
    let pick = rng.gen_range(0..candidates.len());
    let mut candidates = candidates;
    Ok(Selection {
        tuple: candidates.swap_remove(pick),
        gains: Vec::new(),
        probabilities: Vec::new(),
    })
}
