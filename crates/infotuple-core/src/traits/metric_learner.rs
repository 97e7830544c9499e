use crate::errors::LearnerResult;
use crate::models::{Embedding, FitBudget, FitOutcome, Response, Triplet};

/// Fits an embedding to ordinal constraints.
pub trait IMetricLearner: Send + Sync {
    /// Fit starting from `initial`. Responses are decomposed into triplets
    /// before optimization; `evaluation`, when given, picks the best
    /// iterate instead of the training loss.
    fn fit(
        &self,
        initial: &Embedding,
        constraints: &[Response],
        evaluation: Option<&[Triplet]>,
        budget: &FitBudget,
    ) -> LearnerResult<FitOutcome>;
}
