//! State transitions of the experiment engine.
//!
//! Query selection draws from one RNG stream that is restored from an
//! [`RngState`] at the start of every call and checkpointed at the end, so
//! the stream survives between isolated calls.

use std::time::Duration;

use infotuple_core::config::InfoTupleConfig;
use infotuple_core::errors::{SessionError, SessionResult};
use infotuple_core::models::{
    CancellationToken, Embedding, FitBudget, FitStatus, Response, RngState, Triplet, Tuple,
};
use infotuple_core::traits::{IBodySelector, IMetricLearner};
use infotuple_selection::{candidate_tuples, random_tuple, BodySelector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::aggregate::SharedAggregate;
use crate::participant::ParticipantState;

/// Collaborators shared by every step.
pub struct StepContext<'a, L> {
    pub config: &'a InfoTupleConfig,
    pub learner: &'a L,
    pub selector: &'a BodySelector,
    /// Checked between gradient steps of every refit.
    pub cancel: Option<&'a CancellationToken>,
}

impl<L> Clone for StepContext<'_, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L> Copy for StepContext<'_, L> {}

impl<L> StepContext<'_, L> {
    fn budget(&self, limit: Duration) -> FitBudget {
        let budget = FitBudget::with_time_limit(limit);
        match self.cancel {
            Some(token) => budget.with_cancellation(token.clone()),
            None => budget,
        }
    }
}

/// Result of [`next_query`].
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub participant: ParticipantState,
    pub tuple: Tuple,
    pub rng_state: RngState,
}

/// How one refit ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RefitReport {
    pub status: FitStatus,
    pub best_loss: f64,
    pub iterations_run: usize,
    /// Whether the fitted embedding replaced the previous one.
    pub applied: bool,
}

/// Result of [`record_response`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordOutcome {
    pub num_reported_answers: u64,
    /// The answer closed a sweep over every head.
    pub sweep_completed: bool,
    pub participant_refit: Option<RefitReport>,
    pub aggregate_refit: Option<RefitReport>,
}

fn check_shape(participant: &ParticipantState, n_items: usize, dims: usize) -> SessionResult<()> {
    if participant.embedding.dims() != dims {
        return Err(SessionError::DimensionMismatch {
            participant: participant.id.clone(),
            expected: dims,
            actual: participant.embedding.dims(),
        });
    }
    if participant.embedding.n_items() != n_items {
        return Err(SessionError::ItemCountMismatch {
            participant: participant.id.clone(),
            expected: n_items,
            actual: participant.embedding.n_items(),
        });
    }
    Ok(())
}

/// Serve the next query to `id`.
///
/// `participant` is `None` for a participant never seen before; one is
/// created with a uniform random embedding drawn from the restored stream.
/// Burn-in sweeps get a random body, later sweeps run the selector on the
/// participant's embedding. The item count and dimensionality come from the
/// experiment config, so serving a query never waits on the aggregate.
pub fn next_query<L>(
    ctx: StepContext<'_, L>,
    participant: Option<ParticipantState>,
    id: &str,
    rng_state: &RngState,
) -> SessionResult<QueryOutcome> {
    let n_items = ctx.config.experiment.n_items;
    let dims = ctx.config.experiment.dims;
    let mut rng = rng_state.restore()?;

    let mut participant = match participant {
        Some(p) => p,
        None => {
            info!(participant = id, "new participant");
            ParticipantState::new(id, Embedding::random_uniform(n_items, dims, &mut rng))
        }
    };
    check_shape(&participant, n_items, dims)?;

    let head = participant.head;
    let body_size = ctx.config.experiment.body_size;
    let tuple = if participant.in_burn_in(ctx.config.experiment.burn_in) {
        random_tuple(n_items, head, body_size, &mut rng)?
    } else {
        let candidates = candidate_tuples(n_items, head, body_size)?;
        ctx.selector
            .select(&participant.embedding, candidates, &mut rng)?
            .tuple
    };
    debug!(
        participant = id,
        iteration = participant.iteration,
        query = ?tuple.items(),
        "query served"
    );

    participant.pending = Some(tuple.clone());
    Ok(QueryOutcome {
        participant,
        tuple,
        rng_state: RngState::capture(&rng),
    })
}

/// Fit on a copy of `embedding`. The fitted embedding is returned only when
/// the fit completed.
fn refit<L: IMetricLearner>(
    learner: &L,
    embedding: &Embedding,
    triplets: &[Triplet],
    budget: &FitBudget,
) -> SessionResult<(RefitReport, Option<Embedding>)> {
    let constraints: Vec<Response> = triplets.iter().copied().map(Response::from).collect();
    let outcome = learner.fit(embedding, &constraints, None, budget)?;
    let applied = outcome.is_completed();
    let report = RefitReport {
        status: outcome.status,
        best_loss: outcome.best_loss,
        iterations_run: outcome.iterations_run,
        applied,
    };
    Ok((report, applied.then_some(outcome.embedding)))
}

fn check_answers_pending(
    participant: &ParticipantState,
    response: &Response,
) -> SessionResult<()> {
    if response.head() != participant.head {
        return Err(SessionError::HeadMismatch {
            participant: participant.id.clone(),
            expected: participant.head,
            found: response.head(),
        });
    }
    match &participant.pending {
        Some(query) if response.answers(query) => Ok(()),
        Some(query) => Err(SessionError::InvalidResponse {
            reason: format!(
                "{:?} is not a ranking of query {:?}",
                response.items(),
                query.items()
            ),
        }),
        None => Err(SessionError::InvalidResponse {
            reason: format!("participant {} has no outstanding query", participant.id),
        }),
    }
}

/// Fold `response` into the participant and the aggregate.
///
/// The response must answer the participant's outstanding query. When it
/// closes a sweep the participant's embedding is refit on its own
/// triplets; when that sweep was the participant's last scheduled one the
/// aggregate embedding is also refit on every triplet, under the aggregate
/// lock. Refits that run out of budget keep the previous embedding.
///
/// Nothing is committed unless every step succeeds: on `Err` the participant
/// and the aggregate are exactly as they were, and the same response can be
/// recorded again.
pub fn record_response<L: IMetricLearner>(
    ctx: StepContext<'_, L>,
    participant: &mut ParticipantState,
    aggregate: &SharedAggregate,
    response: &Response,
) -> SessionResult<RecordOutcome> {
    let (n_items, dims) = aggregate.shape()?;
    check_shape(participant, n_items, dims)?;
    check_answers_pending(participant, response)?;

    let triplets = response.decompose();
    let sweep_completed = participant.head + 1 >= n_items;
    let refit_aggregate =
        sweep_completed && participant.iteration + 1 == ctx.config.experiment.iterations;
    let learner_config = &ctx.config.learner;

    let mut own_triplets = participant.triplets.clone();
    own_triplets.extend_from_slice(&triplets);
    let participant_fit = if sweep_completed {
        Some(refit(
            ctx.learner,
            &participant.embedding,
            &own_triplets,
            &ctx.budget(learner_config.participant_time_budget()),
        )?)
    } else {
        None
    };

    let mut aggregate_refit = None;
    let num_reported_answers = {
        let mut state = aggregate.lock()?;
        let state = &mut *state;
        let committed = state.triplets.len();
        state.triplets.extend_from_slice(&triplets);
        if refit_aggregate {
            let budget = ctx.budget(learner_config.aggregate_time_budget());
            let fit = refit(ctx.learner, &state.embedding, &state.triplets, &budget);
            let (report, fitted) = match fit {
                Ok(fit) => fit,
                Err(err) => {
                    state.triplets.truncate(committed);
                    warn!(
                        participant = %participant.id,
                        error = %err,
                        "aggregate refit failed, answer not recorded"
                    );
                    return Err(err);
                }
            };
            match fitted {
                Some(embedding) => {
                    state.embedding = embedding;
                    info!(
                        participant = %participant.id,
                        triplets = state.triplets.len(),
                        best_loss = report.best_loss,
                        "aggregate embedding refit"
                    );
                }
                None => warn!(status = ?report.status, "aggregate refit reverted"),
            }
            aggregate_refit = Some(report);
        }
        state.num_reported_answers += 1;
        state.num_reported_answers
    };

    participant.pending = None;
    participant.triplets = own_triplets;
    let mut outcome = RecordOutcome {
        num_reported_answers,
        sweep_completed,
        participant_refit: None,
        aggregate_refit,
    };
    match participant_fit {
        None => participant.head += 1,
        Some((report, fitted)) => {
            match fitted {
                Some(embedding) => participant.embedding = embedding,
                None => warn!(
                    participant = %participant.id,
                    status = ?report.status,
                    "participant refit reverted"
                ),
            }
            outcome.participant_refit = Some(report);
            participant.head = 0;
            participant.iteration += 1;
            info!(
                participant = %participant.id,
                iteration = participant.iteration,
                "sweep completed"
            );
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::AggregateState;
    use infotuple_core::errors::{LearnerError, LearnerResult};
    use infotuple_core::models::FitOutcome;
    use infotuple_learner::ProbabilisticMds;

    /// Fails every fit over more than `limit` constraints.
    struct FailAbove {
        limit: usize,
    }

    impl IMetricLearner for FailAbove {
        fn fit(
            &self,
            initial: &Embedding,
            constraints: &[Response],
            _evaluation: Option<&[Triplet]>,
            _budget: &FitBudget,
        ) -> LearnerResult<FitOutcome> {
            if constraints.len() > self.limit {
                return Err(LearnerError::ItemOutOfRange {
                    index: 99,
                    n_items: initial.n_items(),
                });
            }
            Ok(FitOutcome {
                embedding: initial.clone(),
                best_loss: 0.0,
                iterations_run: 0,
                status: FitStatus::Completed,
                trajectory: Vec::new(),
            })
        }
    }

    struct Harness {
        config: InfoTupleConfig,
        learner: ProbabilisticMds,
        selector: BodySelector,
        token: Option<CancellationToken>,
    }

    impl Harness {
        fn new(configure: impl FnOnce(&mut InfoTupleConfig)) -> Self {
            let mut config = InfoTupleConfig::default();
            config.experiment.n_items = 4;
            config.experiment.body_size = 2;
            config.experiment.burn_in = 1;
            config.experiment.iterations = 1;
            config.learner.iterations = 20;
            configure(&mut config);
            Self {
                learner: ProbabilisticMds::from_config(&config.learner),
                selector: BodySelector::Random,
                config,
                token: None,
            }
        }

        fn ctx(&self) -> StepContext<'_, ProbabilisticMds> {
            self.ctx_with(&self.learner)
        }

        fn ctx_with<'a, L>(&'a self, learner: &'a L) -> StepContext<'a, L> {
            StepContext {
                config: &self.config,
                learner,
                selector: &self.selector,
                cancel: self.token.as_ref(),
            }
        }
    }

    /// A three-item participant about to close its only sweep, with two
    /// earlier triplets on each side.
    fn closing_sweep() -> (ParticipantState, SharedAggregate, Response) {
        let mut seeded = AggregateState::new(Embedding::zeros(3, 2));
        seeded.triplets = vec![Triplet::new(0, 1, 2), Triplet::new(1, 0, 2)];
        seeded.num_reported_answers = 2;
        let mut p = ParticipantState::new("p", Embedding::zeros(3, 2));
        p.triplets = seeded.triplets.clone();
        p.head = 2;
        p.pending = Some(Tuple::new(2, vec![0, 1]).unwrap());
        let response = Response::new(2, vec![1, 0]).unwrap();
        (p, SharedAggregate::new(seeded), response)
    }

    fn aggregate(n: usize, d: usize) -> SharedAggregate {
        SharedAggregate::new(AggregateState::new(Embedding::zeros(n, d)))
    }

    #[test]
    fn new_participant_gets_a_burn_in_query_for_head_zero() {
        let h = Harness::new(|_| {});
        let state = RngState::from_seed(1);
        let q = next_query(h.ctx(), None, "p1", &state).unwrap();
        assert_eq!(q.tuple.head(), 0);
        assert_eq!(q.tuple.body().len(), 2);
        assert_eq!(q.participant.pending.as_ref(), Some(&q.tuple));
        assert_eq!(q.participant.embedding.dims(), 2);
        assert!(q.rng_state.word_pos() > state.word_pos());
    }

    #[test]
    fn participant_with_wrong_dims_is_rejected() {
        let h = Harness::new(|_| {});
        let stranger = ParticipantState::new("p2", Embedding::zeros(4, 3));
        let err = next_query(h.ctx(), Some(stranger), "p2", &RngState::from_seed(1)).unwrap_err();
        assert!(matches!(
            err,
            SessionError::DimensionMismatch {
                expected: 2,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn response_must_answer_the_pending_query() {
        let h = Harness::new(|_| {});
        let shared = aggregate(4, 2);

        let mut p = ParticipantState::new("p", Embedding::zeros(4, 2));
        let unasked = Response::new(0, vec![1, 2]).unwrap();
        assert!(matches!(
            record_response(h.ctx(), &mut p, &shared, &unasked),
            Err(SessionError::InvalidResponse { .. })
        ));

        p.pending = Some(Tuple::new(0, vec![1, 2]).unwrap());
        let wrong_body = Response::new(0, vec![1, 3]).unwrap();
        assert!(matches!(
            record_response(h.ctx(), &mut p, &shared, &wrong_body),
            Err(SessionError::InvalidResponse { .. })
        ));

        let wrong_head = Response::new(1, vec![0, 2]).unwrap();
        assert!(matches!(
            record_response(h.ctx(), &mut p, &shared, &wrong_head),
            Err(SessionError::HeadMismatch {
                expected: 0,
                found: 1,
                ..
            })
        ));
        assert_eq!(shared.snapshot().unwrap().num_reported_answers, 0);
    }

    #[test]
    fn zero_budget_refit_keeps_previous_embeddings() {
        let h = Harness::new(|c| {
            c.learner.aggregate_time_budget_ms = 0;
            c.learner.participant_time_budget_ms = 0;
        });
        let start =
            Embedding::from_rows(&[vec![0.1, 0.2], vec![0.5, 0.9], vec![0.7, 0.3]]).unwrap();
        let shared = SharedAggregate::new(AggregateState::new(start.clone()));
        let mut p = ParticipantState::new("p", start.clone());

        for head in 0..3 {
            let body: Vec<usize> = (0..3).filter(|&i| i != head).collect();
            p.pending = Some(Tuple::new(head, body.clone()).unwrap());
            let response = Response::new(head, body).unwrap();
            let outcome = record_response(h.ctx(), &mut p, &shared, &response).unwrap();
            if head == 2 {
                let agg = outcome.aggregate_refit.unwrap();
                assert_eq!(agg.status, FitStatus::BudgetExhausted);
                assert!(!agg.applied);
                assert!(!outcome.participant_refit.unwrap().applied);
            }
        }
        assert_eq!(shared.snapshot().unwrap().embedding, start);
        assert_eq!(p.embedding, start);
        assert_eq!((p.head, p.iteration), (0, 1));
    }

    #[test]
    fn cancelled_token_reverts_refits() {
        let mut h = Harness::new(|_| {});
        let token = CancellationToken::new();
        token.cancel();
        h.token = Some(token);

        let shared = aggregate(3, 2);
        let mut p = ParticipantState::new("p", Embedding::zeros(3, 2));
        p.head = 2;
        p.pending = Some(Tuple::new(2, vec![0, 1]).unwrap());
        let response = Response::new(2, vec![1, 0]).unwrap();
        let outcome = record_response(h.ctx(), &mut p, &shared, &response).unwrap();
        assert_eq!(outcome.participant_refit.unwrap().status, FitStatus::Cancelled);
        assert_eq!(outcome.aggregate_refit.unwrap().status, FitStatus::Cancelled);
    }

    #[test]
    fn failed_participant_refit_commits_nothing() {
        let h = Harness::new(|c| c.experiment.n_items = 3);
        let (mut p, shared, response) = closing_sweep();
        let before = p.clone();

        // Participant fit over 3 triplets fails before the aggregate is touched.
        let failing = FailAbove { limit: 2 };
        let err = record_response(h.ctx_with(&failing), &mut p, &shared, &response).unwrap_err();
        assert!(matches!(err, SessionError::Learner(_)));
        assert_eq!(p, before);
        let state = shared.lock().unwrap().clone();
        assert_eq!(state.triplets.len(), 2);
        assert_eq!(state.num_reported_answers, 2);
    }

    #[test]
    fn failed_aggregate_refit_commits_nothing() {
        let h = Harness::new(|c| c.experiment.n_items = 3);
        let (mut p, shared, response) = closing_sweep();
        shared.lock().unwrap().triplets.push(Triplet::new(2, 0, 1));
        let before = p.clone();

        // Participant fit over 3 triplets passes, aggregate fit over 4 fails.
        let failing = FailAbove { limit: 3 };
        let err = record_response(h.ctx_with(&failing), &mut p, &shared, &response).unwrap_err();
        assert!(matches!(err, SessionError::Learner(_)));
        assert_eq!(p, before);
        assert_eq!(shared.lock().unwrap().triplets.len(), 3);
        assert_eq!(shared.snapshot().unwrap().num_reported_answers, 2);

        // Once fits succeed the same answer is accepted exactly once.
        let outcome = record_response(h.ctx(), &mut p, &shared, &response).unwrap();
        assert_eq!(outcome.num_reported_answers, 3);
        assert!(outcome.sweep_completed);
        assert!(outcome.aggregate_refit.is_some());
        assert_eq!(p.triplets.len(), 3);
        assert_eq!((p.head, p.iteration, p.pending.is_none()), (0, 1, true));
        assert_eq!(shared.lock().unwrap().triplets.len(), 4);
        assert!(record_response(h.ctx(), &mut p, &shared, &response).is_err());
    }

    #[test]
    fn degenerate_fits_do_not_block_recording() {
        let h = Harness::new(|c| {
            c.experiment.n_items = 3;
            c.learner.mu = 0.0;
        });
        let shared = aggregate(3, 2);
        let mut p = ParticipantState::new("p", Embedding::zeros(3, 2));
        for head in 0..3 {
            let body: Vec<usize> = (0..3).filter(|&i| i != head).collect();
            p.pending = Some(Tuple::new(head, body.clone()).unwrap());
            let response = Response::new(head, body).unwrap();
            record_response(h.ctx(), &mut p, &shared, &response).unwrap();
        }
        assert_eq!(shared.snapshot().unwrap().num_reported_answers, 3);
        assert_eq!((p.head, p.iteration), (0, 1));
        assert_eq!(p.triplets.len(), 3);
    }
}
