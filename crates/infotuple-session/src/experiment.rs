//! Experiment: concurrent per-participant access via DashMap.

use std::sync::{Arc, Mutex, MutexGuard};

use dashmap::DashMap;
use infotuple_core::config::InfoTupleConfig;
use infotuple_core::errors::{InfoTupleResult, SessionError, SessionResult};
use infotuple_core::models::{CancellationToken, Embedding, Response, RngState, Tuple};
use infotuple_core::traits::IMetricLearner;
use infotuple_learner::ProbabilisticMds;
use infotuple_selection::BodySelector;
use tracing::info;

use crate::aggregate::{AggregateState, ModelSnapshot, SharedAggregate};
use crate::participant::ParticipantState;
use crate::steps::{self, RecordOutcome, StepContext};

type ParticipantSlot = Arc<Mutex<ParticipantState>>;

/// A running experiment: participant registry, shared aggregate, and the
/// query RNG checkpoint.
///
/// Lock order is participant, then RNG or aggregate. Map shard guards are
/// released before any of these is taken, so a long refit only blocks the
/// participant being refit and, for the aggregate refit, other answers.
pub struct Experiment<L = ProbabilisticMds> {
    config: InfoTupleConfig,
    learner: L,
    selector: BodySelector,
    participants: DashMap<String, ParticipantSlot>,
    aggregate: SharedAggregate,
    /// Held while a query is drawn so draws are serialized.
    rng_state: Mutex<RngState>,
    cancel: CancellationToken,
}

impl Experiment<ProbabilisticMds> {
    /// Validate `config`, draw the initial aggregate embedding from the
    /// configured seed, and start with no participants.
    pub fn new(config: InfoTupleConfig) -> InfoTupleResult<Self> {
        config.validate()?;
        let mut rng = RngState::from_seed(config.experiment.seed).restore()?;
        let embedding =
            Embedding::random_uniform(config.experiment.n_items, config.experiment.dims, &mut rng);
        let learner = ProbabilisticMds::from_config(&config.learner);
        info!(
            n_items = config.experiment.n_items,
            dims = config.experiment.dims,
            "experiment initialized"
        );
        Ok(Self::with_parts(
            config,
            learner,
            SharedAggregate::new(AggregateState::new(embedding)),
            RngState::capture(&rng),
        ))
    }
}

impl<L: IMetricLearner> Experiment<L> {
    /// Assemble from explicit parts, e.g. to resume from a checkpoint or to
    /// share one aggregate between engines.
    pub fn with_parts(
        config: InfoTupleConfig,
        learner: L,
        aggregate: SharedAggregate,
        rng_state: RngState,
    ) -> Self {
        Self {
            selector: BodySelector::from_config(&config.selector, &config.response_model),
            config,
            learner,
            participants: DashMap::new(),
            aggregate,
            rng_state: Mutex::new(rng_state),
            cancel: CancellationToken::new(),
        }
    }

    fn ctx(&self) -> StepContext<'_, L> {
        StepContext {
            config: &self.config,
            learner: &self.learner,
            selector: &self.selector,
            cancel: Some(&self.cancel),
        }
    }

    fn slot(&self, participant_id: &str) -> Option<ParticipantSlot> {
        self.participants.get(participant_id).map(|s| Arc::clone(s.value()))
    }

    fn lock_rng(&self) -> SessionResult<MutexGuard<'_, RngState>> {
        self.rng_state.lock().map_err(|_| SessionError::LockPoisoned)
    }

    /// Serve the next query for `participant_id`, registering the
    /// participant on first contact.
    pub fn next_query(&self, participant_id: &str) -> SessionResult<Tuple> {
        loop {
            if let Some(slot) = self.slot(participant_id) {
                let mut participant = slot.lock().map_err(|_| SessionError::LockPoisoned)?;
                let mut rng_state = self.lock_rng()?;
                let outcome = steps::next_query(
                    self.ctx(),
                    Some(participant.clone()),
                    participant_id,
                    &rng_state,
                )?;
                *participant = outcome.participant;
                *rng_state = outcome.rng_state;
                return Ok(outcome.tuple);
            }

            // Registration happens under the RNG lock, so a racing first
            // contact for the same id sees the slot on its next pass.
            let mut rng_state = self.lock_rng()?;
            if self.participants.contains_key(participant_id) {
                continue;
            }
            let outcome = steps::next_query(self.ctx(), None, participant_id, &rng_state)?;
            self.participants.insert(
                participant_id.to_string(),
                Arc::new(Mutex::new(outcome.participant)),
            );
            *rng_state = outcome.rng_state;
            return Ok(outcome.tuple);
        }
    }

    /// Record `participant_id`'s answer to its outstanding query. On error
    /// neither the participant nor the aggregate changes.
    pub fn record_response(
        &self,
        participant_id: &str,
        response: &Response,
    ) -> SessionResult<RecordOutcome> {
        let slot = self
            .slot(participant_id)
            .ok_or_else(|| SessionError::ParticipantNotFound(participant_id.to_string()))?;
        let mut participant = slot.lock().map_err(|_| SessionError::LockPoisoned)?;
        steps::record_response(self.ctx(), &mut participant, &self.aggregate, response)
    }

    pub fn model_snapshot(&self) -> SessionResult<ModelSnapshot> {
        self.aggregate.snapshot()
    }

    /// Cloned view of one participant's state.
    pub fn participant_snapshot(&self, participant_id: &str) -> Option<ParticipantState> {
        let slot = self.slot(participant_id)?;
        let participant = slot.lock().ok()?;
        Some(participant.clone())
    }

    /// Current checkpoint of the query RNG stream.
    pub fn rng_state(&self) -> SessionResult<RngState> {
        self.rng_state
            .lock()
            .map(|s| s.clone())
            .map_err(|_| SessionError::LockPoisoned)
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn participant_ids(&self) -> Vec<String> {
        self.participants.iter().map(|r| r.key().clone()).collect()
    }

    /// Handle on the shared aggregate.
    pub fn aggregate(&self) -> &SharedAggregate {
        &self.aggregate
    }

    /// Token that interrupts in-flight refits; interrupted refits revert.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn config(&self) -> &InfoTupleConfig {
        &self.config
    }
}
