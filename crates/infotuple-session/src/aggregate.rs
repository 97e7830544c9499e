use std::sync::{Arc, Mutex, MutexGuard};

use infotuple_core::errors::{SessionError, SessionResult};
use infotuple_core::models::{Embedding, Triplet};
use serde::{Deserialize, Serialize};

/// State shared by every participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateState {
    pub embedding: Embedding,
    pub triplets: Vec<Triplet>,
    pub num_reported_answers: u64,
}

impl AggregateState {
    pub fn new(embedding: Embedding) -> Self {
        Self {
            embedding,
            triplets: Vec::new(),
            num_reported_answers: 0,
        }
    }
}

/// What callers see of the shared model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub embedding: Embedding,
    pub num_reported_answers: u64,
}

/// Cloneable handle to the aggregate. The lock is held for the whole
/// read-modify-write of a refit.
#[derive(Debug, Clone)]
pub struct SharedAggregate {
    inner: Arc<Mutex<AggregateState>>,
}

impl SharedAggregate {
    pub fn new(state: AggregateState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    pub fn lock(&self) -> SessionResult<MutexGuard<'_, AggregateState>> {
        self.inner.lock().map_err(|_| SessionError::LockPoisoned)
    }

    pub fn snapshot(&self) -> SessionResult<ModelSnapshot> {
        let state = self.lock()?;
        Ok(ModelSnapshot {
            embedding: state.embedding.clone(),
            num_reported_answers: state.num_reported_answers,
        })
    }

    /// Item count and dimensionality of the aggregate embedding.
    pub fn shape(&self) -> SessionResult<(usize, usize)> {
        let state = self.lock()?;
        Ok((state.embedding.n_items(), state.embedding.dims()))
    }
}
