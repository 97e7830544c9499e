use infotuple_core::models::{Embedding, Triplet, Tuple};
use serde::{Deserialize, Serialize};

/// Everything the engine knows about one participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantState {
    pub id: String,
    /// The participant's personal embedding, refit after each sweep.
    pub embedding: Embedding,
    /// Next head to query; cycles through `0..n_items`.
    pub head: usize,
    /// Completed sweeps over every head.
    pub iteration: usize,
    pub triplets: Vec<Triplet>,
    /// Query served and not yet answered.
    pub pending: Option<Tuple>,
}

impl ParticipantState {
    pub fn new(id: impl Into<String>, embedding: Embedding) -> Self {
        Self {
            id: id.into(),
            embedding,
            head: 0,
            iteration: 0,
            triplets: Vec::new(),
            pending: None,
        }
    }

    /// Whether the participant is still in the random-body phase.
    pub fn in_burn_in(&self, burn_in: usize) -> bool {
        self.iteration < burn_in
    }
}
