use rand::RngCore;

use crate::errors::SelectorResult;
use crate::models::{Embedding, Selection, Tuple};

/// Chooses the next query among candidate tuples.
pub trait IBodySelector: Send + Sync {
    fn select(
        &self,
        embedding: &Embedding,
        candidates: Vec<Tuple>,
        rng: &mut dyn RngCore,
    ) -> SelectorResult<Selection>;
}
