//! # infotuple-selection
//!
//! Candidate enumeration, body selection strategies, and the offline
//! selection loop that alternates burn-in, query selection, oracle calls
//! and refits.

pub mod candidates;
pub mod selection_loop;
pub mod selector;

pub use candidates::{candidate_tuples, random_tuple};
pub use selection_loop::{Diagnostics, LoopOutcome, SelectionLoop};
pub use selector::{select_body, select_random, BodySelector, GainSettings};
