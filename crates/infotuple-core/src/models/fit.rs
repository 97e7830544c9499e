use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::Embedding;

/// How a fit terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitStatus {
    /// All iterations ran (or a degenerate step stopped the loop early).
    Completed,
    /// The wall-clock budget ran out; the initial embedding is returned.
    BudgetExhausted,
    /// The cancellation token fired; the initial embedding is returned.
    Cancelled,
}

/// Per-iteration trajectory entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationReport {
    pub iteration: usize,
    pub training_loss: f64,
    pub frobenius_norm: f64,
}

/// Output of a metric learner fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitOutcome {
    pub embedding: Embedding,
    pub best_loss: f64,
    pub iterations_run: usize,
    pub status: FitStatus,
    pub trajectory: Vec<IterationReport>,
}

impl FitOutcome {
    /// Whether the returned embedding came from the optimizer rather than a
    /// revert.
    pub fn is_completed(&self) -> bool {
        self.status == FitStatus::Completed
    }
}

/// Interrupts refits that carry it in their [`FitBudget`].
///
/// Clones share one flag. Once cancelled, every later budget check of every
/// fit holding a clone reports [`FitStatus::Cancelled`] and the fit reverts;
/// there is no reset, so an experiment shutting down stays shut down.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Soft limits on a refit: an optional deadline and an optional
/// cancellation token, both checked once per iteration.
#[derive(Debug, Clone, Default)]
pub struct FitBudget {
    deadline: Option<Instant>,
    cancel: Option<CancellationToken>,
}

impl FitBudget {
    /// No deadline, no cancellation.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Deadline `budget` from now.
    pub fn with_time_limit(budget: Duration) -> Self {
        Self {
            deadline: Instant::now().checked_add(budget),
            cancel: None,
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Status to stop with, if any limit has been hit.
    pub fn exceeded(&self) -> Option<FitStatus> {
        if self.cancel.as_ref().is_some_and(|c| c.is_cancelled()) {
            return Some(FitStatus::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(FitStatus::BudgetExhausted),
            _ => None,
        }
    }
}
