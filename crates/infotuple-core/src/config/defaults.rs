// Single source of truth for all default values.

// --- Experiment ---
pub const DEFAULT_N_ITEMS: usize = 10;
pub const DEFAULT_DIMS: usize = 2;
pub const DEFAULT_BODY_SIZE: usize = 2;
pub const DEFAULT_BURN_IN: usize = 1;
pub const DEFAULT_ITERATIONS: usize = 1;
pub const DEFAULT_SEED: u64 = 42;

// --- Response model ---
pub const DEFAULT_SELECTION_MU: f64 = 0.05;

// --- Selector ---
pub const DEFAULT_DOWNSAMPLE_RATE: f64 = 1.0;
pub const DEFAULT_SAMPLES_DIVISOR: usize = 10;

// --- Oracle ---
pub const DEFAULT_FAILURE_PROBABILITY: f64 = 0.05;
pub const DEFAULT_ORACLE_SEED: u64 = 7;

// --- Learner ---
pub const DEFAULT_LEARNER_MU: f64 = 0.5;
pub const DEFAULT_LEARNER_ITERATIONS: usize = 5_000;
pub const DEFAULT_LEARNING_RATE: f64 = 1.0;
pub const DEFAULT_MOMENTUM: f64 = 0.0;
pub const DEFAULT_AGGREGATE_TIME_BUDGET_MS: u64 = 30_000;
pub const DEFAULT_PARTICIPANT_TIME_BUDGET_MS: u64 = 5_000;
