//! RNG checkpoint errors.

/// Errors raised while restoring a serialized RNG stream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RngStateError {
    #[error("unsupported rng state version {found}, expected {expected}")]
    UnsupportedVersion { expected: u32, found: u32 },
}
