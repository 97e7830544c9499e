use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::errors::RngStateError;

/// Current layout version of [`RngState`].
pub const RNG_STATE_VERSION: u32 = 1;

/// Serializable checkpoint of the query-selection RNG stream.
///
/// Steps are invoked as isolated calls, so the stream is captured after each
/// step and restored before the next. Restoring and drawing produces exactly
/// the values the captured generator would have produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    version: u32,
    seed: [u8; 32],
    stream: u64,
    word_pos: u128,
}

impl RngState {
    /// Fresh stream derived from a numeric seed.
    pub fn from_seed(seed: u64) -> Self {
        Self::capture(&ChaCha8Rng::seed_from_u64(seed))
    }

    /// Snapshot the current position of `rng`.
    pub fn capture(rng: &ChaCha8Rng) -> Self {
        Self {
            version: RNG_STATE_VERSION,
            seed: rng.get_seed(),
            stream: rng.get_stream(),
            word_pos: rng.get_word_pos(),
        }
    }

    /// Rebuild a generator positioned exactly where the snapshot was taken.
    pub fn restore(&self) -> Result<ChaCha8Rng, RngStateError> {
        if self.version != RNG_STATE_VERSION {
            return Err(RngStateError::UnsupportedVersion {
                expected: RNG_STATE_VERSION,
                found: self.version,
            });
        }
        let mut rng = ChaCha8Rng::from_seed(self.seed);
        rng.set_stream(self.stream);
        rng.set_word_pos(self.word_pos);
        Ok(rng)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Number of 32-bit words consumed from the stream so far.
    pub fn word_pos(&self) -> u128 {
        self.word_pos
    }
}
