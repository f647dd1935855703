//! Deterministic die rolling.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical rolls
//! - **Serializable**: O(1) state capture and restore via [`DiceRngState`]
//!
//! The saved game document does not include the die position. A caller that
//! wants a resumed game to continue the same roll sequence keeps the
//! [`DiceRngState`] next to its save; `Session` does not.
//!
//! ```
//! use ludo_engine::core::DiceRng;
//!
//! let mut a = DiceRng::new(7);
//! let mut b = DiceRng::new(7);
//!
//! for _ in 0..20 {
//!     let roll = a.roll();
//!     assert!((1..=6).contains(&roll));
//!     assert_eq!(roll, b.roll());
//! }
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded six-sided die.
///
/// Uses ChaCha8 for speed while keeping a portable, reproducible stream.
#[derive(Clone, Debug)]
pub struct DiceRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl DiceRng {
    /// Create a new die with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a die seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Roll once, returning a value in 1..=6.
    pub fn roll(&mut self) -> u8 {
        self.inner.gen_range(1..=6)
    }

    /// Seed this die was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Capture the current state for checkpointing.
    #[must_use]
    pub fn state(&self) -> DiceRngState {
        DiceRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &DiceRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable die state.
///
/// Uses the ChaCha8 word position, so capture is O(1) regardless of how
/// many rolls have been made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
