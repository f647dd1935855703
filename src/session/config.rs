//! Session configuration.

use serde::{Deserialize, Serialize};

use crate::core::Color;

/// How a session seats players and rolls dice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Die seed. `None` seeds from OS entropy.
    /// Same seed produces the same roll sequence.
    pub seed: Option<u64>,

    /// Seated colors for a fresh game (2-4, seated in rotation order).
    pub colors: Vec<Color>,

    /// Pass immediately when a roll has no legal moves, instead of waiting
    /// for the caller to acknowledge it.
    pub auto_pass: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            colors: Color::ALL.to_vec(),
            auto_pass: false,
        }
    }
}

impl SessionConfig {
    /// Use a fixed die seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seat these colors in the next fresh game.
    #[must_use]
    pub fn with_colors(mut self, colors: &[Color]) -> Self {
        self.colors = colors.to_vec();
        self
    }

    /// Pass automatically on rolls with no legal moves.
    #[must_use]
    pub fn with_auto_pass(mut self, auto_pass: bool) -> Self {
        self.auto_pass = auto_pass;
        self
    }
}
