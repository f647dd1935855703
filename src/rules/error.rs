//! Rejected transitions.
//!
//! None of these are fatal. A rejected transition leaves the input state
//! untouched, and callers surface the error as a status message.

use crate::core::{Color, Move, SetupError};

/// Why the engine refused a transition.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum RuleError {
    #[error("game finished: {0} already won")]
    GameFinished(Color),
    #[error("no active roll")]
    NoActiveRoll,
    #[error("{0} has already rolled a {1}")]
    RollPending(Color, u8),
    #[error("invalid die value: {0}")]
    InvalidDice(u8),
    #[error("illegal move: {} to {}", .0.token, .0.to)]
    IllegalMove(Box<Move>),
    #[error("moves are available, pass not allowed")]
    MovesAvailable,
    #[error("invalid setup: {0}")]
    InvalidSetup(#[from] SetupError),
}
