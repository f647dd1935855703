//! Core types: colors, tokens, board geometry, moves, state, dice.
//!
//! Everything here is plain data plus the pure `token_phase` derivation.
//! Rules live in `rules`.

pub mod board;
pub mod color;
pub mod moves;
pub mod rng;
pub mod state;
pub mod token;

pub use board::{
    is_safe_cell, token_phase, Phase, FINAL_LANE_START, FINISHED, SAFE_CELLS, SIX,
    TOKENS_PER_PLAYER, TRACK_LEN,
};
pub use color::{Color, ColorMap};
pub use moves::{BlockReason, LegalMoves, Move};
pub use rng::{DiceRng, DiceRngState};
pub use state::{GameState, Player, PlayerSummary, SetupError};
pub use token::{Token, TokenId};
