//! # ludo-engine
//!
//! Rules engine for four-player Ludo on a single shared device.
//!
//! ## Design Principles
//!
//! 1. **One integer per token**: a token's position is `Option<u8>`
//!    progress from its owner's start. `token_phase` is the single place
//!    that turns it into home / track / final lane / done.
//!
//! 2. **Functional transitions**: `apply_move`, `record_roll` and
//!    `pass_turn` take a snapshot by reference and return a new one.
//!    A rejected transition is an error value and changes nothing.
//!
//! 3. **Report, don't throw**: "no legal moves" is a normal outcome
//!    carrying a reason, not an error.
//!
//! ## Modules
//!
//! - `core`: Colors, tokens, board geometry, moves, state, dice
//! - `rules`: `RulesEngine` trait and `ClassicRules`
//! - `persistence`: Snapshot encoding, validation and save stores
//! - `session`: Single-writer controller for a presentation layer

pub mod core;
pub mod persistence;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    token_phase, BlockReason, Color, ColorMap, DiceRng, DiceRngState, GameState, LegalMoves,
    Move, Phase, Player, PlayerSummary, SetupError, Token, TokenId,
};

pub use crate::persistence::{JsonFileStore, MemoryStore, PersistError, SaveStore};

pub use crate::rules::{ClassicRules, RuleError, RulesEngine, TurnStatus};

pub use crate::session::{Session, SessionConfig};
