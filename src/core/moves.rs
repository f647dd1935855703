//! Move representation: one token, its target progress, and its captures.
//!
//! Moves are produced by the rules engine for a rolled die and handed back
//! unchanged by the caller. The engine only accepts a move that is an exact
//! member of the legal set it recomputes for the current state.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::token::TokenId;

/// A legal move for the current die.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The token being moved.
    pub token: TokenId,

    /// Progress before the move (`None` when entering from home).
    pub from: Option<u8>,

    /// Progress after the move.
    pub to: u8,

    /// Opposing tokens sent home by this move.
    /// SmallVec covers the common case (0-1 captures) without heap allocation.
    pub captures: SmallVec<[TokenId; 2]>,
}

impl Move {
    /// Create a move that captures nothing.
    #[must_use]
    pub fn new(token: TokenId, from: Option<u8>, to: u8) -> Self {
        Self {
            token,
            from,
            to,
            captures: SmallVec::new(),
        }
    }

    /// Set the tokens this move captures.
    #[must_use]
    pub fn with_captures(mut self, captures: &[TokenId]) -> Self {
        self.captures = SmallVec::from_slice(captures);
        self
    }

    /// Check if this move sends any token home.
    #[must_use]
    pub fn is_capture(&self) -> bool {
        !self.captures.is_empty()
    }

    /// Check if this move brings a token out of home.
    #[must_use]
    pub fn is_entry(&self) -> bool {
        self.from.is_none()
    }
}

/// Why a roll produced no legal moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockReason {
    /// A winner already exists.
    GameFinished,
    /// The die showed 6 and still nothing can move.
    SixButBlocked,
    /// No token can move with this (non-6) value.
    NoMovesForRoll(u8),
}

impl std::fmt::Display for BlockReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockReason::GameFinished => f.write_str("game finished"),
            BlockReason::SixButBlocked => f.write_str("rolled a 6 but nothing can move"),
            BlockReason::NoMovesForRoll(d) => write!(f, "no legal moves with a {}", d),
        }
    }
}

/// Result of a legal-move query.
///
/// For a rolled die, `reason` is set exactly when `moves` is empty.
/// The default value (no roll yet) has neither.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalMoves {
    pub moves: Vec<Move>,
    pub reason: Option<BlockReason>,
}

impl LegalMoves {
    /// A non-empty move list.
    #[must_use]
    pub fn available(moves: Vec<Move>) -> Self {
        Self { moves, reason: None }
    }

    /// An empty result with its reason.
    #[must_use]
    pub fn blocked(reason: BlockReason) -> Self {
        Self {
            moves: Vec::new(),
            reason: Some(reason),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Check if a move is in the set.
    #[must_use]
    pub fn contains(&self, mv: &Move) -> bool {
        self.moves.contains(mv)
    }

    /// Find the move for a given token, if it has one.
    #[must_use]
    pub fn for_token(&self, token: TokenId) -> Option<&Move> {
        self.moves.iter().find(|m| m.token == token)
    }
}
