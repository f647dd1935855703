//! Game state: players, tokens, turn, die, status and outcome.
//!
//! ## GameState
//!
//! The complete, serializable snapshot of a game:
//! - Seated players in fixed rotation order, each with four tokens
//! - The color whose turn it is
//! - The active die value (absent before a roll and after it is consumed)
//! - A human-readable status message
//! - The winner, once one exists
//!
//! Transitions never mutate a snapshot in place: the rules engine clones
//! and returns a new value. The player list is an `im::Vector`, so the
//! clone is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::board::{Phase, FINISHED, TOKENS_PER_PLAYER};
use super::color::{Color, ColorMap};
use super::token::{Token, TokenId};

/// Why a game could not be set up.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum SetupError {
    #[error("need at least 2 players, got {0}")]
    TooFewPlayers(usize),
    #[error("{0} seated twice")]
    DuplicateColor(Color),
}

/// A seated player and their four tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub color: Color,
    pub label: String,
    pub start_offset: u8,
    pub tokens: [Token; TOKENS_PER_PLAYER],
}

impl Player {
    /// Create a player with every token at home.
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self {
            color,
            label: color.label().to_string(),
            start_offset: color.start_offset(),
            tokens: [1, 2, 3, 4].map(|i| Token::at_home(TokenId::new(color, i))),
        }
    }

    /// Check if all four tokens are finished.
    #[must_use]
    pub fn has_finished(&self) -> bool {
        self.tokens.iter().all(|t| t.progress == Some(FINISHED))
    }

    /// Scoreboard projection of this player's tokens.
    #[must_use]
    pub fn summary(&self) -> PlayerSummary {
        let mut summary = PlayerSummary {
            color: self.color,
            label: self.label.clone(),
            at_home: 0,
            on_board: 0,
            finished: 0,
        };
        for token in &self.tokens {
            match token.phase() {
                Phase::Home => summary.at_home += 1,
                Phase::Done => summary.finished += 1,
                Phase::Track { .. } | Phase::Final { .. } => summary.on_board += 1,
            }
        }
        summary
    }
}

/// Per-player counts for scoreboard display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub color: Color,
    pub label: String,
    pub at_home: u8,
    pub on_board: u8,
    pub finished: u8,
}

/// Complete game snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Seated players; order is turn order.
    pub players: Vector<Player>,

    /// Color whose turn it is.
    pub current: Color,

    /// Active die value, if a roll has not been consumed yet.
    pub dice: Option<u8>,

    /// Status line for display.
    pub message: String,

    /// Winner, once one exists.
    pub winner: Option<Color>,
}

impl GameState {
    /// Create a fresh game for the given colors.
    ///
    /// Players are seated in rotation order (Red, Blue, Yellow, Green)
    /// regardless of the order `colors` lists them. The first seated color
    /// starts.
    pub fn new(colors: &[Color]) -> Result<Self, SetupError> {
        if colors.len() < 2 {
            return Err(SetupError::TooFewPlayers(colors.len()));
        }

        let mut seated: ColorMap<bool> = ColorMap::with_value(false);
        for &color in colors {
            if seated[color] {
                return Err(SetupError::DuplicateColor(color));
            }
            seated[color] = true;
        }

        let players: Vector<Player> = seated
            .iter()
            .filter(|&(_, &is_seated)| is_seated)
            .map(|(color, _)| Player::new(color))
            .collect();
        let current = players[0].color;

        Ok(Self {
            players,
            current,
            dice: None,
            message: format!("{} to roll", current),
            winner: None,
        })
    }

    /// Create a fresh four-player game.
    #[must_use]
    pub fn classic() -> Self {
        let players: Vector<Player> = Color::ALL.into_iter().map(Player::new).collect();
        Self {
            players,
            current: Color::Red,
            dice: None,
            message: format!("{} to roll", Color::Red),
            winner: None,
        }
    }

    /// Seated colors in turn order.
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.players.iter().map(|p| p.color)
    }

    /// Seat index of a color, if seated.
    #[must_use]
    pub fn seat_of(&self, color: Color) -> Option<usize> {
        self.players.iter().position(|p| p.color == color)
    }

    /// Get a seated player.
    #[must_use]
    pub fn player(&self, color: Color) -> Option<&Player> {
        self.players.iter().find(|p| p.color == color)
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.player(self.current)
    }

    /// The color seated after `color`, wrapping after the last seat.
    #[must_use]
    pub fn next_color(&self, color: Color) -> Color {
        match self.seat_of(color) {
            Some(seat) => self.players[(seat + 1) % self.players.len()].color,
            None => color,
        }
    }

    /// Look up a token.
    #[must_use]
    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.player(id.color)?.tokens.iter().find(|t| t.id == id)
    }

    /// Iterate over every token on the board, all players.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> + '_ {
        self.players.iter().flat_map(|p| p.tokens.iter())
    }

    /// Scoreboard summaries in turn order.
    #[must_use]
    pub fn summaries(&self) -> Vec<PlayerSummary> {
        self.players.iter().map(Player::summary).collect()
    }

    /// Check if the game has a winner.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    /// Place a token directly. Returns false if the token is not seated.
    ///
    /// For setting up positions; rule transitions go through the engine.
    pub fn set_progress(&mut self, id: TokenId, progress: Option<u8>) -> bool {
        let Some(seat) = self.seat_of(id.color) else {
            return false;
        };
        let player = &mut self.players[seat];
        match player.tokens.iter_mut().find(|t| t.id == id) {
            Some(token) => {
                token.progress = progress;
                true
            }
            None => false,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::classic()
    }
}
