//! Session controller.

use crate::core::{DiceRng, GameState, LegalMoves, Move, PlayerSummary};
use crate::persistence::{self, PersistError, SaveStore};
use crate::rules::{ClassicRules, RuleError, RulesEngine, TurnStatus};

use super::config::SessionConfig;

/// A running game bound to a save store.
///
/// Owns the current snapshot and is its only writer: every call runs one
/// engine transition to completion before returning.
pub struct Session<S: SaveStore> {
    config: SessionConfig,
    rules: ClassicRules,
    store: S,
    dice: DiceRng,
    state: GameState,
    notice: Option<RuleError>,
}

impl<S: SaveStore> Session<S> {
    /// Resume the saved game in `store`, or start a fresh one.
    pub fn open(config: SessionConfig, store: S) -> Self {
        let state = persistence::load_or_new(&store, &config.colors);
        let dice = config.seed.map_or_else(DiceRng::from_entropy, DiceRng::new);
        Self {
            config,
            rules: ClassicRules,
            store,
            dice,
            state,
            notice: None,
        }
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Where the current turn stands.
    #[must_use]
    pub fn status(&self) -> TurnStatus {
        self.rules.turn_status(&self.state)
    }

    /// Moves for the active roll; empty before a roll.
    #[must_use]
    pub fn legal_moves(&self) -> LegalMoves {
        match self.state.dice {
            Some(dice) => self.rules.legal_moves(&self.state, dice),
            None => LegalMoves::default(),
        }
    }

    /// Scoreboard rows in turn order.
    #[must_use]
    pub fn summaries(&self) -> Vec<PlayerSummary> {
        self.state.summaries()
    }

    /// Why the last call was a no-op, if it was one.
    #[must_use]
    pub fn notice(&self) -> Option<&RuleError> {
        self.notice.as_ref()
    }

    /// Roll the die for the current player.
    ///
    /// The die is only drawn when a roll is actually due, so rejected
    /// rolls do not shift the sequence.
    pub fn roll(&mut self) -> Result<TurnStatus, PersistError> {
        if let Some(winner) = self.state.winner {
            return self.commit(Err(RuleError::GameFinished(winner)));
        }
        if let Some(pending) = self.state.dice {
            return self.commit(Err(RuleError::RollPending(self.state.current, pending)));
        }
        let dice = self.dice.roll();
        self.roll_value(dice)
    }

    /// Record a die value rolled elsewhere.
    pub fn roll_value(&mut self, dice: u8) -> Result<TurnStatus, PersistError> {
        let outcome = self.rules.record_roll(&self.state, dice);
        self.commit(outcome)
    }

    /// Apply a move taken from [`legal_moves`](Self::legal_moves).
    pub fn choose(&mut self, mv: &Move) -> Result<TurnStatus, PersistError> {
        let outcome = self.rules.apply_move(&self.state, mv);
        self.commit(outcome)
    }

    /// Acknowledge a roll with no legal moves and hand the turn on.
    pub fn pass(&mut self) -> Result<TurnStatus, PersistError> {
        let outcome = self.rules.pass_turn(&self.state);
        self.commit(outcome)
    }

    /// Discard the current game and start a fresh one.
    pub fn reset(&mut self) -> Result<TurnStatus, PersistError> {
        let outcome = GameState::new(&self.config.colors).map_err(RuleError::from);
        self.commit(outcome)
    }

    fn commit(&mut self, outcome: Result<GameState, RuleError>) -> Result<TurnStatus, PersistError> {
        let next = match outcome {
            Ok(next) => next,
            Err(rejected) => {
                self.notice = Some(rejected);
                return Ok(self.status());
            }
        };
        self.notice = None;
        self.state = next;

        if self.config.auto_pass {
            if let Ok(mut passed) = self.rules.pass_turn(&self.state) {
                passed.message = format!("{}. {}", self.state.message, passed.message);
                self.state = passed;
            }
        }

        persistence::save(&mut self.store, &self.state)?;
        Ok(self.status())
    }
}
