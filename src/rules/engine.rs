//! Rules engine: legal moves, move application, turn hand-over, win detection.
//!
//! Every transition takes a snapshot by reference and returns a new one.
//! A rejected transition returns an error and the caller keeps the
//! snapshot it already has, so rejection never mutates anything.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::{
    is_safe_cell, token_phase, BlockReason, Color, GameState, LegalMoves, Move, Phase, TokenId,
    FINISHED, SIX,
};

use super::error::RuleError;

/// Where the current turn stands.
///
/// Derived from a snapshot; never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnStatus {
    /// `player` must roll.
    AwaitingRoll { player: Color },
    /// `player` rolled `dice` and must pick one of `moves`.
    MovesAvailable { player: Color, dice: u8, moves: Vec<Move> },
    /// `player` rolled `dice` and nothing can move. Passing hands the
    /// turn to `next` (the same player after a 6).
    NoMoves { player: Color, dice: u8, reason: BlockReason, next: Color },
    /// Terminal.
    Finished { winner: Color },
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_moves`: Report an empty set with a reason, never an error
/// - `apply_move`: Must only accept members of the current legal set
/// - `winner`: Return None while the game continues
pub trait RulesEngine {
    /// Legal moves for the player whose turn it is, given a die value.
    fn legal_moves(&self, state: &GameState, dice: u8) -> LegalMoves;

    /// Apply a move chosen from the current legal set.
    fn apply_move(&self, state: &GameState, mv: &Move) -> Result<GameState, RuleError>;

    /// The winner, if the game is over.
    fn winner(&self, state: &GameState) -> Option<Color> {
        state.winner
    }

    // === Convenience Methods ===

    /// Record a die value for the player whose turn it is.
    fn record_roll(&self, state: &GameState, dice: u8) -> Result<GameState, RuleError> {
        if let Some(winner) = state.winner {
            return Err(RuleError::GameFinished(winner));
        }
        if !(1..=SIX).contains(&dice) {
            return Err(RuleError::InvalidDice(dice));
        }
        if let Some(pending) = state.dice {
            return Err(RuleError::RollPending(state.current, pending));
        }

        let mut next = state.clone();
        next.dice = Some(dice);
        next.message = match self.legal_moves(state, dice).reason {
            Some(reason) => format!("{} rolled a {}, {}", state.current, dice, reason),
            None => format!("{} rolled a {}", state.current, dice),
        };
        Ok(next)
    }

    /// Consume a roll that produced no legal moves.
    fn pass_turn(&self, state: &GameState) -> Result<GameState, RuleError> {
        if let Some(winner) = state.winner {
            return Err(RuleError::GameFinished(winner));
        }
        let dice = state.dice.ok_or(RuleError::NoActiveRoll)?;
        if !self.legal_moves(state, dice).is_empty() {
            return Err(RuleError::MovesAvailable);
        }

        let mut next = state.clone();
        next.dice = None;
        let (current, message) = hand_over(&next, dice);
        next.current = current;
        next.message = message;
        Ok(next)
    }

    /// Where the current turn stands.
    fn turn_status(&self, state: &GameState) -> TurnStatus {
        if let Some(winner) = self.winner(state) {
            return TurnStatus::Finished { winner };
        }
        let player = state.current;
        let Some(dice) = state.dice else {
            return TurnStatus::AwaitingRoll { player };
        };

        let legal = self.legal_moves(state, dice);
        match legal.reason {
            Some(reason) => TurnStatus::NoMoves {
                player,
                dice,
                reason,
                next: next_turn_holder(state, dice),
            },
            None => TurnStatus::MovesAvailable {
                player,
                dice,
                moves: legal.moves,
            },
        }
    }
}

/// Standard Ludo rules: enter on a 6, exact finish, capture off safe cells,
/// extra roll on a 6.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassicRules;

impl ClassicRules {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RulesEngine for ClassicRules {
    fn legal_moves(&self, state: &GameState, dice: u8) -> LegalMoves {
        if state.is_finished() {
            return LegalMoves::blocked(BlockReason::GameFinished);
        }
        let blocked = if dice == SIX {
            BlockReason::SixButBlocked
        } else {
            BlockReason::NoMovesForRoll(dice)
        };
        let Some(player) = state.current_player() else {
            return LegalMoves::blocked(blocked);
        };
        if !(1..=SIX).contains(&dice) {
            return LegalMoves::blocked(blocked);
        }

        let occupied = occupancy(state);
        let mut moves = Vec::new();

        for token in &player.tokens {
            let to = match (token_phase(token.progress, player.start_offset), token.progress) {
                (Phase::Home, _) if dice == SIX => 0,
                (Phase::Track { .. } | Phase::Final { .. }, Some(progress)) => progress + dice,
                _ => continue,
            };
            if to > FINISHED {
                continue;
            }

            let mut mv = Move::new(token.id, token.progress, to);
            if let Phase::Track { cell } = token_phase(Some(to), player.start_offset) {
                if !is_safe_cell(cell) {
                    if let Some(occupants) = occupied.get(&cell) {
                        mv.captures = occupants
                            .iter()
                            .filter(|id| id.color != player.color)
                            .copied()
                            .collect();
                    }
                }
            }
            moves.push(mv);
        }

        if moves.is_empty() {
            LegalMoves::blocked(blocked)
        } else {
            LegalMoves::available(moves)
        }
    }

    fn apply_move(&self, state: &GameState, mv: &Move) -> Result<GameState, RuleError> {
        if let Some(winner) = state.winner {
            return Err(RuleError::GameFinished(winner));
        }
        let dice = state.dice.ok_or(RuleError::NoActiveRoll)?;
        if !self.legal_moves(state, dice).contains(mv) {
            return Err(RuleError::IllegalMove(Box::new(mv.clone())));
        }

        let mut next = state.clone();
        next.set_progress(mv.token, Some(mv.to));
        for &captured in &mv.captures {
            next.set_progress(captured, None);
        }
        next.dice = None;

        let mover = state.current;
        if next.player(mover).is_some_and(|p| p.has_finished()) {
            next.winner = Some(mover);
            next.message = format!("{} wins!", mover);
            return Ok(next);
        }

        let (current, handed) = hand_over(&next, dice);
        next.current = current;
        next.message = if mv.is_capture() {
            let sent: Vec<String> = mv.captures.iter().map(TokenId::to_string).collect();
            format!("{} sent {} home. {}", mover, sent.join(", "), handed)
        } else {
            handed
        };
        Ok(next)
    }
}

/// Track occupancy across all players: absolute cell -> tokens on it.
///
/// Rebuilt for every query since it depends on the whole snapshot.
fn occupancy(state: &GameState) -> FxHashMap<u8, SmallVec<[TokenId; 4]>> {
    let mut cells: FxHashMap<u8, SmallVec<[TokenId; 4]>> = FxHashMap::default();
    for player in &state.players {
        for token in &player.tokens {
            if let Phase::Track { cell } = token_phase(token.progress, player.start_offset) {
                cells.entry(cell).or_default().push(token.id);
            }
        }
    }
    cells
}

/// Who holds the turn once a roll of `dice` is consumed.
fn next_turn_holder(state: &GameState, dice: u8) -> Color {
    if dice == SIX {
        state.current
    } else {
        state.next_color(state.current)
    }
}

/// Next turn holder and the status line announcing it.
fn hand_over(state: &GameState, dice: u8) -> (Color, String) {
    let next = next_turn_holder(state, dice);
    let message = if dice == SIX {
        format!("{} rolled a 6 and rolls again", next)
    } else {
        format!("{} to roll", next)
    };
    (next, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(color: Color, index: u8) -> TokenId {
        TokenId::new(color, index)
    }

    fn rolled(mut state: GameState, dice: u8) -> GameState {
        state.dice = Some(dice);
        state
    }

    #[test]
    fn test_fresh_game_six_enters_all_four() {
        let state = GameState::classic();
        let legal = ClassicRules.legal_moves(&state, 6);

        assert_eq!(legal.moves.len(), 4);
        for (i, mv) in legal.moves.iter().enumerate() {
            assert_eq!(mv.token, id(Color::Red, i as u8 + 1));
            assert_eq!(mv.from, None);
            assert_eq!(mv.to, 0);
            assert!(!mv.is_capture());
        }
    }

    #[test]
    fn test_fresh_game_non_six_is_blocked() {
        let state = GameState::classic();
        for dice in 1..=5 {
            let legal = ClassicRules.legal_moves(&state, dice);
            assert!(legal.is_empty());
            assert_eq!(legal.reason, Some(BlockReason::NoMovesForRoll(dice)));
        }
    }

    #[test]
    fn test_six_but_blocked() {
        let mut state = GameState::classic();
        for i in 1..=4 {
            state.set_progress(id(Color::Red, i), Some(FINISHED));
        }
        state.current = Color::Red;

        // Not a winner yet because nothing set it; all tokens done means nothing moves.
        let legal = ClassicRules.legal_moves(&state, 6);
        assert_eq!(legal.reason, Some(BlockReason::SixButBlocked));
    }

    #[test]
    fn test_overshoot_is_skipped() {
        let mut state = GameState::classic();
        state.set_progress(id(Color::Red, 1), Some(54));

        let legal = ClassicRules.legal_moves(&state, 3);
        assert_eq!(legal.for_token(id(Color::Red, 1)).map(|m| m.to), Some(57));

        let legal = ClassicRules.legal_moves(&state, 4);
        assert!(legal.for_token(id(Color::Red, 1)).is_none());
    }

    #[test]
    fn test_capture_on_plain_cell() {
        let mut state = GameState::classic();
        state.set_progress(id(Color::Red, 1), Some(1));
        // Blue progress 44 -> (13 + 44) % 52 = 5
        state.set_progress(id(Color::Blue, 2), Some(44));

        let legal = ClassicRules.legal_moves(&state, 4);
        let mv = legal.for_token(id(Color::Red, 1)).unwrap();
        assert_eq!(mv.captures.as_slice(), &[id(Color::Blue, 2)]);
    }

    #[test]
    fn test_no_capture_on_safe_cell() {
        let mut state = GameState::classic();
        state.set_progress(id(Color::Red, 1), Some(10));
        state.set_progress(id(Color::Blue, 1), Some(0));

        let legal = ClassicRules.legal_moves(&state, 3);
        let mv = legal.for_token(id(Color::Red, 1)).unwrap();
        assert_eq!(mv.to, 13);
        assert!(!mv.is_capture());
    }

    #[test]
    fn test_same_color_stacks_without_capture() {
        let mut state = GameState::classic();
        state.set_progress(id(Color::Red, 1), Some(2));
        state.set_progress(id(Color::Red, 2), Some(5));

        let legal = ClassicRules.legal_moves(&state, 3);
        assert!(!legal.for_token(id(Color::Red, 1)).unwrap().is_capture());
    }

    #[test]
    fn test_capture_takes_every_opponent_on_cell() {
        let mut state = GameState::classic();
        state.set_progress(id(Color::Red, 1), Some(1));
        // Cell 5: blue progress 44, yellow progress 31, green progress 18
        state.set_progress(id(Color::Blue, 1), Some(44));
        state.set_progress(id(Color::Yellow, 3), Some(31));
        state.set_progress(id(Color::Green, 4), Some(18));
        state.set_progress(id(Color::Red, 2), Some(5));

        let legal = ClassicRules.legal_moves(&state, 4);
        let mut captured = legal.for_token(id(Color::Red, 1)).unwrap().captures.to_vec();
        captured.sort();
        assert_eq!(
            captured,
            vec![id(Color::Blue, 1), id(Color::Yellow, 3), id(Color::Green, 4)]
        );
    }

    #[test]
    fn test_final_lane_never_captures() {
        let mut state = GameState::classic();
        state.set_progress(id(Color::Red, 1), Some(50));
        // Cell 3 on the track, which red's lane index 1 might be confused with.
        state.set_progress(id(Color::Blue, 1), Some(42));

        let legal = ClassicRules.legal_moves(&state, 3);
        let mv = legal.for_token(id(Color::Red, 1)).unwrap();
        assert_eq!(mv.to, 53);
        assert!(!mv.is_capture());
    }

    #[test]
    fn test_apply_entry_six_keeps_turn() {
        let state = rolled(GameState::classic(), 6);
        let mv = Move::new(id(Color::Red, 1), None, 0);

        let next = ClassicRules.apply_move(&state, &mv).unwrap();
        assert_eq!(next.token(id(Color::Red, 1)).unwrap().progress, Some(0));
        assert_eq!(next.dice, None);
        assert_eq!(next.current, Color::Red);
        assert_eq!(next.message, "Red rolled a 6 and rolls again");
    }

    #[test]
    fn test_apply_non_six_advances() {
        let mut state = GameState::classic();
        state.set_progress(id(Color::Red, 1), Some(0));
        let state = rolled(state, 2);
        let mv = Move::new(id(Color::Red, 1), Some(0), 2);

        let next = ClassicRules.apply_move(&state, &mv).unwrap();
        assert_eq!(next.current, Color::Blue);
        assert_eq!(next.message, "Blue to roll");
    }

    #[test]
    fn test_apply_capture_sends_home() {
        let mut state = GameState::classic();
        state.set_progress(id(Color::Red, 1), Some(1));
        state.set_progress(id(Color::Blue, 2), Some(44));
        let state = rolled(state, 4);
        let mv = ClassicRules.legal_moves(&state, 4).for_token(id(Color::Red, 1)).cloned().unwrap();

        let next = ClassicRules.apply_move(&state, &mv).unwrap();
        assert_eq!(next.token(id(Color::Blue, 2)).unwrap().progress, None);
        assert_eq!(next.token(id(Color::Red, 1)).unwrap().progress, Some(5));
        assert_eq!(next.message, "Red sent blue-2 home. Blue to roll");
    }

    #[test]
    fn test_apply_rejects_without_roll() {
        let state = GameState::classic();
        let mv = Move::new(id(Color::Red, 1), None, 0);

        assert_eq!(ClassicRules.apply_move(&state, &mv), Err(RuleError::NoActiveRoll));
    }

    #[test]
    fn test_apply_rejects_stale_move() {
        let state = rolled(GameState::classic(), 6);
        let stale = Move::new(id(Color::Red, 1), Some(3), 9);

        assert!(matches!(
            ClassicRules.apply_move(&state, &stale),
            Err(RuleError::IllegalMove(_))
        ));
    }

    #[test]
    fn test_apply_rejects_forged_capture_list() {
        let mut state = GameState::classic();
        state.set_progress(id(Color::Red, 1), Some(1));
        let state = rolled(state, 4);
        let forged = Move::new(id(Color::Red, 1), Some(1), 5).with_captures(&[id(Color::Blue, 1)]);

        assert!(ClassicRules.apply_move(&state, &forged).is_err());
    }

    #[test]
    fn test_winning_move_freezes_turn() {
        let mut state = GameState::classic();
        for i in 1..=3 {
            state.set_progress(id(Color::Green, i), Some(FINISHED));
        }
        state.set_progress(id(Color::Green, 4), Some(55));
        state.current = Color::Green;
        let state = rolled(state, 2);
        let mv = Move::new(id(Color::Green, 4), Some(55), 57);

        let next = ClassicRules.apply_move(&state, &mv).unwrap();
        assert_eq!(next.winner, Some(Color::Green));
        assert_eq!(next.current, Color::Green);
        assert_eq!(next.message, "Green wins!");
        assert_eq!(ClassicRules.winner(&next), Some(Color::Green));

        let legal = ClassicRules.legal_moves(&next, 4);
        assert_eq!(legal.reason, Some(BlockReason::GameFinished));
        assert_eq!(
            ClassicRules.record_roll(&next, 4),
            Err(RuleError::GameFinished(Color::Green))
        );
    }

    #[test]
    fn test_record_roll() {
        let state = GameState::classic();

        let next = ClassicRules.record_roll(&state, 6).unwrap();
        assert_eq!(next.dice, Some(6));
        assert_eq!(next.message, "Red rolled a 6");

        let blocked = ClassicRules.record_roll(&state, 3).unwrap();
        assert_eq!(blocked.message, "Red rolled a 3, no legal moves with a 3");

        assert_eq!(ClassicRules.record_roll(&state, 0), Err(RuleError::InvalidDice(0)));
        assert_eq!(ClassicRules.record_roll(&state, 7), Err(RuleError::InvalidDice(7)));
        assert_eq!(
            ClassicRules.record_roll(&next, 2),
            Err(RuleError::RollPending(Color::Red, 6))
        );
    }

    #[test]
    fn test_pass_turn() {
        let state = rolled(GameState::classic(), 4);
        let next = ClassicRules.pass_turn(&state).unwrap();
        assert_eq!(next.current, Color::Blue);
        assert_eq!(next.dice, None);

        let six = rolled(GameState::classic(), 6);
        assert_eq!(ClassicRules.pass_turn(&six), Err(RuleError::MovesAvailable));

        assert_eq!(
            ClassicRules.pass_turn(&GameState::classic()),
            Err(RuleError::NoActiveRoll)
        );
    }

    #[test]
    fn test_turn_status() {
        let state = GameState::classic();
        assert_eq!(
            ClassicRules.turn_status(&state),
            TurnStatus::AwaitingRoll { player: Color::Red }
        );

        let status = ClassicRules.turn_status(&rolled(state.clone(), 5));
        assert_eq!(
            status,
            TurnStatus::NoMoves {
                player: Color::Red,
                dice: 5,
                reason: BlockReason::NoMovesForRoll(5),
                next: Color::Blue,
            }
        );

        match ClassicRules.turn_status(&rolled(state, 6)) {
            TurnStatus::MovesAvailable { player, dice, moves } => {
                assert_eq!(player, Color::Red);
                assert_eq!(dice, 6);
                assert_eq!(moves.len(), 4);
            }
            other => panic!("unexpected status {:?}", other),
        }
    }

    #[test]
    fn test_two_player_rotation_skips_empty_seats() {
        let state = GameState::new(&[Color::Red, Color::Yellow]).unwrap();
        let next = ClassicRules.pass_turn(&rolled(state, 1)).unwrap();

        assert_eq!(next.current, Color::Yellow);
        let back = ClassicRules.pass_turn(&rolled(next, 2)).unwrap();
        assert_eq!(back.current, Color::Red);
    }
}
