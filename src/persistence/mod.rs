//! Saving and restoring game snapshots.
//!
//! The whole [`GameState`] is stored as one flat JSON document:
//!
//! ```json
//! {
//!   "players": [
//!     { "color": "red", "label": "Red", "start_offset": 0,
//!       "tokens": [ { "id": { "color": "red", "index": 1 }, "progress": 12 }, ... ] },
//!     ...
//!   ],
//!   "current": "blue",
//!   "dice": null,
//!   "message": "Blue to roll",
//!   "winner": null
//! }
//! ```
//!
//! There is no versioning. A document that fails to parse or violates a
//! state invariant is treated as "no save", never as a fatal error.

pub mod store;

pub use store::{JsonFileStore, MemoryStore, SaveStore};

use crate::core::{Color, GameState, FINISHED, SIX};

/// Failure to read, write or decode a save.
#[derive(thiserror::Error, Debug)]
pub enum PersistError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("encoding error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid snapshot: {0}")]
    Invalid(String),
}

/// Encode a snapshot.
pub fn encode(state: &GameState) -> Result<String, PersistError> {
    Ok(serde_json::to_string(state)?)
}

/// Decode and validate a snapshot.
pub fn decode(document: &str) -> Result<GameState, PersistError> {
    let state: GameState = serde_json::from_str(document)?;
    validate(&state)?;
    Ok(state)
}

/// Load the saved snapshot, if there is a readable, consistent one.
pub fn load(store: &impl SaveStore) -> Option<GameState> {
    let document = store.read().ok()??;
    decode(&document).ok()
}

/// Load the saved snapshot, or start a fresh game for `colors`.
pub fn load_or_new(store: &impl SaveStore, colors: &[Color]) -> GameState {
    load(store)
        .or_else(|| GameState::new(colors).ok())
        .unwrap_or_default()
}

/// Record a snapshot.
pub fn save(store: &mut impl SaveStore, state: &GameState) -> Result<(), PersistError> {
    store.write(&encode(state)?)
}

/// Check the invariants a well-formed snapshot must hold.
pub fn validate(state: &GameState) -> Result<(), PersistError> {
    let invalid = |msg: String| Err(PersistError::Invalid(msg));

    if !(2..=Color::ALL.len()).contains(&state.players.len()) {
        return invalid(format!("{} players", state.players.len()));
    }
    let in_rotation = state
        .players
        .iter()
        .zip(state.players.iter().skip(1))
        .all(|(a, b)| a.color < b.color);
    if !in_rotation {
        return invalid("players out of rotation order".to_string());
    }

    for player in &state.players {
        if player.start_offset != player.color.start_offset() {
            return invalid(format!("{} has start offset {}", player.color, player.start_offset));
        }
        for (i, token) in player.tokens.iter().enumerate() {
            if token.id.color != player.color || token.id.index as usize != i + 1 {
                return invalid(format!("{} holds token {}", player.color, token.id));
            }
            if token.progress.is_some_and(|p| p > FINISHED) {
                return invalid(format!("{} is past the finish", token.id));
            }
        }
    }

    if state.seat_of(state.current).is_none() {
        return invalid(format!("{} is not seated", state.current));
    }
    if let Some(dice) = state.dice {
        if !(1..=SIX).contains(&dice) {
            return invalid(format!("die value {}", dice));
        }
    }

    let finished: Vec<Color> = state
        .players
        .iter()
        .filter(|p| p.has_finished())
        .map(|p| p.color)
        .collect();
    match state.winner {
        Some(winner) if finished != [winner] => {
            invalid(format!("{} recorded as winner without finishing", winner))
        }
        Some(winner) if state.current != winner => {
            invalid(format!("{} won but {} holds the turn", winner, state.current))
        }
        Some(winner) if state.dice.is_some() => {
            invalid(format!("{} won with a die still active", winner))
        }
        None if !finished.is_empty() => invalid("finished player without a winner".to_string()),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TokenId;

    #[test]
    fn test_round_trip() {
        let mut state = GameState::classic();
        state.set_progress(TokenId::new(Color::Red, 2), Some(14));
        state.set_progress(TokenId::new(Color::Green, 4), Some(53));
        state.current = Color::Yellow;
        state.dice = Some(3);
        state.message = "Yellow rolled a 3".to_string();

        let decoded = decode(&encode(&state).unwrap()).unwrap();
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_document_shape() {
        let json: serde_json::Value = serde_json::from_str(&encode(&GameState::classic()).unwrap()).unwrap();

        assert_eq!(json["current"], "red");
        assert!(json["dice"].is_null());
        assert!(json["winner"].is_null());
        assert_eq!(json["message"], "Red to roll");
        assert_eq!(json["players"][1]["start_offset"], 13);
        assert!(json["players"][0]["tokens"][0]["progress"].is_null());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(decode("not json"), Err(PersistError::Json(_))));
        assert!(matches!(decode("{\"players\":[]}"), Err(PersistError::Json(_))));
    }

    #[test]
    fn test_invariant_violations_are_rejected() {
        let mut past_finish = GameState::classic();
        past_finish.set_progress(TokenId::new(Color::Red, 1), Some(60));
        assert!(matches!(validate(&past_finish), Err(PersistError::Invalid(_))));

        let mut bad_dice = GameState::classic();
        bad_dice.dice = Some(9);
        assert!(validate(&bad_dice).is_err());

        let mut unseated = GameState::new(&[Color::Red, Color::Blue]).unwrap();
        unseated.current = Color::Green;
        assert!(validate(&unseated).is_err());

        let mut fake_winner = GameState::classic();
        fake_winner.winner = Some(Color::Blue);
        assert!(validate(&fake_winner).is_err());

        let mut bad_offset = GameState::classic();
        bad_offset.players[1].start_offset = 5;
        assert!(validate(&bad_offset).is_err());

        let mut won = GameState::classic();
        for i in 1..=4 {
            won.set_progress(TokenId::new(Color::Green, i), Some(FINISHED));
        }
        won.winner = Some(Color::Green);
        won.current = Color::Green;
        assert!(validate(&won).is_ok());

        let mut turn_moved_on = won.clone();
        turn_moved_on.current = Color::Red;
        assert!(validate(&turn_moved_on).is_err());

        let mut die_after_win = won.clone();
        die_after_win.dice = Some(3);
        assert!(validate(&die_after_win).is_err());

        let mut both = won;
        both.current = Color::Red;
        both.dice = Some(3);
        assert!(validate(&both).is_err());
        let store = MemoryStore::with_document(serde_json::to_string(&both).unwrap());
        assert_eq!(load(&store), None);
    }

    #[test]
    fn test_won_game_round_trip() {
        use crate::rules::{ClassicRules, RulesEngine, TurnStatus};

        let rules = ClassicRules::new();
        let mut state = GameState::classic();
        for i in 1..=3 {
            state.set_progress(TokenId::new(Color::Green, i), Some(FINISHED));
        }
        state.set_progress(TokenId::new(Color::Green, 4), Some(55));
        state.current = Color::Green;

        let rolled = rules.record_roll(&state, 2).unwrap();
        let last = rules.legal_moves(&rolled, 2).moves[0].clone();
        let won = rules.apply_move(&rolled, &last).unwrap();
        assert_eq!(won.winner, Some(Color::Green));

        let decoded = decode(&encode(&won).unwrap()).unwrap();
        assert_eq!(decoded, won);
        assert_eq!(rules.turn_status(&decoded), TurnStatus::Finished { winner: Color::Green });

        let mut store = MemoryStore::new();
        save(&mut store, &won).unwrap();
        assert_eq!(load(&store), Some(won));
    }

    #[test]
    fn test_load_or_new_falls_back() {
        let corrupt = MemoryStore::with_document("{ truncated");
        assert_eq!(load_or_new(&corrupt, &Color::ALL), GameState::classic());

        let empty = MemoryStore::new();
        let fresh = load_or_new(&empty, &[Color::Blue, Color::Green]);
        assert_eq!(fresh, GameState::new(&[Color::Blue, Color::Green]).unwrap());
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let mut state = GameState::classic();
        state.set_progress(TokenId::new(Color::Blue, 1), Some(0));

        save(&mut store, &state).unwrap();
        assert_eq!(load(&store), Some(state));
    }
}
