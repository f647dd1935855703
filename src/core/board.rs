//! Board geometry and token phase derivation.
//!
//! A token's position is a single integer-or-absent "progress" value,
//! counted from its owner's start cell:
//!
//! | progress | phase |
//! |----------|-------|
//! | `None`   | home |
//! | 0..=51   | shared track, absolute cell `(start + progress) % 52` |
//! | 52..=56  | private final lane, lane index `progress - 52` |
//! | 57       | finished |
//!
//! [`token_phase`] is the only place that interprets these ranges.

use serde::{Deserialize, Serialize};

/// Cells on the shared circular track.
pub const TRACK_LEN: u8 = 52;

/// First progress value inside the private final lane.
pub const FINAL_LANE_START: u8 = TRACK_LEN;

/// Progress value of a finished token.
pub const FINISHED: u8 = 57;

/// Tokens owned by each player.
pub const TOKENS_PER_PLAYER: usize = 4;

/// Die value that enters a token and grants another roll.
pub const SIX: u8 = 6;

/// Absolute track cells on which no token can be captured.
///
/// Each start cell plus the cell eight steps past it.
pub const SAFE_CELLS: [u8; 8] = [0, 8, 13, 21, 26, 34, 39, 47];

/// Check whether an absolute track cell is safe.
#[must_use]
pub fn is_safe_cell(cell: u8) -> bool {
    SAFE_CELLS.contains(&cell)
}

/// Where a token currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum Phase {
    /// Not yet entered.
    Home,
    /// On the shared track at an absolute cell.
    Track { cell: u8 },
    /// In the owner's private final lane.
    Final { lane: u8 },
    /// Reached the end.
    Done,
}

impl Phase {
    /// Check if the token is on the shared track.
    #[must_use]
    pub const fn is_track(self) -> bool {
        matches!(self, Phase::Track { .. })
    }

    /// Check if the token can still be moved by a roll (track or final lane).
    #[must_use]
    pub const fn is_in_play(self) -> bool {
        matches!(self, Phase::Track { .. } | Phase::Final { .. })
    }
}

/// Derive a token's phase from its progress and its owner's start offset.
///
/// ```
/// use ludo_engine::core::{token_phase, Phase};
///
/// assert_eq!(token_phase(None, 13), Phase::Home);
/// assert_eq!(token_phase(Some(45), 13), Phase::Track { cell: 6 });
/// assert_eq!(token_phase(Some(54), 13), Phase::Final { lane: 2 });
/// assert_eq!(token_phase(Some(57), 13), Phase::Done);
/// ```
#[must_use]
pub fn token_phase(progress: Option<u8>, start_offset: u8) -> Phase {
    match progress {
        None => Phase::Home,
        Some(p) if p >= FINISHED => Phase::Done,
        Some(p) if p >= FINAL_LANE_START => Phase::Final {
            lane: p - FINAL_LANE_START,
        },
        Some(p) => Phase::Track {
            cell: ((start_offset as u16 + p as u16) % TRACK_LEN as u16) as u8,
        },
    }
}
