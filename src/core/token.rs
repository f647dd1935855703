//! Token identification and position.
//!
//! Every token is owned by exactly one color and carries a 1-based index,
//! so ids read as `red-1` .. `green-4`.

use serde::{Deserialize, Serialize};

use super::board::{token_phase, Phase};
use super::color::Color;

/// Unique identifier for a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId {
    pub color: Color,
    /// 1-based index within the owner's tokens.
    pub index: u8,
}

impl TokenId {
    /// Create a token id.
    #[must_use]
    pub const fn new(color: Color, index: u8) -> Self {
        Self { color, index }
    }

    /// Parse an id of the form `red-1`.
    ///
    /// ```
    /// use ludo_engine::core::{Color, TokenId};
    ///
    /// assert_eq!(TokenId::parse("blue-3"), Some(TokenId::new(Color::Blue, 3)));
    /// assert_eq!(TokenId::parse("blue-0"), None);
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let (key, index) = s.split_once('-')?;
        let color = Color::from_key(key)?;
        let index: u8 = index.parse().ok()?;
        (1..=4).contains(&index).then_some(Self { color, index })
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.color.key(), self.index)
    }
}

/// A token and its progress.
///
/// `progress` is `None` while the token is at home. See
/// [`token_phase`](super::board::token_phase) for how the value is read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    pub progress: Option<u8>,
}

impl Token {
    /// Create a token at home.
    #[must_use]
    pub const fn at_home(id: TokenId) -> Self {
        Self { id, progress: None }
    }

    /// Current phase of this token.
    #[must_use]
    pub fn phase(&self) -> Phase {
        token_phase(self.progress, self.id.color.start_offset())
    }
}
