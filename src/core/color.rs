//! Player colors and per-color data storage.
//!
//! ## Color
//!
//! One of the four fixed seats. Each color is bound to an evenly spaced
//! start offset on the shared track and a position in the turn rotation.
//!
//! ## ColorMap
//!
//! Per-color storage backed by a fixed array for O(1) access.
//! Supports iteration and indexing by `Color`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::board::TRACK_LEN;

/// A player seat.
///
/// Declaration order is the fixed turn rotation: Red, Blue, Yellow, Green.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Yellow,
    Green,
}

impl Color {
    /// All colors in rotation order.
    pub const ALL: [Color; 4] = [Color::Red, Color::Blue, Color::Yellow, Color::Green];

    /// Position in the rotation (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Absolute track cell where this color's tokens enter the board.
    ///
    /// ```
    /// use ludo_engine::core::Color;
    ///
    /// assert_eq!(Color::Red.start_offset(), 0);
    /// assert_eq!(Color::Blue.start_offset(), 13);
    /// assert_eq!(Color::Yellow.start_offset(), 26);
    /// assert_eq!(Color::Green.start_offset(), 39);
    /// ```
    #[must_use]
    pub const fn start_offset(self) -> u8 {
        (self as u8) * (TRACK_LEN / 4)
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Blue => "Blue",
            Color::Yellow => "Yellow",
            Color::Green => "Green",
        }
    }

    /// Lowercase identifier used in token ids (`red-1`).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Green => "green",
        }
    }

    /// Look up a color by its lowercase key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-color data storage with O(1) access.
///
/// Always holds one entry for each of the four colors, whether or not
/// that color is seated.
///
/// ## Example
///
/// ```
/// use ludo_engine::core::{Color, ColorMap};
///
/// let mut finished: ColorMap<u8> = ColorMap::with_value(0);
/// finished[Color::Blue] = 2;
///
/// assert_eq!(finished[Color::Red], 0);
/// assert_eq!(finished[Color::Blue], 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorMap<T> {
    data: [T; 4],
}

impl<T> ColorMap<T> {
    /// Create a new map with values from a factory function.
    pub fn new(factory: impl Fn(Color) -> T) -> Self {
        Self {
            data: Color::ALL.map(factory),
        }
    }

    /// Create a new map with all entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a new map with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Iterate over (Color, &T) pairs in rotation order.
    pub fn iter(&self) -> impl Iterator<Item = (Color, &T)> {
        Color::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Color> for ColorMap<T> {
    type Output = T;

    fn index(&self, color: Color) -> &Self::Output {
        &self.data[color.index()]
    }
}

impl<T> IndexMut<Color> for ColorMap<T> {
    fn index_mut(&mut self, color: Color) -> &mut Self::Output {
        &mut self.data[color.index()]
    }
}
