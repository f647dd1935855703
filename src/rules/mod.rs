//! Rules engine for Ludo.
//!
//! `RulesEngine` defines:
//! - Legal moves for a rolled die
//! - How a chosen move (and its captures) produces the next snapshot
//! - Turn hand-over and win detection
//!
//! `ClassicRules` is the standard rule set.

pub mod engine;
pub mod error;

pub use engine::{ClassicRules, RulesEngine, TurnStatus};
pub use error::RuleError;
