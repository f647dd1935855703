//! Session: the single-writer controller a presentation layer drives.
//!
//! A `Session` ties together a snapshot, a die and a save store:
//! - `roll` / `roll_value` record a die value
//! - `choose` applies one of the reported legal moves
//! - `pass` acknowledges a roll with no legal moves
//! - `reset` starts over
//!
//! Rejected calls leave the snapshot unchanged and set `notice`.
//! Every accepted transition is saved before the call returns.

mod config;
mod controller;

pub use config::SessionConfig;
pub use controller::Session;
