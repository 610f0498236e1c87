//! Bet resolution engine.
//!
//! Maps a bet and the current state of its match to a three-valued
//! outcome. Pure and synchronous: no I/O, no shared state.

pub mod engine;
pub mod market;
pub mod outcome;

pub use engine::{resolve, resolve_selection};
pub use market::{DoubleChance, GoalScope, Market, Parity, Pick};
pub use outcome::Outcome;
