//! Fixture (match) model.
//!
//! This module handles:
//! - Match records with per-half counters and phase flags
//! - Score views by period and side
//! - Guarded updates that keep finished halves immutable

pub mod types;
pub mod update;

pub use types::{Match, MatchStatus, Period, Side};
pub use update::{MatchUpdate, ScoreField};
