//! Bet-type catalog.
//!
//! This module handles:
//! - Bet-type tags and their wire codes
//! - Display names and selectable values per type
//! - Label formatting for presentation

pub mod tables;
pub mod types;

pub use tables::{catalog, describe_bet, format_bet_value, tag_label, BetOption, BetTypeEntry, Catalog};
pub use types::{BetTag, BetType};
