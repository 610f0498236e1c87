//! In-memory persistence for matches, coupons and bets.
//!
//! This module handles:
//! - Concurrent CRUD over `DashMap` shards
//! - Referential checks, duplicate-leg detection and cascade deletes
//! - Point-in-time snapshots for the resolution core
//! - Preloading from a JSON seed file

pub mod memory;

pub use memory::{MatchRef, MemoryStore, NewBet};
