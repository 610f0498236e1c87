//! Sports coupon resolution engine.
//!
//! Tracks football matches half by half and decides, for every bet placed on
//! them, whether it is won, lost or still pending. Bets are grouped into
//! coupons that win only when every leg wins.
//!
//! # Resolution
//!
//! Outcomes are recomputed from the current match state on every read and
//! never stored. A bet is decided as soon as the score makes it certain:
//!
//! ```text
//! Over 2.5, score 2-1 in the 60th minute  -> won (goals cannot be taken back)
//! Over 2.5, score 1-0 at full time        -> lost
//! Over 2.5, score 1-0 in the 60th minute  -> pending
//! ```
//!
//! # Modules
//!
//! - [`catalog`]: Bet types, display names and selectable values
//! - [`fixture`]: Matches with per-half scores and guarded updates
//! - [`resolution`]: Bet resolution engine
//! - [`coupon`]: Coupon aggregation, ranking and snapshots
//! - [`store`]: Concurrent in-memory storage
//! - [`api`]: HTTP API
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Seed loading and shutdown handling

pub mod api;
pub mod catalog;
pub mod config;
pub mod coupon;
pub mod error;
pub mod fixture;
pub mod metrics;
pub mod resolution;
pub mod store;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
