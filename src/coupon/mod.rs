//! Coupons and their aggregate status.
//!
//! This module handles:
//! - Coupon and bet records
//! - Folding leg outcomes into a coupon status
//! - Display ordering of coupons and matches
//! - Point-in-time snapshots for evaluation

pub mod aggregator;
pub mod ranking;
pub mod snapshot;
pub mod types;

pub use aggregator::{aggregate, leg_outcome, CouponTally, MatchLookup};
pub use ranking::{rank_coupons, rank_matches, status_rank, CouponWithStatus};
pub use snapshot::{CouponDetail, LegView, Snapshot, SnapshotData, StatusCounts};
pub use types::{Bet, Coupon, LegKey};
