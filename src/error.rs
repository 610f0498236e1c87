//! Unified error types for the coupon engine.
//!
//! The resolution core never fails; these cover configuration, the store and
//! fixture updates.

use thiserror::Error;
use uuid::Uuid;

use crate::catalog::BetTag;
use crate::fixture::ScoreField;

/// Unified error type for the coupon engine.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Store operation error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Store lookup and validation errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No match with this id.
    #[error("match {0} not found")]
    MatchNotFound(Uuid),

    /// No coupon with this id.
    #[error("coupon {0} not found")]
    CouponNotFound(Uuid),

    /// No bet with this id.
    #[error("bet {0} not found")]
    BetNotFound(Uuid),

    /// The coupon already holds this exact leg.
    #[error("coupon {coupon_id} already has {bet_type}/{bet_value} on match {match_id}")]
    DuplicateBet {
        /// Coupon.
        coupon_id: Uuid,
        /// Match.
        match_id: Uuid,
        /// Bet type.
        bet_type: BetTag,
        /// Bet value.
        bet_value: String,
    },

    /// Known bet type with a value it cannot settle.
    #[error("invalid value {bet_value:?} for bet type {bet_type}")]
    InvalidBet {
        /// Bet type.
        bet_type: BetTag,
        /// Rejected value.
        bet_value: String,
    },

    /// Malformed input, e.g. a blank name.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Rejected fixture update.
    #[error(transparent)]
    Match(#[from] MatchError),
}

/// Fixture update errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// Reopening the first half while closing the second.
    #[error("cannot reopen the first half and finish the second in one update")]
    InconsistentPhases,

    /// Second half flagged finished before the first.
    #[error("second half cannot finish before the first")]
    SecondHalfBeforeFirst,

    /// Counter belongs to a finished half.
    #[error("{field} is locked: its half is finished")]
    ScoreLocked {
        /// The locked counter.
        field: ScoreField,
    },
}

impl StoreError {
    /// True for lookups that found nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::MatchNotFound(_) | StoreError::CouponNotFound(_) | StoreError::BetNotFound(_)
        )
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
