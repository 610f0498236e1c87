//! Coupon and bet records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::BetTag;

/// One leg of a coupon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bet {
    /// Bet identity.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Bet-type tag.
    pub bet_type: BetTag,
    /// Selection or line, e.g. `"1"`, `"2.5"`, `"1:-1"`.
    pub bet_value: String,
    /// Owning coupon. May be omitted when nested under a coupon.
    #[serde(default)]
    pub coupon_id: Uuid,
    /// Referenced match.
    pub match_id: Uuid,
}

impl Bet {
    /// Create a new bet.
    pub fn new(coupon_id: Uuid, match_id: Uuid, bet_type: BetTag, bet_value: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            bet_type,
            bet_value: bet_value.into(),
            coupon_id,
            match_id,
        }
    }

    /// Uniqueness key of the leg within its coupon.
    pub fn leg_key(&self) -> LegKey {
        LegKey {
            coupon_id: self.coupon_id,
            match_id: self.match_id,
            bet_type: self.bet_type.clone(),
            bet_value: self.bet_value.clone(),
        }
    }
}

/// (coupon, match, type, value): at most one bet per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LegKey {
    /// Coupon.
    pub coupon_id: Uuid,
    /// Match.
    pub match_id: Uuid,
    /// Bet type.
    pub bet_type: BetTag,
    /// Bet value.
    pub bet_value: String,
}

/// A named group of bets that wins only if every leg wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    /// Coupon identity.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Coupon name.
    pub name: String,
    /// Creation time.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    /// Legs in display order.
    #[serde(default)]
    pub bets: Vec<Bet>,
}

impl Coupon {
    /// Create an empty coupon.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: now,
            updated_at: now,
            bets: Vec::new(),
        }
    }
}
