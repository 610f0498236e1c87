//! `DashMap`-backed store.

use std::cmp::Reverse;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::catalog::{catalog, BetTag};
use crate::coupon::{rank_matches, Bet, Coupon, LegKey, Snapshot};
use crate::error::StoreError;
use crate::fixture::{Match, MatchUpdate};
use crate::metrics::{inc_store_mutation, inc_store_rejection};
use crate::resolution::Market;

/// Match a new bet is placed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchRef {
    /// A match already in the store.
    Existing(Uuid),
    /// A fixture created together with the bet.
    New {
        /// Home team name.
        home_team: String,
        /// Away team name.
        away_team: String,
    },
}

/// Input for [`MemoryStore::add_bet`].
#[derive(Debug, Clone)]
pub struct NewBet {
    /// Coupon to add the leg to.
    pub coupon_id: Uuid,
    /// Match the leg is placed on.
    pub target: MatchRef,
    /// Bet-type tag.
    pub bet_type: BetTag,
    /// Selection or line.
    pub bet_value: String,
}

#[derive(Debug, Clone)]
struct StoredCoupon {
    seq: u64,
    coupon: Coupon,
}

/// Concurrent in-memory store.
///
/// Coupons hold their bets inline. `legs` enforces one bet per
/// (coupon, match, type, value) and `bet_owner` maps a bet to its coupon.
#[derive(Debug, Default)]
pub struct MemoryStore {
    matches: DashMap<Uuid, Match>,
    coupons: DashMap<Uuid, StoredCoupon>,
    legs: DashMap<LegKey, Uuid>,
    bet_owner: DashMap<Uuid, Uuid>,
    next_seq: AtomicU64,
}

fn required(value: &str, field: &str) -> Result<String, StoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        inc_store_rejection("validation");
        return Err(StoreError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Non-blank tag and value; known types must carry a value they can settle.
fn validate_selection(bet_type: &BetTag, bet_value: &str) -> Result<String, StoreError> {
    required(bet_type.as_str(), "betType")?;
    let bet_value = required(bet_value, "betValue")?;

    if let Some(known) = bet_type.known() {
        if Market::parse(known, &bet_value).is_none() {
            inc_store_rejection("invalid_bet");
            return Err(StoreError::InvalidBet {
                bet_type: bet_type.clone(),
                bet_value,
            });
        }
        if !catalog().is_listed(known, &bet_value) {
            debug!(bet_type = %bet_type, bet_value = %bet_value, "Accepting unlisted selection");
        }
    }

    Ok(bet_value)
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of matches.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Number of coupons.
    pub fn coupon_count(&self) -> usize {
        self.coupons.len()
    }

    /// Number of bets across all coupons.
    pub fn bet_count(&self) -> usize {
        self.bet_owner.len()
    }

    // === Matches ===

    /// Create a live 0-0 match.
    #[instrument(skip(self))]
    pub fn create_match(&self, home_team: &str, away_team: &str) -> Result<Match, StoreError> {
        let fixture = Match::new(required(home_team, "homeTeam")?, required(away_team, "awayTeam")?);
        self.matches.insert(fixture.id, fixture.clone());

        inc_store_mutation("create_match");
        info!(match_id = %fixture.id, "Match created");
        Ok(fixture)
    }

    /// Match by id.
    pub fn get_match(&self, id: Uuid) -> Result<Match, StoreError> {
        self.matches
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(StoreError::MatchNotFound(id))
    }

    /// All matches: live, then half time, then finished; newest first in each.
    pub fn list_matches(&self) -> Vec<Match> {
        let mut matches: Vec<Match> = self.matches.iter().map(|entry| entry.value().clone()).collect();
        rank_matches(&mut matches);
        matches
    }

    /// Apply a guarded score or phase update.
    #[instrument(skip(self, update))]
    pub fn update_match(&self, id: Uuid, update: &MatchUpdate) -> Result<Match, StoreError> {
        let mut entry = self.matches.get_mut(&id).ok_or(StoreError::MatchNotFound(id))?;

        if let Err(e) = entry.apply(update) {
            inc_store_rejection("match_update");
            warn!(match_id = %id, error = %e, "Match update rejected");
            return Err(e.into());
        }

        inc_store_mutation("update_match");
        info!(match_id = %id, score = %entry.scoreline(), status = %entry.status, "Match updated");
        Ok(entry.value().clone())
    }

    /// Delete a match and every bet placed on it.
    #[instrument(skip(self))]
    pub fn delete_match(&self, id: Uuid) -> Result<Match, StoreError> {
        let (_, fixture) = self.matches.remove(&id).ok_or(StoreError::MatchNotFound(id))?;

        let now = Utc::now();
        let mut orphaned = Vec::new();
        for mut entry in self.coupons.iter_mut() {
            let coupon = &mut entry.value_mut().coupon;
            let before = coupon.bets.len();
            coupon.bets.retain(|bet| {
                if bet.match_id == id {
                    orphaned.push(bet.clone());
                    false
                } else {
                    true
                }
            });
            if coupon.bets.len() != before {
                coupon.updated_at = now;
            }
        }
        self.forget_bets(&orphaned);

        inc_store_mutation("delete_match");
        info!(match_id = %id, bets_removed = orphaned.len(), "Match deleted");
        Ok(fixture)
    }

    // === Coupons ===

    /// Create an empty coupon.
    #[instrument(skip(self))]
    pub fn create_coupon(&self, name: &str) -> Result<Coupon, StoreError> {
        let coupon = Coupon::new(required(name, "name")?);
        self.insert_coupon(coupon.clone());

        inc_store_mutation("create_coupon");
        info!(coupon_id = %coupon.id, "Coupon created");
        Ok(coupon)
    }

    fn insert_coupon(&self, coupon: Coupon) {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.coupons.insert(coupon.id, StoredCoupon { seq, coupon });
    }

    /// Coupon with its bets.
    pub fn get_coupon(&self, id: Uuid) -> Result<Coupon, StoreError> {
        self.coupons
            .get(&id)
            .map(|entry| entry.coupon.clone())
            .ok_or(StoreError::CouponNotFound(id))
    }

    /// All coupons, newest first.
    pub fn list_coupons(&self) -> Vec<Coupon> {
        let mut stored: Vec<StoredCoupon> = self.coupons.iter().map(|entry| entry.value().clone()).collect();
        stored.sort_by_key(|s| Reverse(s.seq));
        stored.into_iter().map(|s| s.coupon).collect()
    }

    /// Delete a coupon and its bets.
    #[instrument(skip(self))]
    pub fn delete_coupon(&self, id: Uuid) -> Result<Coupon, StoreError> {
        let (_, stored) = self.coupons.remove(&id).ok_or(StoreError::CouponNotFound(id))?;
        self.forget_bets(&stored.coupon.bets);

        inc_store_mutation("delete_coupon");
        info!(coupon_id = %id, bets_removed = stored.coupon.bets.len(), "Coupon deleted");
        Ok(stored.coupon)
    }

    // === Bets ===

    /// Add a leg to a coupon, creating its match first when requested.
    #[instrument(skip(self, new_bet), fields(coupon_id = %new_bet.coupon_id, bet_type = %new_bet.bet_type))]
    pub fn add_bet(&self, new_bet: NewBet) -> Result<Bet, StoreError> {
        let bet_value = validate_selection(&new_bet.bet_type, &new_bet.bet_value)?;

        if !self.coupons.contains_key(&new_bet.coupon_id) {
            return Err(StoreError::CouponNotFound(new_bet.coupon_id));
        }

        let match_id = match new_bet.target {
            MatchRef::Existing(id) if self.matches.contains_key(&id) => id,
            MatchRef::Existing(id) => return Err(StoreError::MatchNotFound(id)),
            MatchRef::New { home_team, away_team } => self.create_match(&home_team, &away_team)?.id,
        };

        let bet = self.insert_bet(Bet::new(new_bet.coupon_id, match_id, new_bet.bet_type, bet_value))?;

        inc_store_mutation("add_bet");
        info!(bet_id = %bet.id, match_id = %match_id, "Bet added");
        Ok(bet)
    }

    /// Remove one leg from its coupon.
    #[instrument(skip(self))]
    pub fn remove_bet(&self, id: Uuid) -> Result<Bet, StoreError> {
        let (_, coupon_id) = self.bet_owner.remove(&id).ok_or(StoreError::BetNotFound(id))?;

        let removed = self.coupons.get_mut(&coupon_id).and_then(|mut entry| {
            let coupon = &mut entry.value_mut().coupon;
            let position = coupon.bets.iter().position(|bet| bet.id == id)?;
            coupon.updated_at = Utc::now();
            Some(coupon.bets.remove(position))
        });

        let bet = removed.ok_or(StoreError::BetNotFound(id))?;
        self.legs.remove(&bet.leg_key());

        inc_store_mutation("remove_bet");
        info!(bet_id = %id, coupon_id = %coupon_id, "Bet removed");
        Ok(bet)
    }

    /// Claim the leg key, then attach the bet to its coupon.
    ///
    /// The match is checked again once the bet is visible, so a concurrent
    /// `delete_match` either sweeps the bet or makes this call fail.
    fn insert_bet(&self, bet: Bet) -> Result<Bet, StoreError> {
        let key = bet.leg_key();
        match self.legs.entry(key.clone()) {
            Entry::Occupied(_) => {
                inc_store_rejection("duplicate_bet");
                return Err(StoreError::DuplicateBet {
                    coupon_id: key.coupon_id,
                    match_id: key.match_id,
                    bet_type: key.bet_type,
                    bet_value: key.bet_value,
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(bet.id);
            }
        }

        let attached = self.coupons.get_mut(&bet.coupon_id).map(|mut entry| {
            let coupon = &mut entry.value_mut().coupon;
            coupon.bets.push(bet.clone());
            coupon.updated_at = Utc::now();
        });

        if attached.is_none() {
            // Coupon deleted between the existence check and now.
            self.legs.remove(&key);
            return Err(StoreError::CouponNotFound(bet.coupon_id));
        }

        self.bet_owner.insert(bet.id, bet.coupon_id);

        if !self.matches.contains_key(&bet.match_id) {
            self.detach(&bet);
            return Err(StoreError::MatchNotFound(bet.match_id));
        }

        Ok(bet)
    }

    /// Undo a half-finished `insert_bet`. Tolerates a cascade that got there first.
    fn detach(&self, bet: &Bet) {
        if let Some(mut entry) = self.coupons.get_mut(&bet.coupon_id) {
            entry.value_mut().coupon.bets.retain(|b| b.id != bet.id);
        }
        self.legs.remove_if(&bet.leg_key(), |_, owner| *owner == bet.id);
        self.bet_owner.remove(&bet.id);
    }

    fn forget_bets(&self, bets: &[Bet]) {
        for bet in bets {
            self.legs.remove(&bet.leg_key());
            self.bet_owner.remove(&bet.id);
        }
    }

    // === Snapshots ===

    /// Consistent-enough copy of all matches and coupons for evaluation.
    pub fn snapshot(&self) -> Snapshot {
        let matches = self.matches.iter().map(|entry| entry.value().clone()).collect();
        Snapshot::new(matches, self.list_coupons())
    }

    /// Preload matches and coupons. Coupons keep the seed's order when listed.
    #[instrument(skip(self, seed))]
    pub fn load_seed(&self, seed: Snapshot) -> Result<(), StoreError> {
        let (matches, coupons) = seed.into_parts();

        for fixture in &matches {
            required(&fixture.home_team, "homeTeam")?;
            required(&fixture.away_team, "awayTeam")?;
            if let Err(e) = fixture.check_phases() {
                inc_store_rejection("match_update");
                warn!(match_id = %fixture.id, error = %e, "Seed match rejected");
                return Err(e.into());
            }
        }
        let match_count = matches.len();
        for fixture in matches {
            self.matches.insert(fixture.id, fixture);
        }

        let coupon_count = coupons.len();
        for mut coupon in coupons.into_iter().rev() {
            required(&coupon.name, "name")?;
            let bets = std::mem::take(&mut coupon.bets);
            self.insert_coupon(coupon);

            for bet in bets {
                let bet_value = validate_selection(&bet.bet_type, &bet.bet_value)?;
                if !self.matches.contains_key(&bet.match_id) {
                    return Err(StoreError::MatchNotFound(bet.match_id));
                }
                debug!(bet_id = %bet.id, "Seeding bet");
                self.insert_bet(Bet { bet_value, ..bet })?;
            }
        }

        info!(matches = match_count, coupons = coupon_count, "Seed loaded");
        Ok(())
    }
}
