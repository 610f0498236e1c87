//! Coupon status from per-leg outcomes.

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use super::types::{Bet, Coupon};
use crate::fixture::Match;
use crate::resolution::{resolve, Outcome};

/// Source of match state for a coupon's legs.
pub trait MatchLookup {
    /// Match by identity.
    fn find_match(&self, id: &Uuid) -> Option<&Match>;
}

impl MatchLookup for HashMap<Uuid, Match> {
    fn find_match(&self, id: &Uuid) -> Option<&Match> {
        self.get(id)
    }
}

impl MatchLookup for [Match] {
    fn find_match(&self, id: &Uuid) -> Option<&Match> {
        self.iter().find(|m| m.id == *id)
    }
}

/// Coupon status and counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponTally {
    /// Aggregate outcome.
    pub status: Outcome,
    /// Legs currently won.
    pub won_count: usize,
    /// All legs.
    pub total_count: usize,
}

impl CouponTally {
    /// Aggregate leg outcomes: any loss loses, all wins win, otherwise pending.
    /// An empty coupon is pending.
    pub fn from_outcomes<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = Outcome>,
    {
        let mut won_count = 0;
        let mut lost_count = 0;
        let mut total_count = 0;

        for outcome in outcomes {
            total_count += 1;
            match outcome {
                Outcome::Won => won_count += 1,
                Outcome::Lost => lost_count += 1,
                Outcome::Pending => {}
            }
        }

        let status = if lost_count > 0 {
            Outcome::Lost
        } else if total_count > 0 && won_count == total_count {
            Outcome::Won
        } else {
            Outcome::Pending
        };

        Self {
            status,
            won_count,
            total_count,
        }
    }
}

/// Outcome of one leg; a leg whose match is missing stays pending.
pub fn leg_outcome<L: MatchLookup + ?Sized>(bet: &Bet, matches: &L) -> Outcome {
    matches
        .find_match(&bet.match_id)
        .map_or(Outcome::Pending, |fixture| resolve(bet, fixture))
}

/// Aggregate a coupon against the given match state.
pub fn aggregate<L: MatchLookup + ?Sized>(coupon: &Coupon, matches: &L) -> CouponTally {
    CouponTally::from_outcomes(coupon.bets.iter().map(|bet| leg_outcome(bet, matches)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BetTag;

    fn coupon_with(legs: &[(&Match, &str, &str)]) -> Coupon {
        let mut coupon = Coupon::new("test");
        for (fixture, tag, value) in legs {
            coupon.bets.push(Bet::new(coupon.id, fixture.id, BetTag::from(*tag), *value));
        }
        coupon
    }

    #[test]
    fn empty_coupon_is_pending() {
        let tally = aggregate(&Coupon::new("empty"), &HashMap::<Uuid, Match>::new());
        assert_eq!(
            tally,
            CouponTally {
                status: Outcome::Pending,
                won_count: 0,
                total_count: 0
            }
        );
    }

    #[test]
    fn won_and_pending_legs_are_pending() {
        let finished = Match::new("A", "B").with_first_half(1, 0).with_phases(true, true);
        let running = Match::new("C", "D");
        let matches = vec![finished.clone(), running.clone()];

        let coupon = coupon_with(&[(&finished, "ms", "1"), (&running, "ms", "2")]);
        let tally = aggregate(&coupon, matches.as_slice());

        assert_eq!(tally.status, Outcome::Pending);
        assert_eq!(tally.won_count, 1);
        assert_eq!(tally.total_count, 2);
    }

    #[test]
    fn any_lost_leg_loses_the_coupon() {
        let finished = Match::new("A", "B").with_first_half(1, 0).with_phases(true, true);
        let matches = vec![finished.clone()];

        let coupon = coupon_with(&[(&finished, "ms", "1"), (&finished, "ms", "2")]);
        let tally = aggregate(&coupon, matches.as_slice());

        assert_eq!(tally.status, Outcome::Lost);
        assert_eq!(tally.won_count, 1);
    }

    #[test]
    fn all_won_legs_win_the_coupon() {
        let finished = Match::new("A", "B").with_first_half(2, 1).with_phases(true, true);
        let matches: HashMap<Uuid, Match> = [(finished.id, finished.clone())].into_iter().collect();

        let coupon = coupon_with(&[(&finished, "ms", "1"), (&finished, "kg_var", "var"), (&finished, "tg_ust", "2.5")]);
        let tally = aggregate(&coupon, &matches);

        assert_eq!(tally.status, Outcome::Won);
        assert_eq!(tally.won_count, 3);
        assert_eq!(tally.total_count, 3);
    }

    #[test]
    fn leg_with_missing_match_counts_as_pending() {
        let finished = Match::new("A", "B").with_first_half(1, 0).with_phases(true, true);
        let ghost = Match::new("X", "Y");
        let matches = vec![finished.clone()];

        let coupon = coupon_with(&[(&finished, "ms", "1"), (&ghost, "ms", "1")]);
        let tally = aggregate(&coupon, matches.as_slice());

        assert_eq!(tally.status, Outcome::Pending);
        assert_eq!(tally.won_count, 1);
        assert_eq!(tally.total_count, 2);
    }

    #[test]
    fn loss_dominates_regardless_of_position() {
        let outcomes = [Outcome::Won, Outcome::Pending, Outcome::Lost, Outcome::Won];
        assert_eq!(CouponTally::from_outcomes(outcomes).status, Outcome::Lost);
        assert_eq!(CouponTally::from_outcomes(outcomes.into_iter().rev()).status, Outcome::Lost);
    }
}
