//! Display ordering for coupons and matches.

use std::cmp::Reverse;

use serde::Serialize;

use super::aggregator::CouponTally;
use super::types::Coupon;
use crate::fixture::Match;
use crate::resolution::Outcome;

/// Coupon together with its current status. Recomputed on every read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CouponWithStatus {
    /// Coupon record.
    #[serde(flatten)]
    pub coupon: Coupon,
    /// Status and counters.
    #[serde(flatten)]
    pub tally: CouponTally,
}

impl CouponWithStatus {
    /// Aggregate status.
    pub fn status(&self) -> Outcome {
        self.tally.status
    }
}

/// Sort position of a coupon status: won, then pending, then lost.
pub fn status_rank(status: Outcome) -> u8 {
    match status {
        Outcome::Won => 0,
        Outcome::Pending => 1,
        Outcome::Lost => 2,
    }
}

/// Order coupons by status, then by most legs won.
///
/// The sort is stable, so ties keep the order the coupons were fetched in.
pub fn rank_coupons(coupons: &mut [CouponWithStatus]) {
    coupons.sort_by_key(|c| (status_rank(c.tally.status), Reverse(c.tally.won_count)));
}

/// Order matches: live first, then paused at half time, then finished;
/// newest first within each group.
pub fn rank_matches(matches: &mut [Match]) {
    matches.sort_by_key(|m| (m.is_finished(), m.is_half_time(), Reverse(m.created_at)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn with_status(name: &str, status: Outcome, won_count: usize) -> CouponWithStatus {
        CouponWithStatus {
            coupon: Coupon::new(name),
            tally: CouponTally {
                status,
                won_count,
                total_count: 5,
            },
        }
    }

    fn names(coupons: &[CouponWithStatus]) -> Vec<&str> {
        coupons.iter().map(|c| c.coupon.name.as_str()).collect()
    }

    #[test]
    fn coupons_rank_by_status_then_wins() {
        let mut coupons = vec![
            with_status("lost", Outcome::Lost, 4),
            with_status("pending-1", Outcome::Pending, 1),
            with_status("won", Outcome::Won, 5),
            with_status("pending-3", Outcome::Pending, 3),
        ];
        rank_coupons(&mut coupons);

        assert_eq!(names(&coupons), vec!["won", "pending-3", "pending-1", "lost"]);
    }

    #[test]
    fn coupon_ties_keep_fetch_order() {
        let mut coupons = vec![
            with_status("first", Outcome::Pending, 2),
            with_status("second", Outcome::Pending, 2),
            with_status("third", Outcome::Pending, 2),
        ];
        rank_coupons(&mut coupons);

        assert_eq!(names(&coupons), vec!["first", "second", "third"]);
    }

    #[test]
    fn matches_rank_live_then_half_time_then_finished() {
        let now = Utc::now();
        let mut old_live = Match::new("old", "live");
        old_live.created_at = now - Duration::minutes(10);
        let mut new_live = Match::new("new", "live");
        new_live.created_at = now;
        let paused = Match::new("half", "time").with_phases(true, false);
        let done = Match::new("full", "time").with_phases(true, true);

        let mut matches = vec![done, paused, old_live, new_live];
        rank_matches(&mut matches);

        let order: Vec<&str> = matches.iter().map(|m| m.home_team.as_str()).collect();
        assert_eq!(order, vec!["new", "old", "half", "full"]);
    }

    #[test]
    fn serializes_flat_with_counters() {
        let value = serde_json::to_value(with_status("c", Outcome::Won, 5)).unwrap();
        assert_eq!(value["name"], "c");
        assert_eq!(value["status"], "won");
        assert_eq!(value["wonCount"], 5);
        assert_eq!(value["totalCount"], 5);
    }
}
