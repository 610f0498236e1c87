//! Immutable view of matches and coupons handed to the evaluator.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::aggregator::{aggregate, leg_outcome, CouponTally, MatchLookup};
use super::ranking::{rank_coupons, rank_matches, CouponWithStatus};
use super::types::{Bet, Coupon};
use crate::catalog::describe_bet;
use crate::fixture::Match;
use crate::resolution::Outcome;

/// Wire form of a snapshot (seed files, `evaluate` command).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotData {
    /// Matches in any order.
    #[serde(default)]
    pub matches: Vec<Match>,
    /// Coupons in fetch order, bets nested.
    #[serde(default)]
    pub coupons: Vec<Coupon>,
}

/// Matches by id plus coupons in fetch order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "SnapshotData", into = "SnapshotData")]
pub struct Snapshot {
    matches: HashMap<Uuid, Match>,
    coupons: Vec<Coupon>,
}

impl From<SnapshotData> for Snapshot {
    fn from(data: SnapshotData) -> Self {
        Snapshot::new(data.matches, data.coupons)
    }
}

impl From<Snapshot> for SnapshotData {
    fn from(snapshot: Snapshot) -> Self {
        let mut matches: Vec<Match> = snapshot.matches.into_values().collect();
        rank_matches(&mut matches);
        SnapshotData {
            matches,
            coupons: snapshot.coupons,
        }
    }
}

/// One leg with its current outcome, for detail views.
#[derive(Debug, Clone, Serialize)]
pub struct LegView {
    /// Bet record.
    #[serde(flatten)]
    pub bet: Bet,
    /// "`<type>: <value>`" label.
    pub label: String,
    /// Current outcome.
    pub outcome: Outcome,
    /// Referenced match, if still present.
    #[serde(rename = "match")]
    pub fixture: Option<Match>,
}

/// Coupon with per-leg outcomes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponDetail {
    /// Coupon identity.
    pub id: Uuid,
    /// Coupon name.
    pub name: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Status and counters.
    #[serde(flatten)]
    pub tally: CouponTally,
    /// Legs in display order.
    pub legs: Vec<LegView>,
}

/// Number of coupons per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    /// Won coupons.
    pub won: usize,
    /// Pending coupons.
    pub pending: usize,
    /// Lost coupons.
    pub lost: usize,
}

impl MatchLookup for Snapshot {
    fn find_match(&self, id: &Uuid) -> Option<&Match> {
        self.matches.get(id)
    }
}

impl Snapshot {
    /// Build a snapshot. Bets are re-parented onto the coupon that holds them
    /// and match statuses are re-derived from the phase flags.
    pub fn new(matches: Vec<Match>, mut coupons: Vec<Coupon>) -> Self {
        let matches = matches
            .into_iter()
            .map(|mut m| {
                m.refresh_status();
                (m.id, m)
            })
            .collect();

        for coupon in &mut coupons {
            for bet in &mut coupon.bets {
                bet.coupon_id = coupon.id;
            }
        }

        Self { matches, coupons }
    }

    /// Matches and coupons, consuming the snapshot.
    pub fn into_parts(self) -> (Vec<Match>, Vec<Coupon>) {
        (self.matches.into_values().collect(), self.coupons)
    }

    /// Number of matches.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Coupons in fetch order.
    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    /// Matches in no particular order.
    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.matches.values()
    }

    /// Coupon by id.
    pub fn coupon(&self, id: &Uuid) -> Option<&Coupon> {
        self.coupons.iter().find(|c| c.id == *id)
    }

    /// Status and counters of one coupon.
    pub fn evaluate(&self, coupon: &Coupon) -> CouponWithStatus {
        CouponWithStatus {
            coupon: coupon.clone(),
            tally: aggregate(coupon, self),
        }
    }

    /// All coupons with status, in display order.
    pub fn ranked_coupons(&self) -> Vec<CouponWithStatus> {
        let mut evaluated: Vec<CouponWithStatus> = self.coupons.iter().map(|c| self.evaluate(c)).collect();
        rank_coupons(&mut evaluated);
        evaluated
    }

    /// All matches, in display order.
    pub fn ranked_matches(&self) -> Vec<Match> {
        let mut matches: Vec<Match> = self.matches.values().cloned().collect();
        rank_matches(&mut matches);
        matches
    }

    /// Legs of a coupon with their current outcome.
    pub fn legs(&self, coupon: &Coupon) -> Vec<LegView> {
        coupon
            .bets
            .iter()
            .map(|bet| LegView {
                bet: bet.clone(),
                label: describe_bet(&bet.bet_type, &bet.bet_value),
                outcome: leg_outcome(bet, self),
                fixture: self.matches.get(&bet.match_id).cloned(),
            })
            .collect()
    }

    /// Detail view of one coupon.
    pub fn detail(&self, id: &Uuid) -> Option<CouponDetail> {
        let coupon = self.coupon(id)?;
        let legs = self.legs(coupon);
        let tally = CouponTally::from_outcomes(legs.iter().map(|leg| leg.outcome));

        Some(CouponDetail {
            id: coupon.id,
            name: coupon.name.clone(),
            created_at: coupon.created_at,
            updated_at: coupon.updated_at,
            tally,
            legs,
        })
    }

    /// Coupons per status.
    pub fn status_counts(&self) -> StatusCounts {
        self.coupons.iter().fold(StatusCounts::default(), |mut counts, coupon| {
            match aggregate(coupon, self).status {
                Outcome::Won => counts.won += 1,
                Outcome::Pending => counts.pending += 1,
                Outcome::Lost => counts.lost += 1,
            }
            counts
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BetTag;
    use pretty_assertions::assert_eq;

    fn snapshot() -> (Snapshot, Uuid, Uuid, Uuid) {
        let finished = Match::new("Ev", "Dep").with_first_half(1, 0).with_second_half(1, 0).with_phases(true, true);
        let live = Match::new("Canlı", "Maç").with_second_half(2, 0);

        let mut lost = Coupon::new("lost");
        lost.bets.push(Bet::new(lost.id, finished.id, BetTag::from("ms"), "1"));
        lost.bets.push(Bet::new(lost.id, finished.id, BetTag::from("tg_ust"), "2.5"));

        let mut pending = Coupon::new("pending");
        pending.bets.push(Bet::new(pending.id, finished.id, BetTag::from("ms"), "1"));
        pending.bets.push(Bet::new(pending.id, live.id, BetTag::from("kg_var"), "var"));

        let mut won = Coupon::new("won");
        won.bets.push(Bet::new(won.id, finished.id, BetTag::from("tg_alt"), "2.5"));

        let ids = (lost.id, pending.id, won.id);
        (Snapshot::new(vec![finished, live], vec![lost, pending, won]), ids.0, ids.1, ids.2)
    }

    #[test]
    fn ranked_coupons_follow_status_order() {
        let (snapshot, _, _, _) = snapshot();
        let ranked = snapshot.ranked_coupons();
        let names: Vec<&str> = ranked.iter().map(|c| c.coupon.name.as_str()).collect();

        assert_eq!(names, vec!["won", "pending", "lost"]);
        assert_eq!(ranked[1].tally, CouponTally { status: Outcome::Pending, won_count: 1, total_count: 2 });
        assert_eq!(ranked[2].tally.won_count, 1);
    }

    #[test]
    fn detail_lists_leg_outcomes_and_labels() {
        let (snapshot, lost_id, _, _) = snapshot();
        let detail = snapshot.detail(&lost_id).unwrap();

        assert_eq!(detail.tally.status, Outcome::Lost);
        let outcomes: Vec<Outcome> = detail.legs.iter().map(|l| l.outcome).collect();
        assert_eq!(outcomes, vec![Outcome::Won, Outcome::Lost]);
        assert_eq!(detail.legs[0].label, "Maç Sonucu: Ev Sahibi");
        assert!(detail.legs[0].fixture.is_some());
    }

    #[test]
    fn status_counts_cover_every_coupon() {
        let (snapshot, _, _, _) = snapshot();
        assert_eq!(snapshot.status_counts(), StatusCounts { won: 1, pending: 1, lost: 1 });
    }

    #[test]
    fn seed_json_reparents_bets_and_derives_status() {
        let json = r#"{
            "matches": [
                {"id": "6f1c1b9e-3f55-4c1e-9a43-5d5a3c0f7a01", "homeTeam": "A", "awayTeam": "B",
                 "home1h": 1, "firstHalfFinished": true, "secondHalfFinished": true}
            ],
            "coupons": [
                {"name": "seed", "bets": [
                    {"betType": "ms", "betValue": "1", "matchId": "6f1c1b9e-3f55-4c1e-9a43-5d5a3c0f7a01"}
                ]}
            ]
        }"#;
        let snapshot: Snapshot = serde_json::from_str(json).unwrap();

        let coupon = &snapshot.coupons()[0];
        assert_eq!(coupon.bets[0].coupon_id, coupon.id);
        assert_eq!(snapshot.matches().next().unwrap().status, crate::fixture::MatchStatus::Finished);
        assert_eq!(snapshot.evaluate(coupon).tally.status, Outcome::Won);
    }
}
