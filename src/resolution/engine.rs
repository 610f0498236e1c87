//! Bet resolution under partial match information.
//!
//! Scores only grow while a half is in play, and the phase flags only move
//! forward (apart from an explicit undo). Every rule below is written so that
//! a settled outcome stays settled as the match progresses:
//!
//! - results, double chance, handicap and parity wait for their period to end;
//! - "over" and "scores: yes" markets win the moment the event happens;
//! - "under" and "scores: no" markets lose the moment the event happens;
//! - half-time/full-time loses as soon as the half-time leg is known wrong.

use rust_decimal::Decimal;

use super::market::{Market, Parity, Pick};
use super::outcome::Outcome;
use crate::catalog::BetTag;
use crate::coupon::Bet;
use crate::fixture::{Match, Period};

/// Resolve a bet against the current state of its match.
///
/// Never fails: unknown tags and values the bet type does not accept resolve
/// as pending.
pub fn resolve(bet: &Bet, fixture: &Match) -> Outcome {
    resolve_selection(&bet.bet_type, &bet.bet_value, fixture)
}

/// Resolve a raw (tag, value) selection against a match.
pub fn resolve_selection(tag: &BetTag, value: &str, fixture: &Match) -> Outcome {
    let bet_type = match tag {
        BetTag::Known(bet_type) => *bet_type,
        // future catalog entries stay open until this build learns them
        BetTag::Unknown(_) => return Outcome::Pending,
    };

    match Market::parse(bet_type, value) {
        Some(market) => market.settle(fixture),
        None => Outcome::Pending,
    }
}

fn result_of(fixture: &Match, period: Period) -> Pick {
    let (home, away) = fixture.score(period);
    Pick::from_score(i128::from(home), i128::from(away))
}

impl Market {
    /// Outcome of this market for a match state.
    pub fn settle(&self, fixture: &Match) -> Outcome {
        match *self {
            Market::Result { period, pick } => {
                Outcome::at_period_end(fixture.is_concluded(period), || result_of(fixture, period) == pick)
            }

            Market::DoubleChance(selection) => Outcome::at_period_end(fixture.is_concluded(Period::FullTime), || {
                selection.covers(result_of(fixture, Period::FullTime))
            }),

            Market::Handicap { pick, adjustment } => {
                Outcome::at_period_end(fixture.is_concluded(Period::FullTime), || {
                    let (home, away) = fixture.score(Period::FullTime);
                    Pick::from_score(i128::from(home) + i128::from(adjustment), i128::from(away)) == pick
                })
            }

            Market::Over { scope, line } => {
                let goals = Decimal::from(fixture.goals(scope.period, scope.side));
                Outcome::on_event(goals > line, true, fixture.is_concluded(scope.period))
            }

            Market::Under { scope, line } => {
                let goals = Decimal::from(fixture.goals(scope.period, scope.side));
                Outcome::on_event(goals >= line, false, fixture.is_concluded(scope.period))
            }

            Market::Parity(parity) => Outcome::at_period_end(fixture.is_concluded(Period::FullTime), || {
                Parity::of(fixture.goals(Period::FullTime, None)) == parity
            }),

            Market::BothScore { period, backed } => {
                let (home, away) = fixture.score(period);
                Outcome::on_event(home > 0 && away > 0, backed, fixture.is_concluded(period))
            }

            Market::TeamScores { side, backed } => {
                let scored = fixture.goals(Period::FullTime, Some(side)) > 0;
                Outcome::on_event(scored, backed, fixture.is_concluded(Period::FullTime))
            }

            Market::HalfTimeFullTime { half_time, full_time } => {
                if fixture.is_concluded(Period::FirstHalf) && result_of(fixture, Period::FirstHalf) != half_time {
                    return Outcome::Lost;
                }
                Outcome::at_period_end(fixture.is_concluded(Period::FullTime), || {
                    result_of(fixture, Period::FirstHalf) == half_time
                        && result_of(fixture, Period::FullTime) == full_time
                })
            }
        }
    }
}
