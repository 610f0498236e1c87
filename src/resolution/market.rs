//! Typed markets parsed from a bet's type tag and value string.

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;
use strum::{Display, EnumString};

use crate::catalog::BetType;
use crate::fixture::{Period, Side};

/// Match result selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum Pick {
    /// Home win.
    #[strum(serialize = "1")]
    Home,
    /// Draw.
    #[strum(serialize = "X")]
    Draw,
    /// Away win.
    #[strum(serialize = "2")]
    Away,
}

impl Pick {
    /// Realised result for a scoreline.
    pub fn from_score(home: i128, away: i128) -> Self {
        match home.cmp(&away) {
            Ordering::Greater => Pick::Home,
            Ordering::Equal => Pick::Draw,
            Ordering::Less => Pick::Away,
        }
    }
}

/// Double-chance selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum DoubleChance {
    /// Home or draw.
    #[strum(serialize = "1X")]
    HomeOrDraw,
    /// Either team wins.
    #[strum(serialize = "12")]
    HomeOrAway,
    /// Draw or away.
    #[strum(serialize = "X2")]
    DrawOrAway,
}

impl DoubleChance {
    /// Whether the selection covers a result.
    pub fn covers(&self, result: Pick) -> bool {
        match self {
            DoubleChance::HomeOrDraw => result != Pick::Away,
            DoubleChance::HomeOrAway => result != Pick::Draw,
            DoubleChance::DrawOrAway => result != Pick::Home,
        }
    }
}

/// Odd/even selection on total goals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum Parity {
    /// Odd total.
    #[strum(serialize = "tek")]
    Odd,
    /// Even total (zero included).
    #[strum(serialize = "cift")]
    Even,
}

impl Parity {
    /// Parity of a goal count.
    pub fn of(goals: u64) -> Self {
        if goals % 2 == 1 {
            Parity::Odd
        } else {
            Parity::Even
        }
    }
}

/// Which goals a line counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GoalScope {
    /// Counted period.
    pub period: Period,
    /// Counted side, or both.
    pub side: Option<Side>,
}

impl GoalScope {
    const fn new(period: Period, side: Option<Side>) -> Self {
        Self { period, side }
    }
}

/// A bet's selection in resolvable form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Market {
    /// 1/X/2 over a period.
    Result {
        /// Period the result is taken over.
        period: Period,
        /// Selected result.
        pick: Pick,
    },
    /// Two of the three full-time results.
    DoubleChance(DoubleChance),
    /// Full-time result with a signed goal adjustment on the home side.
    Handicap {
        /// Selected result after adjustment.
        pick: Pick,
        /// Goals added to the home total.
        adjustment: i32,
    },
    /// Goals strictly above a line.
    Over {
        /// Counted goals.
        scope: GoalScope,
        /// Line, e.g. 2.5.
        line: Decimal,
    },
    /// Goals strictly below a line.
    Under {
        /// Counted goals.
        scope: GoalScope,
        /// Line, e.g. 2.5.
        line: Decimal,
    },
    /// Odd or even full-time total.
    Parity(Parity),
    /// Both teams score within a period (or, with `backed = false`, not both).
    BothScore {
        /// Period considered.
        period: Period,
        /// Backing "yes".
        backed: bool,
    },
    /// One team scores during the match (or, with `backed = false`, does not).
    TeamScores {
        /// Team considered.
        side: Side,
        /// Backing "yes".
        backed: bool,
    },
    /// Half-time and full-time results together.
    HalfTimeFullTime {
        /// Required first-half result.
        half_time: Pick,
        /// Required full-time result.
        full_time: Pick,
    },
}

fn parse_line(value: &str) -> Option<Decimal> {
    let line = Decimal::from_str(value).ok()?;
    (line >= Decimal::ZERO).then_some(line)
}

fn parse_handicap(value: &str) -> Option<(Pick, i32)> {
    let (selection, adjustment) = value.split_once(':')?;
    Some((selection.parse::<Pick>().ok()?, adjustment.trim().parse::<i32>().ok()?))
}

fn parse_double_result(value: &str) -> Option<(Pick, Pick)> {
    let (half_time, full_time) = value.split_once('/')?;
    Some((half_time.parse::<Pick>().ok()?, full_time.parse::<Pick>().ok()?))
}

fn literal(value: &str, expected: &str) -> Option<()> {
    (value == expected).then_some(())
}

impl Market {
    /// Parse a bet value for a bet type.
    ///
    /// Returns `None` for a value the bet type does not accept.
    pub fn parse(bet_type: BetType, value: &str) -> Option<Self> {
        use Period::{FirstHalf, FullTime, SecondHalf};

        let value = value.trim();
        let over = |period, side| {
            parse_line(value).map(|line| Market::Over { scope: GoalScope::new(period, side), line })
        };
        let under = |period, side| {
            parse_line(value).map(|line| Market::Under { scope: GoalScope::new(period, side), line })
        };

        match bet_type {
            BetType::MatchResult => value.parse::<Pick>().ok().map(|pick| Market::Result { period: FullTime, pick }),
            BetType::HalfTimeResult => value.parse::<Pick>().ok().map(|pick| Market::Result { period: FirstHalf, pick }),
            BetType::DoubleChance => value.parse::<DoubleChance>().ok().map(Market::DoubleChance),
            BetType::HandicapResult => {
                parse_handicap(value).map(|(pick, adjustment)| Market::Handicap { pick, adjustment })
            }
            BetType::TotalOver => over(FullTime, None),
            BetType::TotalUnder => under(FullTime, None),
            BetType::FirstHalfOver => over(FirstHalf, None),
            BetType::FirstHalfUnder => under(FirstHalf, None),
            BetType::SecondHalfOver => over(SecondHalf, None),
            BetType::SecondHalfUnder => under(SecondHalf, None),
            BetType::HomeOver => over(FullTime, Some(Side::Home)),
            BetType::HomeUnder => under(FullTime, Some(Side::Home)),
            BetType::AwayOver => over(FullTime, Some(Side::Away)),
            BetType::AwayUnder => under(FullTime, Some(Side::Away)),
            BetType::BothScore => literal(value, "var").map(|_| Market::BothScore { period: FullTime, backed: true }),
            BetType::BothScoreNo => literal(value, "yok").map(|_| Market::BothScore { period: FullTime, backed: false }),
            BetType::FirstHalfBothScore => {
                literal(value, "var").map(|_| Market::BothScore { period: FirstHalf, backed: true })
            }
            BetType::FirstHalfBothScoreNo => {
                literal(value, "yok").map(|_| Market::BothScore { period: FirstHalf, backed: false })
            }
            BetType::HomeScores => literal(value, "var").map(|_| Market::TeamScores { side: Side::Home, backed: true }),
            BetType::HomeScoresNo => {
                literal(value, "yok").map(|_| Market::TeamScores { side: Side::Home, backed: false })
            }
            BetType::AwayScores => literal(value, "var").map(|_| Market::TeamScores { side: Side::Away, backed: true }),
            BetType::AwayScoresNo => {
                literal(value, "yok").map(|_| Market::TeamScores { side: Side::Away, backed: false })
            }
            BetType::HalfTimeFullTime => parse_double_result(value)
                .map(|(half_time, full_time)| Market::HalfTimeFullTime { half_time, full_time }),
            BetType::OddEven => value.parse::<Parity>().ok().map(Market::Parity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_result_selections() {
        assert_eq!(
            Market::parse(BetType::MatchResult, "X"),
            Some(Market::Result { period: Period::FullTime, pick: Pick::Draw })
        );
        assert_eq!(
            Market::parse(BetType::HalfTimeResult, "2"),
            Some(Market::Result { period: Period::FirstHalf, pick: Pick::Away })
        );
        assert_eq!(Market::parse(BetType::MatchResult, "x"), None);
        assert_eq!(Market::parse(BetType::MatchResult, "3"), None);
    }

    #[test]
    fn parses_lines_as_decimals() {
        assert_eq!(
            Market::parse(BetType::AwayUnder, "1.5"),
            Some(Market::Under {
                scope: GoalScope { period: Period::FullTime, side: Some(Side::Away) },
                line: dec!(1.5),
            })
        );
        assert_eq!(Market::parse(BetType::TotalOver, "abc"), None);
        assert_eq!(Market::parse(BetType::TotalOver, "NaN"), None);
        assert_eq!(Market::parse(BetType::TotalOver, ""), None);
        assert_eq!(Market::parse(BetType::TotalOver, "-0.5"), None);
    }

    #[test]
    fn parses_signed_handicaps() {
        assert_eq!(
            Market::parse(BetType::HandicapResult, "1:+2"),
            Some(Market::Handicap { pick: Pick::Home, adjustment: 2 })
        );
        assert_eq!(
            Market::parse(BetType::HandicapResult, "X:-1"),
            Some(Market::Handicap { pick: Pick::Draw, adjustment: -1 })
        );
        assert_eq!(Market::parse(BetType::HandicapResult, "1"), None);
        assert_eq!(Market::parse(BetType::HandicapResult, "1:abc"), None);
    }

    #[test]
    fn yes_no_markets_require_matching_value() {
        assert!(Market::parse(BetType::BothScore, "var").is_some());
        assert_eq!(Market::parse(BetType::BothScore, "yok"), None);
        assert!(Market::parse(BetType::AwayScoresNo, "yok").is_some());
    }

    #[test]
    fn parses_double_result_and_parity() {
        assert_eq!(
            Market::parse(BetType::HalfTimeFullTime, "X/1"),
            Some(Market::HalfTimeFullTime { half_time: Pick::Draw, full_time: Pick::Home })
        );
        assert_eq!(Market::parse(BetType::HalfTimeFullTime, "X1"), None);
        assert_eq!(Market::parse(BetType::OddEven, "cift"), Some(Market::Parity(Parity::Even)));
    }

    #[test]
    fn double_chance_coverage() {
        assert!(DoubleChance::HomeOrDraw.covers(Pick::Draw));
        assert!(!DoubleChance::HomeOrDraw.covers(Pick::Away));
        assert!(!DoubleChance::HomeOrAway.covers(Pick::Draw));
        assert!(DoubleChance::DrawOrAway.covers(Pick::Away));
    }

    #[test]
    fn pick_and_parity_from_counts() {
        assert_eq!(Pick::from_score(2, 1), Pick::Home);
        assert_eq!(Pick::from_score(0, 0), Pick::Draw);
        assert_eq!(Pick::from_score(-1, 0), Pick::Away);
        assert_eq!(Parity::of(0), Parity::Even);
        assert_eq!(Parity::of(3), Parity::Odd);
    }
}
