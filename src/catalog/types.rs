//! Bet-type tags as they appear on the wire.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Every bet type the catalog knows how to resolve.
///
/// The string form is the short market code stored on each bet
/// (`"ms"`, `"tg_ust"`, ...).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(into = "&'static str", try_from = "String")]
pub enum BetType {
    /// Full-time result (1/X/2).
    #[strum(serialize = "ms")]
    MatchResult,
    /// First-half result (1/X/2).
    #[strum(serialize = "iy_ms")]
    HalfTimeResult,
    /// Double chance (1X/12/X2).
    #[strum(serialize = "cs")]
    DoubleChance,
    /// Full-time result after a home handicap.
    #[strum(serialize = "hms")]
    HandicapResult,
    /// Total goals over a line.
    #[strum(serialize = "tg_ust")]
    TotalOver,
    /// Total goals under a line.
    #[strum(serialize = "tg_alt")]
    TotalUnder,
    /// First-half goals over a line.
    #[strum(serialize = "iy_ust")]
    FirstHalfOver,
    /// First-half goals under a line.
    #[strum(serialize = "iy_alt")]
    FirstHalfUnder,
    /// Second-half goals over a line.
    #[strum(serialize = "2y_ust")]
    SecondHalfOver,
    /// Second-half goals under a line.
    #[strum(serialize = "2y_alt")]
    SecondHalfUnder,
    /// Both teams score.
    #[strum(serialize = "kg_var")]
    BothScore,
    /// At least one team fails to score.
    #[strum(serialize = "kg_yok")]
    BothScoreNo,
    /// Both teams score in the first half.
    #[strum(serialize = "iy_kg_var")]
    FirstHalfBothScore,
    /// At least one team fails to score in the first half.
    #[strum(serialize = "iy_kg_yok")]
    FirstHalfBothScoreNo,
    /// Home team scores.
    #[strum(serialize = "ev_gol_var")]
    HomeScores,
    /// Home team fails to score.
    #[strum(serialize = "ev_gol_yok")]
    HomeScoresNo,
    /// Away team scores.
    #[strum(serialize = "dep_gol_var")]
    AwayScores,
    /// Away team fails to score.
    #[strum(serialize = "dep_gol_yok")]
    AwayScoresNo,
    /// Home goals over a line.
    #[strum(serialize = "ev_tg_ust")]
    HomeOver,
    /// Home goals under a line.
    #[strum(serialize = "ev_tg_alt")]
    HomeUnder,
    /// Away goals over a line.
    #[strum(serialize = "dep_tg_ust")]
    AwayOver,
    /// Away goals under a line.
    #[strum(serialize = "dep_tg_alt")]
    AwayUnder,
    /// Half-time / full-time double result ("1/X").
    #[strum(serialize = "iy_ms_combined")]
    HalfTimeFullTime,
    /// Odd or even total goals.
    #[strum(serialize = "tek_cift")]
    OddEven,
}

impl BetType {
    /// Short market code, e.g. `"kg_var"`.
    pub fn code(&self) -> &'static str {
        (*self).into()
    }
}

impl TryFrom<String> for BetType {
    type Error = strum::ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Bet-type tag stored on a bet.
///
/// Tags the catalog does not recognise are kept verbatim so that bets
/// written by a newer catalog survive a round trip and resolve as pending.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BetTag {
    /// A catalog bet type.
    Known(BetType),
    /// Any other tag.
    Unknown(String),
}

impl BetTag {
    /// The raw tag string.
    pub fn as_str(&self) -> &str {
        match self {
            BetTag::Known(bet_type) => bet_type.code(),
            BetTag::Unknown(raw) => raw,
        }
    }

    /// The catalog bet type, if recognised.
    pub fn known(&self) -> Option<BetType> {
        match self {
            BetTag::Known(bet_type) => Some(*bet_type),
            BetTag::Unknown(_) => None,
        }
    }
}

impl From<BetType> for BetTag {
    fn from(bet_type: BetType) -> Self {
        BetTag::Known(bet_type)
    }
}

impl From<String> for BetTag {
    fn from(raw: String) -> Self {
        match raw.parse::<BetType>() {
            Ok(bet_type) => BetTag::Known(bet_type),
            Err(_) => BetTag::Unknown(raw),
        }
    }
}

impl From<&str> for BetTag {
    fn from(raw: &str) -> Self {
        BetTag::from(raw.to_string())
    }
}

impl From<BetTag> for String {
    fn from(tag: BetTag) -> Self {
        match tag {
            BetTag::Known(bet_type) => bet_type.code().to_string(),
            BetTag::Unknown(raw) => raw,
        }
    }
}

impl FromStr for BetTag {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(BetTag::from(s))
    }
}

impl fmt::Display for BetTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
