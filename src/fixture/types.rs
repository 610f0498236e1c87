//! Match records and their score views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// Team side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Home team.
    #[strum(serialize = "home")]
    Home,
    /// Away team.
    #[strum(serialize = "away")]
    Away,
}

/// Portion of a match a market is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    /// Both halves.
    #[strum(serialize = "full_time")]
    FullTime,
    /// First half only.
    #[strum(serialize = "first_half")]
    FirstHalf,
    /// Second half only.
    #[strum(serialize = "second_half")]
    SecondHalf,
}

/// Derived match status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    /// In play, or not started.
    #[default]
    #[strum(serialize = "live")]
    Live,
    /// First half finished, second not.
    #[strum(serialize = "halftime")]
    HalfTime,
    /// Both halves finished.
    #[strum(serialize = "finished")]
    Finished,
}

/// A fixture with per-half score counters and phase flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// Match identity.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    /// Home team name.
    pub home_team: String,
    /// Away team name.
    pub away_team: String,
    /// Home goals in the first half.
    #[serde(default)]
    pub home_1h: u32,
    /// Away goals in the first half.
    #[serde(default)]
    pub away_1h: u32,
    /// Home goals in the second half.
    #[serde(default)]
    pub home_2h: u32,
    /// Away goals in the second half.
    #[serde(default)]
    pub away_2h: u32,
    /// First half concluded.
    #[serde(default)]
    pub first_half_finished: bool,
    /// Second half concluded (implies the first).
    #[serde(default)]
    pub second_half_finished: bool,
    /// Status derived from the phase flags.
    #[serde(default)]
    pub status: MatchStatus,
    /// Creation time.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Match {
    /// Create a fresh 0-0 match that has not finished any half.
    pub fn new(home_team: impl Into<String>, away_team: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            home_team: home_team.into(),
            away_team: away_team.into(),
            home_1h: 0,
            away_1h: 0,
            home_2h: 0,
            away_2h: 0,
            first_half_finished: false,
            second_half_finished: false,
            status: MatchStatus::Live,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set first-half counters (builder style).
    pub fn with_first_half(mut self, home: u32, away: u32) -> Self {
        self.home_1h = home;
        self.away_1h = away;
        self
    }

    /// Set second-half counters (builder style).
    pub fn with_second_half(mut self, home: u32, away: u32) -> Self {
        self.home_2h = home;
        self.away_2h = away;
        self
    }

    /// Set phase flags and re-derive the status (builder style).
    pub fn with_phases(mut self, first_half_finished: bool, second_half_finished: bool) -> Self {
        self.first_half_finished = first_half_finished;
        self.second_half_finished = second_half_finished;
        self.refresh_status();
        self
    }

    /// Status implied by the phase flags.
    pub fn derived_status(&self) -> MatchStatus {
        if self.second_half_finished {
            MatchStatus::Finished
        } else if self.first_half_finished {
            MatchStatus::HalfTime
        } else {
            MatchStatus::Live
        }
    }

    /// Bring the stored status in line with the flags.
    pub fn refresh_status(&mut self) {
        self.status = self.derived_status();
    }

    /// Whether the match is paused between halves.
    pub fn is_half_time(&self) -> bool {
        self.first_half_finished && !self.second_half_finished
    }

    /// Whether the match is over.
    pub fn is_finished(&self) -> bool {
        self.second_half_finished
    }

    /// `(home, away)` goals within a period.
    ///
    /// Widened to `u64` so sums of any stored counters cannot overflow.
    pub fn score(&self, period: Period) -> (u64, u64) {
        let (h1, a1) = (u64::from(self.home_1h), u64::from(self.away_1h));
        let (h2, a2) = (u64::from(self.home_2h), u64::from(self.away_2h));
        match period {
            Period::FullTime => (h1 + h2, a1 + a2),
            Period::FirstHalf => (h1, a1),
            Period::SecondHalf => (h2, a2),
        }
    }

    /// Goals within a period, for one side or both.
    pub fn goals(&self, period: Period, side: Option<Side>) -> u64 {
        let (home, away) = self.score(period);
        match side {
            Some(Side::Home) => home,
            Some(Side::Away) => away,
            None => home + away,
        }
    }

    /// Whether no more goals can be added to the period.
    pub fn is_concluded(&self, period: Period) -> bool {
        match period {
            Period::FirstHalf => self.first_half_finished,
            Period::FullTime | Period::SecondHalf => self.second_half_finished,
        }
    }

    /// Short scoreline, e.g. `"2-1 (1-0)"`.
    pub fn scoreline(&self) -> String {
        let (home, away) = self.score(Period::FullTime);
        format!("{}-{} ({}-{})", home, away, self.home_1h, self.away_1h)
    }
}
