//! Guarded score and phase updates.

use chrono::Utc;
use serde::Deserialize;
use strum::Display;

use super::types::Match;
use crate::error::MatchError;

/// Score counter names, as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ScoreField {
    /// Home goals in the first half.
    #[strum(serialize = "home1h")]
    Home1h,
    /// Away goals in the first half.
    #[strum(serialize = "away1h")]
    Away1h,
    /// Home goals in the second half.
    #[strum(serialize = "home2h")]
    Home2h,
    /// Away goals in the second half.
    #[strum(serialize = "away2h")]
    Away2h,
}

/// Partial match update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MatchUpdate {
    /// New home first-half goals.
    pub home_1h: Option<u32>,
    /// New away first-half goals.
    pub away_1h: Option<u32>,
    /// New home second-half goals.
    pub home_2h: Option<u32>,
    /// New away second-half goals.
    pub away_2h: Option<u32>,
    /// New first-half flag.
    pub first_half_finished: Option<bool>,
    /// New second-half flag.
    pub second_half_finished: Option<bool>,
}

impl MatchUpdate {
    /// Update setting a single counter.
    pub fn score(field: ScoreField, value: u32) -> Self {
        let mut update = Self::default();
        match field {
            ScoreField::Home1h => update.home_1h = Some(value),
            ScoreField::Away1h => update.away_1h = Some(value),
            ScoreField::Home2h => update.home_2h = Some(value),
            ScoreField::Away2h => update.away_2h = Some(value),
        }
        update
    }

    /// Update toggling the phase flags.
    pub fn phases(first_half_finished: Option<bool>, second_half_finished: Option<bool>) -> Self {
        Self {
            first_half_finished,
            second_half_finished,
            ..Self::default()
        }
    }

    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn guard(field: ScoreField, current: u32, requested: Option<u32>, locked: bool) -> Result<(), MatchError> {
    match requested {
        Some(value) if value != current && locked => Err(MatchError::ScoreLocked { field }),
        _ => Ok(()),
    }
}

impl Match {
    /// Reject phase flags no sequence of updates could produce.
    pub fn check_phases(&self) -> Result<(), MatchError> {
        if self.second_half_finished && !self.first_half_finished {
            return Err(MatchError::SecondHalfBeforeFirst);
        }
        Ok(())
    }

    /// Apply a partial update.
    ///
    /// Un-finishing the first half also un-finishes the second. Counters of a
    /// half that stays finished cannot change. On error the match is left
    /// untouched.
    pub fn apply(&mut self, update: &MatchUpdate) -> Result<(), MatchError> {
        let first = update.first_half_finished.unwrap_or(self.first_half_finished);
        let mut second = update.second_half_finished.unwrap_or(self.second_half_finished);

        if update.first_half_finished == Some(false) {
            if update.second_half_finished == Some(true) {
                return Err(MatchError::InconsistentPhases);
            }
            second = false;
        }

        if second && !first {
            return Err(MatchError::SecondHalfBeforeFirst);
        }

        let first_locked = self.first_half_finished && first;
        let second_locked = self.second_half_finished && second;

        guard(ScoreField::Home1h, self.home_1h, update.home_1h, first_locked)?;
        guard(ScoreField::Away1h, self.away_1h, update.away_1h, first_locked)?;
        guard(ScoreField::Home2h, self.home_2h, update.home_2h, second_locked)?;
        guard(ScoreField::Away2h, self.away_2h, update.away_2h, second_locked)?;

        self.home_1h = update.home_1h.unwrap_or(self.home_1h);
        self.away_1h = update.away_1h.unwrap_or(self.away_1h);
        self.home_2h = update.home_2h.unwrap_or(self.home_2h);
        self.away_2h = update.away_2h.unwrap_or(self.away_2h);
        self.first_half_finished = first;
        self.second_half_finished = second;
        self.refresh_status();
        self.updated_at = Utc::now();

        Ok(())
    }
}
