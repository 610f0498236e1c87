//! Three-valued bet outcome.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Outcome of a bet or a coupon under the current match state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Decided in the bettor's favour.
    #[strum(serialize = "won")]
    Won,
    /// Decided against the bettor.
    #[strum(serialize = "lost")]
    Lost,
    /// Not decided yet.
    #[default]
    #[strum(serialize = "pending")]
    Pending,
}

impl Outcome {
    /// Whether the outcome is final.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Outcome::Pending)
    }

    /// Outcome of a condition that can only be judged once its period ends.
    pub(crate) fn at_period_end(concluded: bool, holds: impl FnOnce() -> bool) -> Self {
        if !concluded {
            Outcome::Pending
        } else if holds() {
            Outcome::Won
        } else {
            Outcome::Lost
        }
    }

    /// Outcome of a bet on whether an irreversible event happens within a
    /// period (a line is crossed, a team scores).
    ///
    /// Once the event has happened the bet is settled immediately; if it never
    /// happens the bet settles when the period ends.
    pub(crate) fn on_event(happened: bool, backed: bool, concluded: bool) -> Self {
        match (happened, backed) {
            (true, true) => Outcome::Won,
            (true, false) => Outcome::Lost,
            (false, _) if !concluded => Outcome::Pending,
            (false, true) => Outcome::Lost,
            (false, false) => Outcome::Won,
        }
    }
}
