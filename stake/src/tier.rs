//! Lock durations and their weight multipliers.

use crate::error::StakeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use workid_types::Amount;

const DAY_SECS: u64 = 24 * 3600;

/// One of the four accepted lock durations.
///
/// | tier        | seconds       | multiplier |
/// |-------------|---------------|------------|
/// | 6 months    | 15 768 000    | 0.1×       |
/// | 1 year      | 31 536 000    | 0.2×       |
/// | 3 years     | 94 608 000    | 0.6×       |
/// | 5 years     | 157 680 000   | 1.0×       |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StakeTier {
    SixMonths,
    OneYear,
    ThreeYears,
    FiveYears,
}

impl StakeTier {
    pub const ALL: [StakeTier; 4] = [
        Self::SixMonths,
        Self::OneYear,
        Self::ThreeYears,
        Self::FiveYears,
    ];

    /// Lock duration in seconds (a year is 365 days).
    pub fn duration_secs(&self) -> u64 {
        match self {
            Self::SixMonths => 365 * DAY_SECS / 2,
            Self::OneYear => 365 * DAY_SECS,
            Self::ThreeYears => 3 * 365 * DAY_SECS,
            Self::FiveYears => 5 * 365 * DAY_SECS,
        }
    }

    /// Weight multiplier in basis points (10 000 = 1.0×).
    pub fn multiplier_bps(&self) -> u32 {
        match self {
            Self::SixMonths => 1_000,
            Self::OneYear => 2_000,
            Self::ThreeYears => 6_000,
            Self::FiveYears => 10_000,
        }
    }

    /// Resolve a tier from its exact duration in seconds.
    pub fn from_duration_secs(secs: u64) -> Result<Self, StakeError> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.duration_secs() == secs)
            .ok_or(StakeError::InvalidTier(secs))
    }

    /// `principal × multiplier`, or `None` on overflow.
    pub fn weight_for(&self, principal: Amount) -> Option<Amount> {
        principal.checked_mul_bps(self.multiplier_bps())
    }
}

impl TryFrom<u64> for StakeTier {
    type Error = StakeError;

    fn try_from(secs: u64) -> Result<Self, Self::Error> {
        Self::from_duration_secs(secs)
    }
}

impl fmt::Display for StakeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::SixMonths => "6 months",
            Self::OneYear => "1 year",
            Self::ThreeYears => "3 years",
            Self::FiveYears => "5 years",
        };
        f.write_str(label)
    }
}
