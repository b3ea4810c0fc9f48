//! Token amounts.
//!
//! Amounts are fixed-point integers (u128) with 18 decimals to avoid
//! floating-point errors. The smallest unit is 1 raw; one whole WID is
//! [`WID_UNIT`] raw. The same type carries BaseToken balances and the
//! weighted (voting power) balance minted by the stake vault.

use crate::error::TypesError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of decimal places in a whole unit.
pub const WID_DECIMALS: u32 = 18;

/// Raw units per whole WID.
pub const WID_UNIT: u128 = 1_000_000_000_000_000_000;

/// Basis-point denominator used for multipliers.
const BPS_DENOMINATOR: u128 = 10_000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    /// Whole units, e.g. `from_units(2)` is 2 WID.
    pub fn from_units(units: u64) -> Self {
        Self(units as u128 * WID_UNIT)
    }

    /// Parse a decimal string such as `"1"`, `"0.1"` or `"12.000000000000000001"`.
    pub fn parse(s: &str) -> Result<Self, TypesError> {
        let invalid = || TypesError::InvalidAmount(s.to_string());
        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(invalid());
        }
        if frac.len() > WID_DECIMALS as usize {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }
        let whole_raw = if whole.is_empty() {
            0
        } else {
            whole.parse::<u128>().map_err(|_| invalid())?
        };
        let frac_raw = if frac.is_empty() {
            0
        } else {
            let scale = 10u128.pow(WID_DECIMALS - frac.len() as u32);
            frac.parse::<u128>().map_err(|_| invalid())? * scale
        };
        whole_raw
            .checked_mul(WID_UNIT)
            .and_then(|w| w.checked_add(frac_raw))
            .map(Self)
            .ok_or_else(invalid)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Scale by a basis-point multiplier (`10_000` = 1.0×), rounding down.
    ///
    /// Exact whenever the raw value is a multiple of 10, which covers every
    /// amount expressible with at most 17 decimals.
    pub fn checked_mul_bps(self, bps: u32) -> Option<Self> {
        self.0
            .checked_mul(bps as u128)
            .map(|scaled| Self(scaled / BPS_DENOMINATOR))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / WID_UNIT;
        let frac = self.0 % WID_UNIT;
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{:0>width$}", frac, width = WID_DECIMALS as usize);
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

/// Decimal string in text formats so no consumer has to handle u128 numbers.
impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            serializer.serialize_u128(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::parse(&s).map_err(serde::de::Error::custom)
        } else {
            u128::deserialize(deserializer).map(Self)
        }
    }
}

impl FromStr for Amount {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
