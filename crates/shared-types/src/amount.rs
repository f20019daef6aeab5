//! # Fixed-Point Amounts
//!
//! Balances and transaction amounts are decimal values with two fractional
//! digits. They are held as integer minor units so that arithmetic and
//! comparison are exact, serialized as JSON numbers, and always rendered with
//! exactly two decimals when passed as contract arguments.
//!
//! Magnitudes are capped at fifteen significant digits ([`Amount::MAX`]).
//! Every such value survives the JSON number round trip exactly; anything
//! larger is rejected with [`AmountError::Overflow`] rather than rounded.

use crate::errors::AmountError;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Minor units per major unit.
const SCALE: i64 = 100;

/// Largest magnitude in minor units: 9,999,999,999,999.99.
const MAX_MINOR: i64 = 999_999_999_999_999;

/// A decimal amount with two fractional digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    /// Zero.
    pub const ZERO: Amount = Amount(0);

    /// Largest representable amount.
    pub const MAX: Amount = Amount(MAX_MINOR);

    /// Smallest representable amount.
    pub const MIN: Amount = Amount(-MAX_MINOR);

    /// Create from minor units (`100_050` is `1000.50`).
    ///
    /// Unchecked; use [`Amount::try_from_minor`] for untrusted input.
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Create from minor units, rejecting values beyond [`Amount::MAX`].
    pub fn try_from_minor(minor: i64) -> Result<Self, AmountError> {
        if minor.unsigned_abs() > MAX_MINOR as u64 {
            return Err(AmountError::Overflow(Self(minor).to_string()));
        }
        Ok(Self(minor))
    }

    /// Create from whole major units.
    pub const fn from_major(major: i64) -> Self {
        Self(major * SCALE)
    }

    /// Minor units.
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Convert from a floating point value, rounding to the nearest cent.
    ///
    /// Rounds the exact binary value through its decimal expansion, so the
    /// output of [`Amount::to_f64`] always converts back to the same amount.
    pub fn from_f64(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::Invalid(value.to_string()));
        }
        if value.abs() >= (MAX_MINOR + 1) as f64 / SCALE as f64 {
            return Err(AmountError::Overflow(value.to_string()));
        }
        format!("{value:.2}").parse()
    }

    /// Conversion used for JSON output. Exact for every value in range.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / SCALE as f64
    }

    /// True when below zero.
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = SCALE as u64;
        write!(f, "{sign}{}.{:02}", abs / scale, abs % scale)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Parses `"1000"`, `"1000.5"`, `"-12.34"`, `"+.75"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }

        let (negative, unsigned) = match trimmed.as_bytes()[0] {
            b'-' => (true, &trimmed[1..]),
            b'+' => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let (whole, frac) = match unsigned.split_once('.') {
            Some((w, f)) => (w, f),
            None => (unsigned, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
            return Err(AmountError::Invalid(s.to_string()));
        }
        if frac.len() > 2 {
            return Err(AmountError::Precision(s.to_string()));
        }

        let overflow = || AmountError::Overflow(s.to_string());

        let whole_units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| overflow())?
        };
        let frac_units: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| overflow())? * 10,
            _ => frac.parse().map_err(|_| overflow())?,
        };

        let minor = whole_units
            .checked_mul(SCALE)
            .and_then(|m| m.checked_add(frac_units))
            .ok_or_else(overflow)?;
        if minor > MAX_MINOR {
            return Err(overflow());
        }

        Ok(Self(if negative { -minor } else { minor }))
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal number or numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Amount, E> {
        v.checked_mul(SCALE)
            .ok_or_else(|| AmountError::Overflow(v.to_string()))
            .and_then(Amount::try_from_minor)
            .map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Amount, E> {
        i64::try_from(v)
            .map_err(|_| E::custom(AmountError::Overflow(v.to_string())))
            .and_then(|v| self.visit_i64(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Amount, E> {
        Amount::from_f64(v).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Amount, E> {
        v.parse().map_err(E::custom)
    }
}
