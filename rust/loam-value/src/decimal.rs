//! Fixed-point decimal numbers.
//!
//! Configuration data never needs binary floating point, but it does need
//! exact equality and a total order so decimal values can key maps. A
//! [`Decimal`] stores a signed value scaled by 10^6, giving six fractional
//! digits of precision and integer semantics under the hood.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use num_traits::{One, Zero};
use thiserror::Error;

/// Number of fractional digits carried by a [`Decimal`].
pub const PRECISION: u32 = 6;

const SCALE: i64 = 1_000_000;

/// A fixed-point decimal with [`PRECISION`] fractional digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal(i64);

impl Decimal {
    /// The smallest positive increment a `Decimal` can represent.
    pub const EPSILON: Decimal = Decimal(1);

    /// Build from a raw scaled representation (`raw` is the value times 10^6).
    pub fn from_raw(raw: i64) -> Self {
        Decimal(raw)
    }

    /// The raw scaled representation.
    pub fn raw(self) -> i64 {
        self.0
    }

    pub fn from_int(n: i64) -> Self {
        Decimal(n.saturating_mul(SCALE))
    }

    /// Convert from a binary float, rounding to the nearest representable
    /// value.
    pub fn from_f64(f: f64) -> Self {
        Decimal((f * SCALE as f64).round() as i64)
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / SCALE as f64
    }

    pub fn as_f32(self) -> f32 {
        self.as_f64() as f32
    }

    /// The integer part, truncated toward zero.
    pub fn trunc(self) -> i64 {
        self.0 / SCALE
    }

    pub fn abs(self) -> Self {
        Decimal(self.0.abs())
    }
}

impl From<i64> for Decimal {
    fn from(n: i64) -> Self {
        Decimal::from_int(n)
    }
}

impl Add for Decimal {
    type Output = Decimal;
    fn add(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 + rhs.0)
    }
}

impl Sub for Decimal {
    type Output = Decimal;
    fn sub(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 - rhs.0)
    }
}

impl Neg for Decimal {
    type Output = Decimal;
    fn neg(self) -> Decimal {
        Decimal(-self.0)
    }
}

impl Mul for Decimal {
    type Output = Decimal;
    fn mul(self, rhs: Decimal) -> Decimal {
        Decimal((i128::from(self.0) * i128::from(rhs.0) / i128::from(SCALE)) as i64)
    }
}

impl Div for Decimal {
    type Output = Decimal;
    /// Panics on division by zero, like integer division.
    fn div(self, rhs: Decimal) -> Decimal {
        Decimal((i128::from(self.0) * i128::from(SCALE) / i128::from(rhs.0)) as i64)
    }
}

impl Zero for Decimal {
    fn zero() -> Self {
        Decimal(0)
    }
    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl One for Decimal {
    fn one() -> Self {
        Decimal(SCALE)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.0.unsigned_abs();
        let scale = SCALE as u64;
        if self.0 < 0 {
            write!(f, "-")?;
        }
        let int = abs / scale;
        let frac = abs % scale;
        if frac == 0 {
            return write!(f, "{int}");
        }
        let digits = format!("{frac:06}");
        write!(f, "{}.{}", int, digits.trim_end_matches('0'))
    }
}

/// Error parsing a decimal literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid decimal literal: {input:?}")]
pub struct ParseDecimalError {
    input: String,
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    /// Parses `[-]digits[.digits]`. Fractional digits beyond [`PRECISION`]
    /// are truncated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseDecimalError {
            input: s.to_string(),
        };
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };
        if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        if !frac_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let int: i64 = int_part.parse().map_err(|_| err())?;
        let mut frac: i64 = 0;
        for b in frac_part.bytes().take(PRECISION as usize) {
            frac = frac * 10 + i64::from(b - b'0');
        }
        for _ in frac_part.len()..PRECISION as usize {
            frac *= 10;
        }
        let raw = int
            .checked_mul(SCALE)
            .and_then(|v| v.checked_add(frac))
            .ok_or_else(err)?;
        Ok(Decimal(if negative { -raw } else { raw }))
    }
}
