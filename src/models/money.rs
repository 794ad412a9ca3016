//! Money type for representing currency amounts
//!
//! Internally stores amounts in hundredths (i64) to avoid floating-point drift
//! across repeated deposits and withdrawals. The record file keeps balances as
//! 64-bit floats; conversion happens only at the codec boundary, so amounts
//! are capped at [`Money::MAX`] where that conversion is still exact.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub, SubAssign};

/// Represents a monetary amount stored as hundredths of the currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest magnitude that survives the f64 record field exactly
    pub const MAX: Money = Money(1_000_000_000_000_000);

    /// Create a Money amount from hundredths
    ///
    /// # Examples
    /// ```
    /// use ledger::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in hundredths
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the hundredths portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Whether the amount is within [`Money::MAX`] in either direction
    pub const fn is_storable(&self) -> bool {
        self.0.unsigned_abs() <= Self::MAX.0 as u64
    }

    /// Clamp negative amounts to zero
    pub const fn clamp_non_negative(self) -> Self {
        if self.0 < 0 {
            Self(0)
        } else {
            self
        }
    }

    /// Convert a stored floating-point balance, rounding to the nearest hundredth
    ///
    /// Returns `None` for NaN, infinities, and values beyond [`Money::MAX`].
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let scaled = (value * 100.0).round();
        if scaled.abs() > Self::MAX.0 as f64 {
            return None;
        }
        Some(Self(scaled as i64))
    }

    /// Floating-point representation in whole units
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Checked addition, `None` past [`Money::MAX`]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .filter(Money::is_storable)
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "Rs 10.50", "$10.50", "10".
    /// Digits beyond the hundredths are truncated.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        let s = s
            .strip_prefix("Rs")
            .or_else(|| s.strip_prefix('$'))
            .unwrap_or(s)
            .trim_start();

        let invalid = || MoneyParseError::InvalidFormat(s.to_string());

        let cents = if let Some((units_str, cents_str)) = s.split_once('.') {
            if units_str.is_empty() && cents_str.is_empty() {
                return Err(invalid());
            }
            if !cents_str.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }

            let units: i64 = if units_str.is_empty() {
                0
            } else {
                units_str.parse().map_err(|_| invalid())?
            };

            let cents: i64 = match cents_str.len() {
                0 => 0,
                1 => cents_str.parse::<i64>().map_err(|_| invalid())? * 10,
                _ => cents_str[..2].parse().map_err(|_| invalid())?,
            };

            units
                .checked_mul(100)
                .and_then(|v| v.checked_add(cents))
                .ok_or_else(invalid)?
        } else {
            s.parse::<i64>()
                .map_err(|_| invalid())?
                .checked_mul(100)
                .ok_or_else(invalid)?
        };

        if cents < 0 {
            // A second sign after the prefix, e.g. "--5"
            return Err(invalid());
        }
        if cents > Self::MAX.0 {
            return Err(MoneyParseError::OutOfRange(s.to_string()));
        }

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.units().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.units(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.units(), self.cents_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl std::str::FromStr for Money {
    type Err = MoneyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::OutOfRange(s) => {
                write!(f, "Amount too large: {} (max {})", s, Money::MAX)
            }
        }
    }
}

impl std::error::Error for MoneyParseError {}
