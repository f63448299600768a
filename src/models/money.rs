//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Values typed in by the operator arrive as decimals and are rounded
//! half-even to the cent exactly once, at the boundary.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest amount one ledger cell may hold ($1 trillion)
    ///
    /// A year of full cells stays far inside the `i64` cent range, so totals
    /// can be summed with plain addition.
    pub const MAX_ENTRY: Money = Money(100_000_000_000_000);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use storebooks::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole dollars
    pub const fn from_dollars(dollars: i64) -> Self {
        Self(dollars * 100)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Create a Money amount from a decimal value, rounding half-even to the cent
    ///
    /// # Examples
    /// ```
    /// use rust_decimal_macros::dec;
    /// use storebooks::models::Money;
    /// assert_eq!(Money::from_decimal(dec!(10.125)).unwrap().cents(), 1012);
    /// ```
    pub fn from_decimal(value: Decimal) -> Result<Self, AmountError> {
        let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
        rounded
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|d| d.to_i64())
            .map(Self)
            .ok_or_else(|| AmountError::OutOfRange(value.to_string()))
    }

    /// Get the amount as an exact two-place decimal
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole dollars portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiply by a decimal rate, rounding half-even to the cent
    ///
    /// Saturates at the bounds of the cent range instead of overflowing.
    pub fn scale(&self, rate: Decimal) -> Self {
        let scaled = Decimal::from(self.0)
            .checked_mul(rate)
            .map(|d| d.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven))
            .and_then(|d| d.to_i64());

        match scaled {
            Some(cents) => Self(cents),
            None if self.is_negative() != rate.is_sign_negative() => Self(i64::MIN),
            None => Self(i64::MAX),
        }
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "$10.50", "1,250.00", "10".
    /// More than two decimal places are rounded half-even.
    pub fn parse(s: &str) -> Result<Self, AmountError> {
        Self::from_decimal(parse_decimal(s)?)
    }

    /// Format without a currency symbol, always with two decimal places
    pub fn to_plain_string(&self) -> String {
        if self.is_negative() {
            format!("-{}.{:02}", self.dollars().abs(), self.cents_part())
        } else {
            format!("{}.{:02}", self.dollars(), self.cents_part())
        }
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!(
                "-{}{}.{:02}",
                symbol,
                self.dollars().abs(),
                self.cents_part()
            )
        } else {
            format!("{}{}.{:02}", symbol, self.dollars(), self.cents_part())
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
        write!(f, "{}", self.format_with_symbol("$"))
    }
}

impl FromStr for Money {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
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

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Parse operator-typed decimal text, tolerating a leading `$` and thousands separators
pub(crate) fn parse_decimal(s: &str) -> Result<Decimal, AmountError> {
    let trimmed = s.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(stripped) => (true, stripped),
        None => (false, trimmed),
    };
    let rest = rest.strip_prefix('$').unwrap_or(rest);
    let cleaned: String = rest.chars().filter(|c| *c != ',').collect();

    if cleaned.is_empty() {
        return Err(AmountError::InvalidFormat(s.to_string()));
    }

    let value =
        Decimal::from_str(&cleaned).map_err(|_| AmountError::InvalidFormat(s.to_string()))?;
    Ok(if negative { -value } else { value })
}

/// Error type for amount parsing and conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for AmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountError::InvalidFormat(s) => write!(f, "Invalid amount: {}", s),
            AmountError::OutOfRange(s) => write!(f, "Amount out of range: {}", s),
        }
    }
}

impl std::error::Error for AmountError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.dollars(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "$10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-$10.50");
        assert_eq!(format!("{}", Money::from_cents(5)), "$0.05");
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(Money::from_cents(123456).to_plain_string(), "1234.56");
        assert_eq!(Money::from_cents(-50).to_plain_string(), "-0.50");
        assert_eq!(Money::zero().to_plain_string(), "0.00");
    }

    #[test]
    fn test_from_decimal_rounds_half_even() {
        assert_eq!(Money::from_decimal(dec!(1.005)).unwrap().cents(), 100);
        assert_eq!(Money::from_decimal(dec!(1.015)).unwrap().cents(), 102);
        assert_eq!(Money::from_decimal(dec!(1.0151)).unwrap().cents(), 102);
        assert_eq!(Money::from_decimal(dec!(250)).unwrap().cents(), 25000);
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(Money::from_cents(7550).to_decimal(), dec!(75.50));
    }

    #[test]
    fn test_scale_half_even() {
        // 5% of $1500.00
        assert_eq!(Money::from_dollars(1500).scale(dec!(0.05)).cents(), 7500);
        // 5% of $0.10 is exactly half a cent: rounds to even (0)
        assert_eq!(Money::from_cents(10).scale(dec!(0.05)).cents(), 0);
        // 5% of $0.30 is 1.5 cents: rounds to even (2)
        assert_eq!(Money::from_cents(30).scale(dec!(0.05)).cents(), 2);
        // 5% of $0.33 is 1.65 cents
        assert_eq!(Money::from_cents(33).scale(dec!(0.05)).cents(), 2);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("$10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert_eq!(Money::parse("10").unwrap().cents(), 1000);
        assert_eq!(Money::parse("1,250.5").unwrap().cents(), 125050);
        assert_eq!(Money::parse(" 7.1 ").unwrap().cents(), 710);
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("").is_err());
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);
        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((b - a).cents(), -500);
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_cents(100),
            Money::from_cents(200),
            Money::from_cents(300),
        ];
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");
        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
