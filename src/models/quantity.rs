//! Fuel volume quantity
//!
//! Gallons are recorded next to currency on the daily sheet but are not money.
//! Keeping them in their own type means they can't be added to a `Money` total.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

use super::money::{parse_decimal, AmountError};

const THOUSANDTHS: i64 = 1000;

/// A volume of fuel stored in thousandths of a gallon
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gallons(i64);

impl Gallons {
    /// Largest volume one ledger cell may hold
    pub const MAX_ENTRY: Gallons = Gallons(100_000_000_000_000);

    pub const fn from_thousandths(thousandths: i64) -> Self {
        Self(thousandths)
    }

    pub const fn from_whole(gallons: i64) -> Self {
        Self(gallons * THOUSANDTHS)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    /// Create from a decimal value, rounding half-even to three places
    pub fn from_decimal(value: Decimal) -> Result<Self, AmountError> {
        let rounded = value.round_dp_with_strategy(3, RoundingStrategy::MidpointNearestEven);
        rounded
            .checked_mul(Decimal::ONE_THOUSAND)
            .and_then(|d| d.to_i64())
            .map(Self)
            .ok_or_else(|| AmountError::OutOfRange(value.to_string()))
    }

    pub fn parse(s: &str) -> Result<Self, AmountError> {
        Self::from_decimal(parse_decimal(s)?)
    }

    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 3)
    }

    pub const fn thousandths(&self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Format without a unit, always with three decimal places
    pub fn to_plain_string(&self) -> String {
        let whole = (self.0 / THOUSANDTHS).abs();
        let frac = (self.0 % THOUSANDTHS).abs();
        if self.is_negative() {
            format!("-{}.{:03}", whole, frac)
        } else {
            format!("{}.{:03}", whole, frac)
        }
    }
}

impl fmt::Display for Gallons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} gal", self.to_plain_string())
    }
}

impl Add for Gallons {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Gallons {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl std::iter::Sum for Gallons {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Gallons::zero(), |acc, g| acc + g)
    }
}
