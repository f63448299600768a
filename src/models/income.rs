//! Daily income rows
//!
//! One `IncomeEntry` per day of the month, each holding a fixed field per
//! income category. Currency columns are `Money`; fuel volume is `Gallons`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::AddAssign;

use super::category::IncomeCategory;
use super::money::{AmountError, Money};
use super::quantity::Gallons;

/// Number of day rows in every month ledger, regardless of calendar length
pub const DAYS_PER_LEDGER: u32 = 31;

/// Validation errors for income cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomeValidationError {
    NegativeAmount {
        category: IncomeCategory,
        value: String,
    },
    TooLarge {
        category: IncomeCategory,
        value: String,
    },
    DayOutOfRange(u32),
    Amount(AmountError),
}

impl fmt::Display for IncomeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount { category, value } => {
                write!(f, "{} cannot be negative (got {})", category, value)
            }
            Self::TooLarge { category, value } => {
                write!(f, "{} is above the per-day limit (got {})", category, value)
            }
            Self::DayOutOfRange(day) => {
                write!(f, "Day {} is outside 1..={}", day, DAYS_PER_LEDGER)
            }
            Self::Amount(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for IncomeValidationError {}

/// The value held by one income cell
///
/// Serializes as the bare integer (cents or thousandths of a gallon); the
/// category's `Unit` says which.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum IncomeValue {
    Money(Money),
    Gallons(Gallons),
}

impl IncomeValue {
    pub fn is_zero(&self) -> bool {
        match self {
            IncomeValue::Money(m) => m.is_zero(),
            IncomeValue::Gallons(g) => g.is_zero(),
        }
    }

    pub fn as_money(&self) -> Option<Money> {
        match self {
            IncomeValue::Money(m) => Some(*m),
            IncomeValue::Gallons(_) => None,
        }
    }

    /// Plain decimal text as written to CSV ("12.50", "300.000")
    pub fn to_plain_string(&self) -> String {
        match self {
            IncomeValue::Money(m) => m.to_plain_string(),
            IncomeValue::Gallons(g) => g.to_plain_string(),
        }
    }
}

impl fmt::Display for IncomeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncomeValue::Money(m) => write!(f, "{}", m),
            IncomeValue::Gallons(g) => write!(f, "{}", g),
        }
    }
}

/// One amount per income category
///
/// Used both for a single day's row and for per-category sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IncomeAmounts {
    pub taxable: Money,
    pub non_tax: Money,
    pub credit_card: Money,
    pub sales_tax: Money,
    pub food_stamps: Money,
    pub lottery: Money,
    pub lotto: Money,
    pub fuel_sales: Money,
    pub fuel_gallons: Gallons,
    pub rebates: Money,
    pub atm: Money,
    pub other_income: Money,
}

impl IncomeAmounts {
    /// Read one category's value
    pub fn get(&self, category: IncomeCategory) -> IncomeValue {
        match self.money_slot(category) {
            Some(money) => IncomeValue::Money(*money),
            None => IncomeValue::Gallons(self.fuel_gallons),
        }
    }

    /// Read a currency category; `None` for fuel gallons
    pub fn money(&self, category: IncomeCategory) -> Option<Money> {
        self.get(category).as_money()
    }

    /// Overwrite one category from an operator-entered decimal
    ///
    /// Negative values are rejected and leave the cell as it was.
    pub fn set(
        &mut self,
        category: IncomeCategory,
        value: Decimal,
    ) -> Result<IncomeValue, IncomeValidationError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(IncomeValidationError::NegativeAmount {
                category,
                value: value.to_string(),
            });
        }

        let too_large = || IncomeValidationError::TooLarge {
            category,
            value: value.to_string(),
        };

        let previous = self.get(category);
        match self.money_slot_mut(category) {
            Some(slot) => {
                let amount = Money::from_decimal(value).map_err(IncomeValidationError::Amount)?;
                if amount > Money::MAX_ENTRY {
                    return Err(too_large());
                }
                *slot = amount;
            }
            None => {
                let gallons =
                    Gallons::from_decimal(value).map_err(IncomeValidationError::Amount)?;
                if gallons > Gallons::MAX_ENTRY {
                    return Err(too_large());
                }
                self.fuel_gallons = gallons;
            }
        }
        Ok(previous)
    }

    /// Check every cell is non-negative and within the per-day limit
    pub fn validate(&self) -> Result<(), IncomeValidationError> {
        for category in IncomeCategory::ALL {
            let value = self.get(category);
            let (negative, too_large) = match value {
                IncomeValue::Money(m) => (m.is_negative(), m > Money::MAX_ENTRY),
                IncomeValue::Gallons(g) => (g.is_negative(), g > Gallons::MAX_ENTRY),
            };
            if negative {
                return Err(IncomeValidationError::NegativeAmount {
                    category,
                    value: value.to_plain_string(),
                });
            }
            if too_large {
                return Err(IncomeValidationError::TooLarge {
                    category,
                    value: value.to_plain_string(),
                });
            }
        }
        Ok(())
    }

    pub fn is_zero(&self) -> bool {
        *self == IncomeAmounts::default()
    }

    fn money_slot(&self, category: IncomeCategory) -> Option<&Money> {
        match category {
            IncomeCategory::Taxable => Some(&self.taxable),
            IncomeCategory::NonTax => Some(&self.non_tax),
            IncomeCategory::CreditCard => Some(&self.credit_card),
            IncomeCategory::SalesTax => Some(&self.sales_tax),
            IncomeCategory::FoodStamps => Some(&self.food_stamps),
            IncomeCategory::Lottery => Some(&self.lottery),
            IncomeCategory::Lotto => Some(&self.lotto),
            IncomeCategory::FuelSales => Some(&self.fuel_sales),
            IncomeCategory::Rebates => Some(&self.rebates),
            IncomeCategory::Atm => Some(&self.atm),
            IncomeCategory::OtherIncome => Some(&self.other_income),
            IncomeCategory::FuelGallons => None,
        }
    }

    fn money_slot_mut(&mut self, category: IncomeCategory) -> Option<&mut Money> {
        match category {
            IncomeCategory::Taxable => Some(&mut self.taxable),
            IncomeCategory::NonTax => Some(&mut self.non_tax),
            IncomeCategory::CreditCard => Some(&mut self.credit_card),
            IncomeCategory::SalesTax => Some(&mut self.sales_tax),
            IncomeCategory::FoodStamps => Some(&mut self.food_stamps),
            IncomeCategory::Lottery => Some(&mut self.lottery),
            IncomeCategory::Lotto => Some(&mut self.lotto),
            IncomeCategory::FuelSales => Some(&mut self.fuel_sales),
            IncomeCategory::Rebates => Some(&mut self.rebates),
            IncomeCategory::Atm => Some(&mut self.atm),
            IncomeCategory::OtherIncome => Some(&mut self.other_income),
            IncomeCategory::FuelGallons => None,
        }
    }
}

impl AddAssign<&IncomeAmounts> for IncomeAmounts {
    fn add_assign(&mut self, other: &IncomeAmounts) {
        self.taxable += other.taxable;
        self.non_tax += other.non_tax;
        self.credit_card += other.credit_card;
        self.sales_tax += other.sales_tax;
        self.food_stamps += other.food_stamps;
        self.lottery += other.lottery;
        self.lotto += other.lotto;
        self.fuel_sales += other.fuel_sales;
        self.fuel_gallons += other.fuel_gallons;
        self.rebates += other.rebates;
        self.atm += other.atm;
        self.other_income += other.other_income;
    }
}

impl<'a> std::iter::Sum<&'a IncomeAmounts> for IncomeAmounts {
    fn sum<I: Iterator<Item = &'a IncomeAmounts>>(iter: I) -> Self {
        iter.fold(IncomeAmounts::default(), |mut acc, a| {
            acc += a;
            acc
        })
    }
}

/// Income recorded for one day of the month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeEntry {
    pub day: u32,
    pub amounts: IncomeAmounts,
}

impl IncomeEntry {
    /// Create a zero row for a day
    pub fn new(day: u32) -> Result<Self, IncomeValidationError> {
        if !(1..=DAYS_PER_LEDGER).contains(&day) {
            return Err(IncomeValidationError::DayOutOfRange(day));
        }
        Ok(Self {
            day,
            amounts: IncomeAmounts::default(),
        })
    }

    /// The 31 zero rows of an empty month
    pub fn blank_month() -> Vec<IncomeEntry> {
        (1..=DAYS_PER_LEDGER)
            .map(|day| IncomeEntry {
                day,
                amounts: IncomeAmounts::default(),
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), IncomeValidationError> {
        if !(1..=DAYS_PER_LEDGER).contains(&self.day) {
            return Err(IncomeValidationError::DayOutOfRange(self.day));
        }
        self.amounts.validate()
    }
}
