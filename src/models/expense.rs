//! Monthly expense lines

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::ExpenseCategory;
use super::money::{AmountError, Money};

/// Validation errors for expense amounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NegativeAmount {
        category: ExpenseCategory,
        value: String,
    },
    TooLarge {
        category: ExpenseCategory,
        value: String,
    },
    Amount(AmountError),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount { category, value } => {
                write!(f, "{} cannot be negative (got {})", category, value)
            }
            Self::TooLarge { category, value } => {
                write!(f, "{} is above the monthly limit (got {})", category, value)
            }
            Self::Amount(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// One month's amount for one expense category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub category: ExpenseCategory,
    pub amount: Money,
}

impl ExpenseEntry {
    pub fn new(category: ExpenseCategory) -> Self {
        Self {
            category,
            amount: Money::zero(),
        }
    }

    /// The 24 zero lines of an empty month, in display order
    pub fn blank_month() -> Vec<ExpenseEntry> {
        ExpenseCategory::ALL.into_iter().map(Self::new).collect()
    }

    /// Overwrite the amount from an operator-entered decimal, returning the old amount
    pub fn set_amount(&mut self, value: Decimal) -> Result<Money, ExpenseValidationError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ExpenseValidationError::NegativeAmount {
                category: self.category,
                value: value.to_string(),
            });
        }
        let amount = Money::from_decimal(value).map_err(ExpenseValidationError::Amount)?;
        if amount > Money::MAX_ENTRY {
            return Err(ExpenseValidationError::TooLarge {
                category: self.category,
                value: value.to_string(),
            });
        }
        Ok(std::mem::replace(&mut self.amount, amount))
    }

    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount {
                category: self.category,
                value: self.amount.to_plain_string(),
            });
        }
        if self.amount > Money::MAX_ENTRY {
            return Err(ExpenseValidationError::TooLarge {
                category: self.category,
                value: self.amount.to_plain_string(),
            });
        }
        Ok(())
    }
}
