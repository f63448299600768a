//! Core data models for storebooks
//!
//! This module contains the data structures of the store ledger: the fixed
//! income and expense categories, money and fuel-volume amounts, month and
//! year ledgers, and the tables used for bulk import.

pub mod category;
pub mod expense;
pub mod income;
pub mod ledger;
pub mod money;
pub mod period;
pub mod quantity;
pub mod table;

pub use category::{
    CategoryParseError, CountingRule, ExpenseCategory, IncomeCategory, Unit,
    LOTTERY_COMMISSION_RATE,
};
pub use expense::{ExpenseEntry, ExpenseValidationError};
pub use income::{IncomeAmounts, IncomeEntry, IncomeValidationError, IncomeValue, DAYS_PER_LEDGER};
pub use ledger::{MonthLedger, YearLedger};
pub use money::{AmountError, Money};
pub use period::{LedgerPeriod, PeriodParseError};
pub use quantity::Gallons;
pub use table::{ExpenseTable, IncomeTable};
