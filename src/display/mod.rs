//! Terminal output formatting
//!
//! Renders ledgers and aggregation results as `tabled` tables. Everything
//! here returns a `String`; the CLI decides where it goes.

pub mod ledger;
pub mod report;

pub use ledger::{format_categories, format_expenses, format_income_grid};
pub use report::{format_month_summary, format_year_summary};

use crate::models::{IncomeValue, Money};

/// Format money with the configured currency symbol
pub(crate) fn money(amount: Money, symbol: &str) -> String {
    amount.format_with_symbol(symbol)
}

pub(crate) fn value(value: IncomeValue, symbol: &str) -> String {
    match value {
        IncomeValue::Money(amount) => money(amount, symbol),
        IncomeValue::Gallons(gallons) => gallons.to_string(),
    }
}
