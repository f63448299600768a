//! Month and year ledgers
//!
//! A `MonthLedger` always holds exactly 31 income rows (days 1..31 in order)
//! and 24 expense lines (display order). Mutation goes through the crate so
//! those shapes and the non-negative invariant can't be bypassed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::category::{ExpenseCategory, IncomeCategory};
use super::expense::{ExpenseEntry, ExpenseValidationError};
use super::income::{IncomeEntry, IncomeValidationError, IncomeValue, DAYS_PER_LEDGER};
use super::money::Money;
use super::period::LedgerPeriod;

/// The income and expense tables for one (year, month)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthLedger {
    period: LedgerPeriod,
    income: Vec<IncomeEntry>,
    expenses: Vec<ExpenseEntry>,
}

impl MonthLedger {
    /// Create a zero-filled ledger
    pub fn new(period: LedgerPeriod) -> Self {
        Self {
            period,
            income: IncomeEntry::blank_month(),
            expenses: ExpenseEntry::blank_month(),
        }
    }

    pub fn period(&self) -> LedgerPeriod {
        self.period
    }

    /// Income rows, day 1 first
    pub fn income(&self) -> &[IncomeEntry] {
        &self.income
    }

    pub fn income_entry(&self, day: u32) -> Option<&IncomeEntry> {
        day.checked_sub(1)
            .and_then(|index| self.income.get(index as usize))
    }

    /// Expense lines in display order
    pub fn expenses(&self) -> &[ExpenseEntry] {
        &self.expenses
    }

    pub fn expense(&self, category: ExpenseCategory) -> Money {
        self.expenses[category.index()].amount
    }

    /// True when every cell is still zero
    pub fn is_blank(&self) -> bool {
        self.income.iter().all(|row| row.amounts.is_zero())
            && self.expenses.iter().all(|line| line.amount.is_zero())
    }

    pub(crate) fn set_income_cell(
        &mut self,
        day: u32,
        category: IncomeCategory,
        value: Decimal,
    ) -> Result<IncomeValue, IncomeValidationError> {
        if !(1..=DAYS_PER_LEDGER).contains(&day) {
            return Err(IncomeValidationError::DayOutOfRange(day));
        }
        self.income[(day - 1) as usize].amounts.set(category, value)
    }

    pub(crate) fn set_expense_amount(
        &mut self,
        category: ExpenseCategory,
        value: Decimal,
    ) -> Result<Money, ExpenseValidationError> {
        self.expenses[category.index()].set_amount(value)
    }

    /// Swap in already validated income rows
    pub(crate) fn replace_income(&mut self, rows: Vec<IncomeEntry>) -> Vec<IncomeEntry> {
        std::mem::replace(&mut self.income, rows)
    }

    /// Swap in already validated expense lines
    pub(crate) fn replace_expenses(&mut self, lines: Vec<ExpenseEntry>) -> Vec<ExpenseEntry> {
        std::mem::replace(&mut self.expenses, lines)
    }
}

/// The month ledgers of one year, created lazily
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct YearLedger {
    year: i32,
    months: BTreeMap<u32, MonthLedger>,
}

impl YearLedger {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            months: BTreeMap::new(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// The ledger for a month number (1..=12), if it was ever touched
    pub fn month(&self, month: u32) -> Option<&MonthLedger> {
        self.months.get(&month)
    }

    /// Recorded ledgers in calendar order
    pub fn months(&self) -> impl Iterator<Item = &MonthLedger> {
        self.months.values()
    }

    pub fn recorded_months(&self) -> Vec<u32> {
        self.months.keys().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Returns the ledger and whether it was created by this call
    pub(crate) fn get_or_create(&mut self, period: LedgerPeriod) -> (&mut MonthLedger, bool) {
        let created = !self.months.contains_key(&period.month());
        let ledger = self
            .months
            .entry(period.month())
            .or_insert_with(|| MonthLedger::new(period));
        (ledger, created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn march() -> LedgerPeriod {
        LedgerPeriod::new(2024, 3).unwrap()
    }

    #[test]
    fn test_new_ledger_shape() {
        let ledger = MonthLedger::new(march());
        assert_eq!(ledger.income().len(), 31);
        assert_eq!(ledger.expenses().len(), 24);
        assert!(ledger.is_blank());
        assert_eq!(ledger.income_entry(1).unwrap().day, 1);
        assert!(ledger.income_entry(0).is_none());
        assert!(ledger.income_entry(32).is_none());
    }

    #[test]
    fn test_set_cells() {
        let mut ledger = MonthLedger::new(march());
        ledger
            .set_income_cell(15, IncomeCategory::Taxable, dec!(99.99))
            .unwrap();
        ledger
            .set_expense_amount(ExpenseCategory::Utilities, dec!(310))
            .unwrap();

        let row = ledger.income_entry(15).unwrap();
        assert_eq!(row.amounts.taxable, Money::from_cents(9999));
        assert_eq!(ledger.expense(ExpenseCategory::Utilities), Money::from_dollars(310));
        assert!(!ledger.is_blank());
    }

    #[test]
    fn test_set_income_cell_day_out_of_range() {
        let mut ledger = MonthLedger::new(march());
        let err = ledger
            .set_income_cell(32, IncomeCategory::Taxable, dec!(1))
            .unwrap_err();
        assert_eq!(err, IncomeValidationError::DayOutOfRange(32));
        assert!(ledger.is_blank());
    }

    #[test]
    fn test_year_ledger_iterates_in_calendar_order() {
        let mut year = YearLedger::new(2024);
        for month in [11, 2, 7] {
            year.get_or_create(LedgerPeriod::new(2024, month).unwrap());
        }
        let months: Vec<u32> = year.months().map(|m| m.period().month()).collect();
        assert_eq!(months, vec![2, 7, 11]);
    }

    #[test]
    fn test_year_ledger_get_or_create_reports_creation() {
        let mut year = YearLedger::new(2024);
        let (_, created) = year.get_or_create(march());
        assert!(created);
        let (_, created) = year.get_or_create(march());
        assert!(!created);
        assert_eq!(year.recorded_months(), vec![3]);
    }
}
