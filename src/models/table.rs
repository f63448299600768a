//! Bulk replacement tables
//!
//! CSV import produces these. They record which columns the source actually
//! carried so the store can refuse a table whose shape doesn't match before
//! touching any ledger.

use std::collections::HashSet;

use super::category::{ExpenseCategory, IncomeCategory};
use super::expense::{ExpenseEntry, ExpenseValidationError};
use super::income::{IncomeEntry, IncomeValidationError, DAYS_PER_LEDGER};
use super::ledger::MonthLedger;

/// A month of income rows plus the columns they were read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeTable {
    columns: Vec<IncomeCategory>,
    rows: Vec<IncomeEntry>,
}

impl IncomeTable {
    pub fn new(columns: Vec<IncomeCategory>, rows: Vec<IncomeEntry>) -> Self {
        Self { columns, rows }
    }

    /// Snapshot a ledger's income rows with the full column set
    pub fn from_ledger(ledger: &MonthLedger) -> Self {
        Self {
            columns: IncomeCategory::ALL.to_vec(),
            rows: ledger.income().to_vec(),
        }
    }

    pub fn columns(&self) -> &[IncomeCategory] {
        &self.columns
    }

    pub fn rows(&self) -> &[IncomeEntry] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<IncomeEntry> {
        self.rows
    }

    /// Describe the first way this table's shape differs from a month ledger
    pub fn schema_mismatch(&self) -> Option<String> {
        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(*column) {
                return Some(format!("duplicate column '{}'", column));
            }
        }

        let missing: Vec<&str> = IncomeCategory::ALL
            .iter()
            .filter(|c| !seen.contains(*c))
            .map(|c| c.label())
            .collect();
        if !missing.is_empty() {
            return Some(format!("missing columns: {}", missing.join(", ")));
        }

        if self.rows.len() != DAYS_PER_LEDGER as usize {
            return Some(format!(
                "expected {} day rows, found {}",
                DAYS_PER_LEDGER,
                self.rows.len()
            ));
        }

        for (expected_day, row) in (1..=DAYS_PER_LEDGER).zip(&self.rows) {
            if row.day != expected_day {
                return Some(format!(
                    "row {} is day {}, expected day {}",
                    expected_day, row.day, expected_day
                ));
            }
        }

        None
    }

    /// Check every cell is non-negative
    pub fn validate_values(&self) -> Result<(), IncomeValidationError> {
        self.rows.iter().try_for_each(IncomeEntry::validate)
    }
}

/// A month of expense lines, in whatever order the source listed them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseTable {
    lines: Vec<ExpenseEntry>,
}

impl ExpenseTable {
    pub fn new(lines: Vec<ExpenseEntry>) -> Self {
        Self { lines }
    }

    pub fn from_ledger(ledger: &MonthLedger) -> Self {
        Self {
            lines: ledger.expenses().to_vec(),
        }
    }

    pub fn lines(&self) -> &[ExpenseEntry] {
        &self.lines
    }

    /// Describe the first way the category set differs from the fixed 24
    pub fn schema_mismatch(&self) -> Option<String> {
        let mut seen = HashSet::new();
        for line in &self.lines {
            if !seen.insert(line.category) {
                return Some(format!("duplicate expense '{}'", line.category));
            }
        }

        let missing: Vec<&str> = ExpenseCategory::ALL
            .iter()
            .filter(|c| !seen.contains(*c))
            .map(|c| c.label())
            .collect();
        if !missing.is_empty() {
            return Some(format!("missing expenses: {}", missing.join(", ")));
        }

        None
    }

    pub fn validate_values(&self) -> Result<(), ExpenseValidationError> {
        self.lines.iter().try_for_each(ExpenseEntry::validate)
    }

    /// Lines sorted into display order
    pub fn into_display_order(mut self) -> Vec<ExpenseEntry> {
        self.lines.sort_by_key(|line| line.category.index());
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::money::Money;
    use crate::models::period::LedgerPeriod;

    #[test]
    fn test_full_table_has_no_mismatch() {
        let ledger = MonthLedger::new(LedgerPeriod::new(2024, 1).unwrap());
        assert_eq!(IncomeTable::from_ledger(&ledger).schema_mismatch(), None);
        assert_eq!(ExpenseTable::from_ledger(&ledger).schema_mismatch(), None);
    }

    #[test]
    fn test_missing_income_column() {
        let columns: Vec<_> = IncomeCategory::ALL
            .into_iter()
            .filter(|c| *c != IncomeCategory::FuelGallons)
            .collect();
        let table = IncomeTable::new(columns, IncomeEntry::blank_month());
        let problem = table.schema_mismatch().unwrap();
        assert!(problem.contains("Fuel Gallons"), "{}", problem);
    }

    #[test]
    fn test_duplicate_income_column() {
        let mut columns = IncomeCategory::ALL.to_vec();
        columns.push(IncomeCategory::Lotto);
        let table = IncomeTable::new(columns, IncomeEntry::blank_month());
        assert!(table.schema_mismatch().unwrap().contains("duplicate"));
    }

    #[test]
    fn test_short_or_shuffled_rows() {
        let mut rows = IncomeEntry::blank_month();
        rows.pop();
        let table = IncomeTable::new(IncomeCategory::ALL.to_vec(), rows);
        assert!(table.schema_mismatch().is_some());

        let mut rows = IncomeEntry::blank_month();
        rows.swap(3, 4);
        let table = IncomeTable::new(IncomeCategory::ALL.to_vec(), rows);
        assert!(table.schema_mismatch().unwrap().contains("expected day 4"));
    }

    #[test]
    fn test_expense_table_reorders() {
        let mut lines = ExpenseEntry::blank_month();
        lines.reverse();
        lines[0].amount = Money::from_dollars(5);
        let table = ExpenseTable::new(lines);
        assert_eq!(table.schema_mismatch(), None);

        let ordered = table.into_display_order();
        assert_eq!(ordered[0].category, ExpenseCategory::BankCharges);
        assert_eq!(ordered[23].category, ExpenseCategory::InventoryAccount2);
        assert_eq!(ordered[23].amount, Money::from_dollars(5));
    }

    #[test]
    fn test_expense_table_missing_line() {
        let mut lines = ExpenseEntry::blank_month();
        lines.retain(|l| l.category != ExpenseCategory::Rent);
        let table = ExpenseTable::new(lines);
        assert!(table.schema_mismatch().unwrap().contains("RENT"));
    }
}
