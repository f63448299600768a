//! Yearly roll-up
//!
//! Aggregates the twelve months of a year. Months never recorded count as
//! zero rather than being skipped.

use serde::Serialize;

use crate::models::{
    ExpenseCategory, ExpenseEntry, IncomeAmounts, LedgerPeriod, Money, YearLedger,
};
use crate::storage::LedgerStore;

use super::aggregation::{aggregate_month, AggregationResult, ExcludedReference};

/// One month's contribution to the year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyLine {
    pub period: LedgerPeriod,
    /// Whether a ledger exists for this month
    pub recorded: bool,
    pub result: AggregationResult,
}

/// Result of aggregating a whole year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearlyAggregationResult {
    pub year: i32,
    /// January through December, always twelve entries
    pub months: Vec<MonthlyLine>,
    /// Gross per-category sums over the year
    pub category_totals: IncomeAmounts,
    pub excluded_reference: ExcludedReference,
    /// Per-expense-category yearly totals in display order
    pub expense_totals: Vec<ExpenseEntry>,
    pub total_income: Money,
    pub total_expenses: Money,
    pub net_profit: Money,
}

impl YearlyAggregationResult {
    pub fn month(&self, month: u32) -> Option<&MonthlyLine> {
        self.months.iter().find(|line| line.period.month() == month)
    }

    pub fn recorded_count(&self) -> usize {
        self.months.iter().filter(|line| line.recorded).count()
    }
}

/// Aggregate every month of a year ledger in calendar order
pub fn aggregate_year(ledger: &YearLedger) -> YearlyAggregationResult {
    roll_up(ledger.year(), |period| {
        ledger.month(period.month()).map(aggregate_month)
    })
}

/// Roll up a year from the store; a year never touched rolls up to zero
pub fn aggregate_year_of(store: &LedgerStore, year: i32) -> YearlyAggregationResult {
    match store.year(year) {
        Some(ledger) => aggregate_year(ledger),
        None => roll_up(year, |_| None),
    }
}

fn roll_up<F>(year: i32, mut month_result: F) -> YearlyAggregationResult
where
    F: FnMut(LedgerPeriod) -> Option<AggregationResult>,
{
    let months: Vec<MonthlyLine> = LedgerPeriod::months_of(year)
        .map(|period| match month_result(period) {
            Some(result) => MonthlyLine {
                period,
                recorded: true,
                result,
            },
            None => MonthlyLine {
                period,
                recorded: false,
                result: AggregationResult::zero(period),
            },
        })
        .collect();

    let mut category_totals = IncomeAmounts::default();
    let mut excluded_reference = ExcludedReference::default();
    let mut expense_totals = ExpenseEntry::blank_month();
    let mut total_income = Money::zero();
    let mut total_expenses = Money::zero();

    for line in &months {
        let result = &line.result;
        category_totals += &result.category_totals;
        excluded_reference += result.excluded_reference;
        total_income += result.included_income_total;
        total_expenses += result.expense_total;
        for expense in &result.expense_breakdown {
            expense_totals[expense.category.index()].amount += expense.amount;
        }
    }

    log::debug!(
        "Rolled up {}: income {}, expenses {}",
        year,
        total_income,
        total_expenses
    );

    YearlyAggregationResult {
        year,
        months,
        category_totals,
        excluded_reference,
        expense_totals,
        total_income,
        total_expenses,
        net_profit: total_income - total_expenses,
    }
}

/// Yearly total for one expense category
pub fn expense_total(result: &YearlyAggregationResult, category: ExpenseCategory) -> Money {
    result.expense_totals[category.index()].amount
}
