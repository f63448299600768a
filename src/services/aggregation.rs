//! Monthly aggregation
//!
//! Turns a month ledger into income, expense and net-profit totals. All
//! arithmetic is fixed-point, so aggregating the same ledger twice gives
//! identical results.

use serde::Serialize;
use std::ops::AddAssign;

use crate::models::{
    CountingRule, ExpenseEntry, Gallons, IncomeAmounts, IncomeCategory, IncomeValue,
    LedgerPeriod, Money, MonthLedger, Unit,
};

/// One income category's monthly total and what it contributes to income
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryLine {
    pub category: IncomeCategory,
    /// Whether `gross` is cents or thousandths of a gallon
    pub unit: Unit,
    /// Sum of the day cells
    pub gross: IncomeValue,
    /// Contribution to included income; `None` for excluded categories
    pub counted: Option<Money>,
}

/// Totals tracked for reference but never counted toward net profit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExcludedReference {
    pub credit_card: Money,
    pub sales_tax: Money,
    pub fuel_gallons: Gallons,
}

impl ExcludedReference {
    fn from_totals(totals: &IncomeAmounts) -> Self {
        Self {
            credit_card: totals.credit_card,
            sales_tax: totals.sales_tax,
            fuel_gallons: totals.fuel_gallons,
        }
    }

    /// CC plus Sales Tax; fuel volume is not money and stays out
    pub fn monetary_total(&self) -> Money {
        self.credit_card + self.sales_tax
    }
}

impl AddAssign for ExcludedReference {
    fn add_assign(&mut self, other: Self) {
        self.credit_card += other.credit_card;
        self.sales_tax += other.sales_tax;
        self.fuel_gallons += other.fuel_gallons;
    }
}

/// Result of aggregating one month ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregationResult {
    pub period: LedgerPeriod,
    /// Gross per-category sums across all 31 days
    pub category_totals: IncomeAmounts,
    /// Per-category breakdown in display order
    pub breakdown: Vec<CategoryLine>,
    /// Sum of included categories after Lottery/Lotto scaling
    pub included_income_total: Money,
    pub excluded_reference: ExcludedReference,
    pub expense_total: Money,
    /// Expense lines in display order
    pub expense_breakdown: Vec<ExpenseEntry>,
    /// Included income minus expenses; may be negative
    pub net_profit: Money,
}

impl AggregationResult {
    /// The result for a month with nothing recorded
    pub fn zero(period: LedgerPeriod) -> Self {
        aggregate_month(&MonthLedger::new(period))
    }

    /// Look up one category's line
    pub fn line(&self, category: IncomeCategory) -> Option<&CategoryLine> {
        self.breakdown.iter().find(|line| line.category == category)
    }

    /// What a category contributed to included income
    pub fn counted(&self, category: IncomeCategory) -> Option<Money> {
        self.line(category).and_then(|line| line.counted)
    }
}

/// Aggregate a month ledger
///
/// Lottery and Lotto are scaled on the monthly sum, not per day, and rounded
/// half-even to the cent.
pub fn aggregate_month(ledger: &MonthLedger) -> AggregationResult {
    let category_totals: IncomeAmounts = ledger.income().iter().map(|row| &row.amounts).sum();

    let breakdown: Vec<CategoryLine> = IncomeCategory::ALL
        .into_iter()
        .map(|category| {
            let gross = category_totals.get(category);
            CategoryLine {
                category,
                unit: category.unit(),
                gross,
                counted: counted_amount(category, gross),
            }
        })
        .collect();

    let included_income_total: Money = breakdown.iter().filter_map(|line| line.counted).sum();
    let expense_total: Money = ledger.expenses().iter().map(|line| line.amount).sum();

    AggregationResult {
        period: ledger.period(),
        excluded_reference: ExcludedReference::from_totals(&category_totals),
        category_totals,
        breakdown,
        included_income_total,
        expense_total,
        expense_breakdown: ledger.expenses().to_vec(),
        net_profit: included_income_total - expense_total,
    }
}

fn counted_amount(category: IncomeCategory, gross: IncomeValue) -> Option<Money> {
    match (category.counting_rule(), gross) {
        (CountingRule::Full, IncomeValue::Money(amount)) => Some(amount),
        (CountingRule::Scaled(rate), IncomeValue::Money(amount)) => Some(amount.scale(rate)),
        _ => None,
    }
}
