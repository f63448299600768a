//! Ledger table formatting

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};

use crate::models::{CountingRule, ExpenseCategory, IncomeCategory, Money, MonthLedger, Unit};

use super::{money, value};

/// Format the days of a month that have income recorded
pub fn format_income_grid(ledger: &MonthLedger, symbol: &str) -> String {
    let period = ledger.period();
    let recorded: Vec<_> = ledger
        .income()
        .iter()
        .filter(|row| !row.amounts.is_zero())
        .collect();

    if recorded.is_empty() {
        return format!("No income recorded for {}.", period);
    }

    let mut builder = Builder::default();
    let mut header = vec!["Date".to_string()];
    header.extend(IncomeCategory::ALL.iter().map(|c| c.label().to_string()));
    builder.push_record(header);

    for row in recorded {
        let mut record = vec![period.date_label(row.day)];
        record.extend(
            IncomeCategory::ALL
                .iter()
                .map(|c| value(row.amounts.get(*c), symbol)),
        );
        builder.push_record(record);
    }

    let mut table = builder.build();
    table
        .with(Style::modern())
        .modify(Columns::new(1..), Alignment::right());
    table.to_string()
}

/// Format a month's expense lines with a total
pub fn format_expenses(ledger: &MonthLedger, symbol: &str) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Expense", "Amount"]);
    for line in ledger.expenses() {
        builder.push_record([line.category.label().to_string(), money(line.amount, symbol)]);
    }
    let total: Money = ledger.expenses().iter().map(|line| line.amount).sum();
    builder.push_record(["Total Expenses".to_string(), money(total, symbol)]);

    let mut table = builder.build();
    table
        .with(Style::modern())
        .modify(Columns::new(1..), Alignment::right());
    table.to_string()
}

/// List every category and how it counts
pub fn format_categories() -> String {
    let mut builder = Builder::default();
    builder.push_record(["Income Category", "Unit", "Counts Toward Income"]);
    for category in IncomeCategory::ALL {
        let unit = match category.unit() {
            Unit::Currency => "currency",
            Unit::Gallons => "gallons",
        };
        let rule = match category.counting_rule() {
            CountingRule::Full => "yes".to_string(),
            CountingRule::Scaled(rate) => format!("{} of monthly total", rate),
            CountingRule::Excluded => "no (reference only)".to_string(),
        };
        builder.push_record([category.label().to_string(), unit.to_string(), rule]);
    }
    let mut income = builder.build();
    income.with(Style::rounded());

    let mut builder = Builder::default();
    builder.push_record(["Expense Category"]);
    for category in ExpenseCategory::ALL {
        builder.push_record([category.label()]);
    }
    let mut expenses = builder.build();
    expenses.with(Style::rounded());

    format!("{}\n\n{}", income, expenses)
}
