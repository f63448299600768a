//! Monthly and yearly report formatting

use rust_decimal::Decimal;
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::CountingRule;
use crate::services::{AggregationResult, YearlyAggregationResult};

use super::{money, value};

/// Format a month's aggregation: per-category breakdown, expenses and totals
pub fn format_month_summary(result: &AggregationResult, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Monthly Summary - {}\n", result.period));
    output.push_str(&"=".repeat(40));
    output.push('\n');

    let mut builder = Builder::default();
    builder.push_record(["Income Category", "Month Total", "Counted"]);
    for line in &result.breakdown {
        let counted = match (line.counted, line.category.counting_rule()) {
            (Some(amount), CountingRule::Scaled(rate)) => {
                let percent = (rate * Decimal::ONE_HUNDRED).normalize();
                format!("{} ({}%)", money(amount, symbol), percent)
            }
            (Some(amount), _) => money(amount, symbol),
            (None, _) => "excluded".to_string(),
        };
        builder.push_record([
            line.category.label().to_string(),
            value(line.gross, symbol),
            counted,
        ]);
    }
    let mut income = builder.build();
    income
        .with(Style::rounded())
        .modify(Columns::new(1..), Alignment::right());
    output.push_str(&income.to_string());
    output.push('\n');

    let mut builder = Builder::default();
    builder.push_record(["Expense", "Amount"]);
    for line in result.expense_breakdown.iter().filter(|l| !l.amount.is_zero()) {
        builder.push_record([line.category.label().to_string(), money(line.amount, symbol)]);
    }
    if result.expense_total.is_zero() {
        output.push_str("\nNo expenses recorded.\n");
    } else {
        let mut expenses = builder.build();
        expenses
            .with(Style::rounded())
            .modify(Columns::new(1..), Alignment::right());
        output.push('\n');
        output.push_str(&expenses.to_string());
        output.push('\n');
    }

    let excluded = &result.excluded_reference;
    output.push('\n');
    output.push_str(&format!(
        "Income:         {:>15}\n",
        money(result.included_income_total, symbol)
    ));
    output.push_str(&format!(
        "Expenses:       {:>15}\n",
        money(result.expense_total, symbol)
    ));
    output.push_str(&"-".repeat(31));
    output.push('\n');
    output.push_str(&format!(
        "Net Profit:     {:>15}\n",
        money(result.net_profit, symbol)
    ));
    output.push('\n');
    output.push_str(&format!(
        "Not counted: CC {}, Sales Tax {}, Fuel {}\n",
        money(excluded.credit_card, symbol),
        money(excluded.sales_tax, symbol),
        excluded.fuel_gallons
    ));

    output
}

#[derive(Tabled)]
struct YearRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Net Profit")]
    net_profit: String,
}

/// Format a yearly roll-up, one row per month plus a total
pub fn format_year_summary(result: &YearlyAggregationResult, symbol: &str) -> String {
    let mut rows: Vec<YearRow> = result
        .months
        .iter()
        .map(|line| YearRow {
            month: if line.recorded {
                line.period.month_name().to_string()
            } else {
                format!("{} (none)", line.period.month_name())
            },
            income: money(line.result.included_income_total, symbol),
            expenses: money(line.result.expense_total, symbol),
            net_profit: money(line.result.net_profit, symbol),
        })
        .collect();

    rows.push(YearRow {
        month: "Total".to_string(),
        income: money(result.total_income, symbol),
        expenses: money(result.total_expenses, symbol),
        net_profit: money(result.net_profit, symbol),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::new(1..), Alignment::right());

    format!("Yearly Summary - {}\n{}\n", result.year, table)
}
