//! CSV import and export
//!
//! Income tables are written one row per day with a `Date` column
//! (`05/March/2024`) followed by the twelve income categories. Expense tables
//! are `Expense,Amount` pairs. Readers accept what the writers produce, plus
//! a `Day` key column for hand-made income sheets.

use std::io::{Read, Write};

use csv::{ReaderBuilder, StringRecord, Trim, Writer};

use crate::error::{LedgerError, LedgerResult};
use crate::models::money::parse_decimal;
use crate::models::{
    ExpenseCategory, ExpenseEntry, ExpenseTable, IncomeAmounts, IncomeCategory, IncomeEntry,
    IncomeTable, LedgerPeriod, Money, MonthLedger, PeriodParseError,
};
use crate::services::YearlyAggregationResult;
use crate::storage::LedgerStore;

const DATE_COLUMN: &str = "Date";
const DAY_COLUMN: &str = "Day";
const TOTAL_ROW: &str = "Total";
const EXPENSE_COLUMN: &str = "Expense";
const AMOUNT_COLUMN: &str = "Amount";
const TOTAL_EXPENSES_ROW: &str = "Total Expenses";

/// How income rows identify their day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayKey {
    Day,
    Date,
}

/// Write a month's income table
pub fn write_income_csv<W: Write>(
    ledger: &MonthLedger,
    writer: W,
    include_total: bool,
) -> LedgerResult<()> {
    let period = ledger.period();
    let mut writer = Writer::from_writer(writer);

    let mut header = vec![DATE_COLUMN];
    header.extend(IncomeCategory::ALL.iter().map(|c| c.label()));
    writer.write_record(&header)?;

    for row in ledger.income() {
        writer.write_record(income_record(period.date_label(row.day), &row.amounts))?;
    }

    if include_total {
        let totals: IncomeAmounts = ledger.income().iter().map(|row| &row.amounts).sum();
        writer.write_record(income_record(TOTAL_ROW.to_string(), &totals))?;
    }

    writer.flush()?;
    Ok(())
}

fn income_record(key: String, amounts: &IncomeAmounts) -> Vec<String> {
    let mut record = Vec::with_capacity(IncomeCategory::ALL.len() + 1);
    record.push(key);
    record.extend(
        IncomeCategory::ALL
            .iter()
            .map(|c| amounts.get(*c).to_plain_string()),
    );
    record
}

/// Parse an income table for a period
///
/// Header problems are reported as schema errors before any row is read.
/// Row order and count are left for the store to check.
pub fn read_income_csv<R: Read>(period: LedgerPeriod, reader: R) -> LedgerResult<IncomeTable> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let key = match headers.get(0) {
        Some(DATE_COLUMN) => DayKey::Date,
        Some(DAY_COLUMN) => DayKey::Day,
        Some(other) => {
            return Err(LedgerError::Schema(format!(
                "First income column must be '{}' or '{}', found '{}'",
                DATE_COLUMN, DAY_COLUMN, other
            )))
        }
        None => return Err(LedgerError::Schema("Income CSV has no header".into())),
    };

    let columns = headers
        .iter()
        .skip(1)
        .map(|label| {
            IncomeCategory::from_label(label)
                .ok_or_else(|| LedgerError::Schema(format!("Unknown income column '{}'", label)))
        })
        .collect::<LedgerResult<Vec<_>>>()?;

    if let Some(problem) =
        IncomeTable::new(columns.clone(), IncomeEntry::blank_month()).schema_mismatch()
    {
        return Err(LedgerError::Schema(format!("Income CSV: {}", problem)));
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = line_number(&record);
        let key_cell = record.get(0).unwrap_or_default();

        if key_cell.eq_ignore_ascii_case(TOTAL_ROW) {
            continue;
        }

        if record.len() != headers.len() {
            return Err(LedgerError::Schema(format!(
                "Line {}: expected {} fields, found {}",
                line,
                headers.len(),
                record.len()
            )));
        }

        let day = parse_day(period, key, key_cell, line)?;
        let mut amounts = IncomeAmounts::default();
        for (category, cell) in columns.iter().zip(record.iter().skip(1)) {
            let value = parse_cell(cell, line, category.label())?;
            amounts.set(*category, value).map_err(|e| {
                LedgerError::Validation(format!("Line {}: {}", line, e))
            })?;
        }

        rows.push(IncomeEntry { day, amounts });
    }

    Ok(IncomeTable::new(columns, rows))
}

fn parse_day(period: LedgerPeriod, key: DayKey, cell: &str, line: u64) -> LedgerResult<u32> {
    match key {
        DayKey::Day => cell
            .parse()
            .map_err(|_| LedgerError::Validation(format!("Line {}: invalid day '{}'", line, cell))),
        DayKey::Date => period.parse_date_label(cell).map_err(|e| match e {
            PeriodParseError::WrongPeriod { .. } => {
                LedgerError::Schema(format!("Line {}: {}", line, e))
            }
            _ => LedgerError::Validation(format!("Line {}: invalid date '{}'", line, cell)),
        }),
    }
}

fn parse_cell(cell: &str, line: u64, column: &str) -> LedgerResult<rust_decimal::Decimal> {
    // Spreadsheets leave untouched cells blank
    if cell.is_empty() {
        return Ok(rust_decimal::Decimal::ZERO);
    }
    parse_decimal(cell).map_err(|e| {
        LedgerError::Validation(format!("Line {}, column '{}': {}", line, column, e))
    })
}

fn line_number(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or_default()
}

/// Read an income CSV and replace the period's income rows with it
pub fn import_income_csv<R: Read>(
    store: &mut LedgerStore,
    period: LedgerPeriod,
    reader: R,
) -> LedgerResult<()> {
    let table = read_income_csv(period, reader)?;
    store.replace_income_table(period, table)?;
    log::info!("Imported income CSV for {}", period);
    Ok(())
}

/// Write a month's expense lines with a trailing total
pub fn write_expense_csv<W: Write>(ledger: &MonthLedger, writer: W) -> LedgerResult<()> {
    let mut writer = Writer::from_writer(writer);
    writer.write_record([EXPENSE_COLUMN, AMOUNT_COLUMN])?;

    for line in ledger.expenses() {
        writer.write_record([line.category.label(), line.amount.to_plain_string().as_str()])?;
    }

    let total: Money = ledger.expenses().iter().map(|line| line.amount).sum();
    writer.write_record([TOTAL_EXPENSES_ROW, total.to_plain_string().as_str()])?;

    writer.flush()?;
    Ok(())
}

/// Parse an expense table; lines may be in any order
pub fn read_expense_csv<R: Read>(reader: R) -> LedgerResult<ExpenseTable> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.len() != 2
        || headers.get(0) != Some(EXPENSE_COLUMN)
        || headers.get(1) != Some(AMOUNT_COLUMN)
    {
        return Err(LedgerError::Schema(format!(
            "Expense CSV header must be '{},{}'",
            EXPENSE_COLUMN, AMOUNT_COLUMN
        )));
    }

    let mut lines = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = line_number(&record);
        let name = record.get(0).unwrap_or_default();

        if name.eq_ignore_ascii_case(TOTAL_EXPENSES_ROW) {
            continue;
        }
        if record.len() != 2 {
            return Err(LedgerError::Schema(format!(
                "Line {}: expected 2 fields, found {}",
                line,
                record.len()
            )));
        }

        let category = ExpenseCategory::from_label(name).ok_or_else(|| {
            LedgerError::Schema(format!("Line {}: unknown expense '{}'", line, name))
        })?;
        let value = parse_cell(record.get(1).unwrap_or_default(), line, AMOUNT_COLUMN)?;

        let mut entry = ExpenseEntry::new(category);
        entry
            .set_amount(value)
            .map_err(|e| LedgerError::Validation(format!("Line {}: {}", line, e)))?;
        lines.push(entry);
    }

    Ok(ExpenseTable::new(lines))
}

/// Read an expense CSV and replace the period's expense lines with it
pub fn import_expense_csv<R: Read>(
    store: &mut LedgerStore,
    period: LedgerPeriod,
    reader: R,
) -> LedgerResult<()> {
    let table = read_expense_csv(reader)?;
    store.replace_expense_table(period, table)?;
    log::info!("Imported expense CSV for {}", period);
    Ok(())
}

/// Write the yearly summary: one row per month plus a total
pub fn write_year_summary_csv<W: Write>(
    result: &YearlyAggregationResult,
    writer: W,
) -> LedgerResult<()> {
    let mut writer = Writer::from_writer(writer);
    writer.write_record(["Month", "Income", "Expenses", "Net Profit"])?;

    for line in &result.months {
        writer.write_record([
            line.period.month_name().to_string(),
            line.result.included_income_total.to_plain_string(),
            line.result.expense_total.to_plain_string(),
            line.result.net_profit.to_plain_string(),
        ])?;
    }

    writer.write_record([
        TOTAL_ROW.to_string(),
        result.total_income.to_plain_string(),
        result.total_expenses.to_plain_string(),
        result.net_profit.to_plain_string(),
    ])?;

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gallons;
    use crate::services::aggregate_year_of;
    use rust_decimal_macros::dec;

    fn march() -> LedgerPeriod {
        LedgerPeriod::new(2024, 3).unwrap()
    }

    fn sample_store() -> LedgerStore {
        let mut store = LedgerStore::new();
        store
            .set_income_cell(march(), 1, IncomeCategory::Taxable, dec!(1250.40))
            .unwrap();
        store
            .set_income_cell(march(), 1, IncomeCategory::FuelGallons, dec!(812.125))
            .unwrap();
        store
            .set_income_cell(march(), 31, IncomeCategory::Lotto, dec!(300))
            .unwrap();
        store
            .set_expense_amount(march(), ExpenseCategory::TaxesAndLicense, dec!(75.5))
            .unwrap();
        store
    }

    fn income_csv(store: &LedgerStore, include_total: bool) -> String {
        let mut buf = Vec::new();
        write_income_csv(store.get(march()).unwrap(), &mut buf, include_total).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn header_with(first: &str, skip: Option<IncomeCategory>) -> String {
        let mut header = vec![first.to_string()];
        header.extend(
            IncomeCategory::ALL
                .iter()
                .filter(|c| Some(**c) != skip)
                .map(|c| c.label().to_string()),
        );
        header.join(",")
    }

    #[test]
    fn test_income_export_layout() {
        let csv = income_csv(&sample_store(), true);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 33);
        assert_eq!(lines[0], header_with("Date", None));
        assert!(lines[1].starts_with("01/March/2024,1250.40,0.00"));
        assert!(lines[1].contains(",812.125,"));
        assert!(lines[31].starts_with("31/March/2024,"));
        assert!(lines[32].starts_with("Total,1250.40,"));
    }

    #[test]
    fn test_income_round_trip() {
        let store = sample_store();
        let csv = income_csv(&store, true);

        let table = read_income_csv(march(), csv.as_bytes()).unwrap();
        assert_eq!(table, IncomeTable::from_ledger(store.get(march()).unwrap()));
    }

    #[test]
    fn test_import_replaces_income() {
        let source = sample_store();
        let csv = income_csv(&source, false);

        let mut store = LedgerStore::new();
        store
            .set_income_cell(march(), 2, IncomeCategory::Atm, dec!(20))
            .unwrap();
        import_income_csv(&mut store, march(), csv.as_bytes()).unwrap();

        let ledger = store.get(march()).unwrap();
        assert_eq!(ledger.income(), source.get(march()).unwrap().income());
        assert_eq!(ledger.income_entry(2).unwrap().amounts.atm, Money::zero());
    }

    #[test]
    fn test_import_day_column_and_shuffled_columns() {
        let mut columns: Vec<IncomeCategory> = IncomeCategory::ALL.to_vec();
        columns.reverse();

        let labels: Vec<&str> = columns.iter().map(|c| c.label()).collect();
        let mut csv = format!("Day,{}\n", labels.join(","));
        for day in 1..=31 {
            let cells: Vec<&str> = columns
                .iter()
                .map(|c| match c {
                    IncomeCategory::FuelGallons if day == 3 => "10.5",
                    IncomeCategory::Rebates if day == 3 => "4.25",
                    _ => "",
                })
                .collect();
            csv.push_str(&format!("{},{}\n", day, cells.join(",")));
        }

        let table = read_income_csv(march(), csv.as_bytes()).unwrap();
        assert_eq!(table.schema_mismatch(), None);
        let row = &table.rows()[2];
        assert_eq!(row.amounts.fuel_gallons, Gallons::from_thousandths(10_500));
        assert_eq!(row.amounts.rebates, Money::from_cents(425));
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let mut store = sample_store();
        let before = store.get(march()).unwrap().clone();

        let mut csv = header_with("Date", Some(IncomeCategory::FuelGallons));
        csv.push('\n');
        for day in 1..=31 {
            csv.push_str(&march().date_label(day));
            csv.push_str(&",0".repeat(11));
            csv.push('\n');
        }

        let err = import_income_csv(&mut store, march(), csv.as_bytes()).unwrap_err();
        assert!(err.is_schema());
        assert!(err.to_string().contains("Fuel Gallons"));
        assert_eq!(store.get(march()).unwrap(), &before);
    }

    #[test]
    fn test_unknown_column_is_schema_error() {
        let csv = format!("{},Scratchers\n", header_with("Date", None));
        let err = read_income_csv(march(), csv.as_bytes()).unwrap_err();
        assert!(err.is_schema());
    }

    #[test]
    fn test_short_table_is_schema_error() {
        let mut store = LedgerStore::new();
        let mut csv = header_with("Day", None);
        csv.push('\n');
        for day in 1..=30 {
            csv.push_str(&format!("{}{}\n", day, ",0".repeat(12)));
        }

        let err = import_income_csv(&mut store, march(), csv.as_bytes()).unwrap_err();
        assert!(err.is_schema());
        assert!(store.get(march()).is_none());
    }

    #[test]
    fn test_malformed_and_negative_values() {
        let mut csv = header_with("Day", None);
        csv.push('\n');
        csv.push_str(&format!("1,abc{}\n", ",0".repeat(11)));
        let err = read_income_csv(march(), csv.as_bytes()).unwrap_err();
        assert!(err.is_validation());

        let mut csv = header_with("Day", None);
        csv.push('\n');
        csv.push_str(&format!("1,-5{}\n", ",0".repeat(11)));
        let err = read_income_csv(march(), csv.as_bytes()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_date_from_other_month_rejected() {
        let mut csv = header_with("Date", None);
        csv.push('\n');
        csv.push_str(&format!("01/April/2024{}\n", ",0".repeat(12)));
        let err = read_income_csv(march(), csv.as_bytes()).unwrap_err();
        assert!(err.is_schema());
    }

    #[test]
    fn test_expense_export_layout() {
        let store = sample_store();
        let mut buf = Vec::new();
        write_expense_csv(store.get(march()).unwrap(), &mut buf).unwrap();
        let csv = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 26);
        assert_eq!(lines[0], "Expense,Amount");
        assert_eq!(lines[1], "BANK CHARGES,0.00");
        assert_eq!(lines[13], "TAXES & LICENSE,75.50");
        assert_eq!(lines[25], "Total Expenses,75.50");
    }

    #[test]
    fn test_expense_import_any_order() {
        let mut csv = String::from("Expense,Amount\n");
        for category in ExpenseCategory::ALL.iter().rev() {
            let amount = if *category == ExpenseCategory::Rent { "2,500.00" } else { "0" };
            csv.push_str(&format!("\"{}\",\"{}\"\n", category.label(), amount));
        }
        csv.push_str("Total Expenses,2500.00\n");

        let mut store = LedgerStore::new();
        import_expense_csv(&mut store, march(), csv.as_bytes()).unwrap();

        let ledger = store.get(march()).unwrap();
        assert_eq!(ledger.expense(ExpenseCategory::Rent), Money::from_dollars(2500));
        assert_eq!(ledger.expenses()[0].category, ExpenseCategory::BankCharges);
    }

    #[test]
    fn test_expense_import_missing_line() {
        let mut csv = String::from("Expense,Amount\n");
        for category in ExpenseCategory::ALL.iter().skip(1) {
            csv.push_str(&format!("{},0\n", category.label()));
        }

        let mut store = LedgerStore::new();
        let err = import_expense_csv(&mut store, march(), csv.as_bytes()).unwrap_err();
        assert!(err.is_schema());
        assert!(store.get(march()).is_none());
    }

    #[test]
    fn test_expense_import_requires_exact_labels() {
        let mut csv = String::from("Expense,Amount\n");
        for category in ExpenseCategory::ALL {
            let name = match category {
                ExpenseCategory::Payroll => "pay_roll".to_string(),
                other => other.label().to_string(),
            };
            csv.push_str(&format!("{},0\n", name));
        }

        let mut store = LedgerStore::new();
        let err = import_expense_csv(&mut store, march(), csv.as_bytes()).unwrap_err();
        assert!(err.is_schema());
        assert!(err.to_string().contains("pay_roll"));
        assert!(store.get(march()).is_none());
    }

    #[test]
    fn test_year_summary() {
        let store = sample_store();
        let result = aggregate_year_of(&store, 2024);
        let mut buf = Vec::new();
        write_year_summary_csv(&result, &mut buf).unwrap();
        let csv = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 14);
        assert_eq!(lines[0], "Month,Income,Expenses,Net Profit");
        assert_eq!(lines[1], "January,0.00,0.00,0.00");
        // 1250.40 + 5% of 300
        assert_eq!(lines[3], "March,1265.40,75.50,1189.90");
        assert_eq!(lines[13], "Total,1265.40,75.50,1189.90");
    }
}
