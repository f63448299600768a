//! JSON and YAML report export
//!
//! Wraps a monthly or yearly aggregation in a small envelope carrying the
//! schema version and generation time. Money is serialized as integer cents
//! and fuel volume as thousandths of a gallon.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{LedgerError, LedgerResult};

/// Current report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Envelope written around every exported report
#[derive(Debug, Clone, Serialize)]
pub struct ReportExport<'a, T: Serialize> {
    pub schema_version: &'static str,
    pub generated_at: DateTime<Utc>,
    pub app_version: &'static str,
    pub report: &'a T,
}

impl<'a, T: Serialize> ReportExport<'a, T> {
    pub fn new(report: &'a T) -> Self {
        Self {
            schema_version: REPORT_SCHEMA_VERSION,
            generated_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            report,
        }
    }
}

/// Export a report as JSON
pub fn export_report_json<W: Write, T: Serialize>(
    report: &T,
    writer: &mut W,
    pretty: bool,
) -> LedgerResult<()> {
    let export = ReportExport::new(report);

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    }
    .map_err(|e| LedgerError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(())
}

/// Export a report as YAML with a short header comment
pub fn export_report_yaml<W: Write, T: Serialize>(report: &T, writer: &mut W) -> LedgerResult<()> {
    let export = ReportExport::new(report);

    writeln!(writer, "# storebooks report").map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.generated_at)
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    writeln!(writer, "# Amounts are in cents, fuel volume in thousandths of a gallon").map_err(|e| LedgerError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IncomeCategory, LedgerPeriod};
    use crate::services::{aggregate_month, aggregate_year_of};
    use crate::storage::LedgerStore;
    use rust_decimal_macros::dec;

    fn sample_store() -> LedgerStore {
        let mut store = LedgerStore::new();
        store
            .set_income_cell(
                LedgerPeriod::new(2024, 3).unwrap(),
                1,
                IncomeCategory::Taxable,
                dec!(200),
            )
            .unwrap();
        store
    }

    #[test]
    fn test_month_report_json() {
        let store = sample_store();
        let result = aggregate_month(store.get(LedgerPeriod::new(2024, 3).unwrap()).unwrap());

        let mut buf = Vec::new();
        export_report_json(&result, &mut buf, false).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["schema_version"], REPORT_SCHEMA_VERSION);
        assert_eq!(value["report"]["included_income_total"], 20000);
        assert_eq!(value["report"]["net_profit"], 20000);
        assert_eq!(value["report"]["breakdown"].as_array().unwrap().len(), 12);
    }

    #[test]
    fn test_month_report_marks_units() {
        let mut store = sample_store();
        let march = LedgerPeriod::new(2024, 3).unwrap();
        store
            .set_income_cell(march, 2, IncomeCategory::FuelGallons, dec!(812.5))
            .unwrap();
        let result = aggregate_month(store.get(march).unwrap());

        let mut buf = Vec::new();
        export_report_json(&result, &mut buf, false).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        let breakdown = value["report"]["breakdown"].as_array().unwrap();
        let taxable = &breakdown[0];
        assert_eq!(taxable["category"], "Taxable");
        assert_eq!(taxable["unit"], "currency");
        assert_eq!(taxable["gross"], 20000);

        let fuel = breakdown
            .iter()
            .find(|line| line["category"] == "Fuel Gallons")
            .unwrap();
        assert_eq!(fuel["unit"], "gallons");
        assert_eq!(fuel["gross"], 812500);
        assert!(fuel["counted"].is_null());
    }

    #[test]
    fn test_year_report_yaml() {
        let store = sample_store();
        let result = aggregate_year_of(&store, 2024);

        let mut buf = Vec::new();
        export_report_yaml(&result, &mut buf).unwrap();
        let yaml = String::from_utf8(buf).unwrap();

        assert!(yaml.starts_with("# storebooks report"));
        assert!(yaml.contains("total_income: 20000"));
        assert!(yaml.contains("year: 2024"));
    }
}
