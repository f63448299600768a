//! Import and export for storebooks
//!
//! - CSV: income and expense tables (both directions) and the yearly summary
//! - JSON / YAML: monthly and yearly aggregation reports

pub mod csv;
pub mod report;

pub use self::csv::{
    import_expense_csv, import_income_csv, read_expense_csv, read_income_csv,
    write_expense_csv, write_income_csv, write_year_summary_csv,
};
pub use report::{export_report_json, export_report_yaml, ReportExport, REPORT_SCHEMA_VERSION};
