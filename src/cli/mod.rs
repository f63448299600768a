//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the ledger store and its snapshots.

pub mod audit;
pub mod expense;
pub mod export;
pub mod import;
pub mod income;
pub mod report;

pub use audit::handle_audit_command;
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use import::{handle_import_command, ImportCommands};
pub use income::{handle_income_command, IncomeCommands};
pub use report::{handle_month_command, handle_year_command};

use clap::ValueEnum;
use rust_decimal::Decimal;

use crate::audit::AuditLogger;
use crate::config::{LedgerPaths, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::models::money::parse_decimal;
use crate::models::{ExpenseCategory, IncomeCategory, LedgerPeriod};
use crate::storage::{LedgerStore, SnapshotWorkspace};

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

/// Everything one command invocation works with
///
/// Snapshots are loaded before the audit log is attached, so only changes
/// made by the command itself are recorded.
pub struct Session {
    pub paths: LedgerPaths,
    pub settings: Settings,
    pub snapshots: SnapshotWorkspace,
    pub store: LedgerStore,
}

impl Session {
    fn open(paths: LedgerPaths, settings: Settings) -> Self {
        let snapshots =
            SnapshotWorkspace::new(paths.data_dir()).with_total_row(settings.include_total_row);
        Self {
            paths,
            settings,
            snapshots,
            store: LedgerStore::new(),
        }
    }

    /// Open a session with one period's snapshot loaded
    pub fn for_period(
        paths: LedgerPaths,
        settings: Settings,
        period: LedgerPeriod,
    ) -> LedgerResult<Self> {
        let mut session = Self::open(paths, settings);
        session.snapshots.load_period(&mut session.store, period)?;
        session.attach_audit_log();
        Ok(session)
    }

    /// Open a session with every saved month of a year loaded
    pub fn for_year(paths: LedgerPaths, settings: Settings, year: i32) -> LedgerResult<Self> {
        let mut session = Self::open(paths, settings);
        session.snapshots.load_year(&mut session.store, year)?;
        session.attach_audit_log();
        Ok(session)
    }

    fn attach_audit_log(&mut self) {
        if self.settings.audit_log_enabled {
            self.store
                .attach_audit_log(AuditLogger::new(self.paths.audit_log()));
        }
    }

    /// Persist a period after a change
    pub fn save(&self, period: LedgerPeriod) -> LedgerResult<()> {
        self.snapshots.save_period(&self.store, period)
    }

    pub fn currency(&self) -> &str {
        &self.settings.currency_symbol
    }
}

/// Parse `--period`, defaulting to the current month
pub fn parse_period(period: Option<&str>) -> LedgerResult<LedgerPeriod> {
    match period {
        Some(s) => LedgerPeriod::parse(s)
            .map_err(|e| LedgerError::Validation(format!("Invalid period: {}", e))),
        None => Ok(LedgerPeriod::current()),
    }
}

pub(crate) fn parse_amount(value: &str) -> LedgerResult<Decimal> {
    parse_decimal(value).map_err(|e| LedgerError::Validation(format!("Invalid amount: {}", e)))
}

pub(crate) fn parse_income_category(name: &str) -> LedgerResult<IncomeCategory> {
    name.parse()
        .map_err(|_| LedgerError::income_category_not_found(name))
}

pub(crate) fn parse_expense_category(name: &str) -> LedgerResult<ExpenseCategory> {
    name.parse()
        .map_err(|_| LedgerError::expense_category_not_found(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_period() {
        assert_eq!(
            parse_period(Some("March 2024")).unwrap(),
            LedgerPeriod::new(2024, 3).unwrap()
        );
        assert!(parse_period(Some("2024-13")).unwrap_err().is_validation());
        assert_eq!(parse_period(None).unwrap(), LedgerPeriod::current());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(parse_income_category("fuel-gallons").unwrap(), IncomeCategory::FuelGallons);
        assert_eq!(parse_expense_category("pay roll").unwrap(), ExpenseCategory::Payroll);
        assert!(parse_income_category("scratchers").unwrap_err().is_not_found());
        assert!(parse_amount("12.3.4").unwrap_err().is_validation());
    }

    #[test]
    fn test_session_audit_skips_snapshot_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings {
            audit_log_enabled: true,
            ..Settings::default()
        };
        let period = LedgerPeriod::new(2024, 3).unwrap();

        let mut session = Session::for_period(paths.clone(), settings.clone(), period).unwrap();
        session
            .store
            .set_expense_amount(period, ExpenseCategory::Rent, Decimal::from(900))
            .unwrap();
        session.save(period).unwrap();

        let reopened = Session::for_period(paths.clone(), settings, period).unwrap();
        assert!(reopened.store.get(period).is_some());

        // create + update from the first session only
        let entries = AuditLogger::new(paths.audit_log()).read_all().unwrap();
        assert_eq!(entries.len(), 2);
    }
}
