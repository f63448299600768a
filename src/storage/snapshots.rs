//! CSV snapshots in the data directory
//!
//! Each recorded month lives in two files:
//!
//! ```text
//! <data>/2024/03-income.csv
//! <data>/2024/03-expenses.csv
//! ```
//!
//! Snapshots are loaded through the CSV importer, so a hand-edited file with
//! the wrong shape is rejected the same way an import would be.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::{LedgerError, LedgerResult};
use crate::export::{import_expense_csv, import_income_csv, write_expense_csv, write_income_csv};
use crate::models::LedgerPeriod;

use super::file_io::stage_file;
use super::store::LedgerStore;

/// Reads and writes month snapshots under a data directory
#[derive(Debug, Clone)]
pub struct SnapshotWorkspace {
    data_dir: PathBuf,
    include_total_row: bool,
}

impl SnapshotWorkspace {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            include_total_row: true,
        }
    }

    /// Whether income snapshots end with a `Total` row
    pub fn with_total_row(mut self, include: bool) -> Self {
        self.include_total_row = include;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn year_dir(&self, year: i32) -> PathBuf {
        self.data_dir.join(year.to_string())
    }

    pub fn income_path(&self, period: LedgerPeriod) -> PathBuf {
        self.year_dir(period.year())
            .join(format!("{:02}-income.csv", period.month()))
    }

    pub fn expense_path(&self, period: LedgerPeriod) -> PathBuf {
        self.year_dir(period.year())
            .join(format!("{:02}-expenses.csv", period.month()))
    }

    /// True if either table has been saved for the period
    pub fn has_snapshot(&self, period: LedgerPeriod) -> bool {
        self.income_path(period).exists() || self.expense_path(period).exists()
    }

    /// Load a period's snapshots into the store
    ///
    /// Returns false when nothing was saved for the period.
    pub fn load_period(&self, store: &mut LedgerStore, period: LedgerPeriod) -> LedgerResult<bool> {
        let income_path = self.income_path(period);
        let expense_path = self.expense_path(period);
        let mut loaded = false;

        if income_path.exists() {
            import_income_csv(store, period, open(&income_path)?)
                .map_err(|e| in_file(e, &income_path))?;
            loaded = true;
        }

        if expense_path.exists() {
            import_expense_csv(store, period, open(&expense_path)?)
                .map_err(|e| in_file(e, &expense_path))?;
            loaded = true;
        }

        if loaded {
            log::debug!("Loaded snapshot for {}", period);
        }
        Ok(loaded)
    }

    /// Load every saved month of a year, returning the periods found
    pub fn load_year(&self, store: &mut LedgerStore, year: i32) -> LedgerResult<Vec<LedgerPeriod>> {
        let mut loaded = Vec::new();
        for period in LedgerPeriod::months_of(year) {
            if self.load_period(store, period)? {
                loaded.push(period);
            }
        }
        Ok(loaded)
    }

    /// Write both tables of a period
    ///
    /// Both files are fully written to temp files before either replaces its
    /// snapshot, so a failed write leaves the previous pair in place.
    pub fn save_period(&self, store: &LedgerStore, period: LedgerPeriod) -> LedgerResult<()> {
        let ledger = store.get(period).ok_or_else(|| LedgerError::NotFound {
            entity_type: "Ledger",
            identifier: period.to_string(),
        })?;

        let income = stage_file(self.income_path(period), |w| {
            write_income_csv(ledger, w, self.include_total_row)
        })?;
        let expenses = stage_file(self.expense_path(period), |w| write_expense_csv(ledger, w))?;

        for staged in [income, expenses] {
            log::debug!("Replacing {}", staged.target().display());
            staged.commit()?;
        }

        log::info!("Saved snapshot for {} to {}", period, self.data_dir.display());
        Ok(())
    }
}

fn open(path: &Path) -> LedgerResult<File> {
    File::open(path)
        .map_err(|e| LedgerError::Io(format!("Failed to open {}: {}", path.display(), e)))
}

/// Prefix an import error with the file it came from, keeping its kind
fn in_file(error: LedgerError, path: &Path) -> LedgerError {
    let prefix = |message: String| format!("{}: {}", path.display(), message);
    match error {
        LedgerError::Schema(m) => LedgerError::Schema(prefix(m)),
        LedgerError::Validation(m) => LedgerError::Validation(prefix(m)),
        LedgerError::Csv(m) => LedgerError::Csv(prefix(m)),
        other => other,
    }
}
