//! Import CLI commands
//!
//! Imports replace a month's table wholesale. A file with the wrong columns
//! or a bad value is rejected and the saved snapshot is left as it was.

use std::fs::File;
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::config::{LedgerPaths, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::export::{import_expense_csv, import_income_csv};

use super::{parse_period, Session};

/// Import subcommands
#[derive(Subcommand)]
pub enum ImportCommands {
    /// Replace a month's daily income from a CSV file
    Income {
        /// CSV with a Day or Date column followed by the 12 income categories
        file: PathBuf,

        #[arg(short, long)]
        period: Option<String>,
    },

    /// Replace a month's expenses from an `Expense,Amount` CSV file
    Expenses {
        file: PathBuf,

        #[arg(short, long)]
        period: Option<String>,
    },
}

/// Handle an import command
pub fn handle_import_command(
    paths: LedgerPaths,
    settings: Settings,
    cmd: ImportCommands,
) -> LedgerResult<()> {
    match cmd {
        ImportCommands::Income { file, period } => {
            let period = parse_period(period.as_deref())?;
            let mut session = Session::for_period(paths, settings, period)?;

            import_income_csv(&mut session.store, period, open(&file)?)?;
            session.save(period)?;

            println!("Imported income for {} from {}", period, file.display());
        }

        ImportCommands::Expenses { file, period } => {
            let period = parse_period(period.as_deref())?;
            let mut session = Session::for_period(paths, settings, period)?;

            import_expense_csv(&mut session.store, period, open(&file)?)?;
            session.save(period)?;

            println!("Imported expenses for {} from {}", period, file.display());
        }
    }

    Ok(())
}

fn open(path: &Path) -> LedgerResult<File> {
    File::open(path)
        .map_err(|e| LedgerError::Import(format!("Cannot read {}: {}", path.display(), e)))
}
