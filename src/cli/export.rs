//! Export CLI commands

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::Datelike;
use clap::Subcommand;

use crate::config::{LedgerPaths, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::export::{write_expense_csv, write_income_csv, write_year_summary_csv};
use crate::models::MonthLedger;
use crate::services::aggregate_year_of;

use super::{parse_period, Session};

/// Export subcommands
#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export a month's daily income table
    Income {
        /// Output file path
        file: PathBuf,

        #[arg(short, long)]
        period: Option<String>,
    },

    /// Export a month's expenses
    Expenses {
        file: PathBuf,

        #[arg(short, long)]
        period: Option<String>,
    },

    /// Export the month-by-month summary of a year
    Year {
        file: PathBuf,

        /// Year to export (defaults to the configured or current year)
        #[arg(short, long)]
        year: Option<i32>,
    },
}

/// Handle an export command
pub fn handle_export_command(
    paths: LedgerPaths,
    settings: Settings,
    cmd: ExportCommands,
) -> LedgerResult<()> {
    match cmd {
        ExportCommands::Income { file, period } => {
            let period = parse_period(period.as_deref())?;
            let include_total = settings.include_total_row;
            let session = Session::for_period(paths, settings, period)?;
            let blank = MonthLedger::new(period);
            let ledger = session.store.get(period).unwrap_or(&blank);

            write_income_csv(ledger, create(&file)?, include_total)?;
            log::info!("Exported income for {} to {}", period, file.display());
            println!("Exported income for {} to {}", period, file.display());
        }

        ExportCommands::Expenses { file, period } => {
            let period = parse_period(period.as_deref())?;
            let session = Session::for_period(paths, settings, period)?;
            let blank = MonthLedger::new(period);
            let ledger = session.store.get(period).unwrap_or(&blank);

            write_expense_csv(ledger, create(&file)?)?;
            log::info!("Exported expenses for {} to {}", period, file.display());
            println!("Exported expenses for {} to {}", period, file.display());
        }

        ExportCommands::Year { file, year } => {
            let year = year
                .or(settings.default_year)
                .unwrap_or_else(|| chrono::Local::now().year());
            let session = Session::for_year(paths, settings, year)?;
            let result = aggregate_year_of(&session.store, year);

            write_year_summary_csv(&result, create(&file)?)?;
            log::info!("Exported {} summary to {}", year, file.display());
            println!("Exported {} summary to {}", year, file.display());
        }
    }

    Ok(())
}

fn create(path: &Path) -> LedgerResult<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| LedgerError::Export(format!("Cannot write {}: {}", path.display(), e)))
}
