//! Income CLI commands
//!
//! Daily income cells are edited one at a time; each edit is saved straight
//! back to the month's snapshot.

use clap::Subcommand;

use crate::config::{LedgerPaths, Settings};
use crate::display::format_income_grid;
use crate::error::LedgerResult;
use crate::models::MonthLedger;

use super::{parse_amount, parse_income_category, parse_period, Session};

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Overwrite one day's value for an income category
    Set {
        /// Day of the month (1-31)
        day: u32,

        /// Income category (e.g. "Taxable", "Fuel Gallons", "lotto")
        category: String,

        /// Amount (e.g. "1250.40"); gallons for Fuel Gallons
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Ledger period (e.g. "2024-03" or "March 2024"); defaults to this month
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Show the days of a month with income recorded
    Show {
        #[arg(short, long)]
        period: Option<String>,
    },
}

/// Handle an income command
pub fn handle_income_command(
    paths: LedgerPaths,
    settings: Settings,
    cmd: IncomeCommands,
) -> LedgerResult<()> {
    match cmd {
        IncomeCommands::Set {
            day,
            category,
            value,
            period,
        } => {
            let period = parse_period(period.as_deref())?;
            let category = parse_income_category(&category)?;
            let value = parse_amount(&value)?;

            let mut session = Session::for_period(paths, settings, period)?;
            let stored = session
                .store
                .set_income_cell(period, day, category, value)?;
            session.save(period)?;

            println!(
                "Set {} for {} to {}",
                category,
                period.date_label(day),
                stored
            );
        }

        IncomeCommands::Show { period } => {
            let period = parse_period(period.as_deref())?;
            let session = Session::for_period(paths, settings, period)?;
            let blank = MonthLedger::new(period);
            let ledger = session.store.get(period).unwrap_or(&blank);

            println!("{}", format_income_grid(ledger, session.currency()));
        }
    }

    Ok(())
}
