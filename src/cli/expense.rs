//! Expense CLI commands

use clap::Subcommand;

use crate::config::{LedgerPaths, Settings};
use crate::display::format_expenses;
use crate::error::LedgerResult;
use crate::models::MonthLedger;

use super::{parse_amount, parse_expense_category, parse_period, Session};

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Overwrite a month's amount for an expense category
    Set {
        /// Expense category (e.g. "RENT", "pay roll taxes")
        category: String,

        /// Amount (e.g. "2500" or "2,500.00")
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Ledger period; defaults to this month
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Show a month's expenses
    Show {
        #[arg(short, long)]
        period: Option<String>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    paths: LedgerPaths,
    settings: Settings,
    cmd: ExpenseCommands,
) -> LedgerResult<()> {
    match cmd {
        ExpenseCommands::Set {
            category,
            value,
            period,
        } => {
            let period = parse_period(period.as_deref())?;
            let category = parse_expense_category(&category)?;
            let value = parse_amount(&value)?;

            let mut session = Session::for_period(paths, settings, period)?;
            let stored = session.store.set_expense_amount(period, category, value)?;
            session.save(period)?;

            println!(
                "Set {} for {} to {}",
                category,
                period,
                stored.format_with_symbol(session.currency())
            );
        }

        ExpenseCommands::Show { period } => {
            let period = parse_period(period.as_deref())?;
            let session = Session::for_period(paths, settings, period)?;
            let blank = MonthLedger::new(period);
            let ledger = session.store.get(period).unwrap_or(&blank);

            println!("Expenses - {}", period);
            println!("{}", format_expenses(ledger, session.currency()));
        }
    }

    Ok(())
}
