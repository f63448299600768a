use anyhow::Result;
use clap::{Parser, Subcommand};

use storebooks::cli::{
    handle_audit_command, handle_expense_command, handle_export_command, handle_import_command,
    handle_income_command, handle_month_command, handle_year_command, OutputFormat,
};
use storebooks::config::{paths::LedgerPaths, settings::Settings};
use storebooks::display::format_categories;

#[derive(Parser)]
#[command(
    name = "storebooks",
    version,
    about = "Daily income and monthly expense ledger for a small store",
    long_about = "storebooks records a store's daily income across twelve fixed \
                  categories and its monthly expenses, and reports monthly and \
                  yearly income, expenses and net profit."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default settings
    Init,

    /// Show paths and settings, or change a setting
    Config {
        /// Setting to change (currency_symbol, audit_log_enabled,
        /// include_total_row, default_year)
        key: Option<String>,

        /// New value
        value: Option<String>,
    },

    /// Daily income commands
    #[command(subcommand)]
    Income(storebooks::cli::IncomeCommands),

    /// Monthly expense commands
    #[command(subcommand)]
    Expense(storebooks::cli::ExpenseCommands),

    /// Show a month's totals
    Month {
        /// Ledger period (e.g. "2024-03"); defaults to this month
        #[arg(short, long)]
        period: Option<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show a year's month-by-month totals
    Year {
        year: Option<i32>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Replace a month's table from CSV
    #[command(subcommand)]
    Import(storebooks::cli::ImportCommands),

    /// Write tables or the yearly summary to CSV
    #[command(subcommand)]
    Export(storebooks::cli::ExportCommands),

    /// List income and expense categories
    Categories,

    /// Show recent audit log entries
    Audit {
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing storebooks at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Record income with 'storebooks income set <day> <category> <value>'.");
            println!("Run 'storebooks categories' to see all categories.");
        }
        Some(Commands::Config { key, value }) => match (key, value) {
            (Some(key), Some(value)) => {
                let mut settings = settings;
                settings.set(&key, &value)?;
                settings.save(&paths)?;
                println!("Set {} = {}", key, value);
            }
            (Some(key), None) => {
                anyhow::bail!("Missing value for '{}'", key);
            }
            _ => {
                println!("storebooks Configuration");
                println!("========================");
                println!("Base directory:   {}", paths.base_dir().display());
                println!("Data directory:   {}", paths.data_dir().display());
                println!("Audit log:        {}", paths.audit_log().display());
                println!();
                println!("Settings:");
                println!("  currency_symbol:   {}", settings.currency_symbol);
                println!("  audit_log_enabled: {}", settings.audit_log_enabled);
                println!("  include_total_row: {}", settings.include_total_row);
                match settings.default_year {
                    Some(year) => println!("  default_year:      {}", year),
                    None => println!("  default_year:      (current year)"),
                }
            }
        },
        Some(Commands::Income(cmd)) => handle_income_command(paths, settings, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(paths, settings, cmd)?,
        Some(Commands::Month { period, format }) => {
            handle_month_command(paths, settings, period, format)?
        }
        Some(Commands::Year { year, format }) => {
            handle_year_command(paths, settings, year, format)?
        }
        Some(Commands::Import(cmd)) => handle_import_command(paths, settings, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(paths, settings, cmd)?,
        Some(Commands::Categories) => println!("{}", format_categories()),
        Some(Commands::Audit { limit }) => handle_audit_command(&paths, limit)?,
        None => {
            println!("storebooks - store income and expense ledger");
            println!();
            println!("Run 'storebooks --help' for usage information.");
        }
    }

    Ok(())
}
