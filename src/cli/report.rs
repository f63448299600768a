//! Month and year report commands

use std::io::stdout;

use chrono::Datelike;

use crate::config::{LedgerPaths, Settings};
use crate::display::{format_month_summary, format_year_summary};
use crate::error::LedgerResult;
use crate::export::{export_report_json, export_report_yaml};
use crate::services::{aggregate_month, aggregate_year_of, AggregationResult};

use super::{parse_period, OutputFormat, Session};

/// Show a month's aggregation
pub fn handle_month_command(
    paths: LedgerPaths,
    settings: Settings,
    period: Option<String>,
    format: OutputFormat,
) -> LedgerResult<()> {
    let period = parse_period(period.as_deref())?;
    let session = Session::for_period(paths, settings, period)?;

    let result = match session.store.get(period) {
        Some(ledger) => aggregate_month(ledger),
        None => AggregationResult::zero(period),
    };

    match format {
        OutputFormat::Table => print!("{}", format_month_summary(&result, session.currency())),
        OutputFormat::Json => export_report_json(&result, &mut stdout().lock(), true)?,
        OutputFormat::Yaml => export_report_yaml(&result, &mut stdout().lock())?,
    }

    Ok(())
}

/// Show a year's roll-up
///
/// Without an explicit year, uses `default_year` from settings, then the
/// current year.
pub fn handle_year_command(
    paths: LedgerPaths,
    settings: Settings,
    year: Option<i32>,
    format: OutputFormat,
) -> LedgerResult<()> {
    let year = year
        .or(settings.default_year)
        .unwrap_or_else(|| chrono::Local::now().year());
    let session = Session::for_year(paths, settings, year)?;
    let result = aggregate_year_of(&session.store, year);

    match format {
        OutputFormat::Table => print!("{}", format_year_summary(&result, session.currency())),
        OutputFormat::Json => export_report_json(&result, &mut stdout().lock(), true)?,
        OutputFormat::Yaml => export_report_yaml(&result, &mut stdout().lock())?,
    }

    Ok(())
}
