//! In-memory ledger store
//!
//! The single owner of all ledger state for a session. Month ledgers are
//! created on first access and never removed. The store assumes one writer:
//! it holds no locks and is meant to be owned by the presentation layer.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    ExpenseCategory, ExpenseEntry, ExpenseTable, IncomeAmounts, IncomeCategory, IncomeEntry,
    IncomeTable, IncomeValue, LedgerPeriod, Money, MonthLedger, YearLedger, DAYS_PER_LEDGER,
};

/// Owns the ledgers of every (year, month) touched in this session
#[derive(Debug, Default)]
pub struct LedgerStore {
    years: BTreeMap<i32, YearLedger>,
    audit: Option<AuditLogger>,
}

impl LedgerStore {
    /// Create an empty store without an audit log
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that records every accepted change
    pub fn with_audit_log(logger: AuditLogger) -> Self {
        Self {
            years: BTreeMap::new(),
            audit: Some(logger),
        }
    }

    /// Start recording changes from now on
    pub fn attach_audit_log(&mut self, logger: AuditLogger) {
        self.audit = Some(logger);
    }

    /// Get the ledger for a period, creating a zero-filled one if absent
    ///
    /// Repeated calls return the same instance.
    pub fn get_or_create(&mut self, period: LedgerPeriod) -> &mut MonthLedger {
        let (ledger, created) = self
            .years
            .entry(period.year())
            .or_insert_with(|| YearLedger::new(period.year()))
            .get_or_create(period);
        if created {
            log::debug!("Created ledger for {}", period);
        }
        ledger
    }

    /// Look up a ledger without creating it
    pub fn get(&self, period: LedgerPeriod) -> Option<&MonthLedger> {
        self.years
            .get(&period.year())
            .and_then(|year| year.month(period.month()))
    }

    /// Look up a year without creating it
    pub fn year(&self, year: i32) -> Option<&YearLedger> {
        self.years.get(&year)
    }

    /// Every period with a ledger, oldest first
    pub fn periods(&self) -> Vec<LedgerPeriod> {
        self.years
            .values()
            .flat_map(|year| year.months().map(|m| m.period()))
            .collect()
    }

    /// Overwrite one income cell
    ///
    /// Rejected values leave the ledger untouched and never create one. The
    /// audit entry is written before the cell changes, so an audit failure
    /// also leaves the ledger as it was.
    pub fn set_income_cell(
        &mut self,
        period: LedgerPeriod,
        day: u32,
        category: IncomeCategory,
        value: Decimal,
    ) -> LedgerResult<IncomeValue> {
        // Validate against a scratch row first so a rejected edit has no side effects
        let mut scratch = IncomeAmounts::default();
        if let Err(e) = scratch.set(category, value) {
            log::warn!("Rejected {} edit for {} day {}: {}", category, period, day, e);
            return Err(LedgerError::Validation(e.to_string()));
        }
        if IncomeEntry::new(day).is_err() {
            log::warn!("Rejected {} edit for {}: day {} out of range", category, period, day);
            return Err(LedgerError::Validation(format!(
                "Day {} is outside 1..={}",
                day, DAYS_PER_LEDGER
            )));
        }

        let existing = self.get(period);
        let created = existing.is_none();
        let previous = existing
            .and_then(|ledger| ledger.income_entry(day))
            .map(|row| row.amounts.get(category))
            .unwrap_or_else(|| IncomeAmounts::default().get(category));
        let current = scratch.get(category);

        let mut entries = Vec::with_capacity(2);
        if created {
            entries.push(AuditEntry::create(EntityType::MonthLedger, period.key()));
        }
        entries.push(AuditEntry::update(
            EntityType::IncomeCell,
            format!("{}/day-{:02}/{}", period.key(), day, category),
            &previous.to_plain_string(),
            &current.to_plain_string(),
            Some(format!(
                "{} -> {}",
                previous.to_plain_string(),
                current.to_plain_string()
            )),
        ));
        self.audit(&entries)?;

        self.get_or_create(period)
            .set_income_cell(day, category, value)
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        log::debug!(
            "{} day {} {}: {} -> {}",
            period,
            day,
            category,
            previous.to_plain_string(),
            current.to_plain_string()
        );
        Ok(current)
    }

    /// Overwrite one monthly expense amount
    pub fn set_expense_amount(
        &mut self,
        period: LedgerPeriod,
        category: ExpenseCategory,
        value: Decimal,
    ) -> LedgerResult<Money> {
        let mut scratch = ExpenseEntry::new(category);
        if let Err(e) = scratch.set_amount(value) {
            log::warn!("Rejected {} edit for {}: {}", category, period, e);
            return Err(LedgerError::Validation(e.to_string()));
        }

        let existing = self.get(period);
        let created = existing.is_none();
        let previous = existing
            .map(|ledger| ledger.expense(category))
            .unwrap_or_default();
        let current = scratch.amount;

        let mut entries = Vec::with_capacity(2);
        if created {
            entries.push(AuditEntry::create(EntityType::MonthLedger, period.key()));
        }
        entries.push(AuditEntry::update(
            EntityType::ExpenseAmount,
            format!("{}/{}", period.key(), category),
            &previous.to_plain_string(),
            &current.to_plain_string(),
            Some(format!(
                "{} -> {}",
                previous.to_plain_string(),
                current.to_plain_string()
            )),
        ));
        self.audit(&entries)?;

        self.get_or_create(period)
            .set_expense_amount(category, value)
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        log::debug!(
            "{} {}: {} -> {}",
            period,
            category,
            previous.to_plain_string(),
            current.to_plain_string()
        );
        Ok(current)
    }

    /// Replace a month's income rows wholesale
    ///
    /// The table must carry exactly the 12 income columns and days 1..31 in
    /// order. Nothing is changed unless every check passes and the audit
    /// entry is written.
    pub fn replace_income_table(
        &mut self,
        period: LedgerPeriod,
        table: IncomeTable,
    ) -> LedgerResult<()> {
        if let Some(problem) = table.schema_mismatch() {
            log::warn!("Rejected income import for {}: {}", period, problem);
            return Err(LedgerError::Schema(format!(
                "Income table for {}: {}",
                period, problem
            )));
        }
        table.validate_values().map_err(|e| {
            log::warn!("Rejected income import for {}: {}", period, e);
            LedgerError::Validation(e.to_string())
        })?;

        let rows = table.into_rows();
        let row_count = rows.len();

        let mut entries = Vec::with_capacity(2);
        if self.get(period).is_none() {
            entries.push(AuditEntry::create(EntityType::MonthLedger, period.key()));
        }
        entries.push(AuditEntry::import(
            EntityType::IncomeTable,
            format!("{}/income", period.key()),
            format!("{} day rows replaced", row_count),
        ));
        self.audit(&entries)?;

        self.get_or_create(period).replace_income(rows);
        log::info!("Replaced income table for {} ({} rows)", period, row_count);
        Ok(())
    }

    /// Replace a month's expense lines wholesale
    ///
    /// Lines may arrive in any order but each of the 24 categories must
    /// appear exactly once. They are stored in display order.
    pub fn replace_expense_table(
        &mut self,
        period: LedgerPeriod,
        table: ExpenseTable,
    ) -> LedgerResult<()> {
        if let Some(problem) = table.schema_mismatch() {
            log::warn!("Rejected expense import for {}: {}", period, problem);
            return Err(LedgerError::Schema(format!(
                "Expense table for {}: {}",
                period, problem
            )));
        }
        table.validate_values().map_err(|e| {
            log::warn!("Rejected expense import for {}: {}", period, e);
            LedgerError::Validation(e.to_string())
        })?;

        let lines = table.into_display_order();
        let line_count = lines.len();

        let mut entries = Vec::with_capacity(2);
        if self.get(period).is_none() {
            entries.push(AuditEntry::create(EntityType::MonthLedger, period.key()));
        }
        entries.push(AuditEntry::import(
            EntityType::ExpenseTable,
            format!("{}/expenses", period.key()),
            format!("{} expense lines replaced", line_count),
        ));
        self.audit(&entries)?;

        self.get_or_create(period).replace_expenses(lines);
        log::info!("Replaced expense table for {} ({} lines)", period, line_count);
        Ok(())
    }

    fn audit(&self, entries: &[AuditEntry]) -> LedgerResult<()> {
        match &self.audit {
            Some(logger) => logger.log_all(entries),
            None => Ok(()),
        }
    }
}
