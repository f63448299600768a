//! storebooks - daily income and monthly expense ledger for a small store
//!
//! Records income per day across twelve fixed categories and expenses per
//! month across twenty-four, then computes monthly and yearly income,
//! expense and net-profit totals.
//!
//! # Architecture
//!
//! - `models`: categories, amounts and the month/year ledgers
//! - `storage`: the in-memory `LedgerStore` and CSV snapshots on disk
//! - `services`: monthly aggregation and the yearly roll-up
//! - `export`: CSV import/export and JSON/YAML reports
//! - `audit`: optional change log
//! - `config`: paths and user settings
//! - `display`, `cli`: terminal presentation
//!
//! # Example
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use storebooks::models::{IncomeCategory, LedgerPeriod, Money};
//! use storebooks::services::aggregate_month;
//! use storebooks::storage::LedgerStore;
//!
//! let march = LedgerPeriod::new(2024, 3).unwrap();
//! let mut store = LedgerStore::new();
//! store.set_income_cell(march, 1, IncomeCategory::Lottery, dec!(1000)).unwrap();
//! store.set_income_cell(march, 1, IncomeCategory::Lotto, dec!(500)).unwrap();
//!
//! let result = aggregate_month(store.get(march).unwrap());
//! assert_eq!(result.included_income_total, Money::from_dollars(75));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
