//! Service layer for storebooks
//!
//! Pure computations over the ledgers held by the storage layer: monthly
//! aggregation and the yearly roll-up.

pub mod aggregation;
pub mod rollup;

pub use aggregation::{aggregate_month, AggregationResult, CategoryLine, ExcludedReference};
pub use rollup::{aggregate_year, aggregate_year_of, MonthlyLine, YearlyAggregationResult};
