//! Audit logging for ledger changes
//!
//! Records ledger creation, cell edits and table imports in an append-only
//! JSONL file. The log is optional; a `LedgerStore` without a logger attached
//! simply skips it.
//!
//! - `AuditEntry`: one operation with its location and before/after values.
//! - `AuditLogger`: appends entries to the log file and reads them back.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
