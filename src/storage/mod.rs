//! Storage layer for storebooks
//!
//! The in-memory `LedgerStore` owns all ledgers for a session. Durable state
//! lives in CSV snapshots under the data directory, written atomically.

pub mod file_io;
pub mod snapshots;
pub mod store;

pub use file_io::{read_json, stage_file, write_atomic, write_json_atomic, StagedFile};
pub use snapshots::SnapshotWorkspace;
pub use store::LedgerStore;
