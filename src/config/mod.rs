//! Configuration module for storebooks
//!
//! - Path resolution for settings, snapshots and the audit log
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::Settings;
