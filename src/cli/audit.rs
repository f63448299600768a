//! Audit log CLI command

use crate::audit::AuditLogger;
use crate::config::LedgerPaths;
use crate::error::LedgerResult;

/// Print the most recent audit entries, oldest first
pub fn handle_audit_command(paths: &LedgerPaths, limit: usize) -> LedgerResult<()> {
    let logger = AuditLogger::new(paths.audit_log());
    let entries = logger.read_recent(limit)?;

    if entries.is_empty() {
        println!("No audit entries. Enable with: storebooks config audit_log_enabled true");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
