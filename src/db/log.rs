//! Audit trail stored in the `log` table.

use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, params};
use std::fmt;

/// Operations recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditOp {
    Init,
    Record,
    Del,
    Export,
    Backup,
    Vacuum,
    MigrationApplied,
}

impl AuditOp {
    /// Value stored in `log.operation`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditOp::Init => "init",
            AuditOp::Record => "record",
            AuditOp::Del => "del",
            AuditOp::Export => "export",
            AuditOp::Backup => "backup",
            AuditOp::Vacuum => "vacuum",
            AuditOp::MigrationApplied => "migration_applied",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        [
            AuditOp::Init,
            AuditOp::Record,
            AuditOp::Del,
            AuditOp::Export,
            AuditOp::Backup,
            AuditOp::Vacuum,
            AuditOp::MigrationApplied,
        ]
        .into_iter()
        .find(|op| op.as_str() == s)
    }
}

impl fmt::Display for AuditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Append one row to the audit log.
pub fn ttlog(conn: &Connection, op: AuditOp, target: &str, message: &str) -> AppResult<()> {
    let now = Local::now().to_rfc3339();

    conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?
    .execute(params![now, op.as_str(), target, message])?;

    Ok(())
}

/// Same as [`ttlog`], but a failure only produces a warning: the audit trail
/// never makes the main operation fail.
pub fn ttlog_quiet(conn: &Connection, op: AuditOp, target: &str, message: &str) {
    if let Err(e) = ttlog(conn, op, target, message) {
        log::warn!("failed to write {op} audit row: {e}");
    }
}
