//! Internal audit log: one row per meaningful operation.

use chrono::Local;
use rusqlite::{Connection, Result};

/// Append an entry to the internal log table. Callers treat failures as
/// non-fatal: a lost audit row must never abort the operation itself.
pub fn audit(conn: &Connection, operation: &str, target: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![Local::now().to_rfc3339(), operation, target, message],
    )?;
    Ok(())
}
