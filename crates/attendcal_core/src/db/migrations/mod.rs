//! Ordered schema steps for the attendance store.
//!
//! The store's schema version lives in `PRAGMA user_version`. Steps only move
//! forward and all pending ones commit together or not at all.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

struct SchemaStep {
    version: u32,
    sql: &'static str,
}

/// Append only; versions strictly increase.
const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    sql: include_str!("0001_attendance_records.sql"),
}];

/// Schema version this build writes.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Brings `conn` up to [`latest_version`].
///
/// # Errors
/// - `SchemaTooNew` when the file is ahead of this build.
/// - `Sqlite` when a step fails; nothing from the batch is kept.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = read_schema_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }

    let pending: Vec<&SchemaStep> = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > found)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in &pending {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        debug!("event=db_migrate_step module=db status=ok version={}", step.version);
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={found} to_version={supported}");
    Ok(())
}

fn read_schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}
