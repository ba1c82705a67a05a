//! Shared settings schema.
//!
//! # Responsibility
//! - Create the `shared_settings` table on first open.
//! - Confirm that an existing file has the column layout this build reads.
//!
//! # Invariants
//! - `PRAGMA user_version` equals `SCHEMA_VERSION` after a successful open.
//! - A file stamped with a newer version is never rewritten in place.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Schema version stamped into `PRAGMA user_version`.
pub const SCHEMA_VERSION: u32 = 1;
/// Table holding every namespaced setting.
pub const SETTINGS_TABLE: &str = "shared_settings";
/// Columns the settings repository reads or writes, in declaration order.
pub const SETTINGS_COLUMNS: &[&str] = &["namespace", "key", "value", "updated_at"];

const CREATE_SETTINGS_SQL: &str = include_str!("shared_settings.sql");

/// Creates the settings table on a fresh file and checks its layout.
///
/// # Errors
/// - `SchemaTooNew` when another build already stamped a later version.
/// - `SchemaMismatch` when `shared_settings` lacks an expected column.
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let found = stamped_version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(DbError::SchemaTooNew {
            found,
            supported: SCHEMA_VERSION,
        });
    }

    if found < SCHEMA_VERSION {
        let tx = conn.transaction()?;
        tx.execute_batch(CREATE_SETTINGS_SQL)?;
        tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        tx.commit()?;
        info!(
            "event=db_schema module=db status=created version={}",
            SCHEMA_VERSION
        );
    }

    verify_settings_columns(conn)
}

/// Returns the version stamped into the file, `0` for a fresh file.
pub fn stamped_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?;
    Ok(version)
}

fn verify_settings_columns(conn: &Connection) -> DbResult<()> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let present = stmt
        .query_map([SETTINGS_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    let missing = SETTINGS_COLUMNS
        .iter()
        .filter(|column| !present.iter().any(|name| name == *column))
        .copied()
        .collect::<Vec<_>>();
    if missing.is_empty() {
        return Ok(());
    }

    Err(DbError::SchemaMismatch(format!(
        "{SETTINGS_TABLE} is missing column(s): {}",
        missing.join(", ")
    )))
}
