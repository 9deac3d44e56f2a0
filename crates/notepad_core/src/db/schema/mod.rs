//! Baseline schema for the `posts` table.
//!
//! # Responsibility
//! - Create the `posts` table on first open.
//! - Add columns missing from `posts` tables created by older writers.
//! - Refuse databases written by a newer schema than this binary knows.
//!
//! # Invariants
//! - The applied version is mirrored to `PRAGMA user_version`.
//! - Existing rows are never rewritten here.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

const SCHEMA_VERSION: u32 = 1;
const SCHEMA_SQL: &str = include_str!("0001_posts.sql");

/// Columns a `posts` table may predate, with their declared types.
const ADDED_COLUMNS: [(&str, &str); 1] = [("due_on", "TEXT")];

/// Returns the schema version written by this binary.
pub fn latest_version() -> u32 {
    SCHEMA_VERSION
}

/// Creates the baseline schema when the database has none yet and brings an
/// existing `posts` table up to the current column set.
pub fn apply_schema(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;

    if current_version > SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: SCHEMA_VERSION,
        });
    }

    let tx = conn.transaction()?;
    if current_version < SCHEMA_VERSION {
        tx.execute_batch(SCHEMA_SQL)?;
    }
    add_missing_columns(&tx)?;
    if current_version < SCHEMA_VERSION {
        tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    }
    tx.commit()?;

    Ok(())
}

fn add_missing_columns(conn: &Connection) -> DbResult<()> {
    let existing = posts_columns(conn)?;
    if existing.is_empty() {
        return Ok(());
    }

    for (column, column_type) in ADDED_COLUMNS {
        if !existing.iter().any(|name| name == column) {
            conn.execute_batch(&format!(
                "ALTER TABLE posts ADD COLUMN {column} {column_type};"
            ))?;
            info!("event=schema_add_column module=db status=ok table=posts column={column}");
        }
    }
    Ok(())
}

fn posts_columns(conn: &Connection) -> DbResult<Vec<String>> {
    let mut stmt = conn.prepare("PRAGMA table_info(posts);")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns)
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
