//! Schema creation and in-place upgrades.

use rusqlite::Connection;
use tracing::debug;

use crate::error::Result;

/// Current schema version, recorded in the `meta` table.
pub const SCHEMA_VERSION: i64 = 2;

const CREATE_TABLES: &str = r#"
    CREATE TABLE IF NOT EXISTS meta (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT UNIQUE NOT NULL,
        password_hash BLOB NOT NULL,
        is_premium INTEGER DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS notes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL,
        title TEXT,
        content TEXT NOT NULL,
        FOREIGN KEY (user_id) REFERENCES users(id)
    );

    CREATE INDEX IF NOT EXISTS notes_user_id ON notes (user_id);
"#;

/// Columns added after the first schema version: `(table, column, type)`.
const ADDED_COLUMNS: &[(&str, &str, &str)] = &[
    ("users", "created_at", "TEXT"),
    ("notes", "created_at", "TEXT"),
    ("notes", "updated_at", "TEXT"),
];

/// Create missing tables and columns. Existing rows are never touched.
pub fn ensure_schema(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;

    tx.execute_batch(CREATE_TABLES)?;
    for (table, column, column_type) in ADDED_COLUMNS {
        if !column_exists(&tx, table, column)? {
            debug!(table, column, "adding missing column");
            tx.execute_batch(&format!(
                "ALTER TABLE {} ADD COLUMN {} {};",
                table, column, column_type
            ))?;
        }
    }
    tx.execute(
        "INSERT INTO meta (key, value) VALUES ('schema_version', ?1)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        [SCHEMA_VERSION.to_string()],
    )?;

    tx.commit()?;
    Ok(())
}

/// Read the recorded schema version, if any.
pub fn schema_version(conn: &Connection) -> Result<Option<i64>> {
    use rusqlite::OptionalExtension;

    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM meta WHERE key = 'schema_version'",
            [],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value.and_then(|v| v.parse().ok()))
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for name in names {
        if name? == column {
            return Ok(true);
        }
    }
    Ok(false)
}
