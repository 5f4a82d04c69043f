//! Schema ownership
//!
//! Creates the records table and its indexes. Every statement uses
//! `IF NOT EXISTS`, so running it on each start leaves existing data alone.

use std::time::Duration;

use rusqlite::Connection;

/// Table and index definitions
///
/// `created_at` / `updated_at` hold fixed-width RFC 3339 strings written by
/// the store (see `record::encode_timestamp`).
pub const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS key_values (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        key TEXT UNIQUE NOT NULL,
        value TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_key ON key_values(key);
    CREATE INDEX IF NOT EXISTS idx_value ON key_values(value);
"#;

/// Create the table and indexes if they are missing
pub fn init(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA)
}

/// Per-connection settings applied when the pool opens a connection
pub fn configure_connection(conn: &Connection, busy_timeout: Duration) -> rusqlite::Result<()> {
    conn.busy_timeout(busy_timeout)?;
    conn.execute_batch(
        r#"
        PRAGMA journal_mode=WAL;
        PRAGMA synchronous=NORMAL;
        "#,
    )
}
