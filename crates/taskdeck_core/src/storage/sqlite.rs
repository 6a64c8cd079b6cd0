//! SQLite-backed key-value storage.
//!
//! # Responsibility
//! - Persist one payload row per store key in the `kv_stores` table.
//! - Guard against unmigrated or structurally incompatible connections.
//!
//! # Invariants
//! - Construction fails unless the connection is migrated to the latest
//!   schema version and `kv_stores` has the expected columns.
//! - All connection access is serialized behind an internal mutex.

use crate::db::migrations::latest_version;
use crate::storage::{KeyValueStore, StorageError, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;

const KV_TABLE: &str = "kv_stores";
const KV_COLUMNS: &[&str] = &["store_key", "payload", "updated_at"];

/// Key-value store persisting payloads in a migrated SQLite database.
pub struct SqliteKeyValueStore {
    conn: Mutex<Connection>,
}

impl SqliteKeyValueStore {
    /// Wraps a migrated connection after validating its schema.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` does not
    ///   match the latest migration version.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the
    ///   `kv_stores` structure is not the expected one.
    pub fn try_new(conn: Connection) -> StorageResult<Self> {
        validate_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let conn = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;
        let payload = conn
            .query_row(
                "SELECT payload FROM kv_stores WHERE store_key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn set(&self, key: &str, payload: &str) -> StorageResult<()> {
        let conn = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;
        conn.execute(
            "INSERT INTO kv_stores (store_key, payload, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(store_key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![key, payload],
        )?;
        Ok(())
    }
}

fn validate_schema(conn: &Connection) -> StorageResult<()> {
    let expected_version = latest_version();
    let actual_version =
        conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    if actual_version != expected_version {
        return Err(StorageError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let mut stmt = conn.prepare(&format!("PRAGMA table_info({KV_TABLE});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>("name")?);
    }

    if columns.is_empty() {
        return Err(StorageError::MissingRequiredTable(KV_TABLE));
    }
    for &required in KV_COLUMNS {
        if !columns.iter().any(|column| column.as_str() == required) {
            return Err(StorageError::MissingRequiredColumn {
                table: KV_TABLE,
                column: required,
            });
        }
    }

    Ok(())
}
