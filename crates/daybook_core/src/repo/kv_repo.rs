//! Key-value store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide string-keyed JSON blob persistence for all trackers.
//! - Reject connections that are missing schema prerequisites.
//!
//! # Invariants
//! - `put_raw` under an existing key overwrites in place; the row count
//!   is unchanged.
//! - `keys_with_prefix` treats the prefix as a literal string and returns
//!   keys in ascending order.

use crate::db::{migrations::latest_version, DbError};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const KV_TABLE: &str = "kv_entries";

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage adapter error for blob persistence and decoding.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Stored blob under `key` failed to encode/decode as JSON.
    Serde {
        key: String,
        source: serde_json::Error,
    },
    /// Connection has no applied migrations.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serde { key, source } => {
                write!(f, "invalid JSON blob under key `{key}`: {source}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "store connection not migrated: expected schema version {expected_version}, found {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "store is missing required table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "store table `{table}` is missing required column `{column}`")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serde { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String-keyed blob store contract used by the tracker services.
pub trait KvStore {
    /// Reads the raw blob under `key`, if present.
    fn get_raw(&self, key: &str) -> StoreResult<Option<String>>;
    /// Writes `value` under `key`, overwriting in place.
    fn put_raw(&self, key: &str, value: &str) -> StoreResult<()>;
    /// Removes the blob under `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> StoreResult<()>;
    /// Returns all keys starting with the literal `prefix`, ascending.
    fn keys_with_prefix(&self, prefix: &str) -> StoreResult<Vec<String>>;

    /// Reads and decodes the JSON blob under `key`.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        match self.get_raw(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StoreError::Serde {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Encodes `value` as JSON and writes it under `key`.
    fn put_json<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Serde {
            key: key.to_string(),
            source,
        })?;
        self.put_raw(key, &raw)
    }
}

/// SQLite-backed key-value store.
pub struct SqliteKvStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStore<'conn> {
    /// Constructs a store from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Number of stored entries. Mostly useful for diagnostics and tests.
    pub fn len(&self) -> StoreResult<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl KvStore for SqliteKvStore<'_> {
    fn get_raw(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put_raw(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv_entries ORDER BY key ASC;")?;
        let mut rows = stmt.query([])?;
        let mut keys = Vec::new();
        while let Some(row) = rows.next()? {
            let key: String = row.get(0)?;
            // Literal prefix match; SQL LIKE would read `_` as a wildcard.
            if key.starts_with(prefix) {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}

fn ensure_connection_ready(conn: &Connection) -> StoreResult<()> {
    let actual_version: u32 =
        conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version == 0 {
        return Err(StoreError::UninitializedConnection {
            expected_version: latest_version(),
            actual_version,
        });
    }

    if !table_exists(conn, KV_TABLE)? {
        return Err(StoreError::MissingRequiredTable(KV_TABLE));
    }

    for column in ["key", "value", "updated_at"] {
        if !table_has_column(conn, KV_TABLE, column)? {
            return Err(StoreError::MissingRequiredColumn {
                table: KV_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> StoreResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
