//! Keyed storage slots.
//!
//! A slot is one well-known key holding a raw text value plus its
//! modification time. Every view of the same stored document shares the
//! same slot; nobody holds a lock on it.

use super::StoreResult;
use rusqlite::{params, Connection, OptionalExtension};

/// Raw slot contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredValue {
    pub raw: String,
    /// Epoch milliseconds stamped by the writer.
    pub mtime: i64,
}

/// Storage contract for keyed slots.
pub trait SlotStore {
    fn read(&self, key: &str) -> StoreResult<Option<StoredValue>>;
    fn write(&self, key: &str, value: &StoredValue) -> StoreResult<()>;
    /// Removes the slot. Clearing a missing slot is not an error.
    fn clear(&self, key: &str) -> StoreResult<()>;
}

/// SQLite-backed slot store over the `slots` table.
pub struct SqliteSlotStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SlotStore for SqliteSlotStore<'_> {
    fn read(&self, key: &str) -> StoreResult<Option<StoredValue>> {
        let value = self
            .conn
            .query_row(
                "SELECT value, mtime FROM slots WHERE key = ?1;",
                [key],
                |row| {
                    Ok(StoredValue {
                        raw: row.get(0)?,
                        mtime: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &StoredValue) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO slots (key, value, mtime) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, mtime = excluded.mtime;",
            params![key, value.raw, value.mtime],
        )?;
        Ok(())
    }

    fn clear(&self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM slots WHERE key = ?1;", [key])?;
        Ok(())
    }
}
