//! SQLite-backed key/value store for save slots.
//!
//! RULE: Only store.rs talks to the database.
//! The engine builds keys and JSON values; the store only moves strings.

use crate::error::HotelResult;
use rusqlite::{params, Connection, OptionalExtension};

pub struct SaveStore {
    conn: Connection,
}

impl SaveStore {
    /// Open (or create) the save database at `path`.
    pub fn open(path: &str) -> HotelResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> HotelResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> HotelResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_save_slots.sql"))?;
        Ok(())
    }

    // ── Slots ──────────────────────────────────────────────────

    /// Insert or overwrite the value under `key`.
    pub fn put(&self, key: &str, value: &str, updated_at: i64) -> HotelResult<()> {
        self.conn.execute(
            "INSERT INTO save_slot (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                            updated_at = excluded.updated_at",
            params![key, value, updated_at],
        )?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> HotelResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM save_slot WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Delete `key`. Returns whether a row existed.
    pub fn remove(&self, key: &str) -> HotelResult<bool> {
        let n = self
            .conn
            .execute("DELETE FROM save_slot WHERE key = ?1", params![key])?;
        Ok(n > 0)
    }

    /// All `(key, value)` pairs whose key starts with `prefix`, in key order.
    pub fn entries_with_prefix(&self, prefix: &str) -> HotelResult<Vec<(String, String)>> {
        // substr() instead of LIKE: '_' in the prefix is a LIKE wildcard.
        let mut stmt = self.conn.prepare(
            "SELECT key, value FROM save_slot
             WHERE substr(key, 1, ?2) = ?1
             ORDER BY key ASC",
        )?;
        let entries = stmt
            .query_map(params![prefix, prefix.chars().count() as i64], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    // ── Test / summary helpers ─────────────────────────────────

    pub fn slot_count(&self) -> HotelResult<i64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM save_slot", [], |row| row.get(0))?;
        Ok(count)
    }
}
