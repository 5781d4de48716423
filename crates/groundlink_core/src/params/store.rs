//! SQLite-backed parameter snapshots.
//!
//! # Responsibility
//! - Save the full parameter cache as one numbered snapshot.
//! - Reload the latest or a specific snapshot.
//!
//! # Invariants
//! - A snapshot is written in one transaction; partial snapshots never exist.
//! - Snapshot ids increase monotonically.

use super::ParamCache;
use crate::db::{open_db, open_db_in_memory, DbResult};
use log::info;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Default snapshot database file name inside the log directory.
pub const PARAM_DB_FILE_NAME: &str = "params.sqlite3";

/// Snapshot header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSnapshot {
    pub id: i64,
    pub created_at_ms: i64,
    pub vehicle_system: u8,
    pub param_count: u32,
}

/// Parameter snapshot repository.
#[derive(Debug)]
pub struct ParamStore {
    conn: Connection,
}

impl ParamStore {
    /// Wraps a connection that already has migrations applied.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        open_db(path).map(Self::new)
    }

    pub fn open_in_memory() -> DbResult<Self> {
        open_db_in_memory().map(Self::new)
    }

    /// Writes every cached parameter as a new snapshot and returns its id.
    pub fn save_snapshot(&mut self, cache: &ParamCache, vehicle_system: u8) -> DbResult<i64> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO param_snapshots (created_at_ms, vehicle_system, param_count)
             VALUES (?1, ?2, ?3);",
            params![now_epoch_ms(), vehicle_system, cache.len() as i64],
        )?;
        let snapshot_id = tx.last_insert_rowid();
        {
            let mut insert = tx.prepare(
                "INSERT INTO param_values (snapshot_id, name, value) VALUES (?1, ?2, ?3);",
            )?;
            for (name, value) in cache.iter() {
                insert.execute(params![snapshot_id, name, value])?;
            }
        }
        tx.commit()?;

        info!(
            "event=param_snapshot_save module=params status=ok snapshot_id={} count={}",
            snapshot_id,
            cache.len()
        );
        Ok(snapshot_id)
    }

    /// Returns the most recent snapshot header, if any.
    pub fn latest_snapshot(&self) -> DbResult<Option<ParamSnapshot>> {
        let snapshot = self
            .conn
            .query_row(
                "SELECT id, created_at_ms, vehicle_system, param_count
                 FROM param_snapshots
                 ORDER BY id DESC
                 LIMIT 1;",
                [],
                |row| {
                    Ok(ParamSnapshot {
                        id: row.get(0)?,
                        created_at_ms: row.get(1)?,
                        vehicle_system: row.get(2)?,
                        param_count: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(snapshot)
    }

    /// Loads the values of one snapshot; `None` when the id is unknown.
    pub fn load_snapshot(&self, snapshot_id: i64) -> DbResult<Option<ParamCache>> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM param_snapshots WHERE id = ?1);",
            [snapshot_id],
            |row| row.get(0),
        )?;
        if !exists {
            return Ok(None);
        }

        let mut stmt = self
            .conn
            .prepare("SELECT name, value FROM param_values WHERE snapshot_id = ?1;")?;
        let rows = stmt.query_map([snapshot_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
        })?;
        let cache = rows.collect::<Result<ParamCache, _>>()?;
        Ok(Some(cache))
    }

    /// Loads the most recent snapshot values.
    pub fn load_latest(&self) -> DbResult<Option<ParamCache>> {
        match self.latest_snapshot()? {
            Some(snapshot) => self.load_snapshot(snapshot.id),
            None => Ok(None),
        }
    }

    pub fn snapshot_count(&self) -> DbResult<u64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM param_snapshots;", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
