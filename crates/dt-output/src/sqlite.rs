//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! one `lifecycle_events` table.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{LifecycleRow, OutputResult};

/// Writes lifecycle markers to an SQLite database.
pub struct SqliteWriter {
    conn: Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS lifecycle_events (
                 tick      INTEGER NOT NULL,
                 entity_id INTEGER NOT NULL,
                 kind      TEXT NOT NULL,
                 message   TEXT
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_event(&mut self, row: &LifecycleRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO lifecycle_events (tick, entity_id, kind, message) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![row.tick, row.entity_id, row.kind.as_str(), row.message],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
