//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `tick_log`, `agent_snapshots` and `activity_counts`.

use std::path::Path;

use rusqlite::Connection;

use crate::row::tick_log_columns;
use crate::writer::OutputWriter;
use crate::{ActivityCountRow, AgentSnapshotRow, OutputResult, TickLogRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:        Connection,
    insert_tick: String,
    finished:    bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        // Tick table columns follow the CSV header; numeric except `time`
        // and `events`.
        let cols = tick_log_columns();
        let defs: Vec<String> = cols
            .iter()
            .map(|c| match c.as_str() {
                "tick" => "tick INTEGER PRIMARY KEY".to_string(),
                "time" | "events" => format!("{c} TEXT NOT NULL"),
                "active_users" | "actions" => format!("{c} INTEGER NOT NULL"),
                _ if c.starts_with("stress_") => format!("{c} REAL"),
                _ => format!("{c} REAL NOT NULL"),
            })
            .collect();

        conn.execute_batch(&format!(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS tick_log ({});
             CREATE TABLE IF NOT EXISTS agent_snapshots (
                 agent_id      INTEGER NOT NULL,
                 tick          INTEGER NOT NULL,
                 life_pattern  TEXT    NOT NULL,
                 wallet        REAL    NOT NULL,
                 stress        REAL    NOT NULL,
                 dopamine      REAL    NOT NULL,
                 anxiety       REAL    NOT NULL,
                 current_media TEXT,
                 gacha_pity    INTEGER NOT NULL,
                 fail_streak   INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS activity_counts (
                 activity_id TEXT PRIMARY KEY,
                 count       INTEGER NOT NULL
             );",
            defs.join(", "),
        ))?;

        let placeholders: Vec<String> = (1..=cols.len()).map(|i| format!("?{i}")).collect();
        let insert_tick = format!(
            "INSERT INTO tick_log ({}) VALUES ({})",
            cols.join(", "),
            placeholders.join(", "),
        );

        Ok(Self { conn, insert_tick, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_tick(&mut self, row: &TickLogRow) -> OutputResult<()> {
        let mut values: Vec<rusqlite::types::Value> = vec![
            (row.tick as i64).into(),
            row.time.clone().into(),
            row.total_revenue.into(),
            row.avg_stress.into(),
            row.avg_dopamine.into(),
            row.avg_anxiety.into(),
        ];
        values.extend(row.pattern_stress.iter().map(|&v| rusqlite::types::Value::from(v)));
        values.push((row.active_users as i64).into());
        values.push((row.actions as i64).into());
        values.extend(row.viral.iter().map(|&v| rusqlite::types::Value::from(v)));
        values.push(row.events.clone().into());

        let mut stmt = self.conn.prepare_cached(&self.insert_tick)?;
        stmt.execute(rusqlite::params_from_iter(values))?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO agent_snapshots \
                 (agent_id, tick, life_pattern, wallet, stress, dopamine, anxiety, \
                  current_media, gacha_pity, fail_streak) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.agent_id,
                    row.tick as i64,
                    row.life_pattern,
                    row.wallet,
                    row.stress,
                    row.dopamine,
                    row.anxiety,
                    row.current_media,
                    row.gacha_pity,
                    row.fail_streak,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_activity_counts(&mut self, rows: &[ActivityCountRow]) -> OutputResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT OR REPLACE INTO activity_counts (activity_id, count) VALUES (?1, ?2)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.activity_id, row.count as i64])?;
            }
        }
        tx.commit()?;
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
