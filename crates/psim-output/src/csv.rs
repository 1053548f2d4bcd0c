//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `tick_log.csv`
//! - `agent_snapshots.csv`
//! - `activity_counts.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::row::tick_log_columns;
use crate::writer::OutputWriter;
use crate::{ActivityCountRow, AgentSnapshotRow, OutputResult, TickLogRow};

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    ticks:     Writer<File>,
    snapshots: Writer<File>,
    counts:    Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut ticks = Writer::from_path(dir.join("tick_log.csv"))?;
        ticks.write_record(tick_log_columns())?;

        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record([
            "agent_id", "tick", "life_pattern", "wallet", "stress", "dopamine", "anxiety",
            "current_media", "gacha_pity", "fail_streak",
        ])?;

        let mut counts = Writer::from_path(dir.join("activity_counts.csv"))?;
        counts.write_record(["activity_id", "count"])?;

        Ok(Self { ticks, snapshots, counts, finished: false })
    }
}

fn opt(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_tick(&mut self, row: &TickLogRow) -> OutputResult<()> {
        let mut record = vec![
            row.tick.to_string(),
            row.time.clone(),
            row.total_revenue.to_string(),
            row.avg_stress.to_string(),
            row.avg_dopamine.to_string(),
            row.avg_anxiety.to_string(),
        ];
        record.extend(row.pattern_stress.iter().map(|&v| opt(v)));
        record.push(row.active_users.to_string());
        record.push(row.actions.to_string());
        record.extend(row.viral.iter().map(f64::to_string));
        record.push(row.events.clone());
        self.ticks.write_record(&record)?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.life_pattern.to_string(),
                row.wallet.to_string(),
                row.stress.to_string(),
                row.dopamine.to_string(),
                row.anxiety.to_string(),
                row.current_media.unwrap_or("").to_string(),
                row.gacha_pity.to_string(),
                row.fail_streak.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_activity_counts(&mut self, rows: &[ActivityCountRow]) -> OutputResult<()> {
        for row in rows {
            self.counts.write_record(&[row.activity_id.clone(), row.count.to_string()])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.ticks.flush()?;
        self.snapshots.flush()?;
        self.counts.flush()?;
        Ok(())
    }
}
