//! The `OutputWriter` trait implemented by all backend writers.

use crate::{ActivityCountRow, AgentSnapshotRow, OutputResult, TickLogRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors surface to the caller of [`SimOutputObserver`][crate::SimOutputObserver]
/// through its `take_error`, since observer hooks cannot return them.
pub trait OutputWriter {
    /// Write one macro-log row.
    fn write_tick(&mut self, row: &TickLogRow) -> OutputResult<()>;

    /// Write a batch of per-agent snapshots.
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    /// Write the final per-activity selection totals.
    fn write_activity_counts(&mut self, rows: &[ActivityCountRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
