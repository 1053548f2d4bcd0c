//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use psim_agent::Population;
use psim_catalog::ActivityCatalog;
use psim_core::Tick;
use psim_engine::{SimObserver, TickRecord};

use crate::row::{ActivityCountRow, AgentSnapshotRow, TickLogRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes the macro log, agent snapshots and final
/// activity totals to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:       W,
    activity_ids: Vec<String>,
    last_counts:  Vec<u64>,
    last_error:   Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            activity_ids: Vec::new(),
            last_counts:  Vec::new(),
            last_error:   None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_sim_start(&mut self, catalog: &ActivityCatalog) {
        self.activity_ids = catalog.activities().iter().map(|a| a.id.clone()).collect();
        self.last_counts = vec![0; self.activity_ids.len()];
    }

    fn on_tick_end(&mut self, record: &TickRecord) {
        self.last_counts.clone_from(&record.activity_counts);
        let result = self.writer.write_tick(&TickLogRow::from(record));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, population: &Population) {
        let rows = AgentSnapshotRow::collect(tick, population);
        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick, population: &Population) {
        // Final state for per-agent inspection.
        self.on_snapshot(final_tick, population);

        let rows: Vec<ActivityCountRow> = self
            .activity_ids
            .iter()
            .zip(&self.last_counts)
            .map(|(id, &count)| ActivityCountRow { activity_id: id.clone(), count })
            .collect();
        let result = self.writer.write_activity_counts(&rows);
        self.store_err(result);

        let result = self.writer.finish();
        self.store_err(result);
    }
}
