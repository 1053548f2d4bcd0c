//! Simulation observer trait for progress reporting and data collection.

use psim_agent::Population;
use psim_catalog::ActivityCatalog;
use psim_core::Tick;

use crate::TickRecord;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait SimObserver {
    /// Called once before tick 0 is processed.
    fn on_sim_start(&mut self, _catalog: &ActivityCatalog) {}

    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with the record just appended to the log.
    fn on_tick_end(&mut self, _record: &TickRecord) {}

    /// Called every `config.snapshot_interval_ticks` ticks with the full
    /// per-agent state.
    fn on_snapshot(&mut self, _tick: Tick, _population: &Population) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick, _population: &Population) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Logs a one-line summary through `tracing` every `interval` ticks.
pub struct ProgressLogger {
    pub interval: u64,
}

impl Default for ProgressLogger {
    /// Every 16 ticks, i.e. every four simulated hours.
    fn default() -> Self {
        Self { interval: 16 }
    }
}

impl SimObserver for ProgressLogger {
    fn on_tick_end(&mut self, r: &TickRecord) {
        if self.interval > 0 && r.tick.0.is_multiple_of(self.interval) {
            tracing::info!(
                time    = %r.time,
                revenue = r.total_revenue,
                stress  = format_args!("{:.1}", r.avg_stress),
                active  = r.active_users,
                "progress"
            );
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick, population: &Population) {
        tracing::info!(
            ticks    = final_tick.0,
            agents   = population.count,
            stress   = format_args!("{:.1}", population.mean_stress()),
            dopamine = format_args!("{:.1}", population.mean_dopamine()),
            "simulation complete"
        );
    }
}
