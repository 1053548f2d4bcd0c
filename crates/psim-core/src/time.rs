//! Simulation time model.
//!
//! Time is a monotonically increasing [`Tick`] counter.  One tick is a
//! 15-minute slot; a simulated day is [`TICKS_PER_DAY`] ticks.  Life-pattern
//! context is looked up by `slot = tick % 96`, so runs longer than a day
//! simply repeat the daily schedule.

use std::fmt;

/// Slots in one simulated day (24 h at 15-minute resolution).
pub const TICKS_PER_DAY: u64 = 96;

/// Default tick length in seconds.
pub const DEFAULT_TICK_SECS: u32 = 900;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Position of this tick inside the daily schedule, `0..96`.
    #[inline]
    pub fn slot(self) -> usize {
        (self.0 % TICKS_PER_DAY) as usize
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current tick and renders it as a time of day.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many simulated seconds one tick represents.  Default: 900.
    pub tick_duration_secs: u32,
    /// The current tick: advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_duration_secs: u32) -> Self {
        Self { tick_duration_secs, current_tick: Tick::ZERO }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick + 1;
    }

    /// `"HH:MM"` label of `tick` within its day.
    pub fn label(&self, tick: Tick) -> String {
        let secs = tick.0 * self.tick_duration_secs as u64;
        let hours = (secs % 86_400) / 3_600;
        let minutes = (secs % 3_600) / 60;
        format!("{hours:02}:{minutes:02}")
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.current_tick, self.label(self.current_tick))
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Total ticks to simulate.  One day is 96.
    pub total_ticks: u64,

    /// Seconds per tick.  The engine only accepts [`DEFAULT_TICK_SECS`],
    /// the width of one context slot.
    pub tick_duration_secs: u32,

    /// Master RNG seed.  The same seed always produces identical logs.
    pub seed: u64,

    /// Worker thread count for the `parallel` feature.  `None` uses Rayon's
    /// global pool.
    pub num_threads: Option<usize>,

    /// Emit a per-agent snapshot every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_ticks:             TICKS_PER_DAY,
            tick_duration_secs:      DEFAULT_TICK_SECS,
            seed:                    42,
            num_threads:             None,
            snapshot_interval_ticks: 0,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_secs)
    }
}
