//! Per-tick macro log.

use psim_core::{LifePattern, MediaGroup, Tick};

/// Aggregate state after one tick.
#[derive(Clone, Debug, PartialEq)]
pub struct TickRecord {
    pub tick:            Tick,
    /// Wall-clock label, `"HH:MM"`.
    pub time:            String,
    /// Revenue accumulated since tick 0.
    pub total_revenue:   f64,
    pub avg_stress:      f64,
    pub avg_dopamine:    f64,
    pub avg_anxiety:     f64,
    /// Mean stress per life pattern; `None` where no agent has the pattern.
    pub pattern_stress:  [Option<f64>; LifePattern::COUNT],
    /// Agents with at least one action this tick.
    pub active_users:    usize,
    /// Selected (agent, activity) pairs this tick.
    pub actions:         u64,
    /// Selections per activity since tick 0, in catalog order.
    pub activity_counts: Vec<u64>,
    pub viral:           [f64; MediaGroup::COUNT],
    /// Human-readable markers for this tick's events.
    pub events:          Vec<String>,
}

/// Ordered sequence of [`TickRecord`]s plus the catalog IDs their
/// per-activity columns refer to.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimLog {
    pub activity_ids: Vec<String>,
    pub records:      Vec<TickRecord>,
}

impl SimLog {
    pub fn new(activity_ids: Vec<String>) -> Self {
        Self { activity_ids, records: Vec::new() }
    }

    pub fn push(&mut self, record: TickRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&TickRecord> {
        self.records.last()
    }

    pub fn total_revenue(&self) -> f64 {
        self.last().map_or(0.0, |r| r.total_revenue)
    }

    /// Sum of `actions` over every tick.
    pub fn total_actions(&self) -> u64 {
        self.records.iter().map(|r| r.actions).sum()
    }

    /// The `k` most-selected activities so far, most popular first.
    /// Equal counts keep catalog order.
    pub fn top_activities(&self, k: usize) -> Vec<(&str, u64)> {
        let Some(last) = self.last() else {
            return Vec::new();
        };
        let mut ranked: Vec<(&str, u64)> = self
            .activity_ids
            .iter()
            .map(String::as_str)
            .zip(last.activity_counts.iter().copied())
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(k);
        ranked
    }

    /// All event markers in tick order.
    pub fn annotations(&self) -> impl Iterator<Item = &str> {
        self.records.iter().flat_map(|r| r.events.iter().map(String::as_str))
    }
}
