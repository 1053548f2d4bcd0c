//! Plain data row types written by output backends.

use psim_agent::Population;
use psim_core::{LifePattern, MediaGroup, Tick};
use psim_engine::TickRecord;

/// One line of the macro log.
#[derive(Debug, Clone, PartialEq)]
pub struct TickLogRow {
    pub tick:           u64,
    pub time:           String,
    pub total_revenue:  f64,
    pub avg_stress:     f64,
    pub avg_dopamine:   f64,
    pub avg_anxiety:    f64,
    /// Indexed by `LifePattern::index`; `None` where the pattern has no agents.
    pub pattern_stress: [Option<f64>; LifePattern::COUNT],
    pub active_users:   u64,
    pub actions:        u64,
    /// Indexed by `MediaGroup::index`.
    pub viral:          [f64; MediaGroup::COUNT],
    /// Event markers joined with `"; "`.
    pub events:         String,
}

impl From<&TickRecord> for TickLogRow {
    fn from(r: &TickRecord) -> Self {
        Self {
            tick:           r.tick.0,
            time:           r.time.clone(),
            total_revenue:  r.total_revenue,
            avg_stress:     r.avg_stress,
            avg_dopamine:   r.avg_dopamine,
            avg_anxiety:    r.avg_anxiety,
            pattern_stress: r.pattern_stress,
            active_users:   r.active_users as u64,
            actions:        r.actions,
            viral:          r.viral,
            events:         r.events.join("; "),
        }
    }
}

/// One agent's dynamic state at a given tick.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id:      u32,
    pub tick:          u64,
    pub life_pattern:  &'static str,
    pub wallet:        f64,
    pub stress:        f64,
    pub dopamine:      f64,
    pub anxiety:       f64,
    /// `None` if the agent has not acted yet.
    pub current_media: Option<&'static str>,
    pub gacha_pity:    u32,
    pub fail_streak:   u32,
}

impl AgentSnapshotRow {
    /// One row per agent.
    pub fn collect(tick: Tick, pop: &Population) -> Vec<Self> {
        (0..pop.count)
            .map(|i| Self {
                agent_id:      pop.id[i].0,
                tick:          tick.0,
                life_pattern:  pop.life_pattern[i].as_str(),
                wallet:        pop.wallet[i],
                stress:        pop.stress[i],
                dopamine:      pop.dopamine[i],
                anxiety:       pop.anxiety[i],
                current_media: pop.current_media[i].map(MediaGroup::as_str),
                gacha_pity:    pop.gacha_pity[i],
                fail_streak:   pop.fail_streak[i],
            })
            .collect()
    }
}

/// Total selections of one activity over the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCountRow {
    pub activity_id: String,
    pub count:       u64,
}

/// Column names shared by every backend's tick table.
pub(crate) fn tick_log_columns() -> Vec<String> {
    let mut cols: Vec<String> = ["tick", "time", "total_revenue", "avg_stress", "avg_dopamine", "avg_anxiety"]
        .into_iter()
        .map(String::from)
        .collect();
    cols.extend(LifePattern::ALL.iter().map(|p| format!("stress_{}", p.as_str())));
    cols.push("active_users".into());
    cols.push("actions".into());
    cols.extend(MediaGroup::ALL.iter().map(|g| format!("viral_{}", g.as_str().to_ascii_lowercase())));
    cols.push("events".into());
    cols
}
