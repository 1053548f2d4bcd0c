//! Per-agent state transition after actions are chosen.

use psim_agent::Population;
use psim_agent::store::GAUGE_MAX;
use psim_catalog::{CatalogOverlay, SlotContext};
use psim_core::{AgentRng, Big5, MediaGroup};

use crate::gacha::{self, GachaParams, GachaState};

/// Coefficients of the psychological, saturation and learning updates.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DynamicsParams {
    /// Dopamine gained per point of fun consumed.
    pub dopamine_gain:    f64,
    /// Dopamine lost every tick.
    pub dopamine_decay:   f64,
    /// Anxiety gained every tick.
    pub anxiety_drift:    f64,
    /// Anxiety relieved per point of growth consumed.
    pub anxiety_relief:   f64,
    pub boredom_gain:     f64,
    pub boredom_recovery: f64,
    /// Base interest learning rate, scaled by `1 + openness`.
    pub learning_rate:    f64,
}

impl Default for DynamicsParams {
    fn default() -> Self {
        Self {
            dopamine_gain:    0.2,
            dopamine_decay:   2.0,
            anxiety_drift:    0.5,
            anxiety_relief:   0.2,
            boredom_gain:     0.1,
            boredom_recovery: 0.05,
            learning_rate:    0.001,
        }
    }
}

/// What one agent did this tick, as far as the aggregates care.
#[derive(Clone, Copy, Debug, Default)]
pub struct AgentOutcome {
    pub actions:  u32,
    /// Positive costs paid; this is also the agent's revenue contribution.
    pub spent:    f64,
    pub engaged:  [bool; MediaGroup::COUNT],
    /// `Some(win)` if the agent pulled a gacha this tick.
    pub gacha:    Option<bool>,
}

/// Read-only inputs shared by every agent's update.
pub struct Settle<'a> {
    pub overlay:  &'a CatalogOverlay<'a>,
    pub gacha:    &'a GachaParams,
    pub dynamics: &'a DynamicsParams,
}

impl Settle<'_> {
    /// Apply agent `i`'s selected actions (`row`) to its state.
    pub fn agent(
        &self,
        pop:  &mut Population,
        i:    usize,
        row:  &[bool],
        slot: &SlotContext,
        rng:  &mut AgentRng,
    ) -> AgentOutcome {
        let cat = self.overlay.base();
        let d = self.dynamics;
        let mut out = AgentOutcome::default();

        let mut group_actions = [0u32; MediaGroup::COUNT];
        let mut gambled = false;
        let mut stress_delta = 0.0;
        let mut fun = 0.0;
        let mut growth = 0.0;

        for j in row.iter().enumerate().filter(|(_, b)| **b).map(|(j, _)| j) {
            out.actions += 1;
            let group = cat.media_group[j].index();
            group_actions[group] += 1;
            out.engaged[group] = true;
            gambled |= cat.gambling[j];

            if cat.cost[j] > 0.0 {
                out.spent += cat.cost[j];
            }
            stress_delta += cat.stress_cost[j] * slot.stress_mod;

            let mut f = self.overlay.fun_reward[j];
            if cat.ad_supported[j] {
                f *= slot.ad_eff;
            }
            fun += f;
            growth += cat.growth_reward[j];
        }

        if gambled {
            let state = GachaState {
                pity:     &mut pop.gacha_pity[i],
                streak:   &mut pop.fail_streak[i],
                stress:   &mut pop.stress[i],
                dopamine: &mut pop.dopamine[i],
            };
            out.gacha = Some(gacha::pull(self.gacha, state, rng));
        }

        pop.wallet[i] -= out.spent;

        pop.stress[i] = (pop.stress[i] + stress_delta).clamp(0.0, GAUGE_MAX);
        pop.dopamine[i] = (pop.dopamine[i] + d.dopamine_gain * fun - d.dopamine_decay)
            .clamp(0.0, GAUGE_MAX);
        pop.anxiety[i] = (pop.anxiety[i] + d.anxiety_drift - d.anxiety_relief * growth)
            .clamp(0.0, GAUGE_MAX);

        if out.actions > 0 {
            pop.current_media[i] = dominant_group(&group_actions);
        }

        for (g, b) in pop.media_boredom[i].iter_mut().enumerate() {
            let delta = if out.engaged[g] { d.boredom_gain } else { -d.boredom_recovery };
            *b = (*b + delta).clamp(0.0, 1.0);
        }

        if out.actions > 0 {
            let lr = d.learning_rate * (1.0 + pop.big5[i][Big5::OPENNESS]);
            let interests = &mut pop.interests[i];
            for j in row.iter().enumerate().filter(|(_, b)| **b).map(|(j, _)| j) {
                for &k in &cat.tag_slots[j] {
                    interests[k] = (interests[k] + lr).clamp(0.0, 1.0);
                }
            }
        }

        out
    }
}

/// Group with the most actions; the lowest index wins ties.
pub fn dominant_group(counts: &[u32; MediaGroup::COUNT]) -> Option<MediaGroup> {
    let mut best: Option<(usize, u32)> = None;
    for (g, &c) in counts.iter().enumerate() {
        if c > 0 && best.is_none_or(|(_, bc)| c > bc) {
            best = Some((g, c));
        }
    }
    best.and_then(|(g, _)| MediaGroup::from_index(g))
}
