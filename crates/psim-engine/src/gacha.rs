//! Randomized reward resolution for gambling-tagged activities.

use psim_agent::store::GAUGE_MAX;
use psim_core::AgentRng;

/// Probabilities and state deltas of one gacha pull.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GachaParams {
    pub base_rate:       f64,
    /// Added to the success probability per accumulated pity point.
    pub pity_step:       f64,
    pub win_stress:      f64,
    pub lose_stress:     f64,
    pub lose_dopamine:   f64,
}

impl Default for GachaParams {
    fn default() -> Self {
        Self {
            base_rate:     0.05,
            pity_step:     0.005,
            win_stress:    -30.0,
            lose_stress:   20.0,
            lose_dopamine: -5.0,
        }
    }
}

impl GachaParams {
    /// Success probability after `pity` consecutive misses, capped at 1.
    #[inline]
    pub fn success_rate(&self, pity: u32) -> f64 {
        (self.base_rate + pity as f64 * self.pity_step).min(1.0)
    }
}

/// Mutable per-agent state touched by a pull.
pub struct GachaState<'a> {
    pub pity:     &'a mut u32,
    pub streak:   &'a mut u32,
    pub stress:   &'a mut f64,
    pub dopamine: &'a mut f64,
}

/// Roll once and apply the outcome.  Returns `true` on a win.
pub fn pull(params: &GachaParams, state: GachaState<'_>, rng: &mut AgentRng) -> bool {
    let win = rng.gen_bool(params.success_rate(*state.pity));
    if win {
        *state.pity = 0;
        *state.streak = 0;
        *state.dopamine = GAUGE_MAX;
        *state.stress = (*state.stress + params.win_stress).clamp(0.0, GAUGE_MAX);
    } else {
        *state.pity += 1;
        *state.streak += 1;
        *state.stress = (*state.stress + params.lose_stress).clamp(0.0, GAUGE_MAX);
        *state.dopamine = (*state.dopamine + params.lose_dopamine).clamp(0.0, GAUGE_MAX);
    }
    win
}
