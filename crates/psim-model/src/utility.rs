//! Per-cell desirability scores.
//!
//! For agent `i` and activity `j`:
//!
//! ```text
//! U = (fun·w_fun + growth·w_growth)·(1 + interest_match)
//!     − difficulty_penalty + inertia + viral + rage_bet
//!     − saturation − cost_pain + noise
//! ```
//!
//! `fun` is the effective fun reward after event overrides and, for
//! ad-supported activities, the slot's ad-efficiency multiplier.  Activities
//! disabled by an outage score `-∞`, which no allocator ever selects.

use psim_agent::{AgentRngs, Population};
use psim_core::{AgentRng, Big5, MediaGroup};
use rand_distr::{Normal, NormalError};

use crate::{TickContext, UtilityMatrix};

/// Weights and constants of the utility function.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UtilityParams {
    /// Bounds on the fun weight `(100 - dopamine) / 100`.
    pub fun_weight_min: f64,
    pub fun_weight_max: f64,

    /// Growth weight is `1 + anxiety / anxiety_growth_divisor`.
    pub anxiety_growth_divisor: f64,

    /// Penalty per point of difficulty above the agent's intelligence.
    pub difficulty_penalty: f64,

    /// Bonus for staying in the agent's current media group.
    pub inertia_bonus: f64,

    /// Penalty per point of boredom with the activity's group.
    pub saturation_penalty: f64,
    /// Extra factor on the saturation penalty for short-form video.
    pub video_saturation_factor: f64,

    /// Viral score is multiplied by `extraversion * viral_weight`.
    pub viral_weight: f64,

    /// Gambling pull per consecutive failed pull, scaled by gambler's fallacy.
    pub rage_bet_weight: f64,

    /// Money-to-pain conversion for the activity's currency cost.
    pub money_pain: f64,

    /// Standard deviation of the per-cell Gaussian noise.
    pub noise_sd: f64,
}

impl Default for UtilityParams {
    fn default() -> Self {
        Self {
            fun_weight_min:          0.1,
            fun_weight_max:          2.0,
            anxiety_growth_divisor:  20.0,
            difficulty_penalty:      1.5,
            inertia_bonus:           10.0,
            saturation_penalty:      2.0,
            video_saturation_factor: 0.5,
            viral_weight:            5.0,
            rage_bet_weight:         50.0,
            money_pain:              0.001,
            noise_sd:                2.0,
        }
    }
}

/// Scores every `(agent, activity)` pair for one tick.
#[derive(Clone, Debug)]
pub struct UtilityModel {
    params: UtilityParams,
    noise:  Normal<f64>,
}

impl UtilityModel {
    /// Fails when `noise_sd` is negative or not finite.
    pub fn new(params: UtilityParams) -> Result<Self, NormalError> {
        if params.noise_sd < 0.0 {
            return Err(NormalError::BadVariance);
        }
        let noise = Normal::new(0.0, params.noise_sd)?;
        Ok(Self { params, noise })
    }

    pub fn params(&self) -> &UtilityParams {
        &self.params
    }

    /// Build the `[agents × activities]` utility matrix.
    ///
    /// Draws exactly one noise sample per cell from the row's agent RNG, so
    /// the result does not depend on how rows are scheduled.
    pub fn score(
        &self,
        pop:  &Population,
        ctx:  &TickContext<'_>,
        rngs: &mut AgentRngs,
    ) -> UtilityMatrix {
        let m = ctx.catalog.base().len();
        let mut out = UtilityMatrix::new(pop.count, m, 0.0);
        if m == 0 {
            return out;
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            out.as_mut_slice()
                .par_chunks_mut(m)
                .zip(rngs.inner.par_iter_mut())
                .enumerate()
                .for_each(|(i, (row, rng))| self.score_row(pop, i, ctx, rng, row));
        }

        #[cfg(not(feature = "parallel"))]
        {
            out.as_mut_slice()
                .chunks_mut(m)
                .zip(rngs.inner.iter_mut())
                .enumerate()
                .for_each(|(i, (row, rng))| self.score_row(pop, i, ctx, rng, row));
        }

        out
    }

    /// Fill `row` with agent `i`'s scores.
    pub fn score_row(
        &self,
        pop: &Population,
        i:   usize,
        ctx: &TickContext<'_>,
        rng: &mut AgentRng,
        row: &mut [f64],
    ) {
        let p = &self.params;
        let overlay = ctx.catalog;
        let cat = overlay.base();
        let slot = &ctx.slot[pop.life_pattern[i].index()];

        let stress = pop.stress[i];
        let w_fun = fun_weight(p, pop.dopamine[i]);
        let w_growth = 1.0 + pop.anxiety[i] / p.anxiety_growth_divisor;
        let intel = pop.intelligence[i];
        let extraversion = pop.big5[i][Big5::EXTRAVERSION];
        let interests = &pop.interests[i];
        let boredom = &pop.media_boredom[i];
        let current = pop.current_media[i];
        let rage = pop.fail_streak[i] as f64 * pop.gambler_fallacy[i] * p.rage_bet_weight;
        let stress_scale = slot.stress_mod * (1.0 + stress / 100.0);
        let loss_aversion = pop.loss_aversion[i];

        for (j, cell) in row.iter_mut().enumerate() {
            let group = cat.media_group[j];

            let mut fun = overlay.fun_reward[j];
            if cat.ad_supported[j] {
                fun *= slot.ad_eff;
            }
            let interest_match: f64 = cat.tag_slots[j].iter().map(|&k| interests[k]).sum();
            let base = (fun * w_fun + cat.growth_reward[j] * w_growth) * (1.0 + interest_match);

            let difficulty = (overlay.difficulty[j] - intel).max(0.0) * p.difficulty_penalty;
            let inertia = if current == Some(group) { p.inertia_bonus } else { 0.0 };

            let mut saturation = boredom[group.index()] * p.saturation_penalty;
            if group == MediaGroup::Video {
                saturation *= p.video_saturation_factor;
            }

            let viral = match ctx.viral {
                Some(v) => v[group.index()] * extraversion * p.viral_weight,
                None => 0.0,
            };
            let rage_bet = if cat.gambling[j] { rage } else { 0.0 };

            let cost_pain = (cat.stress_cost[j] * stress_scale + cat.cost[j] * p.money_pain)
                * loss_aversion;

            let noise = rng.sample(&self.noise);

            *cell = if overlay.disabled[j] {
                f64::NEG_INFINITY
            } else {
                base - difficulty + inertia + viral + rage_bet - saturation - cost_pain + noise
            };
        }
    }
}

/// Fun weight an agent with `dopamine` would receive under `params`.
pub fn fun_weight(params: &UtilityParams, dopamine: f64) -> f64 {
    ((100.0 - dopamine) / 100.0).clamp(params.fun_weight_min, params.fun_weight_max)
}
