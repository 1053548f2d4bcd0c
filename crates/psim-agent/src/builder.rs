//! Synthetic population generation.
//!
//! # Usage
//!
//! ```rust
//! use psim_agent::PopulationBuilder;
//!
//! let (pop, rngs) = PopulationBuilder::new(1_000, /*seed=*/ 42).build().unwrap();
//! assert_eq!(pop.count, 1_000);
//! assert_eq!(rngs.len(), 1_000);
//! ```
//!
//! Every trait is sampled independently and then clamped to its bound.  Two
//! traits are shifted by personality: attention capacity grows with
//! conscientiousness and gambler's-fallacy susceptibility with neuroticism.

use rand::distributions::{Distribution, WeightedIndex};
use rand_distr::{LogNormal, Normal};

use psim_core::{Big5, LifePattern, SimRng};

use crate::{AgentError, AgentResult, AgentRngs, Population};

/// Distribution parameters for [`generate`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenesisParams {
    pub big5_mean:              f64,
    pub big5_sd:                f64,
    pub loss_aversion_mean:     f64,
    pub loss_aversion_sd:       f64,
    pub intelligence_mean:      f64,
    pub intelligence_sd:        f64,
    pub attention_mean:         f64,
    pub attention_sd:           f64,
    /// Added capacity per unit of conscientiousness.
    pub attention_per_conscientiousness: f64,
    pub gambler_mean:           f64,
    pub gambler_sd:             f64,
    /// Added susceptibility per unit of neuroticism.
    pub gambler_per_neuroticism: f64,
    /// Log-space mean / sigma of the initial wallet.
    pub wallet_mu:              f64,
    pub wallet_sigma:           f64,
    /// Fraction of interest slots zeroed out.
    pub interest_sparsity:      f64,
    pub initial_dopamine:       f64,
    /// Initial anxiety is `Uniform(0, anxiety_max)`.
    pub anxiety_max:            f64,
    /// Extra initial anxiety for students.
    pub student_anxiety_bonus:  f64,
    /// Population share per life pattern, in `LifePattern::ALL` order.
    pub pattern_weights:        [f64; LifePattern::COUNT],
}

impl Default for GenesisParams {
    fn default() -> Self {
        Self {
            big5_mean:              0.5,
            big5_sd:                0.15,
            loss_aversion_mean:     2.25,
            loss_aversion_sd:       0.5,
            intelligence_mean:      50.0,
            intelligence_sd:        15.0,
            attention_mean:         100.0,
            attention_sd:           10.0,
            attention_per_conscientiousness: 20.0,
            gambler_mean:           1.0,
            gambler_sd:             0.3,
            gambler_per_neuroticism: 0.5,
            wallet_mu:              10.0,
            wallet_sigma:           1.0,
            interest_sparsity:      0.7,
            initial_dopamine:       50.0,
            anxiety_max:            10.0,
            student_anxiety_bonus:  5.0,
            pattern_weights:        LifePattern::WEIGHTS,
        }
    }
}

/// Generate `n` agents using `rng`.
///
/// Deterministic for a given RNG state.  Returns
/// [`AgentError::EmptyPopulation`] for `n == 0`.
pub fn generate(n: usize, params: &GenesisParams, rng: &mut SimRng) -> AgentResult<Population> {
    if n == 0 {
        return Err(AgentError::EmptyPopulation);
    }
    let patterns = WeightedIndex::new(params.pattern_weights.iter())
        .map_err(|e| AgentError::Params(format!("pattern weights: {e}")))?;
    let big5_dist = normal("big5", params.big5_mean, params.big5_sd)?;
    let loss_aversion =
        normal("loss_aversion", params.loss_aversion_mean, params.loss_aversion_sd)?;
    let intelligence = normal("intelligence", params.intelligence_mean, params.intelligence_sd)?;
    let attention = normal("attention", params.attention_mean, params.attention_sd)?;
    let gambler = normal("gambler", params.gambler_mean, params.gambler_sd)?;
    check_sd("wallet", params.wallet_sigma)?;
    let wallet = LogNormal::new(params.wallet_mu, params.wallet_sigma)
        .map_err(|e| AgentError::Params(format!("wallet: {e}")))?;

    let mut pop = Population::blank(n);

    for i in 0..n {
        let big5: [f64; Big5::COUNT] =
            std::array::from_fn(|_| rng.sample(&big5_dist).clamp(0.0, 1.0));
        pop.big5[i] = big5;

        pop.loss_aversion[i] = rng.sample(&loss_aversion).clamp(1.0, 5.0);

        pop.intelligence[i] = rng.sample(&intelligence).clamp(0.0, 100.0);

        let cap = rng.sample(&attention)
            + params.attention_per_conscientiousness * big5[Big5::CONSCIENTIOUSNESS];
        // Truncation toward zero after clamping.
        pop.attention_cap[i] = cap.clamp(50.0, 200.0) as u32;

        pop.gambler_fallacy[i] = (rng.sample(&gambler)
            + params.gambler_per_neuroticism * big5[Big5::NEUROTICISM])
            .clamp(0.0, 2.0);

        let pattern = LifePattern::ALL[patterns.sample(rng.inner())];
        pop.life_pattern[i] = pattern;

        pop.wallet[i] = (rng.sample(&wallet) * pattern.wallet_scale()).floor();

        for slot in pop.interests[i].iter_mut() {
            let v = rng.unit();
            *slot = if rng.unit() < params.interest_sparsity { 0.0 } else { v };
        }

        pop.dopamine[i] = params.initial_dopamine.clamp(0.0, 100.0);

        let mut anxiety = rng.gen_range(0.0, params.anxiety_max.max(f64::MIN_POSITIVE));
        if pattern == LifePattern::Student {
            anxiety += params.student_anxiety_bonus;
        }
        pop.anxiety[i] = anxiety.clamp(0.0, 100.0);
    }

    Ok(pop)
}

fn normal(what: &str, mean: f64, sd: f64) -> AgentResult<Normal<f64>> {
    check_sd(what, sd)?;
    Normal::new(mean, sd).map_err(|e| AgentError::Params(format!("{what}: {e}")))
}

/// rand_distr only rejects a non-finite deviation; negative ones are
/// refused here too.
fn check_sd(what: &str, sd: f64) -> AgentResult<()> {
    if sd >= 0.0 {
        Ok(())
    } else {
        Err(AgentError::Params(format!("{what}: standard deviation {sd} is not >= 0")))
    }
}

/// Fluent builder for a generated [`Population`] plus its [`AgentRngs`].
pub struct PopulationBuilder {
    count:  usize,
    seed:   u64,
    params: GenesisParams,
}

impl PopulationBuilder {
    /// Builder for `count` agents using `seed` as the run seed.
    pub fn new(count: usize, seed: u64) -> Self {
        Self { count, seed, params: GenesisParams::default() }
    }

    /// Override the generating distributions.
    pub fn params(mut self, params: GenesisParams) -> Self {
        self.params = params;
        self
    }

    /// Sample the population and seed one RNG per agent.
    pub fn build(self) -> AgentResult<(Population, AgentRngs)> {
        let mut rng = SimRng::new(self.seed);
        let pop = generate(self.count, &self.params, &mut rng)?;
        tracing::debug!(agents = pop.count, seed = self.seed, "population generated");
        let rngs = AgentRngs::new(self.count, self.seed);
        Ok((pop, rngs))
    }
}
