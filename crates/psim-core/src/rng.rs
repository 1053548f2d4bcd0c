//! Deterministic per-agent and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! One run seed drives every random draw.  The global [`SimRng`] is seeded
//! from it directly and is used for population generation.  Each agent also
//! owns an [`AgentRng`] seeded by:
//!
//!   seed = global_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! Utility noise and gacha rolls for agent `i` are always drawn from agent
//! `i`'s own stream, so a tick produces the same numbers whether the agent
//! axis is processed in order or sharded across Rayon workers.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::Distribution;

use crate::AgentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG.
///
/// Stored in a parallel `Vec<AgentRng>` next to the population arrays.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and an agent ID.
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// One draw from `dist`, typically a validated `rand_distr::Normal`.
    #[inline]
    pub fn sample<D: Distribution<f64>>(&mut self, dist: &D) -> f64 {
        dist.sample(&mut self.0)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for population generation and other global draws.
///
/// Used only in single-threaded contexts.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Uniform `f64` in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    #[inline]
    pub fn gen_range(&mut self, low: f64, high: f64) -> f64 {
        self.0.gen_range(low..high)
    }

    #[inline]
    pub fn sample<D: Distribution<f64>>(&mut self, dist: &D) -> f64 {
        dist.sample(&mut self.0)
    }
}
