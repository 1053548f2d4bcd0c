//! Capacity-constrained action selection.

use crate::{ActionMask, UtilityMatrix};

/// Floor on intensity when computing utility per unit of attention.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Turns a utility matrix into an action mask under per-agent capacities.
///
/// Implementations decide one row at a time; [`allocate`](Self::allocate)
/// applies the row rule to every agent.
pub trait Allocator: Send + Sync + 'static {
    /// Decide one agent's actions.
    ///
    /// `out` has the same length as `utility` and `intensity` and arrives
    /// all-`false`.
    fn allocate_row(&self, utility: &[f64], intensity: &[f64], capacity: u32, out: &mut [bool]);

    /// Decide every agent's actions.
    ///
    /// # Panics
    /// Panics if `capacity.len() != utility.rows()` or
    /// `intensity.len() != utility.cols()`.
    fn allocate(&self, utility: &UtilityMatrix, intensity: &[f64], capacity: &[u32]) -> ActionMask {
        assert_eq!(capacity.len(), utility.rows(), "one capacity per agent");
        assert_eq!(intensity.len(), utility.cols(), "one intensity per activity");

        let m = utility.cols();
        let mut mask = ActionMask::new(utility.rows(), m, false);
        if m == 0 {
            return mask;
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            mask.as_mut_slice()
                .par_chunks_mut(m)
                .enumerate()
                .for_each(|(i, out)| self.allocate_row(utility.row(i), intensity, capacity[i], out));
        }

        #[cfg(not(feature = "parallel"))]
        {
            mask.as_mut_slice()
                .chunks_mut(m)
                .enumerate()
                .for_each(|(i, out)| self.allocate_row(utility.row(i), intensity, capacity[i], out));
        }

        mask
    }
}

/// Greedy 0/1 knapsack by utility per unit of intensity.
///
/// Candidates are ranked by `utility / max(intensity, epsilon)`, highest
/// first, with ties kept in catalog order.  Walking that order, each
/// activity is accepted while the running intensity stays within capacity;
/// the first one that would overflow ends the walk, so nothing ranked below
/// it is taken even if it would fit.  Non-finite utilities never enter the
/// ranking.
#[derive(Clone, Debug)]
pub struct GreedyKnapsack {
    pub epsilon: f64,
}

impl Default for GreedyKnapsack {
    fn default() -> Self {
        Self { epsilon: DEFAULT_EPSILON }
    }
}

impl Allocator for GreedyKnapsack {
    fn allocate_row(&self, utility: &[f64], intensity: &[f64], capacity: u32, out: &mut [bool]) {
        let mut ranked: Vec<(usize, f64)> = utility
            .iter()
            .zip(intensity)
            .enumerate()
            .filter(|(_, (u, _))| u.is_finite())
            .map(|(j, (&u, &w))| (j, u / w.max(self.epsilon)))
            .collect();

        // `sort_by` is stable.
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let cap = capacity as f64;
        let mut used = 0.0;
        for (j, _) in ranked {
            used += intensity[j];
            if used > cap {
                break;
            }
            out[j] = true;
        }
    }
}
