//! Population-wide trend score per media group.

use psim_core::MediaGroup;

/// Exponentially smoothed traffic share per media group.
///
/// `score' = decay * score + gain * share`, where `share` is the fraction of
/// agents that engaged the group this tick.  Events may also add directly
/// into a group's score.
#[derive(Clone, Debug, PartialEq)]
pub struct ViralTrend {
    pub scores: [f64; MediaGroup::COUNT],
    pub decay:  f64,
    pub gain:   f64,
}

impl Default for ViralTrend {
    fn default() -> Self {
        Self { scores: [0.0; MediaGroup::COUNT], decay: 0.95, gain: 0.2 }
    }
}

impl ViralTrend {
    /// Add `amount` to `group`'s score.
    pub fn boost(&mut self, group: MediaGroup, amount: f64) {
        self.scores[group.index()] += amount;
    }

    /// Fold in this tick's engagement.  `engaged[g]` counts agents that
    /// performed at least one activity of group `g`; `population` is N.
    pub fn update(&mut self, engaged: &[u64; MediaGroup::COUNT], population: usize) {
        let n = population.max(1) as f64;
        for (score, &count) in self.scores.iter_mut().zip(engaged) {
            *score = self.decay * *score + self.gain * (count as f64 / n);
        }
    }
}
