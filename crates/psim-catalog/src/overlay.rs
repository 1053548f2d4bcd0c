//! Per-tick effective view of the catalog.
//!
//! Events never touch the base [`ActivityCatalog`].  Each tick the engine
//! builds a fresh `CatalogOverlay` from the base, applies that tick's
//! events to it, and drops it at the end of the tick.  Overrides therefore
//! cannot leak into the next tick.

use psim_core::MediaGroup;

use crate::ActivityCatalog;

/// Fun reward assigned to activities of a group that is down.
pub const SERVER_DOWN_FUN: f64 = -1.0e6;

#[derive(Clone, Debug)]
pub struct CatalogOverlay<'a> {
    base:           &'a ActivityCatalog,
    pub fun_reward: Vec<f64>,
    pub difficulty: Vec<f64>,
    /// Activities that must not be selected this tick.
    pub disabled:   Vec<bool>,
}

impl<'a> CatalogOverlay<'a> {
    /// Overlay equal to the base catalog.
    pub fn new(base: &'a ActivityCatalog) -> Self {
        Self {
            base,
            fun_reward: base.fun_reward.clone(),
            difficulty: base.difficulty.clone(),
            disabled:   vec![false; base.len()],
        }
    }

    #[inline]
    pub fn base(&self) -> &'a ActivityCatalog {
        self.base
    }

    /// Take every activity of `group` offline for this tick.
    pub fn server_down(&mut self, group: MediaGroup) {
        for a in self.base.in_group(group) {
            self.fun_reward[a.index()] = SERVER_DOWN_FUN;
            self.disabled[a.index()] = true;
        }
    }

    /// Multiply the fun reward of `group` by `factor`.
    pub fn hot_time(&mut self, group: MediaGroup, factor: f64) {
        for a in self.base.in_group(group) {
            if !self.disabled[a.index()] {
                self.fun_reward[a.index()] *= factor;
            }
        }
    }

    /// `true` if no override is in effect.
    pub fn is_pristine(&self) -> bool {
        self.fun_reward == self.base.fun_reward
            && self.difficulty == self.base.difficulty
            && !self.disabled.iter().any(|&d| d)
    }
}
