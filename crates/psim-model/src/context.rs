//! Read-only inputs shared by every agent during one tick.

use psim_catalog::{CatalogOverlay, SlotContext};
use psim_core::{LifePattern, MediaGroup, Tick};

/// Everything the utility model reads besides the population itself.
///
/// Built once per tick by the engine; agents look up their own
/// `slot[life_pattern]` entry.
pub struct TickContext<'a> {
    pub tick: Tick,

    /// Effective catalog for this tick (base plus event overrides).
    pub catalog: &'a CatalogOverlay<'a>,

    /// Context multipliers for this tick, indexed by life pattern.
    pub slot: &'a [SlotContext; LifePattern::COUNT],

    /// Viral-trend score per media group.  `None` disables the social term.
    pub viral: Option<&'a [f64; MediaGroup::COUNT]>,
}

impl<'a> TickContext<'a> {
    #[inline]
    pub fn new(
        tick:    Tick,
        catalog: &'a CatalogOverlay<'a>,
        slot:    &'a [SlotContext; LifePattern::COUNT],
        viral:   Option<&'a [f64; MediaGroup::COUNT]>,
    ) -> Self {
        Self { tick, catalog, slot, viral }
    }
}
