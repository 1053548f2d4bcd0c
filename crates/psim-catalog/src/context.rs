//! Per-slot, per-life-pattern context multipliers.
//!
//! The table always spans the full day: `96 slots × 4 life patterns`.
//! Rows supplied by a collaborator may be incomplete; missing cells are
//! padded with neutral multipliers (1.0) and a single warning.

use psim_core::{LifePattern, TICKS_PER_DAY, Tick};

use crate::{CatalogError, CatalogResult};

const SLOTS: usize = TICKS_PER_DAY as usize;

/// Context of one (slot, life pattern) cell.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotContext {
    /// Qualitative label, e.g. `"COMMUTE_AM"`.
    pub label:     String,
    /// Multiplies activity stress cost.  `> 0`.
    pub stress_mod: f64,
    /// Multiplies the fun reward of ad-supported activities.  `> 0`.
    pub ad_eff:    f64,
}

impl SlotContext {
    pub fn neutral() -> Self {
        Self { label: "NORMAL".into(), stress_mod: 1.0, ad_eff: 1.0 }
    }
}

/// One input row.  `pattern == None` applies the row to every pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextRow {
    pub slot:       usize,
    pub pattern:    Option<LifePattern>,
    pub label:      Option<String>,
    pub stress_mod: Option<f64>,
    pub ad_eff:     Option<f64>,
}

/// Full-day lookup table.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextTable {
    cells: Vec<[SlotContext; LifePattern::COUNT]>,
}

impl ContextTable {
    /// Table with neutral multipliers everywhere.
    pub fn neutral() -> Self {
        Self::from_fn(|_, _| SlotContext::neutral())
    }

    /// Build every cell from `f(slot, pattern)`.
    pub fn from_fn(mut f: impl FnMut(usize, LifePattern) -> SlotContext) -> Self {
        let cells = (0..SLOTS)
            .map(|slot| std::array::from_fn(|p| f(slot, LifePattern::ALL[p])))
            .collect();
        Self { cells }
    }

    /// Normalize collaborator rows into a full table.
    ///
    /// - no rows at all is fatal ([`CatalogError::EmptyContext`]);
    /// - rows with `slot >= 96` are dropped with a warning;
    /// - cells never mentioned keep neutral multipliers, with one warning;
    /// - absent multipliers in a row default to 1.0;
    /// - non-positive or non-finite multipliers are rejected.
    pub fn from_rows(rows: impl IntoIterator<Item = ContextRow>) -> CatalogResult<Self> {
        let mut table = Self::neutral();
        let mut seen = vec![[false; LifePattern::COUNT]; SLOTS];
        let mut any = false;
        let mut dropped = 0usize;

        for row in rows {
            any = true;
            if row.slot >= SLOTS {
                dropped += 1;
                continue;
            }
            let stress_mod = check_multiplier("Stress_Mod", row.slot, row.stress_mod)?;
            let ad_eff = check_multiplier("Ad_Eff", row.slot, row.ad_eff)?;
            let cell = SlotContext {
                label: row.label.unwrap_or_else(|| "NORMAL".into()),
                stress_mod,
                ad_eff,
            };
            match row.pattern {
                Some(p) => {
                    table.cells[row.slot][p.index()] = cell;
                    seen[row.slot][p.index()] = true;
                }
                None => {
                    table.cells[row.slot] = std::array::from_fn(|_| cell.clone());
                    seen[row.slot] = [true; LifePattern::COUNT];
                }
            }
        }

        if !any {
            return Err(CatalogError::EmptyContext);
        }
        if dropped > 0 {
            tracing::warn!(dropped, "context rows outside 0..96 ignored");
        }
        let missing = seen.iter().flatten().filter(|&&s| !s).count();
        if missing > 0 {
            tracing::warn!(
                missing,
                expected = SLOTS * LifePattern::COUNT,
                "context table incomplete; padding with neutral multipliers"
            );
        }
        Ok(table)
    }

    /// Context for `pattern` at `tick` (wraps daily).
    #[inline]
    pub fn at(&self, tick: Tick, pattern: LifePattern) -> &SlotContext {
        &self.cells[tick.slot()][pattern.index()]
    }

    /// All four pattern contexts for `tick`.
    #[inline]
    pub fn slot(&self, tick: Tick) -> &[SlotContext; LifePattern::COUNT] {
        &self.cells[tick.slot()]
    }
}

fn check_multiplier(column: &str, slot: usize, v: Option<f64>) -> CatalogResult<f64> {
    let v = v.unwrap_or(1.0);
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(CatalogError::InvalidContext(format!(
            "{column} at slot {slot} must be > 0, got {v}"
        )))
    }
}
