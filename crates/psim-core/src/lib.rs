//! `psim-core`: foundational types for the `psim` attention-economy simulator.
//!
//! This crate is a dependency of every other `psim-*` crate.  It has no
//! `psim-*` dependencies and only a handful of external ones (`rand`,
//! `rand_distr`, `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                                  |
//! |-----------|-----------------------------------------------------------|
//! | [`ids`]   | `AgentId`, `ActivityId`                                   |
//! | [`time`]  | `Tick`, `SimClock`, `SimConfig`                           |
//! | [`rng`]   | `AgentRng` (per-agent), `SimRng` (global)                 |
//! | [`vocab`] | `Tag`, `MediaGroup`, `LifePattern`, Big Five indices      |
//! | [`error`] | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod vocab;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{ActivityId, AgentId};
pub use rng::{AgentRng, SimRng};
pub use time::{DEFAULT_TICK_SECS, SimClock, SimConfig, TICKS_PER_DAY, Tick};
pub use vocab::{Big5, INTEREST_DIM, LifePattern, MediaGroup, Tag};
