//! `psim-agent`: the agent population for the `psim` simulator.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`store`]   | `Population` (SoA arrays), `AgentRngs`, `AgentProfile`     |
//! | [`builder`] | `PopulationBuilder`, `GenesisParams`, `generate`           |
//! | [`error`]   | `AgentError`, `AgentResult<T>`                             |
//!
//! The population is one owned aggregate with named, typed fields.  Row `i`
//! of every array belongs to `AgentId(i)`.

pub mod builder;
pub mod error;
pub mod store;


pub use builder::{GenesisParams, PopulationBuilder, generate};
pub use error::{AgentError, AgentResult};
pub use store::{AgentProfile, AgentRngs, Population};
