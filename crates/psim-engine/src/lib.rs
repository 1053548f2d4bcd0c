//! `psim-engine`: tick loop orchestrator.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Overlay  : fresh effective catalog from the immutable base.
//!   ② Events   : SERVER_DOWN / HOT_TIME edit the overlay,
//!                VIRAL_BOOST adds to the trend score.
//!   ③ Context  : per-life-pattern stress and ad multipliers.
//!   ④ Decide   : utility matrix → greedy knapsack → action mask
//!                (parallel with the `parallel` feature).
//!   ⑤ Settle   : per agent: gacha, wallet, gauges, inertia,
//!                boredom, interest learning.
//!   ⑥ Aggregate: viral trend, revenue, per-activity counts.
//!   ⑦ Log      : append a TickRecord; notify observers.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                      |
//! |------------|-------------------------------------------------------------|
//! | `parallel` | Decide step on Rayon; `SimConfig::num_threads` sizes a pool. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use psim_agent::PopulationBuilder;
//! use psim_catalog::{default_catalog, default_context};
//! use psim_core::SimConfig;
//! use psim_engine::{ProgressLogger, SimBuilder};
//!
//! let (population, rngs) = PopulationBuilder::new(1_000, 42).build()?;
//! let mut sim = SimBuilder::new(SimConfig::default(), population, rngs,
//!                               default_catalog()?, default_context())
//!     .build()?;
//! sim.run(&mut ProgressLogger::default())?;
//! println!("revenue: {}", sim.log().total_revenue());
//! ```

pub mod builder;
pub mod error;
pub mod gacha;
pub mod log;
pub mod observer;
pub mod sim;
pub mod update;
pub mod viral;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use gacha::GachaParams;
pub use log::{SimLog, TickRecord};
pub use observer::{NoopObserver, ProgressLogger, SimObserver};
pub use sim::Sim;
pub use update::DynamicsParams;
pub use viral::ViralTrend;
