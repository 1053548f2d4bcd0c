//! `psim-model`: per-tick decision making.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`matrix`]   | `Matrix<T>`, `UtilityMatrix`, `ActionMask`                   |
//! | [`context`]  | `TickContext<'a>`: read-only inputs shared by all agents    |
//! | [`utility`]  | `UtilityParams`, `UtilityModel`                              |
//! | [`knapsack`] | `Allocator` trait, `GreedyKnapsack`                          |
//!
//! # Two steps per tick
//!
//! 1. **Score**: [`UtilityModel::score`] fills an `[agents × activities]`
//!    desirability matrix from needs, traits, inertia, virality and cost,
//!    plus per-cell Gaussian noise from each agent's own RNG.
//! 2. **Allocate**: an [`Allocator`] turns each row into a set of actions
//!    whose total intensity fits the agent's attention capacity.
//!
//! Rows are independent, so with the `parallel` feature both steps run
//! row-sharded on Rayon with results identical to the sequential path.

pub mod context;
pub mod knapsack;
pub mod matrix;
pub mod utility;

#[cfg(test)]
mod tests;

pub use context::TickContext;
pub use knapsack::{Allocator, GreedyKnapsack};
pub use matrix::{ActionMask, Matrix, UtilityMatrix};
pub use utility::{UtilityModel, UtilityParams};
