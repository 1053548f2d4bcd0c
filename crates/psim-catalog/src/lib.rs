//! `psim-catalog`: the static and per-tick inputs of a simulation run.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`activity`] | `Activity`, `ActivityBuilder`, `ActivityCatalog`           |
//! | [`context`]  | `SlotContext`, `ContextRow`, `ContextTable`                |
//! | [`overlay`]  | `CatalogOverlay`: per-tick effective view of the catalog  |
//! | [`event`]    | `EventKind`, `Event`, `EventSchedule`                      |
//! | [`loader`]   | CSV readers for activities, context rows and events        |
//! | [`defaults`] | Built-in catalog and four-pattern context table            |
//! | [`error`]    | `CatalogError`, `CatalogResult<T>`                         |
//!
//! # Normalization
//!
//! Raw rows become [`Activity`] records in exactly one place,
//! [`ActivityBuilder::build`].  Optional columns that are absent get safe
//! defaults there, and the loader emits one warning per defaulted column.
//! Everything downstream sees a fully populated, validated catalog.

pub mod activity;
pub mod context;
pub mod defaults;
pub mod error;
pub mod event;
pub mod loader;
pub mod overlay;

#[cfg(test)]
mod tests;

pub use activity::{Activity, ActivityBuilder, ActivityCatalog};
pub use context::{ContextRow, ContextTable, SlotContext};
pub use defaults::{DEFAULT_ACTIVITIES_CSV, default_catalog, default_context};
pub use error::{CatalogError, CatalogResult};
pub use event::{Event, EventKind, EventSchedule};
pub use loader::{
    load_activities_csv, load_activities_reader, load_context_csv, load_context_reader,
    load_events_csv, load_events_reader,
};
pub use overlay::{CatalogOverlay, SERVER_DOWN_FUN};
