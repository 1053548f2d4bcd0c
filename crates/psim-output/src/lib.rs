//! `psim-output`: log and snapshot writers for psim.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Files created                                                  |
//! |-----------|---------|----------------------------------------------------------------|
//! | *(none)*  | CSV     | `tick_log.csv`, `agent_snapshots.csv`, `activity_counts.csv`   |
//! | `sqlite`  | SQLite  | `output.db`                                                    |
//!
//! Both implement [`OutputWriter`] and are driven by [`SimOutputObserver`],
//! which implements `psim_engine::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use psim_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs).unwrap();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{ActivityCountRow, AgentSnapshotRow, TickLogRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
