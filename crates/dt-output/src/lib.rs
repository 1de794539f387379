//! `dt-output` — lifecycle-marker output writers for the rust_dt framework.
//!
//! `SPEC_FULL.md` §6 limits the kernel's own output to the three lifecycle
//! markers (`created`/`removed`/`exception`); this crate is the one place
//! those markers become a persisted row. Per-role telemetry (agent
//! positions, trip snapshots, …) is an external concern layered on top by
//! whatever owns the `Role` implementations, out of scope here.
//!
//! Three backends are provided behind Cargo features:
//!
//! | Feature   | Backend     | File created          |
//! |-----------|-------------|------------------------|
//! | *(none)*  | CSV         | `lifecycle.csv`        |
//! | `sqlite`  | SQLite      | `output.db`            |
//! | `parquet` | Parquet     | `lifecycle.parquet`    |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `dt_core::LifecycleSink` — the
//! same trait object every `Worker` thread holds and calls `emit` on
//! directly, with no intermediate queue.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use dt_output::{CsvWriter, SimOutputObserver};
//!
//! let sink = Arc::new(SimOutputObserver::new(CsvWriter::new(Path::new("./out"))?));
//! let mut sim = SimBuilder::new(config).lifecycle_sink(sink.clone()).build()?;
//! sim.run(&mut NoopObserver)?;
//! sink.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "parquet")]
pub mod parquet;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{LifecycleKind, LifecycleRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;

#[cfg(feature = "parquet")]
pub use parquet::ParquetWriter;
