//! The `OutputWriter` trait implemented by all backend writers.

use crate::{LifecycleRow, OutputResult};

/// Trait implemented by CSV, SQLite, and Parquet writers.
///
/// `Send` because the owning [`crate::SimOutputObserver`] guards it behind a
/// `Mutex` so a single writer can be shared across worker threads — every
/// `LifecycleEvent` arrives through `LifecycleSink::emit(&self, ..)`, which
/// offers no exclusive access of its own.
pub trait OutputWriter: Send {
    /// Write one lifecycle marker row.
    fn write_event(&mut self, row: &LifecycleRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
