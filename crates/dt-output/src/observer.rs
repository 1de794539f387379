//! `SimOutputObserver<W>` — a [`dt_core::LifecycleSink`] backed by any
//! [`OutputWriter`].
//!
//! Wired in through `SimBuilder::lifecycle_sink`, this is the only place in
//! the workspace a kernel lifecycle marker becomes a persisted row: every
//! `Worker`, across every spawned thread, holds the same `Arc<dyn
//! LifecycleSink>` and calls `emit` directly — there is no intermediate
//! queue — so the writer itself must tolerate concurrent calls, hence the
//! internal `Mutex`.

use std::sync::Mutex;

use dt_core::{LifecycleEvent, LifecycleSink};

use crate::row::{LifecycleKind, LifecycleRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`LifecycleSink`] that writes every marker to a `W: OutputWriter`.
///
/// Errors from the writer are stored internally because `LifecycleSink::emit`
/// has no return value. After the run completes, call
/// [`finish`][Self::finish] to flush the writer and [`take_error`][Self::take_error]
/// to check whether any write failed.
pub struct SimOutputObserver<W: OutputWriter> {
    writer: Mutex<W>,
    last_error: Mutex<Option<OutputError>>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            last_error: Mutex::new(None),
        }
    }

    /// Take the stored write error (if any), keeping only the first one
    /// seen.
    pub fn take_error(&self) -> Option<OutputError> {
        self.last_error.lock().expect("output observer mutex poisoned").take()
    }

    /// Flushes the underlying writer. Call once after the run completes —
    /// idempotent, since every `OutputWriter::finish` implementation is.
    pub fn finish(&self) -> crate::OutputResult<()> {
        self.writer.lock().expect("output observer mutex poisoned").finish()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run). Only
    /// callable once this observer is no longer shared (`Arc::into_inner`
    /// or equivalent single-owner access upstream).
    pub fn into_writer(self) -> W {
        self.writer.into_inner().expect("output observer mutex poisoned")
    }

    fn store_err(&self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            let mut slot = self.last_error.lock().expect("output observer mutex poisoned");
            if slot.is_none() {
                *slot = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> LifecycleSink for SimOutputObserver<W> {
    fn emit(&self, event: LifecycleEvent) {
        let row = match event {
            LifecycleEvent::Created { tick, entity } => LifecycleRow {
                tick: tick.0,
                entity_id: entity.0,
                kind: LifecycleKind::Created,
                message: None,
            },
            LifecycleEvent::Removed { tick, entity } => LifecycleRow {
                tick: tick.0,
                entity_id: entity.0,
                kind: LifecycleKind::Removed,
                message: None,
            },
            LifecycleEvent::Exception { tick, entity, message } => LifecycleRow {
                tick: tick.0,
                entity_id: entity.0,
                kind: LifecycleKind::Exception,
                message: Some(message),
            },
        };

        let result = self.writer.lock().expect("output observer mutex poisoned").write_event(&row);
        self.store_err(result);
    }
}
