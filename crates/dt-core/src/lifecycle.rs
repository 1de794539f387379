//! Kernel lifecycle markers.
//!
//! `SPEC_FULL.md` §6 limits the kernel's own observable output to three
//! marker kinds — `created`, `removed`, `exception` — leaving the actual
//! per-entity, per-tick record stream to role-specific code outside the
//! kernel. [`LifecycleSink`] is the narrow seam `dt-workgroup` emits these
//! through; `dt-output` is the first (and, in this workspace, only)
//! implementation.
//!
//! Defined in `dt-core` rather than `dt-workgroup` so that `dt-worker` (one
//! layer below `dt-workgroup`) can also emit `Exception` markers from inside
//! `Worker::tick_one` without creating a dependency cycle.

use std::sync::Arc;

use crate::{EntityId, Tick};

/// One lifecycle event, as emitted by the kernel.
#[derive(Clone, Debug)]
pub enum LifecycleEvent {
    /// A new entity was dispatched to a worker.
    Created { tick: Tick, entity: EntityId },
    /// An entity left its worker's managed set (normal completion, a
    /// `toBeRemoved` flag, or a non-strict-mode `frame_tick` failure).
    Removed { tick: Tick, entity: EntityId },
    /// A `frame_tick` call returned `Err` and was caught in non-strict mode.
    Exception {
        tick: Tick,
        entity: EntityId,
        message: String,
    },
}

/// Receiver for kernel lifecycle markers. Implementations must be cheap and
/// non-blocking — they are called from worker threads during the
/// barrier-synchronized tick loop.
pub trait LifecycleSink: Send + Sync {
    fn emit(&self, event: LifecycleEvent);
}

/// A `LifecycleSink` that discards every event; the default when no output
/// backend is wired in.
pub struct NullLifecycleSink;

impl LifecycleSink for NullLifecycleSink {
    fn emit(&self, _event: LifecycleEvent) {}
}

/// Convenience alias used throughout the kernel crates.
pub type SharedLifecycleSink = Arc<dyn LifecycleSink>;
