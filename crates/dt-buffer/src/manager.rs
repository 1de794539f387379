//! `BufferedDataManager` — the per-worker collection of subscribed cells.
//!
//! Each `Worker` (see `dt-worker`) is one `BufferedDataManager`: it aggregates
//! the `Buffered<T>` cells of every entity it currently manages and flips all
//! of them once per tick, during the flip phase.

use std::sync::Arc;

use crate::cell::Buffered;
use crate::error::{BufferError, BufferResult};

/// Type-erased flip operation so a manager can hold cells of mixed `T`.
pub trait Flippable: Send + Sync {
    fn flip(&self);
}

impl<T: Clone + Send + Sync> Flippable for Buffered<T> {
    fn flip(&self) {
        Buffered::flip(self)
    }
}

/// Aggregates the subscribed cells of every entity a worker currently
/// manages and flips them all once per tick.
///
/// Cells are held as `Arc<dyn Flippable>`: the owning entity holds the
/// primary `Arc`, and subscribing it here is a cheap refcount bump rather
/// than a raw non-owning pointer — the idiomatic Rust replacement for the
/// original's "entity owns the storage, manager holds a non-owning pointer"
/// split (see `DESIGN.md`).
#[derive(Default)]
pub struct BufferedDataManager {
    cells: Vec<Arc<dyn Flippable>>,
}

impl BufferedDataManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cells currently subscribed.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Subscribe a cell. Called when an entity's `subscriptionList` is first
    /// built, or when `UpdateStatus::to_add` introduces new cells mid-run.
    pub fn subscribe(&mut self, cell: Arc<dyn Flippable>) {
        self.cells.push(Arc::clone(&cell));
    }

    /// Subscribe every cell in an entity's subscription list at once.
    pub fn subscribe_all(&mut self, cells: impl IntoIterator<Item = Arc<dyn Flippable>>) {
        self.cells.extend(cells);
    }

    /// Unsubscribe cells by pointer identity, used when `UpdateStatus::to_remove`
    /// drops cells mid-run (e.g. a role change) or when an entity migrates out.
    pub fn unsubscribe(&mut self, cell: &Arc<dyn Flippable>) {
        let target = Arc::as_ptr(cell) as *const ();
        self.cells.retain(|c| Arc::as_ptr(c) as *const () != target);
    }

    /// Flip every subscribed cell: copy staged → current. Called once per
    /// tick, only during the flip phase.
    pub fn flip_all(&self) {
        for cell in &self.cells {
            cell.flip();
        }
    }
}

/// Construct a `Buffered<T>` honoring the configured `MutexStrategy`.
///
/// Only `Buffered` (the default) is implemented; requesting `Locked`
/// returns `BufferError::UnsupportedMutexStrategy` rather than silently
/// falling back, per `DESIGN.md`'s Open Question decision.
pub fn new_cell<T: Clone>(
    strategy: dt_core::MutexStrategy,
    initial: T,
) -> BufferResult<Buffered<T>> {
    match strategy {
        dt_core::MutexStrategy::Buffered => Ok(Buffered::new(initial)),
        dt_core::MutexStrategy::Locked => Err(BufferError::UnsupportedMutexStrategy),
    }
}
