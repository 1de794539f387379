//! The `Buffered<T>` double-buffered value cell.
//!
//! # Safety contract
//!
//! `Buffered<T>` holds two `UnsafeCell<T>` slots instead of a `Mutex<T>`
//! because its whole purpose is to let many threads read `current` while one
//! thread writes `staged`, with zero synchronization overhead on the hot
//! path. That is only sound because callers uphold the contract the
//! surrounding barrier sequence guarantees:
//!
//! - `set` is called only by the owning worker's thread, only during its own
//!   `frameTick`.
//! - `flip` is called only by the owning [`BufferedDataManager`](crate::BufferedDataManager),
//!   only during the flip phase — which starts only after every worker has
//!   rendezvoused at the frame-tick barrier, i.e. after every `frameTick` in
//!   the tick has returned.
//! - `get` may be called from any thread at any time; it only ever touches
//!   `current`, which `flip` is the sole writer of and only during a window
//!   with no concurrent readers from `frameTick` (again, by the barrier).
//!
//! Violating these call-site contracts is a framework bug, not a type-system
//! violation — the same trust boundary the C++ original placed on
//! `boost::barrier`-synchronized access.

use std::cell::UnsafeCell;
use std::fmt;

/// A value cell with a *current* and a *staged* slot.
///
/// Writers call [`Buffered::set`] during `frameTick` to stage a new value;
/// [`Buffered::flip`] copies staged → current once per tick. All reads
/// outside the owning worker's `frameTick` see `current`.
pub struct Buffered<T> {
    current: UnsafeCell<T>,
    staged: UnsafeCell<T>,
}

impl<T: Clone> Buffered<T> {
    /// Construct a cell with `current == staged == initial`.
    pub fn new(initial: T) -> Self {
        Self {
            current: UnsafeCell::new(initial.clone()),
            staged: UnsafeCell::new(initial),
        }
    }
}

impl<T> Buffered<T> {
    /// Read the current (last-flipped) value.
    #[inline]
    pub fn get(&self) -> &T {
        // SAFETY: see module-level safety contract.
        unsafe { &*self.current.get() }
    }

    /// Stage a new value. Legal only from the owning worker's thread during
    /// its `frameTick`.
    #[inline]
    pub fn set(&self, v: T) {
        // SAFETY: see module-level safety contract.
        unsafe {
            *self.staged.get() = v;
        }
    }

    /// Mutate the staged value in place without requiring a fresh `T`.
    #[inline]
    pub fn set_with(&self, f: impl FnOnce(&T) -> T) {
        // SAFETY: see module-level safety contract.
        unsafe {
            let new = f(&*self.staged.get());
            *self.staged.get() = new;
        }
    }

    /// Copy staged → current. Legal only from the owning
    /// `BufferedDataManager`, only during the flip phase.
    #[inline]
    pub fn flip(&self)
    where
        T: Clone,
    {
        // SAFETY: see module-level safety contract.
        unsafe {
            let staged_clone = (*self.staged.get()).clone();
            *self.current.get() = staged_clone;
        }
    }
}

// SAFETY: a `Buffered<T>` is shared across threads only via `Arc`, and every
// access path (`get`/`set`/`flip`) upholds the single-writer contract above
// as long as `T: Send`. There's no interior reference to non-`Send` data.
unsafe impl<T: Send> Send for Buffered<T> {}
unsafe impl<T: Send> Sync for Buffered<T> {}

impl<T: fmt::Debug> fmt::Debug for Buffered<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffered").field("current", self.get()).finish_non_exhaustive()
    }
}
