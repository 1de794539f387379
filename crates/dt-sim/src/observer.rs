//! `SimObserver` — the hook points a caller gets into `Sim::run`'s tick loop.
//!
//! Narrowed from the teacher's snapshot-carrying observer (which reported
//! `&MobilityStore`/`&AgentStore` at each tick) to plain tick boundaries: the
//! kernel's only interpreted output is the lifecycle marker stream consumed
//! through `dt_core::LifecycleSink` (see `dt-output`), so an observer here
//! only needs to know *when* a tick happened, not what moved during it.

use dt_core::Tick;

/// Callbacks fired around each base tick and at run completion.
pub trait SimObserver {
    /// Called once, immediately before the tick's phases run.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once the tick's phases (including dispatch of newly eligible
    /// entities) have all completed.
    fn on_tick_end(&mut self, _tick: Tick) {}

    /// Called once after the run loop exits, with the tick it stopped at.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// An observer that does nothing, for callers that only want `Sim::run`'s
/// return value.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
