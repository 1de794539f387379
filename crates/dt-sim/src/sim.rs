//! The `Sim` struct — drives an already-initialized `WorkGroupManager`
//! through `start_all_groups` and repeated `wait_all_groups` calls, firing
//! `SimObserver` hooks at each tick boundary.

use dt_core::Tick;
use dt_dispatch::EntityIdAllocator;
use dt_entity::Entity;
use std::sync::Arc;

use dt_workgroup::WorkGroupManager;

use crate::{SimObserver, SimResult};

/// The main simulation runner.
///
/// Built exclusively through [`crate::SimBuilder`], which performs
/// `create_work_group`/`init_all_groups` up front so that `run` only has to
/// drive the steady-state tick loop: `start_all_groups` once, then
/// `wait_all_groups` until `WorkGroupManager::is_finished`.
pub struct Sim<M: Send + 'static> {
    mgr: WorkGroupManager<M>,
    started: bool,
}

impl<M: Send + 'static> Sim<M> {
    pub(crate) fn new(mgr: WorkGroupManager<M>) -> Self {
        Self {
            mgr,
            started: false,
        }
    }

    pub fn now(&self) -> Tick {
        self.mgr.now()
    }

    pub fn is_finished(&self) -> bool {
        self.mgr.is_finished()
    }

    pub fn id_allocator(&self) -> &Arc<EntityIdAllocator> {
        self.mgr.id_allocator()
    }

    /// Queues an entity for dispatch once its `start_time_ms()` is reached —
    /// for arrivals discovered mid-run (e.g. spawned by a CLI driver reading
    /// a live feed). Entities known before the run starts should go through
    /// `SimBuilder::entity` instead, so they're present at `init_all_groups`.
    pub fn dispatch_new_entity(&mut self, entity: Box<dyn Entity>) {
        self.mgr.dispatch_new_entity(entity);
    }

    /// Sets the shared pause flag (a no-op unless the `KernelConfig` this
    /// `Sim` was built from had `interactive_mode` set).
    pub fn pause(&self) {
        self.mgr.pause();
    }

    pub fn resume(&self) {
        self.mgr.resume();
    }

    pub fn is_paused(&self) -> bool {
        self.mgr.is_paused()
    }

    /// Ends the run two base ticks from now, per `SPEC_FULL.md` §5.
    pub fn stop(&self) {
        self.mgr.stop();
    }

    pub fn retrieve_out_file_names(&self) -> Vec<String> {
        self.mgr.retrieve_out_file_names()
    }

    /// Runs to completion (`WorkGroupManager::is_finished`), calling
    /// `observer`'s hooks around each base tick. Safe to call at most once
    /// per `Sim` — `start_all_groups` spawns the worker threads (or, in
    /// single-threaded mode, is a no-op that lets `wait_all_groups` drive
    /// every worker's phases serially on this thread).
    pub fn run(&mut self, observer: &mut dyn SimObserver) -> SimResult<()> {
        if !self.started {
            self.mgr.start_all_groups()?;
            self.started = true;
        }

        while !self.mgr.is_finished() {
            let tick = self.mgr.now();
            observer.on_tick_start(tick);
            self.mgr.wait_all_groups()?;
            observer.on_tick_end(tick);
        }

        observer.on_sim_end(self.mgr.now());
        Ok(())
    }
}
