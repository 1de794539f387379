//! `WorkGroup` — a named collection of `Worker`s sharing one tick cadence.
//!
//! Grounded on `WorkGroup.hpp`/`WorkGroup.cpp`'s `workers` vector and its
//! `removedEntities` collection point, and `SPEC_FULL.md` §3's "`WorkGroup`
//! owns: `tickStep` (multiple of base granularity), `workers`, the group's
//! removal list". Thread spawning and the per-tick barrier choreography live
//! in `dt-workgroup::manager`, which owns the barriers every `WorkGroup`
//! shares; this module only holds the per-group state.

use std::sync::{Arc, Barrier, Mutex};
use std::thread::JoinHandle;

use dt_core::{WorkGroupId, WorkerId};
use dt_entity::Entity;
use dt_worker::Worker;

pub struct WorkGroup {
    id: WorkGroupId,
    tick_step: u32,
    workers: Vec<Arc<Mutex<Worker>>>,
    removal_list: Arc<Mutex<Vec<Box<dyn Entity>>>>,
    /// Extra rendezvous point entered only by this group's own workers (plus
    /// the master), on ticks that are this group's own active tick.
    /// `SPEC_FULL.md` §3/§9: lets a slow (`tickStep > 1`) group avoid
    /// lock-stepping with faster groups sharing the three main barriers —
    /// installed only when `tick_step > 1` (see `DESIGN.md`'s Open Question
    /// decision on macro-tick semantics).
    macro_barrier: Option<Arc<Barrier>>,
    handles: Vec<JoinHandle<()>>,
    /// Shared with every spawned worker thread; lets `WorkGroupManager::stop`
    /// end the run early by setting this to `now + 2`
    /// (`SPEC_FULL.md` §5 "Cancellation/timeouts").
    end_tick: Arc<std::sync::atomic::AtomicU64>,
}

impl WorkGroup {
    pub fn new(
        id: WorkGroupId,
        num_workers: u32,
        tick_step: u32,
        seed: u64,
        strict: bool,
        lifecycle: Option<dt_core::SharedLifecycleSink>,
        end_tick: Arc<std::sync::atomic::AtomicU64>,
    ) -> Self {
        let tick_step = tick_step.max(1);
        let workers = (0..num_workers)
            .map(|w| {
                let worker_seed = dt_core::mix_seed(seed, ((id.0 as u64) << 32) | w as u64);
                let mut worker = Worker::new(WorkerId(w), tick_step, worker_seed, strict);
                if let Some(sink) = &lifecycle {
                    worker = worker.with_lifecycle_sink(sink.clone());
                }
                Arc::new(Mutex::new(worker))
            })
            .collect::<Vec<_>>();

        let macro_barrier = if tick_step > 1 {
            Some(Arc::new(Barrier::new(workers.len() + 1)))
        } else {
            None
        };

        Self {
            id,
            tick_step,
            workers,
            removal_list: Arc::new(Mutex::new(Vec::new())),
            macro_barrier,
            handles: Vec::new(),
            end_tick,
        }
    }

    pub fn id(&self) -> WorkGroupId {
        self.id
    }

    pub fn tick_step(&self) -> u32 {
        self.tick_step
    }

    pub fn num_workers(&self) -> u32 {
        self.workers.len() as u32
    }

    pub fn workers(&self) -> &[Arc<Mutex<Worker>>] {
        &self.workers
    }

    pub fn macro_barrier(&self) -> Option<&Arc<Barrier>> {
        self.macro_barrier.as_ref()
    }

    pub fn removal_list(&self) -> &Arc<Mutex<Vec<Box<dyn Entity>>>> {
        &self.removal_list
    }

    pub fn end_tick_handle(&self) -> Arc<std::sync::atomic::AtomicU64> {
        self.end_tick.clone()
    }

    pub fn is_active_tick(&self, now_base_tick: u64) -> bool {
        now_base_tick % self.tick_step as u64 == 0
    }

    pub fn push_handle(&mut self, handle: JoinHandle<()>) {
        self.handles.push(handle);
    }

    pub fn join_threads(&mut self) {
        for h in self.handles.drain(..) {
            let _ = h.join();
        }
    }
}
