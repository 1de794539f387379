//! `WorkGroupManager` — builds `WorkGroup`s, allocates the shared barriers,
//! spawns worker threads, and drives the tick loop.
//!
//! Grounded on `WorkGroupManager.hpp`/`WorkGroupManager.cpp`'s
//! `createWorkGroup`/`initAllGroups`/`startAllGroups`/`waitAllGroups`
//! sequence (`SPEC_FULL.md` §4.1). The master-exclusive work this module
//! runs between the `flip_buffers` and `message_distrib` barrier waits —
//! dropping removed entities, rebuilding the Aura Manager, distributing
//! messages, dispatching newly eligible entities — corresponds to what the
//! original does across `WorkGroup::collectRemovedEntities`,
//! `AuraManager::update`, and `MessageBus::DistributeMessages`, called from
//! one place instead of scattered across each `WorkGroup`.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use dt_core::{SharedLifecycleSink, Tick, WorkGroupId};
use dt_dispatch::{AssignmentPolicy, EntityIdAllocator, StartTimePriorityQueue};
use dt_entity::Entity;
use dt_message::MessageBus;
use dt_spatial::{AgentPosition, AuraManager};
use dt_worker::Worker;

use crate::barrier::SharedBarriers;
use crate::error::{WorkGroupError, WorkGroupResult};
use crate::group::WorkGroup;
use crate::thread_loop::run_worker_thread;

pub struct WorkGroupManager<M: Send + 'static> {
    base_granularity_ms: u32,
    seed: u64,
    strict: bool,
    single_threaded: bool,
    dynamic_dispatch_disabled: bool,
    interactive_mode: bool,

    groups: Vec<WorkGroup>,
    barriers: Option<Arc<SharedBarriers>>,
    end_tick: Arc<AtomicU64>,
    paused: Arc<AtomicBool>,
    now: Tick,

    dispatch_queue: StartTimePriorityQueue,
    id_alloc: Arc<EntityIdAllocator>,
    policy: Box<dyn AssignmentPolicy>,
    aura: Box<dyn AuraManager>,
    message_bus: Arc<MessageBus<M>>,
    lifecycle: Option<SharedLifecycleSink>,
}

impl<M: Send + 'static> WorkGroupManager<M> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        base_granularity_ms: u32,
        seed: u64,
        auto_id_start: u64,
        strict: bool,
        single_threaded: bool,
        dynamic_dispatch_disabled: bool,
        interactive_mode: bool,
        total_ticks: u64,
        aura: Box<dyn AuraManager>,
        message_bus: Arc<MessageBus<M>>,
        policy: Box<dyn AssignmentPolicy>,
        lifecycle: Option<SharedLifecycleSink>,
    ) -> Self {
        Self {
            base_granularity_ms,
            seed,
            strict,
            single_threaded,
            dynamic_dispatch_disabled,
            interactive_mode,
            groups: Vec::new(),
            barriers: None,
            end_tick: Arc::new(AtomicU64::new(total_ticks)),
            paused: Arc::new(AtomicBool::new(false)),
            now: Tick::ZERO,
            dispatch_queue: StartTimePriorityQueue::new(),
            id_alloc: Arc::new(EntityIdAllocator::new(auto_id_start)),
            policy,
            aura,
            message_bus,
            lifecycle,
        }
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn id_allocator(&self) -> &Arc<EntityIdAllocator> {
        &self.id_alloc
    }

    pub fn is_finished(&self) -> bool {
        self.now.0 >= self.end_tick.load(Ordering::Relaxed)
    }

    /// Ends the run after two more base ticks, per `SPEC_FULL.md` §5's
    /// cancellation contract. Safe to call from any thread.
    pub fn stop(&self) {
        let target = self.now.0 + 2;
        self.end_tick.fetch_min(target, Ordering::Relaxed);
    }

    /// Sets the shared pause flag, polled at the top of every worker's
    /// phase-0/frame-tick pass (`SPEC_FULL.md` §5). A no-op unless
    /// `interactive_mode` was configured — matching "interactive mode
    /// supports a pause flag" rather than a general-purpose control knob.
    pub fn pause(&self) {
        if self.interactive_mode {
            self.paused.store(true, Ordering::Relaxed);
        }
    }

    /// Clears the shared pause flag set by [`Self::pause`].
    pub fn resume(&self) {
        self.paused.store(false, Ordering::Relaxed);
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    /// Queue an entity for dispatch once `start_time_ms()` is reached. Used
    /// both by scenario setup (before `start_all_groups`) and internally for
    /// entities bred mid-run.
    pub fn dispatch_new_entity(&mut self, entity: Box<dyn Entity>) {
        self.dispatch_queue.push(entity);
    }

    pub fn create_work_group(&mut self, num_workers: u32, tick_step: u32) -> WorkGroupResult<WorkGroupId> {
        if self.barriers.is_some() {
            return Err(WorkGroupError::AlreadyInitialized);
        }
        let gid = WorkGroupId(self.groups.len() as u32);
        let group = WorkGroup::new(
            gid,
            num_workers,
            tick_step,
            self.seed,
            self.strict,
            self.lifecycle.clone(),
            self.end_tick.clone(),
        );
        self.groups.push(group);
        Ok(gid)
    }

    /// Allocates the shared barriers (sized `sum(workers) + 1`) and performs
    /// the tick-0 dispatch pass. Must be called exactly once, after every
    /// `create_work_group` call and before `start_all_groups`.
    pub fn init_all_groups(&mut self) -> WorkGroupResult<()> {
        if self.groups.is_empty() {
            return Err(WorkGroupError::NoGroupsConfigured);
        }
        if self.barriers.is_some() {
            return Err(WorkGroupError::AlreadyInitialized);
        }
        let total: usize = self.groups.iter().map(|g| g.num_workers() as usize).sum();
        self.barriers = Some(Arc::new(SharedBarriers::new(total + 1)));
        self.message_bus.register_thread();
        self.seed_initial_entities()?;
        Ok(())
    }

    fn seed_initial_entities(&mut self) -> WorkGroupResult<()> {
        let ready = if self.dynamic_dispatch_disabled {
            self.dispatch_queue.drain_ready(u64::MAX)
        } else {
            self.dispatch_queue.drain_ready(0)
        };
        self.assign_and_push(ready)
    }

    fn assign_and_push(&mut self, entities: Vec<Box<dyn Entity>>) -> WorkGroupResult<()> {
        if entities.is_empty() {
            return Ok(());
        }
        let workers_per_group: Vec<u32> = self.groups.iter().map(|g| g.num_workers()).collect();
        for entity in entities {
            let assignment = self.policy.assign(&*entity, &workers_per_group)?;
            let group = &self.groups[assignment.group.index()];
            let worker = &group.workers()[assignment.worker.index()];
            worker.lock().expect("worker mutex poisoned").schedule_for_addition(entity);
        }
        Ok(())
    }

    /// Spawns one OS thread per worker across every group. No-op in
    /// single-threaded mode, where `wait_all_groups` drives every worker's
    /// phases serially on the caller's thread instead.
    pub fn start_all_groups(&mut self) -> WorkGroupResult<()> {
        let barriers = self.barriers.clone().ok_or(WorkGroupError::NotInitialized)?;
        if self.single_threaded {
            return Ok(());
        }
        for group in &mut self.groups {
            let macro_barrier = group.macro_barrier().cloned();
            let removal_list = group.removal_list().clone();
            let end_tick = group.end_tick_handle();
            for worker in group.workers() {
                let worker = worker.clone();
                let barriers = barriers.clone();
                let macro_barrier = macro_barrier.clone();
                let removal_list = removal_list.clone();
                let end_tick = end_tick.clone();
                let message_bus = self.message_bus.clone();
                let paused = self.paused.clone();
                let handle = std::thread::spawn(move || {
                    run_worker_thread(worker, barriers, macro_barrier, removal_list, end_tick, paused, message_bus);
                });
                group.push_handle(handle);
            }
        }
        Ok(())
    }

    /// Runs exactly one base tick. No-op past `end_tick` (callers should
    /// check `is_finished()` — `run_to_end` does this for you).
    pub fn wait_all_groups(&mut self) -> WorkGroupResult<()> {
        if self.is_finished() {
            return Ok(());
        }
        if self.single_threaded {
            self.run_tick_single_threaded()?;
        } else {
            self.run_tick_master_side()?;
        }
        self.now = self.now.offset(1);
        Ok(())
    }

    pub fn run_to_end(&mut self) -> WorkGroupResult<()> {
        while !self.is_finished() {
            self.wait_all_groups()?;
        }
        Ok(())
    }

    fn run_tick_single_threaded(&mut self) -> WorkGroupResult<()> {
        while self.paused.load(Ordering::Relaxed) {
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        for group in &self.groups {
            if !group.is_active_tick(self.now.0) {
                continue;
            }
            for worker in group.workers() {
                let mut worker = worker.lock().expect("worker mutex poisoned");
                fatal_on_state_error(worker.drain_inbox_added(self.now));
                worker.frame_tick(self.now);
            }
        }
        for group in &self.groups {
            if !group.is_active_tick(self.now.0) {
                continue;
            }
            let mut removed = Vec::new();
            for worker in group.workers() {
                let mut worker = worker.lock().expect("worker mutex poisoned");
                removed.extend(worker.flip_and_remove(self.now));
            }
            if !removed.is_empty() {
                group.removal_list().lock().expect("removal list poisoned").extend(removed);
            }
        }
        self.master_exclusive_work()
    }

    fn run_tick_master_side(&mut self) -> WorkGroupResult<()> {
        let barriers = self.barriers.clone().ok_or(WorkGroupError::NotInitialized)?;
        barriers.frame_tick.wait();
        barriers.flip_buffers.wait();
        self.master_exclusive_work()?;
        barriers.message_distrib.wait();
        for group in &self.groups {
            if let Some(mb) = group.macro_barrier() {
                if group.is_active_tick(self.now.0) {
                    mb.wait();
                }
            }
        }
        Ok(())
    }

    /// Entity deletion, Aura Manager rebuild, message distribution, and
    /// next-tick dispatch — run once per tick, either inline
    /// (single-threaded) or in the window between the `flip_buffers` and
    /// `message_distrib` barrier waits, where every worker thread has
    /// nothing else to do (`SPEC_FULL.md` §4.1).
    fn master_exclusive_work(&mut self) -> WorkGroupResult<()> {
        for group in &self.groups {
            let removed = std::mem::take(&mut *group.removal_list().lock().expect("removal list poisoned"));
            if !removed.is_empty() {
                tracing::debug!(tick = self.now.0, count = removed.len(), group = group.id().0, "dropping removed entities");
            }
            drop(removed);
        }

        let mut positions = Vec::new();
        for group in &self.groups {
            for worker in group.workers() {
                let worker = worker.lock().expect("worker mutex poisoned");
                positions.extend(
                    worker
                        .spatial_positions()
                        .into_iter()
                        .map(|(id, pos)| AgentPosition { id, pos }),
                );
            }
        }
        self.aura.update(&positions);

        self.message_bus.distribute_messages();

        let mut bred = Vec::new();
        for group in &self.groups {
            for worker in group.workers() {
                let mut worker = worker.lock().expect("worker mutex poisoned");
                bred.extend(worker.take_bred());
            }
        }
        for entity in bred {
            self.dispatch_queue.push(entity);
        }

        let next_now_ms = (self.now.0 + 1) * self.base_granularity_ms as u64;
        let ready = self.dispatch_queue.drain_ready(next_now_ms);
        self.assign_and_push(ready)
    }

    /// Every output file name any worker or group wrote to, for
    /// `retrieveOutFileNames`-style callers. The kernel itself writes no
    /// files — output backends (`dt-output`) register their own paths
    /// externally — so this is currently always empty; kept for API parity
    /// with `SPEC_FULL.md` §4.1.
    pub fn retrieve_out_file_names(&self) -> Vec<String> {
        Vec::new()
    }
}

impl<M: Send + 'static> Drop for WorkGroupManager<M> {
    fn drop(&mut self) {
        self.stop();
        for group in &mut self.groups {
            group.join_threads();
        }
        if self.barriers.is_some() {
            self.message_bus.unregister_thread();
        }
    }
}

fn fatal_on_state_error<T>(result: dt_worker::WorkerResult<T>) -> T {
    result.unwrap_or_else(|err| {
        tracing::error!(%err, "fatal framework bug");
        std::process::exit(1);
    })
}
