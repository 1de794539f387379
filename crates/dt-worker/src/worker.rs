//! `Worker` — one OS thread's slice of the managed entity population.
//!
//! Grounded on `Worker.hpp`/`Worker.cpp`'s `managedEntities`/
//! `managedAgents`/`toBeAddedEntities`/`toBeRemovedEntities` bookkeeping and
//! its `update()` loop (`frameTick` over every managed entity, then a second
//! pass over multi-update confluxes). `SPEC_FULL.md` §4.2 names the exact
//! four phases this crate's methods correspond to: `drain_inbox_added`
//! (phase 0, "drainInbox(toBeAdded)"), `frame_tick` (phase 1), and
//! `flip_and_remove` (phase 2, "flipBuffers() + drainInbox(toBeRemoved)").
//! The barrier waits between phases, and the master-exclusive phase-3 work,
//! live one layer up in `dt-workgroup` — this crate only provides the
//! per-thread phase bodies it calls.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use dt_buffer::BufferedDataManager;
use dt_core::{mix_seed, EntityId, LifecycleEvent, Point2D, SharedLifecycleSink, Tick, WorkerId};
use dt_entity::{Entity, EntityStatus};

use crate::error::{WorkerError, WorkerResult};

struct ManagedEntity {
    entity: Box<dyn Entity>,
    initialized: bool,
}

/// One OS thread's slice of the entity population plus its own
/// double-buffered cell manager.
///
/// Lives behind `Arc<Mutex<Worker>>` in `dt-workgroup`: the owning thread
/// locks it to run each phase, and the master thread locks it only during
/// the barrier-bounded window where the owning thread is guaranteed to be
/// blocked (see `dt-workgroup::group`).
pub struct Worker {
    id: WorkerId,
    tick_step: u32,
    strict: bool,
    rng: SmallRng,
    managed: Vec<ManagedEntity>,
    to_be_removed: Vec<usize>,
    buffers: BufferedDataManager,
    to_be_added: Vec<Box<dyn Entity>>,
    to_be_bred: Vec<Box<dyn Entity>>,
    lifecycle: Option<SharedLifecycleSink>,
}

impl Worker {
    pub fn new(id: WorkerId, tick_step: u32, global_seed: u64, strict: bool) -> Self {
        Self {
            id,
            tick_step: tick_step.max(1),
            strict,
            rng: SmallRng::seed_from_u64(mix_seed(global_seed, id.0 as u64)),
            managed: Vec::new(),
            to_be_removed: Vec::new(),
            buffers: BufferedDataManager::new(),
            to_be_added: Vec::new(),
            to_be_bred: Vec::new(),
            lifecycle: None,
        }
    }

    pub fn with_lifecycle_sink(mut self, sink: SharedLifecycleSink) -> Self {
        self.lifecycle = Some(sink);
        self
    }

    pub fn id(&self) -> WorkerId {
        self.id
    }

    pub fn tick_step(&self) -> u32 {
        self.tick_step
    }

    /// Whether `now` is one of this worker's own ticks. Groups whose
    /// `granularityMs` is a multiple of the run's base granularity only run
    /// their entities every `tick_step` base ticks (`SPEC_FULL.md` §3's
    /// per-group `granularityMs`); on the other base ticks this worker still
    /// arrives at every shared barrier, it simply has nothing to do.
    pub fn is_active_tick(&self, now: Tick) -> bool {
        now.0 % self.tick_step as u64 == 0
    }

    pub fn managed_count(&self) -> usize {
        self.managed.len()
    }

    pub fn rng(&mut self) -> &mut SmallRng {
        &mut self.rng
    }

    /// Hand a freshly assigned entity to this worker. Only safe to call
    /// while this worker's own thread is not concurrently running a phase
    /// (through the `Arc<Mutex<Worker>>` in `dt-workgroup`, this holds by
    /// construction: the master only calls it during the barrier-bounded
    /// window between `flip_buffers` and `message_distrib`).
    pub fn schedule_for_addition(&mut self, entity: Box<dyn Entity>) {
        self.to_be_added.push(entity);
    }

    /// Take every entity bred by this worker's own entities during the last
    /// `frame_tick` pass, for `dt-workgroup` to dispatch like any other
    /// fresh arrival.
    pub fn take_bred(&mut self) -> Vec<Box<dyn Entity>> {
        std::mem::take(&mut self.to_be_bred)
    }

    /// Positions of every spatial (non-`is_nonspatial`) managed entity, for
    /// the Aura Manager rebuild. Only valid to call in the master-exclusive
    /// window after this worker's own `flip_and_remove` has already run for
    /// the current tick.
    pub fn spatial_positions(&self) -> Vec<(EntityId, Point2D)> {
        self.managed
            .iter()
            .filter(|m| !m.entity.is_nonspatial())
            .map(|m| (m.entity.id(), m.entity.position()))
            .collect()
    }

    // ── Phase 0: drain the addition inbox ──────────────────────────────

    pub fn drain_inbox_added(&mut self, now: Tick) -> WorkerResult<()> {
        for mut entity in self.to_be_added.drain(..) {
            if entity.current_worker().is_some() {
                return Err(WorkerError::DoubleMigration(entity.id()));
            }
            entity.set_current_worker(Some(self.id));
            let cells = entity.build_subscription_list();
            self.buffers.subscribe_all(cells);
            if let Some(sink) = &self.lifecycle {
                sink.emit(LifecycleEvent::Created {
                    tick: now,
                    entity: entity.id(),
                });
            }
            self.managed.push(ManagedEntity {
                entity,
                initialized: false,
            });
        }
        Ok(())
    }

    // ── Phase 1: frame_tick every managed entity ───────────────────────

    pub fn frame_tick(&mut self, now: Tick) {
        self.to_be_removed.clear();

        for idx in 0..self.managed.len() {
            self.tick_one(idx, now);
        }

        // Conflux-style multi-update pass: entities that span more than one
        // internal segment get additional frame_tick calls within this same
        // phase-1 pass (`SPEC_FULL.md` §4.2, §9). Recomputed fresh each tick
        // rather than tracked incrementally, since swap_remove in
        // `flip_and_remove` would otherwise invalidate cached indices.
        let multi_update: Vec<usize> = (0..self.managed.len())
            .filter(|&i| self.managed[i].entity.update_passes() > 1)
            .collect();
        for idx in multi_update {
            let passes = self.managed[idx].entity.update_passes();
            for _ in 1..passes {
                self.tick_one(idx, now);
            }
        }
    }

    fn tick_one(&mut self, idx: usize, now: Tick) {
        let slot = &mut self.managed[idx];
        if !slot.initialized {
            slot.entity.frame_init(now);
            slot.initialized = true;
            if slot.entity.wants_removal() {
                self.to_be_removed.push(idx);
                return;
            }
        }

        match slot.entity.frame_tick(now) {
            Ok(status) => {
                for cell in status.to_add {
                    self.buffers.subscribe(cell);
                }
                for cell in &status.to_remove {
                    self.buffers.unsubscribe(cell);
                }
                if !status.bred.is_empty() {
                    self.to_be_bred.extend(status.bred);
                }
                slot.entity.frame_output(now);
                if status.status == EntityStatus::Done || slot.entity.wants_removal() {
                    self.to_be_removed.push(idx);
                }
            }
            Err(err) => {
                if self.strict {
                    tracing::error!(tick = now.0, entity = %err.entity, message = %err.message, "strict mode: terminating on entity update error");
                    // Other worker threads are parked at shared barriers;
                    // unwinding would deadlock them under this workspace's
                    // `panic = "abort"` release profile anyway, so this is
                    // an immediate, total process exit rather than a panic.
                    std::process::exit(1);
                }
                tracing::warn!(tick = now.0, entity = %err.entity, message = %err.message, "frame_tick failed; removing entity");
                if let Some(sink) = &self.lifecycle {
                    sink.emit(LifecycleEvent::Exception {
                        tick: now,
                        entity: err.entity,
                        message: err.message,
                    });
                }
                self.to_be_removed.push(idx);
            }
        }
    }

    // ── Phase 2: flip buffers, then drain local removals ───────────────

    /// Flip this worker's buffers, remove every entity queued this tick, and
    /// return them for `dt-workgroup` to append to the group's removal list.
    pub fn flip_and_remove(&mut self, now: Tick) -> Vec<Box<dyn Entity>> {
        self.buffers.flip_all();

        let mut idx: Vec<usize> = self.to_be_removed.drain(..).collect();
        idx.sort_unstable();
        idx.dedup();

        let mut removed = Vec::with_capacity(idx.len());
        for i in idx.into_iter().rev() {
            removed.push(self.managed.swap_remove(i).entity);
        }

        for entity in &mut removed {
            entity.set_current_worker(None);
            if let Some(sink) = &self.lifecycle {
                sink.emit(LifecycleEvent::Removed {
                    tick: now,
                    entity: entity.id(),
                });
            }
        }
        removed
    }
}
