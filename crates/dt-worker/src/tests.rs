use std::sync::{Arc, Mutex};

use dt_core::{EntityId, LifecycleEvent, LifecycleSink, Point2D, Tick, WorkerId};
use dt_entity::{Entity, EntityError, UpdateStatus};

use crate::Worker;

struct StubEntity {
    id: EntityId,
    done_after: u32,
    ticks_run: u32,
    fails: bool,
    wants_removal: bool,
    worker: Option<WorkerId>,
}

impl StubEntity {
    fn new(id: u64) -> Self {
        Self {
            id: EntityId(id),
            done_after: u32::MAX,
            ticks_run: 0,
            fails: false,
            wants_removal: false,
            worker: None,
        }
    }
}

impl Entity for StubEntity {
    fn id(&self) -> EntityId {
        self.id
    }

    fn start_time_ms(&self) -> u64 {
        0
    }

    fn wants_removal(&self) -> bool {
        self.wants_removal
    }

    fn position(&self) -> Point2D {
        Point2D::new(self.id.0 as f64, 0.0)
    }

    fn frame_init(&mut self, _now: Tick) {}

    fn frame_tick(&mut self, _now: Tick) -> Result<UpdateStatus, EntityError> {
        if self.fails {
            return Err(EntityError::new(self.id, "stub failure"));
        }
        self.ticks_run += 1;
        if self.ticks_run >= self.done_after {
            Ok(UpdateStatus::done())
        } else {
            Ok(UpdateStatus::continue_())
        }
    }

    fn current_worker(&self) -> Option<WorkerId> {
        self.worker
    }

    fn set_current_worker(&mut self, worker: Option<WorkerId>) {
        self.worker = worker;
    }
}

struct MultiPassEntity {
    id: EntityId,
    passes: u32,
    seen: u32,
    worker: Option<WorkerId>,
}

impl Entity for MultiPassEntity {
    fn id(&self) -> EntityId {
        self.id
    }
    fn start_time_ms(&self) -> u64 {
        0
    }
    fn is_nonspatial(&self) -> bool {
        true
    }
    fn update_passes(&self) -> u32 {
        self.passes
    }
    fn frame_init(&mut self, _now: Tick) {}
    fn frame_tick(&mut self, _now: Tick) -> Result<UpdateStatus, EntityError> {
        self.seen += 1;
        Ok(UpdateStatus::continue_())
    }
    fn current_worker(&self) -> Option<WorkerId> {
        self.worker
    }
    fn set_current_worker(&mut self, worker: Option<WorkerId>) {
        self.worker = worker;
    }
}

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<String>>,
}

impl LifecycleSink for RecordingSink {
    fn emit(&self, event: LifecycleEvent) {
        let label = match event {
            LifecycleEvent::Created { entity, .. } => format!("created:{entity}"),
            LifecycleEvent::Removed { entity, .. } => format!("removed:{entity}"),
            LifecycleEvent::Exception { entity, .. } => format!("exception:{entity}"),
        };
        self.events.lock().unwrap().push(label);
    }
}

#[test]
fn addition_then_removal_via_done_status() {
    let mut w = Worker::new(WorkerId(0), 1, 42, false);
    let mut e = StubEntity::new(1);
    e.done_after = 2;
    w.schedule_for_addition(Box::new(e));
    w.drain_inbox_added(Tick(0)).unwrap();
    assert_eq!(w.managed_count(), 1);

    w.frame_tick(Tick(1));
    let removed = w.flip_and_remove(Tick(1));
    assert!(removed.is_empty());
    assert_eq!(w.managed_count(), 1);

    w.frame_tick(Tick(2));
    let removed = w.flip_and_remove(Tick(2));
    assert_eq!(removed.len(), 1);
    assert_eq!(w.managed_count(), 0);
    assert!(removed[0].current_worker().is_none());
}

#[test]
fn double_migration_is_rejected() {
    let mut w = Worker::new(WorkerId(0), 1, 42, false);
    let mut e = StubEntity::new(2);
    e.set_current_worker(Some(WorkerId(9)));
    w.schedule_for_addition(Box::new(e));
    let err = w.drain_inbox_added(Tick(0)).unwrap_err();
    assert!(matches!(err, crate::WorkerError::DoubleMigration(id) if id == EntityId(2)));
}

#[test]
fn wants_removal_after_frame_init_skips_frame_tick() {
    let mut w = Worker::new(WorkerId(0), 1, 42, false);
    let mut e = StubEntity::new(3);
    e.wants_removal = true;
    w.schedule_for_addition(Box::new(e));
    w.drain_inbox_added(Tick(0)).unwrap();
    w.frame_tick(Tick(1));
    let removed = w.flip_and_remove(Tick(1));
    assert_eq!(removed.len(), 1);
}

#[test]
fn non_strict_entity_error_removes_entity_and_emits_exception() {
    let sink = Arc::new(RecordingSink::default());
    let mut w = Worker::new(WorkerId(0), 1, 7, false).with_lifecycle_sink(sink.clone());
    let mut e = StubEntity::new(4);
    e.fails = true;
    w.schedule_for_addition(Box::new(e));
    w.drain_inbox_added(Tick(0)).unwrap();
    w.frame_tick(Tick(1));
    let removed = w.flip_and_remove(Tick(1));
    assert_eq!(removed.len(), 1);

    let events = sink.events.lock().unwrap();
    assert!(events.iter().any(|s| s == "exception:EntityId(4)"));
    assert!(events.iter().any(|s| s == "removed:EntityId(4)"));
}

#[test]
fn multi_update_entity_gets_update_passes_frame_tick_calls() {
    let mut w = Worker::new(WorkerId(0), 1, 1, false);
    w.schedule_for_addition(Box::new(MultiPassEntity {
        id: EntityId(5),
        passes: 3,
        seen: 0,
        worker: None,
    }));
    w.drain_inbox_added(Tick(0)).unwrap();
    w.frame_tick(Tick(1));
    // `seen` lives behind the Box<dyn Entity> so we can't read it back
    // directly; instead verify the entity was not removed and the worker
    // still reports it as managed (no panics from out-of-range indices is
    // itself the main thing a regression here would break).
    assert_eq!(w.managed_count(), 1);
}

#[test]
fn is_active_tick_respects_tick_step() {
    let w = Worker::new(WorkerId(0), 4, 1, false);
    assert!(w.is_active_tick(Tick(0)));
    assert!(!w.is_active_tick(Tick(1)));
    assert!(!w.is_active_tick(Tick(3)));
    assert!(w.is_active_tick(Tick(4)));
}

#[test]
fn spatial_positions_excludes_nonspatial_entities() {
    let mut w = Worker::new(WorkerId(0), 1, 1, false);
    w.schedule_for_addition(Box::new(StubEntity::new(6)));
    w.schedule_for_addition(Box::new(MultiPassEntity {
        id: EntityId(7),
        passes: 2,
        seen: 0,
        worker: None,
    }));
    w.drain_inbox_added(Tick(0)).unwrap();
    let positions = w.spatial_positions();
    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].0, EntityId(6));
}
