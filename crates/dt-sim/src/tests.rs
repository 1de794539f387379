use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use dt_core::{EntityId, KernelConfigBuilder, Point2D, Tick, WorkerId};
use dt_entity::{Entity, EntityError, UpdateStatus};

use crate::{NoopObserver, SimBuilder, SimObserver};

struct CountingEntity {
    id: EntityId,
    start_time_ms: u64,
    done_after: u32,
    ticks: Arc<AtomicU32>,
    worker: Option<WorkerId>,
}

impl CountingEntity {
    fn new(id: u64, start_time_ms: u64, done_after: u32, ticks: Arc<AtomicU32>) -> Self {
        Self {
            id: EntityId(id),
            start_time_ms,
            done_after,
            ticks,
            worker: None,
        }
    }
}

impl Entity for CountingEntity {
    fn id(&self) -> EntityId {
        self.id
    }
    fn start_time_ms(&self) -> u64 {
        self.start_time_ms
    }
    fn position(&self) -> Point2D {
        Point2D::new(self.id.0 as f64, 0.0)
    }
    fn frame_init(&mut self, _now: Tick) {}
    fn frame_tick(&mut self, _now: Tick) -> Result<UpdateStatus, EntityError> {
        let seen = self.ticks.fetch_add(1, Ordering::Relaxed) + 1;
        if seen >= self.done_after {
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

#[derive(Default)]
struct RecordingObserver {
    starts: Vec<u64>,
    ends: Vec<u64>,
    sim_end: Option<u64>,
}

impl SimObserver for RecordingObserver {
    fn on_tick_start(&mut self, tick: Tick) {
        self.starts.push(tick.0);
    }
    fn on_tick_end(&mut self, tick: Tick) {
        self.ends.push(tick.0);
    }
    fn on_sim_end(&mut self, final_tick: Tick) {
        self.sim_end = Some(final_tick.0);
    }
}

#[test]
fn single_threaded_run_advances_entities_to_completion() {
    let config = KernelConfigBuilder::new(100)
        .total_runtime_ms(1_000)
        .group("person", 2, 100)
        .build()
        .unwrap();

    let ticks = Arc::new(AtomicU32::new(0));
    let mut sim = SimBuilder::<()>::new(config)
        .single_threaded(true)
        .entity(Box::new(CountingEntity::new(1, 0, 3, ticks.clone())))
        .build()
        .unwrap();

    let mut observer = RecordingObserver::default();
    sim.run(&mut observer).unwrap();

    assert_eq!(ticks.load(Ordering::Relaxed), 3);
    assert!(sim.is_finished());
    assert_eq!(observer.sim_end, Some(10));
    assert_eq!(observer.starts.len(), 10);
    assert_eq!(observer.ends.len(), 10);
}

#[test]
fn noop_observer_run_completes_without_entities() {
    let config = KernelConfigBuilder::new(100)
        .total_runtime_ms(500)
        .group("person", 1, 100)
        .build()
        .unwrap();

    let mut sim = SimBuilder::<()>::new(config).single_threaded(true).build().unwrap();
    sim.run(&mut NoopObserver).unwrap();
    assert_eq!(sim.now(), Tick(5));
}

#[test]
fn stop_ends_the_run_early() {
    let config = KernelConfigBuilder::new(100)
        .total_runtime_ms(10_000)
        .group("person", 1, 100)
        .build()
        .unwrap();

    let mut sim = SimBuilder::<()>::new(config).single_threaded(true).build().unwrap();

    // Drive two ticks by hand, then request an early stop.
    sim.dispatch_new_entity(Box::new(CountingEntity::new(
        2,
        0,
        u32::MAX,
        Arc::new(AtomicU32::new(0)),
    )));

    let mut observer = RecordingObserver::default();
    // Stop as soon as the run starts; `stop()` targets `now + 2`.
    sim.stop();
    sim.run(&mut observer).unwrap();
    assert_eq!(sim.now(), Tick(2));
}

#[test]
fn pause_without_interactive_mode_is_a_noop() {
    let config = KernelConfigBuilder::new(100)
        .total_runtime_ms(500)
        .group("person", 1, 100)
        .build()
        .unwrap();
    let sim = SimBuilder::<()>::new(config).single_threaded(true).build().unwrap();
    sim.pause();
    assert!(!sim.is_paused());
}
