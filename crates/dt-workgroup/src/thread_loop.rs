//! The per-worker-thread body spawned by `WorkGroupManager::start_all_groups`.
//!
//! Grounded on `Worker::threadMain`'s phase-0/1/2 loop bounded by the three
//! barrier waits (`SPEC_FULL.md` §4.1/§4.2). Kept out of `manager.rs` so the
//! thread entry point — which owns no `&mut WorkGroupManager` and must pull
//! everything it needs from `Arc`-shared handles — stays visibly separate
//! from the master-side orchestration code that runs on the caller's own
//! thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier, Mutex};

use dt_core::Tick;
use dt_entity::Entity;
use dt_message::MessageBus;
use dt_worker::Worker;

use crate::barrier::SharedBarriers;

pub(crate) fn run_worker_thread<M: Send + 'static>(
    worker: Arc<Mutex<Worker>>,
    barriers: Arc<SharedBarriers>,
    macro_barrier: Option<Arc<Barrier>>,
    removal_list: Arc<Mutex<Vec<Box<dyn Entity>>>>,
    end_tick: Arc<std::sync::atomic::AtomicU64>,
    paused: Arc<AtomicBool>,
    message_bus: Arc<MessageBus<M>>,
) {
    message_bus.register_thread();

    let mut now = Tick::ZERO;
    loop {
        if now.0 >= end_tick.load(Ordering::Relaxed) {
            break;
        }

        // Polled at the top of the phase-0/frame-tick pass, per
        // `SPEC_FULL.md` §5's interactive-mode pause contract.
        while paused.load(Ordering::Relaxed) {
            std::thread::sleep(std::time::Duration::from_millis(5));
        }

        {
            let mut w = worker.lock().expect("worker mutex poisoned");
            if w.is_active_tick(now) {
                w.drain_inbox_added(now).unwrap_or_else(|err| {
                    tracing::error!(%err, "fatal framework bug");
                    std::process::exit(1);
                });
                w.frame_tick(now);
            }
        }
        barriers.frame_tick.wait();

        {
            let mut w = worker.lock().expect("worker mutex poisoned");
            if w.is_active_tick(now) {
                let removed = w.flip_and_remove(now);
                if !removed.is_empty() {
                    removal_list.lock().expect("removal list poisoned").extend(removed);
                }
            }
        }
        barriers.flip_buffers.wait();

        // The master does its exclusive work (entity deletion, Aura Manager
        // rebuild, message distribution, next-tick dispatch) in exactly
        // this window; this thread has nothing to do until the wait below
        // returns.
        barriers.message_distrib.wait();

        if let Some(mb) = &macro_barrier {
            let is_active = worker.lock().expect("worker mutex poisoned").is_active_tick(now);
            if is_active {
                mb.wait();
            }
        }

        now = now.offset(1);
    }

    message_bus.unregister_thread();
}
