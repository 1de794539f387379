//! The three shared barriers every worker thread (and the master thread)
//! rendezvous at once per tick.
//!
//! Grounded on `WorkGroupManager::initAllGroups`'s barrier allocation
//! (`boost::barrier(totalWorkers + 1)`, one shared count across every
//! `WorkGroup`'s workers). `SPEC_FULL.md` §4.1/§4.2 name the three phases:
//! `frameTick`, `flipBuffers`, `messageDistrib`. The master thread does its
//! exclusive work (entity deletion, Aura Manager rebuild, message
//! distribution, next-tick dispatch) strictly between the `flip_buffers` and
//! `message_distrib` waits — every worker thread has nothing to do in that
//! window and goes straight from one to the other, so the master's work
//! there never races a worker (see `group::run_worker_thread`).

use std::sync::Barrier;

pub struct SharedBarriers {
    pub frame_tick: Barrier,
    pub flip_buffers: Barrier,
    pub message_distrib: Barrier,
}

impl SharedBarriers {
    /// `n` = total workers across every `WorkGroup` plus one for the master
    /// thread. `SPEC_FULL.md` §4.1: "a count mismatch is a framework bug" —
    /// this crate validates that count once, at `init_all_groups` time,
    /// rather than attempting runtime mismatch detection (`std::sync::Barrier`
    /// has none; a miscount simply deadlocks, which is why the count is
    /// computed once from `WorkGroup::num_workers` and never touched again
    /// after `init_all_groups`).
    pub fn new(n: usize) -> Self {
        Self {
            frame_tick: Barrier::new(n),
            flip_buffers: Barrier::new(n),
            message_distrib: Barrier::new(n),
        }
    }
}
