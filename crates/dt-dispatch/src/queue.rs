//! `StartTimePriorityQueue` — the global pending-entity min-heap.
//!
//! Grounded on `dt-schedule`'s `WakeQueue` for the `BinaryHeap<Reverse<..>>`
//! idiom, adapted from a sparse tick-keyed map to a `(startTimeMs, seq)`-keyed
//! heap with insertion-order tie-breaking, per `SPEC_FULL.md` §3; the
//! pop-while-ready drain loop mirrors the original `WorkGroup::stageAgents`
//! (`while (!pending_agents.empty() && pending_agents.top()->startTime <=
//! nextTickMS)`).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use dt_entity::Entity;

struct PendingItem {
    start_time_ms: u64,
    seq: u64,
    entity: Box<dyn Entity>,
}

impl PartialEq for PendingItem {
    fn eq(&self, other: &Self) -> bool {
        self.start_time_ms == other.start_time_ms && self.seq == other.seq
    }
}
impl Eq for PendingItem {}

impl PartialOrd for PendingItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PendingItem {
    /// Reversed so `BinaryHeap` (a max-heap) behaves as a min-heap on
    /// `start_time_ms`, with ties broken by insertion order (`seq`).
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .start_time_ms
            .cmp(&self.start_time_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-heap of entities awaiting dispatch, keyed by `startTimeMs`.
#[derive(Default)]
pub struct StartTimePriorityQueue {
    heap: BinaryHeap<PendingItem>,
    next_seq: u64,
}

impl StartTimePriorityQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Push an entity keyed by its own `start_time_ms()`.
    pub fn push(&mut self, entity: Box<dyn Entity>) {
        let start_time_ms = entity.start_time_ms();
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(PendingItem {
            start_time_ms,
            seq,
            entity,
        });
    }

    /// Peek the smallest `start_time_ms` currently queued, if any.
    pub fn peek_start_time_ms(&self) -> Option<u64> {
        self.heap.peek().map(|i| i.start_time_ms)
    }

    /// Pop every entity whose `start_time_ms <= now_ms`, in increasing
    /// `(start_time_ms, seq)` order.
    pub fn drain_ready(&mut self, now_ms: u64) -> Vec<Box<dyn Entity>> {
        let mut ready = Vec::new();
        while let Some(top) = self.heap.peek() {
            if top.start_time_ms <= now_ms {
                ready.push(self.heap.pop().unwrap().entity);
            } else {
                break;
            }
        }
        ready
    }
}
