//! `Conflux` — a composite pseudo-agent representing traffic at an
//! intersection. Unlike an `Agent`, a `Conflux` is nonspatial at the kernel
//! level (its segments would carry their own positions in a full
//! implementation) and its `frame_tick` runs once per owned segment within a
//! single phase-1 pass (`SPEC_FULL.md` §4.2).
//!
//! The segment-level traffic model itself is out of scope (§1); this struct
//! only provides the multi-update bookkeeping shape the kernel must drive
//! correctly, with a minimal deterministic per-segment counter standing in
//! for real segment state.

use std::sync::Arc;

use dt_buffer::{Buffered, Flippable};
use dt_core::{EntityId, Tick, WorkerId};

use crate::entity::Entity;
use crate::error::EntityError;
use crate::status::UpdateStatus;

pub struct Conflux {
    id: EntityId,
    start_time_ms: u64,
    segment_counters: Vec<Arc<Buffered<u64>>>,
    next_segment: usize,
    current_worker: Option<WorkerId>,
}

impl Conflux {
    pub fn new(id: EntityId, start_time_ms: u64, num_segments: usize) -> Self {
        Self {
            id,
            start_time_ms,
            segment_counters: (0..num_segments.max(1))
                .map(|_| Arc::new(Buffered::new(0u64)))
                .collect(),
            next_segment: 0,
            current_worker: None,
        }
    }

    pub fn segment_counter(&self, index: usize) -> &Arc<Buffered<u64>> {
        &self.segment_counters[index]
    }

    pub fn num_segments(&self) -> usize {
        self.segment_counters.len()
    }
}

impl Entity for Conflux {
    fn id(&self) -> EntityId {
        self.id
    }

    fn start_time_ms(&self) -> u64 {
        self.start_time_ms
    }

    fn is_nonspatial(&self) -> bool {
        true
    }

    fn update_passes(&self) -> u32 {
        self.segment_counters.len() as u32
    }

    fn build_subscription_list(&self) -> Vec<Arc<dyn Flippable>> {
        self.segment_counters
            .iter()
            .map(|c| c.clone() as Arc<dyn Flippable>)
            .collect()
    }

    fn frame_init(&mut self, _now: Tick) {
        self.next_segment = 0;
    }

    /// Process the next segment in round-robin order. Called
    /// `update_passes()` times per phase-1 pass; each call advances exactly
    /// one segment, matching the original's "process managedConfluxes, each
    /// with several frameTick-equivalent calls per tick" behavior.
    fn frame_tick(&mut self, _now: Tick) -> Result<UpdateStatus, EntityError> {
        let i = self.next_segment % self.segment_counters.len();
        self.segment_counters[i].set_with(|c| c + 1);
        self.next_segment = self.next_segment.wrapping_add(1);
        Ok(UpdateStatus::continue_())
    }

    fn current_worker(&self) -> Option<WorkerId> {
        self.current_worker
    }

    fn set_current_worker(&mut self, worker: Option<WorkerId>) {
        self.current_worker = worker;
    }
}
