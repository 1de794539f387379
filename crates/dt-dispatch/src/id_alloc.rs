//! Process-wide entity id allocation.
//!
//! `SPEC_FULL.md` §9 singles out an atomic id counter as the one acceptable
//! piece of process-wide mutable state (everything else — `ConfigParams`,
//! `Agent::all_agents`, `MessageBus` — must become an explicit context
//! instead of a singleton). This is that counter.

use std::sync::atomic::{AtomicU64, Ordering};

use dt_core::EntityId;

use crate::error::{DispatchError, DispatchResult};

/// Hands out auto ids starting at a configured floor and rejects explicit
/// preferred ids that collide with the auto range.
pub struct EntityIdAllocator {
    next_auto: AtomicU64,
    auto_id_start: u64,
}

impl EntityIdAllocator {
    pub fn new(auto_id_start: u64) -> Self {
        Self {
            next_auto: AtomicU64::new(auto_id_start),
            auto_id_start,
        }
    }

    /// Allocate the next auto id.
    pub fn next(&self) -> EntityId {
        EntityId(self.next_auto.fetch_add(1, Ordering::Relaxed))
    }

    /// Validate (and, if it is below the auto range, simply accept) an
    /// explicit preferred id. An explicit id at or above `auto_id_start`
    /// that the auto counter has not yet produced is a collision risk and
    /// is rejected.
    ///
    /// Mirrors `SPEC_FULL.md` §8's id-uniqueness invariant: "For any entity
    /// dispatched with a preferred id P, P < autoIdStart or P is itself
    /// produced by the auto counter."
    pub fn accept_preferred(&self, preferred: EntityId) -> DispatchResult<EntityId> {
        if preferred.0 < self.auto_id_start {
            return Ok(preferred);
        }
        Err(DispatchError::PreferredIdCollision {
            preferred: preferred.0,
            auto_id_start: self.auto_id_start,
        })
    }
}
