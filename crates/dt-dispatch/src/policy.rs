//! Assignment policy: picks a `(WorkGroupId, WorkerId)` for a freshly
//! dispatched entity.

use dt_core::{WorkGroupId, WorkerId};
use dt_entity::Entity;

use crate::error::{DispatchError, DispatchResult};

/// A `(group, worker-within-group)` target.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Assignment {
    pub group: WorkGroupId,
    pub worker: WorkerId,
}

pub trait AssignmentPolicy: Send {
    /// `workers_per_group[g]` is the worker count of group `g`.
    fn assign(&mut self, entity: &dyn Entity, workers_per_group: &[u32]) -> DispatchResult<Assignment>;
}

/// Default policy: round-robin across the workers of a single group.
pub struct RoundRobinPolicy {
    group: WorkGroupId,
    next_worker: u32,
}

impl RoundRobinPolicy {
    /// Round-robin within `group` (the common single-group case named in
    /// `SPEC_FULL.md` §4.6).
    pub fn new(group: WorkGroupId) -> Self {
        Self {
            group,
            next_worker: 0,
        }
    }
}

impl AssignmentPolicy for RoundRobinPolicy {
    fn assign(&mut self, _entity: &dyn Entity, workers_per_group: &[u32]) -> DispatchResult<Assignment> {
        let n = *workers_per_group
            .get(self.group.index())
            .ok_or(DispatchError::NoWorkers)?;
        if n == 0 {
            return Err(DispatchError::NoWorkers);
        }
        let worker = WorkerId(self.next_worker % n);
        self.next_worker = self.next_worker.wrapping_add(1);
        Ok(Assignment {
            group: self.group,
            worker,
        })
    }
}

/// Pins entities to a specific `(group, worker)` via a caller-supplied
/// lookup (e.g. "this entity's start node belongs to the conflux owned by
/// worker 3"), falling back to round-robin for anything the lookup does not
/// recognize.
pub struct RegionPinnedPolicy {
    pin: Box<dyn Fn(&dyn Entity) -> Option<Assignment> + Send>,
    fallback: RoundRobinPolicy,
}

impl RegionPinnedPolicy {
    pub fn new(
        fallback_group: WorkGroupId,
        pin: impl Fn(&dyn Entity) -> Option<Assignment> + Send + 'static,
    ) -> Self {
        Self {
            pin: Box::new(pin),
            fallback: RoundRobinPolicy::new(fallback_group),
        }
    }
}

impl AssignmentPolicy for RegionPinnedPolicy {
    fn assign(&mut self, entity: &dyn Entity, workers_per_group: &[u32]) -> DispatchResult<Assignment> {
        match (self.pin)(entity) {
            Some(a) => Ok(a),
            None => self.fallback.assign(entity, workers_per_group),
        }
    }
}
