//! The `Entity` trait: the kernel's narrow interface onto everything a
//! `Worker` advances.
//!
//! `SPEC_FULL.md` §9 calls for replacing the original's deep inheritance
//! hierarchy (`Entity → Agent → Person → Role`) with a shallow trait plus a
//! flat sum type for role-specific state. That sum type is [`RoleKind`] /
//! `dt-entity::agent::Agent`: the kernel only ever touches entities through
//! this trait, never through a role-specific type.

use std::sync::Arc;

use dt_buffer::Flippable;
use dt_core::{EntityId, Point2D, Tick, WorkerId};

use crate::error::EntityError;
use crate::status::UpdateStatus;

/// Tag identifying which role a concrete entity plays. Used by dispatch
/// assignment policy (e.g. pinning entities with a given role to a
/// conflux-owning worker) and by telemetry; carries no behavior itself —
/// behavior lives behind [`crate::behavior::RoleBehavior`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoleKind {
    Driver,
    Pedestrian,
    Passenger,
    Controller,
    Conflux,
}

impl std::fmt::Display for RoleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RoleKind::Driver => "driver",
            RoleKind::Pedestrian => "pedestrian",
            RoleKind::Passenger => "passenger",
            RoleKind::Controller => "controller",
            RoleKind::Conflux => "conflux",
        };
        f.write_str(s)
    }
}

/// Anything a `Worker` can advance one tick at a time.
///
/// Implementations are expected to be a flat struct holding a `RoleKind` tag
/// plus role-specific data (see `dt-entity::agent::Agent` and
/// `dt-entity::conflux::Conflux`), not a further inheritance chain.
pub trait Entity: Send {
    /// Globally unique id, assigned at dispatch time.
    fn id(&self) -> EntityId;

    /// The tick, in milliseconds, at which this entity becomes eligible to
    /// be popped from the pending queue.
    fn start_time_ms(&self) -> u64;

    /// Optional hard end time; entities past it are marked `Done`.
    fn end_time_ms(&self) -> Option<u64> {
        None
    }

    /// Entities that should never appear in the Aura Manager's spatial
    /// index (e.g. a controller with no physical position).
    fn is_nonspatial(&self) -> bool {
        false
    }

    /// The `toBeRemoved` flag (`SPEC_FULL.md` §3). An entity (or a message
    /// handler acting on it between ticks) may set this independently of
    /// `UpdateStatus`; the owning `Worker` checks it right after
    /// `frame_init` (removing the entity without ever calling `frame_tick`,
    /// per `SPEC_FULL.md` §4.6) and again after every `frame_tick` call.
    fn wants_removal(&self) -> bool {
        false
    }

    /// Current position, read by the Aura Manager during its rebuild phase.
    /// Meaningless (and never read) for `is_nonspatial` entities.
    fn position(&self) -> Point2D {
        Point2D::default()
    }

    /// How many times `frame_tick` must run within a single phase-1 pass.
    /// `1` for ordinary agents. Composite entities (confluxes) return the
    /// number of internal segments they process, each call advancing the
    /// next one (`SPEC_FULL.md` §4.2, conflux multi-update).
    fn update_passes(&self) -> u32 {
        1
    }

    /// The buffered cells this entity wants the owning worker's
    /// `BufferedDataManager` to flip on its behalf. Called once, right
    /// after migration into the worker and before the first `frame_init`.
    fn build_subscription_list(&self) -> Vec<Arc<dyn Flippable>> {
        Vec::new()
    }

    /// Called exactly once, after migration in and before the first
    /// `frame_tick`.
    fn frame_init(&mut self, now: Tick);

    /// Advance the entity by one tick. See `UpdateStatus` for the contract.
    ///
    /// `Err` models the original's "frameTick may throw": the owning
    /// `Worker` catches it at this single point (`SPEC_FULL.md` §7), logs
    /// it, and marks the entity for removal — or, in strict mode, treats it
    /// as fatal and terminates the run.
    fn frame_tick(&mut self, now: Tick) -> Result<UpdateStatus, EntityError>;

    /// Optional per-tick observation hook; the kernel does not interpret the
    /// output, it only guarantees the call happens after `frame_tick` and
    /// before removal bookkeeping (`SPEC_FULL.md` §6 — output content is an
    /// external concern).
    fn frame_output(&mut self, _now: Tick) {}

    /// Non-owning back-reference to the `Worker` currently managing this
    /// entity, `None` while in transit between workers. `Worker::migrate_in`
    /// and `migrate_out` read and update this to detect a double migration
    /// or a migrate-out of an entity they don't actually own.
    fn current_worker(&self) -> Option<WorkerId>;

    /// Set by `Worker::migrate_in`/`migrate_out`; never called elsewhere.
    fn set_current_worker(&mut self, worker: Option<WorkerId>);
}
