//! `RoleBehavior` — the narrow interface through which role-specific
//! driving/walking/control logic plugs into an [`crate::agent::Agent`].
//!
//! `SPEC_FULL.md` §1/§6 keep car-following, lane-changing, and
//! intersection-driving logic out of the kernel's scope; this trait is the
//! seam the kernel exposes for those models without depending on their
//! internals, mirroring `dt-behavior`'s `BehaviorModel` trait in the
//! teacher crate.

use dt_core::{Point2D, Tick};

use crate::error::EntityError;
use crate::status::UpdateStatus;

/// Implemented once per role kind (driver, pedestrian, …). The kernel calls
/// these hooks from `Agent::frame_init`/`frame_tick`; it never inspects a
/// `RoleBehavior`'s internal state.
pub trait RoleBehavior: Send {
    /// Called once, when the owning agent is first activated.
    fn init(&mut self, now: Tick);

    /// Called once per tick; returns the agent's new position and an
    /// `UpdateStatus` (continue/done, plus any cell migrations). `Err`
    /// propagates straight out of `Agent::frame_tick`.
    fn tick(&mut self, now: Tick) -> Result<(Point2D, UpdateStatus), EntityError>;
}

/// A `RoleBehavior` that never moves and runs forever; useful for tests and
/// as a default for roles with no behavior model wired in yet (signals,
/// placeholder controllers).
#[derive(Default)]
pub struct StationaryBehavior {
    pub position: Point2D,
}

impl RoleBehavior for StationaryBehavior {
    fn init(&mut self, _now: Tick) {}

    fn tick(&mut self, _now: Tick) -> Result<(Point2D, UpdateStatus), EntityError> {
        Ok((self.position, UpdateStatus::continue_()))
    }
}
