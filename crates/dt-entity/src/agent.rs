//! `Agent` — the concrete `Entity` implementation used for drivers,
//! pedestrians, passengers, and controllers.
//!
//! Where the original modeled these as a chain of subclasses
//! (`Entity → Agent → Person → Role`), this rewrite flattens them into one
//! struct tagged by [`RoleKind`] and driven by an injected
//! [`crate::behavior::RoleBehavior`] — the sum-type-plus-narrow-interface
//! redesign called for in `SPEC_FULL.md` §9.

use std::sync::Arc;

use dt_buffer::{Buffered, Flippable};
use dt_core::{EntityId, Point2D, Tick, WorkerId};

use crate::behavior::RoleBehavior;
use crate::entity::{Entity, RoleKind};
use crate::error::EntityError;
use crate::status::UpdateStatus;

pub struct Agent {
    id: EntityId,
    role_kind: RoleKind,
    start_time_ms: u64,
    end_time_ms: Option<u64>,
    is_nonspatial: bool,
    position: Arc<Buffered<Point2D>>,
    behavior: Box<dyn RoleBehavior>,
    current_worker: Option<WorkerId>,
}

impl Agent {
    pub fn new(
        id: EntityId,
        role_kind: RoleKind,
        start_time_ms: u64,
        behavior: Box<dyn RoleBehavior>,
    ) -> Self {
        Self {
            id,
            role_kind,
            start_time_ms,
            end_time_ms: None,
            is_nonspatial: false,
            position: Arc::new(Buffered::new(Point2D::default())),
            behavior,
            current_worker: None,
        }
    }

    pub fn with_end_time(mut self, end_time_ms: u64) -> Self {
        self.end_time_ms = Some(end_time_ms);
        self
    }

    pub fn with_nonspatial(mut self, nonspatial: bool) -> Self {
        self.is_nonspatial = nonspatial;
        self
    }

    pub fn role_kind(&self) -> RoleKind {
        self.role_kind
    }

    /// The position cell, for tests and for the narrow `dt-spatial`
    /// integration that reads `.get()` directly rather than through the
    /// `Entity` trait's snapshot accessor.
    pub fn position_cell(&self) -> &Arc<Buffered<Point2D>> {
        &self.position
    }
}

impl Entity for Agent {
    fn id(&self) -> EntityId {
        self.id
    }

    fn start_time_ms(&self) -> u64 {
        self.start_time_ms
    }

    fn end_time_ms(&self) -> Option<u64> {
        self.end_time_ms
    }

    fn is_nonspatial(&self) -> bool {
        self.is_nonspatial
    }

    fn position(&self) -> Point2D {
        *self.position.get()
    }

    fn build_subscription_list(&self) -> Vec<Arc<dyn Flippable>> {
        vec![self.position.clone() as Arc<dyn Flippable>]
    }

    fn frame_init(&mut self, now: Tick) {
        self.behavior.init(now);
    }

    fn frame_tick(&mut self, now: Tick) -> Result<UpdateStatus, EntityError> {
        let (new_pos, status) = self.behavior.tick(now)?;
        self.position.set(new_pos);
        Ok(status)
    }

    fn current_worker(&self) -> Option<WorkerId> {
        self.current_worker
    }

    fn set_current_worker(&mut self, worker: Option<WorkerId>) {
        self.current_worker = worker;
    }
}
