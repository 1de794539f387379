//! Unit tests for `Agent`, `Conflux`, and the `Entity` contract.

use dt_core::{EntityId, Point2D, Tick};

use crate::behavior::RoleBehavior;
use crate::error::EntityError;
use crate::{Agent, Conflux, Entity, RoleKind, StationaryBehavior, UpdateStatus};

struct StraightLineBehavior {
    pos: Point2D,
    step: f64,
}

impl RoleBehavior for StraightLineBehavior {
    fn init(&mut self, _now: Tick) {}

    fn tick(&mut self, _now: Tick) -> Result<(Point2D, UpdateStatus), EntityError> {
        self.pos.x += self.step;
        Ok((self.pos, UpdateStatus::continue_()))
    }
}

struct FailingBehavior;

impl RoleBehavior for FailingBehavior {
    fn init(&mut self, _now: Tick) {}

    fn tick(&mut self, _now: Tick) -> Result<(Point2D, UpdateStatus), EntityError> {
        Err(EntityError::new(EntityId(99), "car-following model diverged"))
    }
}

#[test]
fn agent_frame_tick_stages_position_until_flip() {
    let mut a = Agent::new(
        EntityId(1),
        RoleKind::Driver,
        0,
        Box::new(StraightLineBehavior {
            pos: Point2D::new(0.0, 0.0),
            step: 1.0,
        }),
    );
    a.frame_init(Tick(0));
    let status = a.frame_tick(Tick(1)).unwrap();
    assert!(!status.is_done());

    // Position only updates after the cell is flipped, not immediately.
    assert_eq!(a.position(), Point2D::new(0.0, 0.0));
    a.position_cell().flip();
    assert_eq!(a.position(), Point2D::new(1.0, 0.0));
}

#[test]
fn agent_subscription_list_has_one_cell() {
    let a = Agent::new(
        EntityId(2),
        RoleKind::Pedestrian,
        0,
        Box::new(StationaryBehavior::default()),
    );
    assert_eq!(a.build_subscription_list().len(), 1);
    assert_eq!(a.update_passes(), 1);
}

#[test]
fn agent_frame_tick_propagates_behavior_error() {
    let mut a = Agent::new(EntityId(3), RoleKind::Driver, 0, Box::new(FailingBehavior));
    a.frame_init(Tick(0));
    let err = a.frame_tick(Tick(1)).unwrap_err();
    assert_eq!(err.entity, EntityId(99));
}

#[test]
fn conflux_is_nonspatial_and_multi_update() {
    let mut c = Conflux::new(EntityId(10), 0, 3);
    assert!(c.is_nonspatial());
    assert_eq!(c.update_passes(), 3);
    assert_eq!(c.build_subscription_list().len(), 3);

    c.frame_init(Tick(0));
    for _ in 0..c.update_passes() {
        c.frame_tick(Tick(1)).unwrap();
    }
    for i in 0..c.num_segments() {
        c.segment_counter(i).flip();
        assert_eq!(*c.segment_counter(i).get(), 1);
    }
}

#[test]
fn conflux_round_robins_across_ticks() {
    let mut c = Conflux::new(EntityId(11), 0, 2);
    c.frame_init(Tick(0));
    // Tick 1: both segments advance once each (update_passes == 2).
    c.frame_tick(Tick(1)).unwrap();
    c.frame_tick(Tick(1)).unwrap();
    c.segment_counter(0).flip();
    c.segment_counter(1).flip();
    assert_eq!(*c.segment_counter(0).get(), 1);
    assert_eq!(*c.segment_counter(1).get(), 1);
}
