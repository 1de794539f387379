//! `RandomWalkBehavior` — the demo `RoleBehavior` `simulate` seeds every
//! agent with, standing in for the car-following/lane-change models
//! `SPEC_FULL.md` §1 keeps external to the kernel.

use dt_core::{AgentRng, Point2D, Tick};
use dt_entity::{EntityError, RoleBehavior, UpdateStatus};

const STEP_METRES: f64 = 1.0;

/// Takes one random unit step per tick, forever. Grounded on
/// `dt-entity::behavior::StationaryBehavior`'s shape — `init` is a no-op,
/// `tick` returns a new position plus `UpdateStatus::continue_()` — with the
/// position driven by a per-agent `AgentRng` instead of held fixed.
pub struct RandomWalkBehavior {
    rng: AgentRng,
    position: Point2D,
}

impl RandomWalkBehavior {
    pub fn new(rng: AgentRng) -> Self {
        Self {
            rng,
            position: Point2D::default(),
        }
    }
}

impl RoleBehavior for RandomWalkBehavior {
    fn init(&mut self, _now: Tick) {}

    fn tick(&mut self, _now: Tick) -> Result<(Point2D, UpdateStatus), EntityError> {
        let dx: f64 = self.rng.gen_range(-1.0..=1.0);
        let dy: f64 = self.rng.gen_range(-1.0..=1.0);
        self.position.x += dx * STEP_METRES;
        self.position.y += dy * STEP_METRES;
        Ok((self.position, UpdateStatus::continue_()))
    }
}
