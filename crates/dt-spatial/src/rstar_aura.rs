//! `RStarAura` — the default Aura Manager backend.
//!
//! Rebuilt every tick via one-by-one `insert()` calls, which `rstar`
//! resolves with its R*-tree insertion heuristic (choose-subtree +
//! forced-reinsertion) rather than a bulk algorithm. Slower to rebuild than
//! [`crate::rtree_aura::RTreeAura`] but produces a better-balanced tree, so
//! queries are faster — the rebuild/query tradeoff `SPEC_FULL.md` §4.4
//! attributes to the R*-tree variant, grounded on
//! `spatial_trees/rstar_tree/RStarAuraManager.cpp`.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use dt_core::{EntityId, Point2D};

use crate::aura::{AgentPosition, AuraManager};

#[derive(Clone)]
struct Entry {
    point: [f64; 2],
    id: EntityId,
}

impl RTreeObject for Entry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for Entry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

#[derive(Default)]
pub struct RStarAura {
    tree: RTree<Entry>,
}

impl RStarAura {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuraManager for RStarAura {
    fn update(&mut self, positions: &[AgentPosition]) {
        self.tree = RTree::new();
        for p in positions {
            self.tree.insert(Entry {
                point: [p.pos.x, p.pos.y],
                id: p.id,
            });
        }
    }

    fn register_new_agent(&mut self, agent: AgentPosition) {
        self.tree.insert(Entry {
            point: [agent.pos.x, agent.pos.y],
            id: agent.id,
        });
    }

    fn agents_in_rect(
        &self,
        lower_left: Point2D,
        upper_right: Point2D,
        exclude: Option<EntityId>,
    ) -> Vec<EntityId> {
        let envelope = AABB::from_corners(
            [lower_left.x, lower_left.y],
            [upper_right.x, upper_right.y],
        );
        self.tree
            .locate_in_envelope(&envelope)
            .map(|e| e.id)
            .filter(|&id| Some(id) != exclude)
            .collect()
    }
}
