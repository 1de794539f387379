//! `RTreeAura` — bulk-loaded plain-R-tree Aura Manager backend.
//!
//! Rebuilt every tick via `RTree::bulk_load`, an O(n log n) top-down build
//! that is cheaper than `RStarAura`'s repeated inserts but yields a less
//! balanced tree (slower queries) — the tradeoff `SPEC_FULL.md` §4.4 names
//! for the plain-R-tree variant.

use rstar::{Envelope, PointDistance, RTree, RTreeObject, AABB};

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
pub struct RTreeAura {
    tree: RTree<Entry>,
    // Agents registered mid-tick via `register_new_agent`, not yet folded
    // into `tree` by the next `update`. Bulk-loading requires rebuilding the
    // whole tree, so these are queried as a small linear overlay instead.
    pending: Vec<Entry>,
}

impl RTreeAura {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuraManager for RTreeAura {
    fn update(&mut self, positions: &[AgentPosition]) {
        let entries: Vec<Entry> = positions
            .iter()
            .map(|p| Entry {
                point: [p.pos.x, p.pos.y],
                id: p.id,
            })
            .collect();
        self.tree = RTree::bulk_load(entries);
        self.pending.clear();
    }

    fn register_new_agent(&mut self, agent: AgentPosition) {
        self.pending.push(Entry {
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
            .chain(self.pending.iter().filter(|e| envelope.contains_point(&e.point)).map(|e| e.id))
            .filter(|&id| Some(id) != exclude)
            .collect()
    }
}
