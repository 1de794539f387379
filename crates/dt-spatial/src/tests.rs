//! Tests for the Aura Manager backends and the `RoadNetworkView` seam.

#[cfg(test)]
mod aura_common {
    use dt_core::{EntityId, Point2D};
    use crate::{AgentPosition, AuraManager};

    pub fn agent(id: u64, x: f64, y: f64) -> AgentPosition {
        AgentPosition { id: EntityId(id), pos: Point2D::new(x, y) }
    }

    /// Shared acceptance test run against every backend: basic rect query,
    /// self-exclusion, and rebuild-drops-stale-agents.
    pub fn exercise(mut mgr: Box<dyn AuraManager>) {
        mgr.update(&[agent(1, 0.0, 0.0), agent(2, 5.0, 5.0), agent(3, 100.0, 100.0)]);

        let mut found = mgr.agents_in_rect(Point2D::new(-1.0, -1.0), Point2D::new(10.0, 10.0), None);
        found.sort_by_key(|id| id.0);
        assert_eq!(found, vec![EntityId(1), EntityId(2)]);

        let excl_self = mgr.agents_in_rect(Point2D::new(-1.0, -1.0), Point2D::new(10.0, 10.0), Some(EntityId(1)));
        assert_eq!(excl_self, vec![EntityId(2)]);

        // Rebuilding without agent 2 makes it disappear even though it was
        // previously indexed.
        mgr.update(&[agent(1, 0.0, 0.0)]);
        let after = mgr.agents_in_rect(Point2D::new(-1.0, -1.0), Point2D::new(10.0, 10.0), None);
        assert_eq!(after, vec![EntityId(1)]);
    }

    pub fn exercise_register_new_agent(mut mgr: Box<dyn AuraManager>) {
        mgr.update(&[agent(1, 0.0, 0.0)]);
        mgr.register_new_agent(agent(2, 1.0, 1.0));
        let mut found = mgr.agents_in_rect(Point2D::new(-1.0, -1.0), Point2D::new(2.0, 2.0), None);
        found.sort_by_key(|id| id.0);
        assert_eq!(found, vec![EntityId(1), EntityId(2)]);
    }
}

#[cfg(test)]
mod aura_backends {
    use crate::{RStarAura, RTreeAura, SimTreeAura};

    #[test]
    fn rstar_basic_and_exclusion() {
        super::aura_common::exercise(Box::new(RStarAura::new()));
    }

    #[test]
    fn rtree_basic_and_exclusion() {
        super::aura_common::exercise(Box::new(RTreeAura::new()));
    }

    #[test]
    fn simtree_basic_and_exclusion() {
        super::aura_common::exercise(Box::new(SimTreeAura::new()));
    }

    #[test]
    fn rstar_register_new_agent() {
        super::aura_common::exercise_register_new_agent(Box::new(RStarAura::new()));
    }

    #[test]
    fn rtree_register_new_agent() {
        super::aura_common::exercise_register_new_agent(Box::new(RTreeAura::new()));
    }

    #[test]
    fn simtree_register_new_agent() {
        super::aura_common::exercise_register_new_agent(Box::new(SimTreeAura::new()));
    }

    #[test]
    fn build_aura_manager_maps_packing_tree_to_rtree() {
        use dt_core::config::AuraManagerImplementation;
        // Just check it doesn't panic and yields a usable manager; the
        // concrete backend type is an implementation detail.
        let mgr = crate::build_aura_manager(AuraManagerImplementation::PackingTree);
        let _ = mgr.agents_in_rect(
            dt_core::Point2D::new(0.0, 0.0),
            dt_core::Point2D::new(1.0, 1.0),
            None,
        );
    }
}

#[cfg(test)]
mod nearby_agents {
    use dt_core::{EntityId, Point2D};
    use crate::{AuraManager, RStarAura, RoadNetworkView};

    struct StraightLane {
        points: Vec<Point2D>,
        width: f64,
    }

    impl RoadNetworkView for StraightLane {
        fn local_polyline(&self) -> &[Point2D] {
            &self.points
        }
        fn adjacent_width_m(&self) -> f64 {
            self.width
        }
    }

    #[test]
    fn nearby_agents_excludes_far_agents_and_self() {
        let mut mgr = RStarAura::new();
        mgr.update(&[
            super::aura_common::agent(1, 10.0, 0.2),   // on-path, nearby
            super::aura_common::agent(2, 1000.0, 0.0), // far down the lane
            super::aura_common::agent(3, 10.0, 0.2),   // same spot as self, will self-exclude by id
        ]);

        let lane = StraightLane {
            points: vec![Point2D::new(0.0, 0.0), Point2D::new(50.0, 0.0), Point2D::new(100.0, 0.0)],
            width: 6.0,
        };

        let found = mgr.nearby_agents(Point2D::new(9.0, 0.0), &lane, 20.0, 20.0, Some(EntityId(3)));
        assert!(found.contains(&EntityId(1)));
        assert!(!found.contains(&EntityId(3)));
        assert!(!found.contains(&EntityId(2)), "agent 2000m away should not be swept into a 20m window");
    }
}
