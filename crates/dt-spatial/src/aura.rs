//! `AuraManager` — the rebuilt-per-tick spatial index answering the
//! range/nearby-agent queries driving and lane-change models need.
//!
//! Grounded on `entities/AuraManager.hpp`'s singleton API shape (`init`,
//! `update`, `agentsInRect`, `nearbyAgents`, `registerNewAgent`) and
//! `RStarAuraManager.cpp`'s `nearbyAgents` rectangle-construction algorithm;
//! `SPEC_FULL.md` §4.4 turns the singleton into an owned trait object handed
//! to `WorkGroupManager`, and keeps the three pluggable backends
//! (`RStarAura`, `RTreeAura`, `SimTreeAura`) the original split across
//! `spatial_trees/{rstar_tree,packing_tree,sim_tree}`.

use dt_core::{EntityId, Point2D};

use crate::road_view::RoadNetworkView;

/// One entity's position as seen by the Aura Manager at rebuild time.
#[derive(Copy, Clone, Debug)]
pub struct AgentPosition {
    pub id: EntityId,
    pub pos: Point2D,
}

/// A rebuildable 2-D index over agent positions.
///
/// `update` is called once per tick, in phase 3, after buffers have
/// flipped (`SPEC_FULL.md` §4.4) — the index is therefore read-only during
/// `frameTick` and queries made there see the *previous* tick's positions.
pub trait AuraManager: Send {
    /// Clear and rebuild the index from `positions`. Callers must already
    /// have excluded `isNonspatial` entities and anything on the group
    /// removal list.
    fn update(&mut self, positions: &[AgentPosition]);

    /// Fast path for an entity that starts mid-tick and should be visible to
    /// other agents' queries before the next full `update` — mirrors
    /// `registerNewAgent`'s "don't wait for the next rebuild" role in the
    /// original.
    fn register_new_agent(&mut self, agent: AgentPosition);

    /// Agents whose position falls within the axis-aligned rectangle
    /// `[lower_left, upper_right]`, excluding `exclude` if given.
    fn agents_in_rect(
        &self,
        lower_left: Point2D,
        upper_right: Point2D,
        exclude: Option<EntityId>,
    ) -> Vec<EntityId>;

    /// Agents near `position` along `view`'s local path, out to `fwd_m`
    /// ahead and `back_m` behind, widened by half the path's adjacent
    /// width. Default implementation delegates to `agents_in_rect`; backends
    /// needing a specialized bottom-up query (e.g. a future sim-tree
    /// optimization) may override it.
    fn nearby_agents(
        &self,
        position: Point2D,
        view: &dyn RoadNetworkView,
        fwd_m: f64,
        back_m: f64,
        exclude: Option<EntityId>,
    ) -> Vec<EntityId> {
        let (lower_left, upper_right) = nearby_rect(position, view, fwd_m, back_m);
        self.agents_in_rect(lower_left, upper_right, exclude)
    }
}

/// Computes the search rectangle for [`AuraManager::nearby_agents`]'s
/// default implementation.
///
/// Mirrors `RStarAuraManager::nearbyAgents`: locate the polyline segment
/// containing `position`, walk outward by `fwd_m`/`back_m` (clamping to
/// polyline extents — this walks to segment ends rather than interpolating
/// mid-segment, so it may over-include but never under-include), bound the
/// walked span, then widen by half the view's adjacent width.
pub(crate) fn nearby_rect(
    position: Point2D,
    view: &dyn RoadNetworkView,
    fwd_m: f64,
    back_m: f64,
) -> (Point2D, Point2D) {
    let points = view.local_polyline();
    debug_assert!(points.len() >= 2, "local_polyline must have at least two points");

    let seg = nearest_segment(points, position);

    let back_idx = walk_back(points, seg, back_m);
    let fwd_idx = walk_fwd(points, seg + 1, fwd_m);

    let mut min_x = f64::MAX;
    let mut max_x = f64::MIN;
    let mut min_y = f64::MAX;
    let mut max_y = f64::MIN;
    for p in &points[back_idx..=fwd_idx] {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    let half_width = view.adjacent_width_m() / 2.0;
    (
        Point2D::new(min_x - half_width, min_y - half_width),
        Point2D::new(max_x + half_width, max_y + half_width),
    )
}

/// Index `i` such that `points[i]..points[i+1]` is the segment closest to
/// `position` (by perpendicular distance to the segment's midpoint — cheap
/// and sufficient since segments are short relative to query distances).
fn nearest_segment(points: &[Point2D], position: Point2D) -> usize {
    let mut best = 0;
    let mut best_dist = f64::MAX;
    for i in 0..points.len() - 1 {
        let mid = Point2D::new(
            (points[i].x + points[i + 1].x) / 2.0,
            (points[i].y + points[i + 1].y) / 2.0,
        );
        let d = mid.distance(position);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

/// Walk backward from the start of segment `seg`, accumulating length, until
/// `back_m` is covered or the polyline start is reached.
fn walk_back(points: &[Point2D], seg: usize, back_m: f64) -> usize {
    let mut covered = 0.0;
    let mut i = seg;
    while covered < back_m && i > 0 {
        covered += points[i - 1].distance(points[i]);
        i -= 1;
    }
    i
}

/// Walk forward from the start of segment `from`, accumulating length, until
/// `fwd_m` is covered or the polyline end is reached.
fn walk_fwd(points: &[Point2D], from: usize, fwd_m: f64) -> usize {
    let mut covered = 0.0;
    let mut i = from.min(points.len() - 1);
    while covered < fwd_m && i < points.len() - 1 {
        covered += points[i].distance(points[i + 1]);
        i += 1;
    }
    i
}
