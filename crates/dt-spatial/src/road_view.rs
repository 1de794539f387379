//! `RoadNetworkView` — the narrow seam `nearby_agents` queries against.
//!
//! The full road-network data model (segments, lanes, nodes, lane
//! connectors) is an external collaborator (`SPEC_FULL.md` §1); this trait
//! exposes only the two facts the Aura Manager's `nearby_agents` query needs
//! from it, grounded on `AuraManager.hpp`'s `nearbyAgents(position, lane, ...)`
//! and `RStarAuraManager.cpp`'s `getAdjacentPathWidth(wayPoint)` call.

use dt_core::Point2D;

/// A caller-supplied view of "the path the querying entity is on" — e.g. a
/// lane or turning-path object in the caller's own road-network
/// representation.
pub trait RoadNetworkView {
    /// The polyline of the path, as an ordered list of points. Must contain
    /// at least two points.
    fn local_polyline(&self) -> &[Point2D];

    /// The width, in metres, to widen a search rectangle by on each side of
    /// the path — typically the combined width of the adjacent lanes.
    /// Implementations are responsible for the "3 m default if the
    /// outermost lane has no neighbor" fallback named in `SPEC_FULL.md` §4.4;
    /// the Aura Manager divides this value by two and applies it unchanged.
    fn adjacent_width_m(&self) -> f64;
}
