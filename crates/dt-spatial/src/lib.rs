//! `dt-spatial` — the Aura Manager: a spatial index over agent positions,
//! rebuilt every tick, answering range and path-adjacent nearby-agent
//! queries for the driving/lane-change models that are out of scope here.
//!
//! The road-network data model and routing are explicit Non-goals
//! (`spec.md` §1); this crate keeps only the `AuraManager` trait, its three
//! backends, and the narrow `RoadNetworkView` seam external code implements
//! against to get a lane's local polyline and width.
//!
//! # Crate layout
//!
//! | Module          | Contents                                            |
//! |-----------------|------------------------------------------------------|
//! | [`aura`]        | `AuraManager` trait, `AgentPosition`, `nearby_rect`   |
//! | [`road_view`]   | `RoadNetworkView` — the narrow seam `nearby_agents` queries |
//! | [`rstar_aura`]  | `RStarAura` — default backend, incremental R*-tree insert |
//! | [`rtree_aura`]  | `RTreeAura` — bulk-loaded plain-R-tree backend         |
//! | [`simtree_aura`]| `SimTreeAura` — grid index for mostly-1D traffic       |
//! | [`error`]       | `SpatialError`, `SpatialResult<T>`                     |

pub mod aura;
pub mod error;
pub mod road_view;
pub mod rstar_aura;
pub mod rtree_aura;
pub mod simtree_aura;

#[cfg(test)]
mod tests;

use dt_core::config::AuraManagerImplementation;

pub use aura::{AgentPosition, AuraManager};
pub use error::{SpatialError, SpatialResult};
pub use road_view::RoadNetworkView;
pub use rstar_aura::RStarAura;
pub use rtree_aura::RTreeAura;
pub use simtree_aura::SimTreeAura;

/// Build the configured Aura Manager backend. `PackingTree` is a historical
/// alias for `RTree` (`dt_core::config::AuraManagerImplementation`'s own
/// doc comment), so it maps to the same backend.
pub fn build_aura_manager(kind: AuraManagerImplementation) -> Box<dyn AuraManager> {
    match kind {
        AuraManagerImplementation::RStar => Box::new(RStarAura::new()),
        AuraManagerImplementation::RTree | AuraManagerImplementation::PackingTree => {
            Box::new(RTreeAura::new())
        }
        AuraManagerImplementation::SimTree => Box::new(SimTreeAura::new()),
    }
}
