//! `dt-core` — foundational types for the `rust_dt` digital twin framework.
//!
//! This crate is a dependency of every other `dt-*` crate.  It intentionally
//! has no `dt-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `NodeId`, `EdgeId`, `ActivityId`, `EntityId`, `WorkerId`, `WorkGroupId`, `HandlerId` |
//! | [`geo`]         | `GeoPoint`, haversine distance                        |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`config`]      | `KernelConfig`, `KernelConfigBuilder`, aura/mutex/load-order enums |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global), `mix_seed` |
//! | [`transport`]   | `TransportMode` enum                                  |
//! | [`error`]       | `DtError`, `DtResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types, for loading |
//!           | a `KernelConfig` from a TOML/JSON file at the CLI boundary. |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod lifecycle;
pub mod rng;
pub mod time;
pub mod transport;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    AuraManagerImplementation, ConfigError, GroupSpec, KernelConfig, KernelConfigBuilder,
    LoadAgentSource, MutexStrategy,
};
pub use error::{DtError, DtResult};
pub use geo::{GeoPoint, Point2D};
pub use ids::{ActivityId, AgentId, EdgeId, EntityId, HandlerId, NodeId, WorkGroupId, WorkerId};
pub use lifecycle::{LifecycleEvent, LifecycleSink, NullLifecycleSink, SharedLifecycleSink};
pub use rng::{mix_seed, AgentRng, SimRng};
pub use time::{SimClock, SimConfig, Tick};
pub use transport::TransportMode;
