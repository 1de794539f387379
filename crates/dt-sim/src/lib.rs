//! `dt-sim` — top-level `Sim`/`SimBuilder`/`SimObserver` orchestration for
//! the rust_dt simulation kernel.
//!
//! `Sim` owns nothing of its own beyond a `dt_workgroup::WorkGroupManager`:
//! every phase (drain-added, frame_tick, flip-and-remove, Aura Manager
//! rebuild, message distribution, next-tick dispatch) lives one layer down
//! in `dt-workgroup`/`dt-worker`. This crate is the thin wall-clock driver
//! both `demos/dt-cli` and tests use — `SimBuilder` validates a
//! `KernelConfig`, wires up the Aura Manager backend, the message bus, and
//! the assignment policy, and `Sim::run` repeats `wait_all_groups` until the
//! configured run length is reached.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use dt_core::KernelConfigBuilder;
//! use dt_sim::{NoopObserver, SimBuilder};
//!
//! let config = KernelConfigBuilder::new(100)
//!     .total_runtime_ms(10_000)
//!     .group("person", 4, 100)
//!     .build()?;
//!
//! let mut sim = SimBuilder::<()>::new(config).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
