//! `dt-worker` — `Worker`, the per-thread slice of the entity population
//! driven through the tick's phase-0/1/2 bodies for the rust_dt simulation
//! kernel.
//!
//! # What lives here
//!
//! | Module    | Contents              |
//! |-----------|------------------------|
//! | [`worker`]| `Worker`               |
//! | [`error`] | `WorkerError`, `WorkerResult` |
//!
//! The barrier waits between phases and the master-exclusive phase-3 work
//! (aura rebuild, message distribution, dispatch of newly eligible
//! entities) are one layer up, in `dt-workgroup`.

pub mod error;
pub mod worker;

#[cfg(test)]
mod tests;

pub use error::{WorkerError, WorkerResult};
pub use worker::Worker;
