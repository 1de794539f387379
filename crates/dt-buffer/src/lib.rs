//! `dt-buffer` — double-buffered value cells for the rust_dt simulation kernel.
//!
//! # What lives here
//!
//! | Module      | Contents                                    |
//! |-------------|----------------------------------------------|
//! | [`cell`]    | `Buffered<T>`                                |
//! | [`manager`] | `BufferedDataManager`, `Flippable`, `new_cell` |
//! | [`error`]   | `BufferError`, `BufferResult`                |
//!
//! See `SPEC_FULL.md` §4.3 for the contract this crate implements: writers
//! stage values during `frameTick`; a single flip phase per tick publishes
//! them, giving every reader a consistent snapshot with no per-cell locking.

pub mod cell;
pub mod error;
pub mod manager;

#[cfg(test)]
mod tests;

pub use cell::Buffered;
pub use error::{BufferError, BufferResult};
pub use manager::{new_cell, BufferedDataManager, Flippable};
