//! `dt-message` — the typed, thread-aware publish/dispatch message bus used
//! for incident injection, cross-agent commands, and controller/driver
//! conversations that must not race `frameTick`.
//!
//! # What lives here
//!
//! | Module   | Contents                                  |
//! |----------|----------------------------------------------|
//! | [`bus`]  | `MessageBus`, `MessageHandler`                |
//! | [`error`]| `MessageError`, `MessageResult`               |

pub mod bus;
pub mod error;

#[cfg(test)]
mod tests;

pub use bus::{MessageBus, MessageHandler};
pub use error::{MessageError, MessageResult};
