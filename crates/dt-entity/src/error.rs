//! Error type returned by `Entity::frame_tick` and `RoleBehavior::tick`.
//!
//! Mapped from the original's "frameTick may throw" exception contract
//! (`SPEC_FULL.md` §7/§9). The workspace's `release` profile builds with
//! `panic = "abort"`, which rules out `catch_unwind` as a way to recover from
//! a misbehaving entity — so the contract is expressed as an ordinary
//! `Result` instead, caught at the single point `SPEC_FULL.md` §7 names
//! (`Worker::tick_one`), not via unwinding.

use thiserror::Error;

use dt_core::EntityId;

#[derive(Debug, Error)]
#[error("entity {entity} failed in frame_tick: {message}")]
pub struct EntityError {
    pub entity: EntityId,
    pub message: String,
}

impl EntityError {
    pub fn new(entity: EntityId, message: impl Into<String>) -> Self {
        Self {
            entity,
            message: message.into(),
        }
    }
}

pub type EntityResult<T> = Result<T, EntityError>;
