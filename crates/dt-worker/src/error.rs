//! Error type for `dt-worker`.

use thiserror::Error;

use dt_core::EntityId;

#[derive(Debug, Error)]
pub enum WorkerError {
    /// An entity migrated into a worker that already owns it — a framework
    /// bug (the dispatch path double-assigned an entity), always fatal
    /// per `SPEC_FULL.md` §7's "State error" kind.
    #[error("entity {0} migrated into a worker that already owns it")]
    DoubleMigration(EntityId),
}

pub type WorkerResult<T> = Result<T, WorkerError>;
