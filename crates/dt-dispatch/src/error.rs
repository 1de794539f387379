//! Error type for `dt-dispatch`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("preferred id {preferred} collides with the auto id range (starts at {auto_id_start})")]
    PreferredIdCollision { preferred: u64, auto_id_start: u64 },

    #[error("no workers configured for assignment")]
    NoWorkers,
}

pub type DispatchResult<T> = Result<T, DispatchError>;
