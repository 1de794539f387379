//! Error type for `dt-sim`.

use thiserror::Error;

use dt_core::ConfigError;
use dt_workgroup::WorkGroupError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("work group error: {0}")]
    WorkGroup(#[from] WorkGroupError),
}

pub type SimResult<T> = Result<T, SimError>;
