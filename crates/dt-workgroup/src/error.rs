//! Error type for `dt-workgroup`.

use thiserror::Error;

use dt_dispatch::DispatchError;

/// The kernel-level error kinds named in `SPEC_FULL.md` §7 that surface at
/// the `WorkGroupManager` boundary. `EntityUpdate` and `BarrierMismatch`
/// never reach here as `Err` values — per `dt-worker`'s design note, both
/// are fatal-by-construction (`std::process::exit`) because this
/// workspace's `release` profile builds with `panic = "abort"`, which rules
/// out recovering via unwinding across barrier-synchronized threads.
#[derive(Debug, Error)]
pub enum WorkGroupError {
    #[error("create_work_group called after init_all_groups")]
    AlreadyInitialized,

    #[error("init_all_groups called before any create_work_group call")]
    NoGroupsConfigured,

    #[error("wait_all_groups/start_all_groups called before init_all_groups")]
    NotInitialized,

    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

pub type WorkGroupResult<T> = Result<T, WorkGroupError>;
