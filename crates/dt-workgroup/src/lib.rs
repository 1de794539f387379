//! `dt-workgroup` — `WorkGroup`/`WorkGroupManager`: barrier-synchronized
//! tick orchestration across `Worker`s, for the rust_dt simulation kernel.
//!
//! # What lives here
//!
//! | Module        | Contents                                         |
//! |---------------|---------------------------------------------------|
//! | [`barrier`]   | `SharedBarriers` — the three per-tick rendezvous points |
//! | [`group`]     | `WorkGroup` — one tick-cadence's worker pool        |
//! | [`manager`]   | `WorkGroupManager<M>` — the public orchestration API |
//! | [`thread_loop`] | The spawned worker-thread body                    |
//! | [`error`]     | `WorkGroupError`, `WorkGroupResult`                 |
//!
//! `dt-sim` builds one `WorkGroupManager`, creates its configured
//! `WorkGroup`s, then drives `init_all_groups` → `start_all_groups` →
//! repeated `wait_all_groups` (or `run_to_end`) exactly as
//! `SPEC_FULL.md` §4.1 describes the original `WorkGroupManager`'s
//! `createWorkGroup`/`initAllGroups`/`startAllGroups`/`waitAllGroups`
//! sequence.

pub mod barrier;
pub mod error;
pub mod group;
pub mod manager;
mod thread_loop;


pub use barrier::SharedBarriers;
pub use error::{WorkGroupError, WorkGroupResult};
pub use group::WorkGroup;
pub use manager::WorkGroupManager;
