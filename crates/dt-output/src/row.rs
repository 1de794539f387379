//! Plain data row written by every output backend — one row per kernel
//! lifecycle marker (`SPEC_FULL.md` §6: `created`, `removed`, `exception`
//! are the kernel's only interpreted output; role-specific telemetry is an
//! external concern).

/// Which of the three kernel lifecycle markers a row records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleKind {
    Created,
    Removed,
    Exception,
}

impl LifecycleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Removed => "removed",
            Self::Exception => "exception",
        }
    }
}

impl std::fmt::Display for LifecycleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded lifecycle marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleRow {
    pub tick: u64,
    pub entity_id: u64,
    pub kind: LifecycleKind,
    /// Set only for `Exception` rows — the error message `Worker::tick_one`
    /// caught from a non-strict `frame_tick` failure.
    pub message: Option<String>,
}
