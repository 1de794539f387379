//! Resolved kernel configuration.
//!
//! This module models the *already-resolved* shape the kernel reads (see the
//! crate-level note on configuration loading): the kernel never parses XML or
//! talks to a database. An application loads a [`KernelConfig`] from
//! whatever format it likes (typically `serde` + TOML/JSON at the CLI
//! boundary) and hands it to `dt-workgroup`/`dt-sim`.

use std::fmt;

use thiserror::Error;

// ── Per-group specification ────────────────────────────────────────────────

/// Worker count and tick granularity for one named WorkGroup (e.g. `"person"`
/// or `"signal"`).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupSpec {
    pub name: String,
    pub num_workers: u32,
    pub granularity_ms: u32,
}

// ── Pluggable-implementation enums ─────────────────────────────────────────

/// Selects which spatial index backs the Aura Manager.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AuraManagerImplementation {
    /// R*-tree, rebuilt each tick. Default: slower rebuild, faster query.
    #[default]
    RStar,
    /// Plain R-tree, bulk-loaded each tick. Faster rebuild, slower query.
    RTree,
    /// Index optimized for the mostly-1D layout of road traffic.
    SimTree,
    /// Historical alias for `RTree` kept for config-file compatibility.
    PackingTree,
}

impl fmt::Display for AuraManagerImplementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::RStar => "rstar",
            Self::RTree => "rtree",
            Self::SimTree => "simtree",
            Self::PackingTree => "packing-tree",
        };
        f.write_str(s)
    }
}

/// Per-cell publication strategy. The kernel implements only `Buffered`;
/// `Locked` is accepted for config-file compatibility with the legacy source
/// and rejected with a typed error at `Buffered<T>` construction time.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MutexStrategy {
    #[default]
    Buffered,
    Locked,
}

/// Order in which agent-loading sources are consulted at phase-0 population
/// creation. The kernel does not implement any loader itself; this only
/// orders calls into externally supplied loader callbacks.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LoadAgentSource {
    Database,
    Drivers,
    Pedestrians,
    Passengers,
}

// ── KernelConfig ────────────────────────────────────────────────────────────

/// Resolved configuration consumed by `dt-workgroup`/`dt-sim`.
///
/// Construct via [`KernelConfigBuilder`], which validates the
/// granularity-multiple constraints from the start and returns a typed
/// [`ConfigError`] rather than panicking on a malformed file.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KernelConfig {
    pub base_granularity_ms: u32,
    pub total_runtime_ms: u64,
    pub total_warmup_ms: u64,
    pub groups: Vec<GroupSpec>,
    pub aura_manager_implementation: AuraManagerImplementation,
    pub mutex_strategy: MutexStrategy,
    pub load_agent_order: Vec<LoadAgentSource>,
    pub auto_id_start: u64,
    pub dynamic_dispatch_disabled: bool,
    pub interactive_mode: bool,
    pub strict_agent_errors: bool,
    pub seed: u64,
}

impl KernelConfig {
    /// Total ticks for the run (`total_runtime_ms / base_granularity_ms`).
    #[inline]
    pub fn total_ticks(&self) -> u64 {
        self.total_runtime_ms as u64 / self.base_granularity_ms as u64
    }

    /// Warmup ticks (`total_warmup_ms / base_granularity_ms`).
    #[inline]
    pub fn warmup_ticks(&self) -> u64 {
        self.total_warmup_ms / self.base_granularity_ms as u64
    }

    /// `tickStep` for a group, in base ticks (`granularity_ms / base_granularity_ms`).
    pub fn tick_step(&self, group: &GroupSpec) -> u32 {
        group.granularity_ms / self.base_granularity_ms
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("baseGranularityMs must be positive")]
    ZeroGranularity,

    #[error("totalRuntimeMs ({total}) is not a multiple of baseGranularityMs ({base})")]
    RuntimeNotMultiple { total: u64, base: u32 },

    #[error("totalWarmupMs ({warmup}) is not a multiple of baseGranularityMs ({base})")]
    WarmupNotMultiple { warmup: u64, base: u32 },

    #[error("group {name:?}: granularityMs ({granularity}) is not a multiple of baseGranularityMs ({base})")]
    GroupGranularityNotMultiple {
        name: String,
        granularity: u32,
        base: u32,
    },

    #[error("at least one WorkGroup must be configured")]
    NoGroups,

    #[error("group {name:?} has zero workers")]
    GroupHasNoWorkers { name: String },
}

/// Fluent builder validating [`KernelConfig`] before construction, matching
/// the `XxxBuilder::new().option(...).build() -> Result<..>` convention used
/// throughout this workspace.
#[derive(Clone, Debug, Default)]
pub struct KernelConfigBuilder {
    base_granularity_ms: u32,
    total_runtime_ms: u64,
    total_warmup_ms: u64,
    groups: Vec<GroupSpec>,
    aura_manager_implementation: AuraManagerImplementation,
    mutex_strategy: MutexStrategy,
    load_agent_order: Vec<LoadAgentSource>,
    auto_id_start: u64,
    dynamic_dispatch_disabled: bool,
    interactive_mode: bool,
    strict_agent_errors: bool,
    seed: u64,
}

impl KernelConfigBuilder {
    pub fn new(base_granularity_ms: u32) -> Self {
        Self {
            base_granularity_ms,
            auto_id_start: 1,
            ..Default::default()
        }
    }

    pub fn total_runtime_ms(mut self, ms: u64) -> Self {
        self.total_runtime_ms = ms;
        self
    }

    pub fn total_warmup_ms(mut self, ms: u64) -> Self {
        self.total_warmup_ms = ms;
        self
    }

    pub fn group(mut self, name: impl Into<String>, num_workers: u32, granularity_ms: u32) -> Self {
        self.groups.push(GroupSpec {
            name: name.into(),
            num_workers,
            granularity_ms,
        });
        self
    }

    pub fn aura_manager_implementation(mut self, impl_: AuraManagerImplementation) -> Self {
        self.aura_manager_implementation = impl_;
        self
    }

    pub fn mutex_strategy(mut self, strategy: MutexStrategy) -> Self {
        self.mutex_strategy = strategy;
        self
    }

    pub fn load_agent_order(mut self, order: Vec<LoadAgentSource>) -> Self {
        self.load_agent_order = order;
        self
    }

    pub fn auto_id_start(mut self, start: u64) -> Self {
        self.auto_id_start = start;
        self
    }

    pub fn dynamic_dispatch_disabled(mut self, disabled: bool) -> Self {
        self.dynamic_dispatch_disabled = disabled;
        self
    }

    pub fn interactive_mode(mut self, enabled: bool) -> Self {
        self.interactive_mode = enabled;
        self
    }

    pub fn strict_agent_errors(mut self, strict: bool) -> Self {
        self.strict_agent_errors = strict;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Result<KernelConfig, ConfigError> {
        if self.base_granularity_ms == 0 {
            return Err(ConfigError::ZeroGranularity);
        }
        if self.total_runtime_ms % self.base_granularity_ms as u64 != 0 {
            return Err(ConfigError::RuntimeNotMultiple {
                total: self.total_runtime_ms,
                base: self.base_granularity_ms,
            });
        }
        if self.total_warmup_ms % self.base_granularity_ms as u64 != 0 {
            return Err(ConfigError::WarmupNotMultiple {
                warmup: self.total_warmup_ms,
                base: self.base_granularity_ms,
            });
        }
        if self.groups.is_empty() {
            return Err(ConfigError::NoGroups);
        }
        for g in &self.groups {
            if g.num_workers == 0 {
                return Err(ConfigError::GroupHasNoWorkers {
                    name: g.name.clone(),
                });
            }
            if g.granularity_ms % self.base_granularity_ms != 0 {
                return Err(ConfigError::GroupGranularityNotMultiple {
                    name: g.name.clone(),
                    granularity: g.granularity_ms,
                    base: self.base_granularity_ms,
                });
            }
        }

        Ok(KernelConfig {
            base_granularity_ms: self.base_granularity_ms,
            total_runtime_ms: self.total_runtime_ms,
            total_warmup_ms: self.total_warmup_ms,
            groups: self.groups,
            aura_manager_implementation: self.aura_manager_implementation,
            mutex_strategy: self.mutex_strategy,
            load_agent_order: self.load_agent_order,
            auto_id_start: self.auto_id_start,
            dynamic_dispatch_disabled: self.dynamic_dispatch_disabled,
            interactive_mode: self.interactive_mode,
            strict_agent_errors: self.strict_agent_errors,
            seed: self.seed,
        })
    }
}
