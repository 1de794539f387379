//! Scenario file shape consumed by `simulate`.
//!
//! `dt-core::KernelConfig` models the already-resolved kernel config; a
//! scenario file additionally names the handful of demo-only knobs (agent
//! count, output directory) that this binary — standing in for the road
//! network and behavior-model loaders `SPEC_FULL.md` §6 keeps external —
//! needs to build something runnable.

use std::path::PathBuf;

use serde::Deserialize;

use dt_core::config::{
    AuraManagerImplementation, GroupSpec, LoadAgentSource, MutexStrategy,
};
use dt_core::{ConfigError, KernelConfig, KernelConfigBuilder};

#[derive(Debug, Deserialize)]
pub struct ScenarioFile {
    pub kernel: KernelSection,

    #[serde(default = "default_agent_count")]
    pub agent_count: usize,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_agent_count() -> usize {
    100
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./out")
}

/// Plain deserialization target for `[kernel]` — kept separate from
/// `KernelConfig` itself so invalid combinations go through
/// `KernelConfigBuilder::build`'s typed `ConfigError` instead of failing an
/// ad hoc `serde` invariant.
#[derive(Debug, Deserialize)]
pub struct KernelSection {
    pub base_granularity_ms: u32,
    pub total_runtime_ms: u64,
    #[serde(default)]
    pub total_warmup_ms: u64,
    pub groups: Vec<GroupSpec>,
    #[serde(default)]
    pub aura_manager_implementation: AuraManagerImplementation,
    #[serde(default)]
    pub mutex_strategy: MutexStrategy,
    #[serde(default)]
    pub load_agent_order: Vec<LoadAgentSource>,
    #[serde(default = "default_auto_id_start")]
    pub auto_id_start: u64,
    #[serde(default)]
    pub dynamic_dispatch_disabled: bool,
    #[serde(default)]
    pub interactive_mode: bool,
    #[serde(default)]
    pub strict_agent_errors: bool,
    #[serde(default)]
    pub seed: u64,
}

fn default_auto_id_start() -> u64 {
    1
}

impl KernelSection {
    pub fn build(self) -> Result<KernelConfig, ConfigError> {
        let mut builder = KernelConfigBuilder::new(self.base_granularity_ms)
            .total_runtime_ms(self.total_runtime_ms)
            .total_warmup_ms(self.total_warmup_ms)
            .aura_manager_implementation(self.aura_manager_implementation)
            .mutex_strategy(self.mutex_strategy)
            .load_agent_order(self.load_agent_order)
            .auto_id_start(self.auto_id_start)
            .dynamic_dispatch_disabled(self.dynamic_dispatch_disabled)
            .interactive_mode(self.interactive_mode)
            .strict_agent_errors(self.strict_agent_errors)
            .seed(self.seed);

        for group in self.groups {
            builder = builder.group(group.name, group.num_workers, group.granularity_ms);
        }

        builder.build()
    }
}
