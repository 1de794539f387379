//! `SimBuilder` — validates a [`KernelConfig`] and wires together the
//! dispatch queue, the Aura Manager, the message bus, and the
//! `WorkGroupManager` that `Sim` drives.
//!
//! Grounded on the teacher's own `SimBuilder` (fluent `.option(val)` chain
//! ending in `.build() -> SimResult<Sim<..>>`), generalized from assembling
//! an `AgentStore`/`MobilityEngine`/`Router` to assembling a
//! `dt_workgroup::WorkGroupManager`.

use std::sync::Arc;

use dt_core::{KernelConfig, SharedLifecycleSink, WorkGroupId};
use dt_dispatch::{AssignmentPolicy, RoundRobinPolicy};
use dt_entity::Entity;
use dt_message::MessageBus;
use dt_spatial::build_aura_manager;
use dt_workgroup::WorkGroupManager;

use crate::{SimError, SimResult};

/// Builds a [`crate::Sim`] from a resolved [`KernelConfig`].
///
/// `M` is the application's message payload type, threaded straight through
/// to the underlying `dt_message::MessageBus<M>`.
pub struct SimBuilder<M: Send + 'static> {
    config: KernelConfig,
    single_threaded: bool,
    lifecycle: Option<SharedLifecycleSink>,
    message_bus: Option<Arc<MessageBus<M>>>,
    policy: Option<Box<dyn AssignmentPolicy>>,
    entities: Vec<Box<dyn Entity>>,
}

impl<M: Send + 'static> SimBuilder<M> {
    pub fn new(config: KernelConfig) -> Self {
        Self {
            config,
            single_threaded: false,
            lifecycle: None,
            message_bus: None,
            policy: None,
            entities: Vec::new(),
        }
    }

    /// Seeds one entity for dispatch once the run starts (at tick 0 if its
    /// `start_time_ms()` has already elapsed, otherwise once reached).
    pub fn entity(mut self, entity: Box<dyn Entity>) -> Self {
        self.entities.push(entity);
        self
    }

    /// Seeds a batch of entities; see [`Self::entity`].
    pub fn entities(mut self, entities: impl IntoIterator<Item = Box<dyn Entity>>) -> Self {
        self.entities.extend(entities);
        self
    }

    /// Drives every `WorkGroup` serially on the caller's own thread instead
    /// of spawning one OS thread per worker. Useful for tests and for the
    /// `--single-threaded` CLI flag (`SPEC_FULL.md` §6).
    pub fn single_threaded(mut self, enabled: bool) -> Self {
        self.single_threaded = enabled;
        self
    }

    /// Registers a sink for the `created`/`removed`/`exception` lifecycle
    /// markers every `Worker` emits — the kernel's only interpreted output.
    pub fn lifecycle_sink(mut self, sink: SharedLifecycleSink) -> Self {
        self.lifecycle = Some(sink);
        self
    }

    pub fn message_bus(mut self, bus: Arc<MessageBus<M>>) -> Self {
        self.message_bus = Some(bus);
        self
    }

    /// Overrides the default round-robin-over-the-first-group assignment
    /// policy (`SPEC_FULL.md` §4.6).
    pub fn policy(mut self, policy: Box<dyn AssignmentPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn build(self) -> SimResult<crate::Sim<M>> {
        let aura = build_aura_manager(self.config.aura_manager_implementation);
        let message_bus = self.message_bus.unwrap_or_else(|| Arc::new(MessageBus::new()));
        let policy = self
            .policy
            .unwrap_or_else(|| Box::new(RoundRobinPolicy::new(WorkGroupId(0))));

        let mut mgr = WorkGroupManager::new(
            self.config.base_granularity_ms,
            self.config.seed,
            self.config.auto_id_start,
            self.config.strict_agent_errors,
            self.single_threaded,
            self.config.dynamic_dispatch_disabled,
            self.config.interactive_mode,
            self.config.total_ticks(),
            aura,
            message_bus,
            policy,
            self.lifecycle,
        );

        for group in &self.config.groups {
            let tick_step = self.config.tick_step(group);
            mgr.create_work_group(group.num_workers, tick_step)
                .map_err(SimError::WorkGroup)?;
        }
        for entity in self.entities {
            mgr.dispatch_new_entity(entity);
        }
        mgr.init_all_groups().map_err(SimError::WorkGroup)?;

        Ok(crate::Sim::new(mgr))
    }
}
