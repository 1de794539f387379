//! `simulate` — CLI driver for the rust_dt simulation kernel.
//!
//! Loads a resolved [`dt_core::KernelConfig`] plus a small scenario section
//! (agent count, output directory) from a TOML file, builds a `Sim` with a
//! demo random-walk population, and runs it to completion, printing a
//! tick-cadence progress line and writing the kernel's lifecycle-marker
//! stream through `dt-output`.
//!
//! `SPEC_FULL.md` §6 only asks for `simulate <config-path> [--single-threaded]
//! [--strict]`; road-network loading, behavior models, and per-role output
//! are external collaborators the kernel does not implement, so this binary
//! stands in for all three with the smallest demo that exercises the full
//! phase cycle end to end.

mod behavior;
mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{info, warn};

use dt_core::{AgentRng, Tick};
use dt_entity::{Agent, RoleKind};
use dt_output::{CsvWriter, SimOutputObserver};
use dt_sim::{SimBuilder, SimObserver};

use behavior::RandomWalkBehavior;
use config::ScenarioFile;

/// Agent-based urban traffic micro-simulator — core kernel driver.
#[derive(Parser, Debug)]
#[command(name = "simulate", version, about)]
struct Cli {
    /// Path to a scenario TOML file (see `demos/dt-cli/README` for the shape).
    config_path: PathBuf,

    /// Run every WorkGroup serially on this thread instead of spawning one
    /// OS thread per worker.
    #[arg(long)]
    single_threaded: bool,

    /// Terminate the run on the first entity `frame_tick` error instead of
    /// retiring the offending entity.
    #[arg(long)]
    strict: bool,
}

struct ProgressObserver {
    every: u64,
}

impl SimObserver for ProgressObserver {
    fn on_tick_end(&mut self, tick: Tick) {
        if self.every != 0 && tick.0 % self.every == 0 {
            info!(tick = tick.0, "tick complete");
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        info!(final_tick = final_tick.0, "simulation finished");
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let raw = std::fs::read_to_string(&cli.config_path)
        .map_err(|e| anyhow::anyhow!("reading {}: {e}", cli.config_path.display()))?;
    let scenario: ScenarioFile = toml::from_str(&raw)
        .map_err(|e| anyhow::anyhow!("parsing {}: {e}", cli.config_path.display()))?;

    let mut kernel = scenario.kernel.build()?;
    if cli.strict {
        kernel.strict_agent_errors = true;
    }

    info!(
        base_granularity_ms = kernel.base_granularity_ms,
        total_ticks = kernel.total_ticks(),
        groups = kernel.groups.len(),
        single_threaded = cli.single_threaded,
        "kernel config resolved",
    );

    std::fs::create_dir_all(&scenario.output_dir)?;
    let sink = std::sync::Arc::new(SimOutputObserver::new(CsvWriter::new(&scenario.output_dir)?));

    let mut builder = SimBuilder::<()>::new(kernel.clone())
        .single_threaded(cli.single_threaded)
        .lifecycle_sink(sink.clone());

    // Every demo agent is known up front, so ids are assigned directly
    // rather than through `Sim::id_allocator` (reserved for entities
    // discovered mid-run, per `SPEC_FULL.md` §4.6).
    for i in 0..scenario.agent_count {
        let id = dt_core::EntityId(i as u64);
        let behavior = RandomWalkBehavior::new(AgentRng::new(kernel.seed, dt_core::AgentId(i as u32)));
        let start_time_ms = (i as u64 % 5) * kernel.base_granularity_ms as u64;
        let agent = Agent::new(id, RoleKind::Driver, start_time_ms, Box::new(behavior));
        builder = builder.entity(Box::new(agent));
    }

    let mut sim = builder.build()?;
    let mut observer = ProgressObserver { every: 10 };
    let run_result = sim.run(&mut observer);

    sink.finish()?;
    if let Some(err) = sink.take_error() {
        warn!(%err, "lifecycle output writer reported an error");
    }

    run_result?;

    for name in sim.retrieve_out_file_names() {
        info!(file = %name, "worker output file");
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("simulate: error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
