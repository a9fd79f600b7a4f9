//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use tracing::info;

use entangle_demos::{print_diagram, print_histogram, print_result};
use entangle_ir::Circuit;
use entangle_sim::{RunResult, Simulator, SimulatorConfig, Statevector, Strategy, aggregate};

use crate::RunArgs;

/// Load a simulator configuration from a JSON file.
pub fn load_config(path: &Path) -> Result<SimulatorConfig> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let config = SimulatorConfig::from_json(&source)
        .with_context(|| format!("Failed to load configuration: {}", path.display()))?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Merge the config file (if any) with command-line overrides.
pub fn resolve_config(args: &RunArgs) -> Result<SimulatorConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SimulatorConfig::default(),
    };

    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(workers) = args.workers {
        config = config.with_workers(workers);
    }
    if args.replay {
        config = config.with_strategy(Strategy::ForceReplay);
    }
    Ok(config)
}

/// Build a simulator from the resolved configuration.
pub fn create_simulator(args: &RunArgs) -> Result<Simulator> {
    let config = resolve_config(args)?;
    Ok(Simulator::with_config(config)?)
}

/// Print a circuit's summary line and diagram.
pub fn print_circuit(circuit: &Circuit) {
    println!(
        "  {} {} qubits, depth {}",
        style(circuit.name()).green(),
        circuit.num_qubits(),
        circuit.depth()
    );
    println!();
    print_diagram(circuit);
}

/// Run `circuit` and print a histogram for every measurement key.
pub fn run_and_report(sim: &mut Simulator, circuit: &Circuit, shots: usize) -> Result<RunResult> {
    let result = sim.run(circuit, shots)?;
    for key in result.keys() {
        print_histogram(key, &aggregate(&result, key)?);
    }
    Ok(result)
}

/// Print every amplitude with its basis label, `q0` leftmost.
pub fn print_state(state: &Statevector) {
    let n = state.num_qubits();
    for (index, amplitude) in state.amplitudes().iter().enumerate() {
        let label: String = (0..n)
            .map(|q| if index >> q & 1 == 1 { '1' } else { '0' })
            .collect();
        print_result(&format!("|{label}⟩"), format!("{amplitude:.4}"));
    }
}
