//! Bell command implementation.

use anyhow::Result;

use entangle_demos::circuits::{BellState, bell};
use entangle_demos::{print_header, print_result, print_section, print_success};
use entangle_sim::{Simulator, Statevector, aggregate};

use super::common::{create_simulator, print_circuit, print_state, run_and_report};
use crate::RunArgs;

/// Execute the bell command.
pub fn execute(args: &RunArgs, state: BellState) -> Result<()> {
    print_header(&format!("Bell State {state}"));
    let mut sim = create_simulator(args)?;
    show(&mut sim, args.shots, state)
}

/// Print the final state of one Bell preparation and sample it.
pub fn show(sim: &mut Simulator, shots: usize, state: BellState) -> Result<()> {
    print_section(&format!("{} ({})", state.symbol(), state.name()));

    let circuit = state.circuit(true)?;
    print_circuit(&circuit);
    println!();

    let prepared = sim.final_state(&state.circuit(false)?)?;
    print_state(&prepared);

    let reference = Statevector::from_amplitudes(state.amplitudes().to_vec())
        .ok_or_else(|| anyhow::anyhow!("Malformed reference state for {state}"))?;
    let fidelity = prepared.fidelity(&reference).unwrap_or(0.0);
    print_result("Fidelity with reference", format!("{fidelity:.6}"));

    let result = run_and_report(sim, &circuit, shots)?;
    let counts = aggregate(&result, bell::KEY)?;
    let [first, second] = state.outcomes();
    if counts.get(first) + counts.get(second) == counts.total() {
        print_success(&format!("Only {first} and {second} observed"));
    } else {
        anyhow::bail!("{state} produced uncorrelated outcomes");
    }
    Ok(())
}
