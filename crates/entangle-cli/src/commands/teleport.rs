//! Teleport command implementation.

use anyhow::Result;
use rand::Rng;
use tracing::debug;

use entangle_demos::circuits::TeleportationCircuit;
use entangle_demos::circuits::teleportation::{self, BOB};
use entangle_demos::{print_header, print_info, print_result, print_section, print_success};
use entangle_sim::Simulator;

use super::common::{create_simulator, print_circuit, run_and_report};
use crate::RunArgs;

/// Allowed deviation of Bob's fidelity from 1.
const FIDELITY_TOLERANCE: f64 = 1e-6;

/// Execute the teleport command.
pub fn execute(args: &RunArgs, x: Option<f64>, y: Option<f64>) -> Result<()> {
    print_header("Quantum Teleportation");
    let mut sim = create_simulator(args)?;

    let mut rng = rand::thread_rng();
    let x = x.unwrap_or_else(|| rng.r#gen());
    let y = y.unwrap_or_else(|| rng.r#gen());
    teleport(&mut sim, args.shots, TeleportationCircuit::new(x, y))
}

/// Teleport one message and report Bob's fidelity.
pub fn teleport(sim: &mut Simulator, shots: usize, protocol: TeleportationCircuit) -> Result<()> {
    let (x, y) = protocol.exponents();
    print_section(&format!("Message Y^{y:.3} X^{x:.3} |0⟩"));

    let circuit = protocol.circuit()?;
    print_circuit(&circuit);

    let [mx, my, mz] = protocol.message_state().bloch_vector(0);
    println!();
    print_result("Message Bloch vector", format!("({mx:+.4}, {my:+.4}, {mz:+.4})"));

    let simulation = sim.simulate(&circuit)?;
    let alice = simulation
        .outcome
        .bitstring(teleportation::KEY)
        .unwrap_or_default();
    let [bx, by, bz] = simulation.state.bloch_vector(BOB.index());
    let fidelity = protocol.bob_fidelity(&simulation.state);
    debug!(%alice, fidelity, "Single teleportation");

    print_result("Alice measured", &alice);
    print_result("Bob's Bloch vector", format!("({bx:+.4}, {by:+.4}, {bz:+.4})"));
    print_result("Fidelity", format!("{fidelity:.6}"));

    if fidelity.is_nan() || (fidelity - 1.0).abs() > FIDELITY_TOLERANCE {
        anyhow::bail!("Teleportation lost the message (fidelity {fidelity:.6})");
    }
    print_success("Bob holds the message state");

    print_section("Alice's outcomes");
    run_and_report(sim, &circuit, shots)?;
    print_info("Each outcome is equally likely, whatever the message");
    Ok(())
}
