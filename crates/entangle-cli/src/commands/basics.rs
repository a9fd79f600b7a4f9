//! Basics command implementation.

use anyhow::Result;

use entangle_demos::circuits::basics::{hadamard_circuit, identity_circuit, not_circuit};
use entangle_demos::{print_header, print_section};

use super::common::{create_simulator, print_circuit, print_state, run_and_report};
use crate::RunArgs;

/// Execute the basics command.
pub fn execute(args: &RunArgs) -> Result<()> {
    print_header("Single-Qubit Basics");
    let mut sim = create_simulator(args)?;

    print_section("NOT");
    let circuit = not_circuit()?;
    print_circuit(&circuit);
    run_and_report(&mut sim, &circuit, args.shots)?;

    print_section("Hadamard");
    let circuit = hadamard_circuit()?;
    print_circuit(&circuit);
    run_and_report(&mut sim, &circuit, args.shots)?;

    print_section("Identity");
    let circuit = identity_circuit()?;
    print_circuit(&circuit);
    println!();
    print_state(&sim.final_state(&circuit)?);

    Ok(())
}
