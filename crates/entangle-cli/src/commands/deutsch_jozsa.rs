//! Deutsch-Jozsa command implementation.

use anyhow::Result;

use entangle_demos::circuits::deutsch_jozsa::{self, classify};
use entangle_demos::circuits::Oracle;
use entangle_demos::{print_header, print_result, print_section, print_success};
use entangle_sim::{Simulator, aggregate};

use super::common::{create_simulator, print_circuit, run_and_report};
use crate::RunArgs;

/// Execute the deutsch-jozsa command.
pub fn execute(args: &RunArgs, oracle: Oracle) -> Result<()> {
    print_header("Deutsch-Jozsa");
    let mut sim = create_simulator(args)?;
    query(&mut sim, args.shots, oracle)
}

/// Query `oracle` once per shot and classify it.
pub fn query(sim: &mut Simulator, shots: usize, oracle: Oracle) -> Result<()> {
    print_section(&format!("Oracle {oracle}"));
    let circuit = oracle.circuit()?;
    print_circuit(&circuit);

    let result = run_and_report(sim, &circuit, shots)?;
    let counts = aggregate(&result, deutsch_jozsa::KEY)?;
    let Some((bit, _)) = counts.most_frequent() else {
        return Ok(());
    };

    let verdict = classify(bit == "1");
    println!();
    print_result("Verdict", verdict);
    print_result("Expected", oracle.class());
    if verdict != oracle.class() {
        anyhow::bail!("Misclassified oracle {oracle} as {verdict}");
    }
    print_success(&format!("{oracle} is {verdict}"));
    Ok(())
}
