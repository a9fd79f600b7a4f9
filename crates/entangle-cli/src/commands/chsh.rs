//! CHSH command implementation.

use anyhow::Result;

use entangle_demos::circuits::ChshGame;
use entangle_demos::circuits::chsh::{CLASSICAL_WIN_RATE, QUANTUM_WIN_RATE};
use entangle_demos::{print_failure, print_header, print_result, print_section, print_success};
use entangle_sim::Simulator;

use super::common::{create_simulator, print_circuit, run_and_report};
use crate::RunArgs;

/// Execute the chsh command.
pub fn execute(args: &RunArgs) -> Result<()> {
    print_header("CHSH Game");
    let mut sim = create_simulator(args)?;
    play(&mut sim, args.shots)
}

/// Play `shots` rounds and report the win rate.
pub fn play(sim: &mut Simulator, shots: usize) -> Result<()> {
    print_section("Circuit");
    let circuit = ChshGame::circuit()?;
    print_circuit(&circuit);

    print_section("Rounds");
    let result = run_and_report(sim, &circuit, shots)?;
    let score = ChshGame::score(&result)?;

    println!();
    print_result("Rounds won", format!("{} / {}", score.wins, score.rounds));
    print_result("Win rate", format!("{:.2}%", score.win_rate() * 100.0));
    print_result("Classical bound", format!("{:.2}%", CLASSICAL_WIN_RATE * 100.0));
    print_result("Quantum optimum", format!("{:.2}%", QUANTUM_WIN_RATE * 100.0));

    if score.beats_classical() {
        print_success("Entangled players beat every classical strategy");
    } else {
        print_failure("Win rate within the classical bound (try more shots)");
    }
    Ok(())
}
