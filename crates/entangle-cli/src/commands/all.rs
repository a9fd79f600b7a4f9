//! All command implementation.

use anyhow::Result;

use entangle_demos::circuits::{BellState, Message, Oracle, TeleportationCircuit};
use entangle_demos::{print_header, print_success};

use super::common::create_simulator;
use super::{bell, chsh, deutsch_jozsa, superdense, teleport};
use crate::RunArgs;

/// Execute every protocol in turn on one simulator.
pub fn execute(args: &RunArgs) -> Result<()> {
    super::basics::execute(args)?;
    let mut sim = create_simulator(args)?;

    print_header("Bell States");
    for state in BellState::ALL {
        bell::show(&mut sim, args.shots, state)?;
    }

    print_header("CHSH Game");
    chsh::play(&mut sim, args.shots)?;

    print_header("Quantum Teleportation");
    let mut rng = rand::thread_rng();
    teleport::teleport(&mut sim, args.shots, TeleportationCircuit::random(&mut rng))?;

    print_header("Superdense Coding");
    for message in Message::ALL {
        superdense::send(&mut sim, args.shots, message)?;
    }

    print_header("Deutsch-Jozsa");
    for oracle in Oracle::ALL {
        deutsch_jozsa::query(&mut sim, args.shots, oracle)?;
    }

    println!();
    print_success("All protocols behaved as expected");
    Ok(())
}
