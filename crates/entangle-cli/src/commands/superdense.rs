//! Superdense command implementation.

use anyhow::Result;

use entangle_demos::circuits::Message;
use entangle_demos::{print_header, print_section, print_success};
use entangle_sim::Simulator;

use super::common::{create_simulator, print_circuit, run_and_report};
use crate::RunArgs;

/// Execute the superdense command.
pub fn execute(args: &RunArgs, message: Message) -> Result<()> {
    print_header("Superdense Coding");
    let mut sim = create_simulator(args)?;
    send(&mut sim, args.shots, message)
}

/// Send one message and check Bob's decoding.
pub fn send(sim: &mut Simulator, shots: usize, message: Message) -> Result<()> {
    print_section(&format!("Message {message}"));
    let circuit = message.circuit()?;
    print_circuit(&circuit);

    let result = run_and_report(sim, &circuit, shots)?;
    match Message::decode(&result)? {
        Some(decoded) if decoded == message => {
            print_success(&format!("Bob decoded {decoded}"));
            Ok(())
        }
        Some(decoded) => anyhow::bail!("Sent {message} but Bob decoded {decoded}"),
        None => {
            print_success("Nothing sent (0 shots)");
            Ok(())
        }
    }
}
