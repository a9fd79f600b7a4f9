//! Quantum teleportation.
//!
//! Alice holds a message qubit in the state `Y^y X^x |0⟩` and one half of a
//! Bell pair; Bob holds the other half. Alice measures her two qubits in
//! the Bell basis, and Bob's corrections, controlled by her results, leave
//! his qubit in the message state.

use rand::Rng;

use entangle_ir::{Circuit, IrResult, QubitId, StandardGate};
use entangle_sim::Statevector;

/// Measurement key for Alice's two bits `[message, alice]`.
pub const KEY: &str = "alice";

/// Qubit carrying the message state.
pub const MESSAGE: QubitId = QubitId(0);
/// Alice's half of the shared Bell pair.
pub const ALICE: QubitId = QubitId(1);
/// Bob's half of the Bell pair, which receives the message.
pub const BOB: QubitId = QubitId(2);

/// Teleportation of the state prepared by `X^x` then `Y^y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeleportationCircuit {
    x: f64,
    y: f64,
}

impl TeleportationCircuit {
    /// Teleport the state `Y^y X^x |0⟩`.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Draw both exponents uniformly from `[0, 1)`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.r#gen(), rng.r#gen())
    }

    /// The `(x, y)` exponents.
    pub fn exponents(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// The single-qubit state Alice wants to send.
    pub fn message_state(&self) -> Statevector {
        let mut state = Statevector::new(1);
        state.apply_gate(&StandardGate::XPow(self.x), &[QubitId(0)]);
        state.apply_gate(&StandardGate::YPow(self.y), &[QubitId(0)]);
        state
    }

    /// Build the protocol.
    pub fn circuit(&self) -> IrResult<Circuit> {
        let mut circuit = Circuit::new(3)?.with_name("teleportation");

        // Bell pair shared by Alice and Bob
        circuit.h(ALICE)?.cx(ALICE, BOB)?;

        // Message
        circuit.x_pow(self.x, MESSAGE)?.y_pow(self.y, MESSAGE)?;

        // Bell measurement
        circuit
            .cx(MESSAGE, ALICE)?
            .h(MESSAGE)?
            .measure(KEY, [MESSAGE, ALICE])?;

        // Corrections act on collapsed qubits, so they behave as
        // classically controlled gates.
        circuit.cx(ALICE, BOB)?.cz(MESSAGE, BOB)?;
        Ok(circuit)
    }

    /// Fidelity `⟨ψ|ρ|ψ⟩` of Bob's qubit in `state` with the message.
    pub fn bob_fidelity(&self, state: &Statevector) -> f64 {
        let psi = self.message_state();
        let psi = psi.amplitudes();
        let [r00, r01, r10, r11] = state.reduced_density_matrix(BOB.index());

        let fidelity = psi[0].conj() * (r00 * psi[0] + r01 * psi[1])
            + psi[1].conj() * (r10 * psi[0] + r11 * psi[1]);
        fidelity.re
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_message_state() {
        let zero = TeleportationCircuit::new(0.0, 0.0).message_state();
        assert!((zero.probability_of_one(0)).abs() < 1e-12);

        let one = TeleportationCircuit::new(1.0, 0.0).message_state();
        assert!((one.probability_of_one(0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_random_exponents_in_range() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..20 {
            let (x, y) = TeleportationCircuit::random(&mut rng).exponents();
            assert!((0.0..1.0).contains(&x));
            assert!((0.0..1.0).contains(&y));
        }
    }

    #[test]
    fn test_bell_measurement_is_mid_circuit() {
        let circuit = TeleportationCircuit::new(0.2, 0.4).circuit().unwrap();
        let measure_at = circuit
            .instructions()
            .iter()
            .position(|inst| inst.is_measure())
            .unwrap();
        assert!(measure_at < circuit.len() - 1);
        assert_eq!(circuit.measurement_keys(), vec![KEY]);
    }
}
