//! Single-qubit warm-up circuits.

use entangle_ir::{Circuit, IrResult, QubitId};

/// Measurement key used by every circuit in this module.
pub const KEY: &str = "m";

/// `X` followed by a measurement: always reads `1`.
pub fn not_circuit() -> IrResult<Circuit> {
    let mut circuit = Circuit::new(1)?.with_name("not");
    circuit.x(QubitId(0))?.measure(KEY, [QubitId(0)])?;
    Ok(circuit)
}

/// `H` followed by a measurement: a fair coin.
pub fn hadamard_circuit() -> IrResult<Circuit> {
    let mut circuit = Circuit::new(1)?.with_name("hadamard");
    circuit.h(QubitId(0))?.measure(KEY, [QubitId(0)])?;
    Ok(circuit)
}

/// A lone identity gate, for inspecting the untouched `|0⟩` state.
pub fn identity_circuit() -> IrResult<Circuit> {
    let mut circuit = Circuit::new(1)?.with_name("identity");
    circuit.i(QubitId(0))?;
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes() {
        assert_eq!(not_circuit().unwrap().measurement_keys(), vec![KEY]);
        assert_eq!(hadamard_circuit().unwrap().len(), 2);

        let identity = identity_circuit().unwrap();
        assert!(!identity.has_measurements());
        assert_eq!(identity.num_gates(), 1);
    }
}
