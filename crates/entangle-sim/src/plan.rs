//! Execution plan selection for repeated-shot runs.

use entangle_ir::{Circuit, InstructionKind};

use crate::config::Strategy;

/// How a repeated-shot run obtains its samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionPlan {
    /// Every measurement is terminal: evolve once, then draw every shot
    /// from the final distribution.
    Terminal,
    /// Some measurement feeds a later gate: re-execute the circuit with
    /// collapse for every shot.
    Replay,
}

impl ExecutionPlan {
    /// Choose a plan from the circuit's structure.
    ///
    /// A circuit needs replay when a non-identity gate touches a qubit
    /// after that qubit has been measured.
    pub fn analyze(circuit: &Circuit) -> Self {
        let mut measured = vec![false; circuit.num_qubits()];
        for inst in circuit.instructions() {
            match &inst.kind {
                InstructionKind::Measure { .. } => {
                    for q in &inst.qubits {
                        measured[q.index()] = true;
                    }
                }
                InstructionKind::Gate(gate) => {
                    if !gate.is_identity() && inst.qubits.iter().any(|q| measured[q.index()]) {
                        return ExecutionPlan::Replay;
                    }
                }
            }
        }
        ExecutionPlan::Terminal
    }

    /// Apply the configured strategy on top of [`analyze`](Self::analyze).
    pub fn select(circuit: &Circuit, strategy: Strategy) -> Self {
        match strategy {
            Strategy::Auto => Self::analyze(circuit),
            Strategy::ForceReplay => ExecutionPlan::Replay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entangle_ir::QubitId;

    #[test]
    fn test_terminal_measurements() {
        let mut circuit = Circuit::new(2).unwrap();
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.measure("a", [QubitId(0)]).unwrap();
        circuit.measure("b", [QubitId(1)]).unwrap();
        assert_eq!(ExecutionPlan::analyze(&circuit), ExecutionPlan::Terminal);
    }

    #[test]
    fn test_gate_after_measurement_needs_replay() {
        let mut circuit = Circuit::new(2).unwrap();
        circuit.h(QubitId(0)).unwrap();
        circuit.measure("a", [QubitId(0)]).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        assert_eq!(ExecutionPlan::analyze(&circuit), ExecutionPlan::Replay);
    }

    #[test]
    fn test_gates_on_unmeasured_qubits_stay_terminal() {
        let mut circuit = Circuit::new(3).unwrap();
        circuit.measure("a", [QubitId(0)]).unwrap();
        circuit.cx(QubitId(1), QubitId(2)).unwrap();
        circuit.i(QubitId(0)).unwrap();
        circuit.x_pow(2.0, QubitId(0)).unwrap();
        assert_eq!(ExecutionPlan::analyze(&circuit), ExecutionPlan::Terminal);
    }

    #[test]
    fn test_force_replay() {
        let circuit = Circuit::new(1).unwrap();
        assert_eq!(
            ExecutionPlan::select(&circuit, Strategy::ForceReplay),
            ExecutionPlan::Replay
        );
        assert_eq!(
            ExecutionPlan::select(&circuit, Strategy::Auto),
            ExecutionPlan::Terminal
        );
    }
}
