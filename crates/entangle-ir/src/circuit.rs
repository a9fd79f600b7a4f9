//! High-level circuit builder API.

use rustc_hash::FxHashSet;
use std::fmt;

use crate::error::{CircuitError, IrResult};
use crate::gate::{GateKind, StandardGate};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::QubitId;
use crate::render::TextDiagram;

/// Largest register a circuit accepts unless a different limit is given.
///
/// A dense statevector over 24 qubits is 2^24 complex doubles (256 MiB).
pub const DEFAULT_MAX_QUBITS: u32 = 24;

/// A quantum circuit.
///
/// An ordered list of validated instructions over a fixed-size register.
/// Every instruction is checked when it is appended, so a `Circuit` value
/// is always well formed: targets are in range and distinct, gate arity
/// matches, and measurement keys are unique.
#[derive(Debug, Clone)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Register size.
    num_qubits: u32,
    /// Instructions in time order.
    instructions: Vec<Instruction>,
    /// Measurement keys seen so far.
    keys: FxHashSet<String>,
}

impl Circuit {
    /// Create an empty circuit over `num_qubits` qubits.
    ///
    /// Fails with [`CircuitError::InvalidSize`] for zero qubits or more
    /// than [`DEFAULT_MAX_QUBITS`].
    pub fn new(num_qubits: u32) -> IrResult<Self> {
        Self::with_limit(num_qubits, DEFAULT_MAX_QUBITS)
    }

    /// Create an empty circuit, bounding the register by `max_qubits`.
    pub fn with_limit(num_qubits: u32, max_qubits: u32) -> IrResult<Self> {
        if num_qubits == 0 || num_qubits > max_qubits {
            return Err(CircuitError::InvalidSize {
                num_qubits,
                max: max_qubits,
            });
        }
        Ok(Self {
            name: "circuit".into(),
            num_qubits,
            instructions: vec![],
            keys: FxHashSet::default(),
        })
    }

    /// Set the circuit name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Validate and append an instruction.
    pub fn append(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.validate(&instruction)?;
        if let InstructionKind::Measure { key } = &instruction.kind {
            self.keys.insert(key.clone());
        }
        self.instructions.push(instruction);
        Ok(self)
    }

    /// Append an operation described by its parts.
    ///
    /// `parameter` is the exponent of a parametrized gate and `key` the
    /// measurement key; each must be present exactly when `kind` needs it.
    pub fn append_op(
        &mut self,
        kind: GateKind,
        targets: &[QubitId],
        parameter: Option<f64>,
        key: Option<&str>,
    ) -> IrResult<()> {
        let instruction = match (kind.with_parameter(parameter)?, key) {
            (Some(gate), None) => Instruction::gate(gate, targets.iter().copied()),
            (Some(gate), Some(_)) => {
                return Err(CircuitError::UnexpectedParameter(
                    gate.name().into(),
                    "a measurement key",
                ));
            }
            (None, Some(key)) => Instruction::measure(key, targets.iter().copied()),
            (None, None) => Instruction::measure(self.default_key(), targets.iter().copied()),
        };
        self.append(instruction)?;
        Ok(())
    }

    /// Append every instruction in order, stopping at the first invalid one.
    pub fn extend(
        &mut self,
        instructions: impl IntoIterator<Item = Instruction>,
    ) -> IrResult<&mut Self> {
        for instruction in instructions {
            self.append(instruction)?;
        }
        Ok(self)
    }

    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = || Some(instruction.name().to_string());

        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let got = instruction.qubits.len() as u32;
                if got != gate.num_qubits() {
                    return Err(CircuitError::ArityMismatch {
                        gate_name: gate.name().into(),
                        expected: gate.num_qubits(),
                        got,
                    });
                }
                if let Some(t) = gate.exponent().filter(|t| !t.is_finite()) {
                    return Err(CircuitError::InvalidParameter(gate.name().into(), t));
                }
            }
            InstructionKind::Measure { key } => {
                if instruction.qubits.is_empty() {
                    return Err(CircuitError::ArityMismatch {
                        gate_name: "measure".into(),
                        expected: 1,
                        got: 0,
                    });
                }
                if self.keys.contains(key) {
                    return Err(CircuitError::DuplicateKey(key.clone()));
                }
            }
        }

        for (i, &qubit) in instruction.qubits.iter().enumerate() {
            if qubit.0 >= self.num_qubits {
                return Err(CircuitError::QubitOutOfRange {
                    qubit,
                    num_qubits: self.num_qubits,
                    gate_name: gate_name(),
                });
            }
            if instruction.qubits[..i].contains(&qubit) {
                return Err(CircuitError::DuplicateTarget {
                    qubit,
                    gate_name: gate_name(),
                });
            }
        }
        Ok(())
    }

    /// First unused key of the form `m{n}`.
    fn default_key(&self) -> String {
        (0..)
            .map(|n| format!("m{n}"))
            .find(|k| !self.keys.contains(k))
            .unwrap_or_default()
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply identity gate.
    pub fn i(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::I, qubit))
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::Y, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::Z, qubit))
    }

    /// Apply `X^t`.
    pub fn x_pow(&mut self, t: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::XPow(t), qubit))
    }

    /// Apply `Y^t`.
    pub fn y_pow(&mut self, t: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::YPow(t), qubit))
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::two_qubit_gate(
            StandardGate::CX,
            control,
            target,
        ))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::two_qubit_gate(StandardGate::CZ, q1, q2))
    }

    /// Apply controlled `X^t`.
    pub fn cx_pow(&mut self, t: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::two_qubit_gate(
            StandardGate::CXPow(t),
            control,
            target,
        ))
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Measure `qubits` under `key`.
    pub fn measure(
        &mut self,
        key: impl Into<String>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.append(Instruction::measure(key, qubits))
    }

    /// Measure every qubit, in index order, under `key`.
    pub fn measure_all(&mut self, key: impl Into<String>) -> IrResult<&mut Self> {
        let qubits = QubitId::range(self.num_qubits);
        self.append(Instruction::measure(key, qubits))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Instructions in time order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Number of gate instructions.
    pub fn num_gates(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_gate()).count()
    }

    /// Measurement instructions, in circuit order.
    pub fn measurements(&self) -> impl Iterator<Item = (&str, &[QubitId])> {
        self.instructions.iter().filter_map(|inst| {
            inst.measurement_key()
                .map(|key| (key, inst.qubits.as_slice()))
        })
    }

    /// Measurement keys, in circuit order.
    pub fn measurement_keys(&self) -> Vec<&str> {
        self.measurements().map(|(key, _)| key).collect()
    }

    /// Whether the circuit measures anything.
    pub fn has_measurements(&self) -> bool {
        !self.keys.is_empty()
    }

    /// Circuit depth when instructions are packed as early as possible.
    pub fn depth(&self) -> usize {
        let mut frontier = vec![0usize; self.num_qubits as usize];
        for inst in &self.instructions {
            let layer = inst
                .qubits
                .iter()
                .map(|q| frontier[q.index()])
                .max()
                .unwrap_or(0)
                + 1;
            for q in &inst.qubits {
                frontier[q.index()] = layer;
            }
        }
        frontier.into_iter().max().unwrap_or(0)
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a GHZ state circuit measured under key `ghz`.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::new(n)?.with_name("ghz");

        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }
        circuit.measure_all("ghz")?;

        Ok(circuit)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", TextDiagram::new(self))
    }
}
