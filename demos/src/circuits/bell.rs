//! The four Bell states.

use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;
use std::str::FromStr;

use entangle_ir::{Circuit, Instruction, IrResult, QubitId, StandardGate};
use num_complex::Complex64;

use crate::ParseChoiceError;

/// Measurement key for both qubits.
pub const KEY: &str = "z";

const Q0: QubitId = QubitId(0);
const Q1: QubitId = QubitId(1);

/// A maximally entangled two-qubit state.
///
/// Bitstrings name `q0` first, so `|01⟩` has `q0 = 0` and `q1 = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BellState {
    /// `(|00⟩ + |11⟩)/√2`
    PhiPlus,
    /// `(|00⟩ - |11⟩)/√2`
    PhiMinus,
    /// `(|01⟩ + |10⟩)/√2`
    PsiPlus,
    /// `(|01⟩ - |10⟩)/√2`
    PsiMinus,
}

impl BellState {
    /// Every Bell state.
    pub const ALL: [BellState; 4] = [
        BellState::PhiPlus,
        BellState::PhiMinus,
        BellState::PsiPlus,
        BellState::PsiMinus,
    ];

    /// Short name accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            BellState::PhiPlus => "phi+",
            BellState::PhiMinus => "phi-",
            BellState::PsiPlus => "psi+",
            BellState::PsiMinus => "psi-",
        }
    }

    /// Ket notation.
    pub fn symbol(&self) -> &'static str {
        match self {
            BellState::PhiPlus => "|Φ+⟩",
            BellState::PhiMinus => "|Φ-⟩",
            BellState::PsiPlus => "|Ψ+⟩",
            BellState::PsiMinus => "|Ψ-⟩",
        }
    }

    /// Gates preparing the state from `|00⟩`.
    pub fn preparation(&self) -> Vec<Instruction> {
        let gate = Instruction::single_qubit_gate;
        let mut ops = match self {
            BellState::PhiPlus => vec![],
            BellState::PhiMinus => vec![gate(StandardGate::X, Q0)],
            BellState::PsiPlus => vec![gate(StandardGate::X, Q1)],
            BellState::PsiMinus => vec![gate(StandardGate::X, Q1)],
        };
        ops.push(gate(StandardGate::H, Q0));
        if *self == BellState::PsiMinus {
            ops.push(gate(StandardGate::Z, Q0));
            ops.push(gate(StandardGate::Z, Q1));
        }
        ops.push(Instruction::two_qubit_gate(StandardGate::CX, Q0, Q1));
        ops
    }

    /// Build the preparation circuit, optionally measuring both qubits
    /// under [`KEY`].
    pub fn circuit(&self, measure: bool) -> IrResult<Circuit> {
        let mut circuit = Circuit::new(2)?.with_name(format!("bell {}", self.name()));
        circuit.extend(self.preparation())?;
        if measure {
            circuit.measure(KEY, [Q0, Q1])?;
        }
        Ok(circuit)
    }

    /// The two bitstrings a measurement can produce.
    pub fn outcomes(&self) -> [&'static str; 2] {
        match self {
            BellState::PhiPlus | BellState::PhiMinus => ["00", "11"],
            BellState::PsiPlus | BellState::PsiMinus => ["01", "10"],
        }
    }

    /// Textbook amplitudes, in basis-index order.
    pub fn amplitudes(&self) -> [Complex64; 4] {
        let zero = Complex64::new(0.0, 0.0);
        let plus = Complex64::new(FRAC_1_SQRT_2, 0.0);
        // basis index = q0 + 2·q1
        match self {
            BellState::PhiPlus => [plus, zero, zero, plus],
            BellState::PhiMinus => [plus, zero, zero, -plus],
            BellState::PsiPlus => [zero, plus, plus, zero],
            BellState::PsiMinus => [zero, -plus, plus, zero],
        }
    }
}

impl fmt::Display for BellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for BellState {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                ParseChoiceError::new("Bell state", s, &Self::ALL.map(|state| state.name()))
            })
    }
}
