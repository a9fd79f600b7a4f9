//! Deutsch-Jozsa on a one-bit function.
//!
//! The oracle maps `|x⟩|y⟩` to `|x⟩|y ⊕ f(x)⟩`. With the output qubit in
//! `|−⟩`, `f(x)` kicks back as a phase, and one query tells a constant
//! `f` from a balanced one.

use std::fmt;
use std::str::FromStr;

use entangle_ir::{Circuit, Instruction, IrResult, QubitId, StandardGate};

use crate::ParseChoiceError;

/// Measurement key for the input qubit.
pub const KEY: &str = "result";

const INPUT: QubitId = QubitId(0);
const OUTPUT: QubitId = QubitId(1);

/// Whether a one-bit function is constant or balanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionClass {
    Constant,
    Balanced,
}

impl fmt::Display for FunctionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionClass::Constant => f.write_str("constant"),
            FunctionClass::Balanced => f.write_str("balanced"),
        }
    }
}

/// Interpret the measured input qubit: `0` means constant.
pub fn classify(bit: bool) -> FunctionClass {
    if bit {
        FunctionClass::Balanced
    } else {
        FunctionClass::Constant
    }
}

/// The four functions `{0, 1} → {0, 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Oracle {
    /// `f(x) = 0`
    Constant0,
    /// `f(x) = 1`
    Constant1,
    /// `f(x) = x`
    Balanced,
    /// `f(x) = ¬x`
    BalancedNot,
}

impl Oracle {
    /// Every oracle.
    pub const ALL: [Oracle; 4] = [
        Oracle::Constant0,
        Oracle::Constant1,
        Oracle::Balanced,
        Oracle::BalancedNot,
    ];

    /// Short name accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Oracle::Constant0 => "constant0",
            Oracle::Constant1 => "constant1",
            Oracle::Balanced => "balanced",
            Oracle::BalancedNot => "balanced-not",
        }
    }

    /// `f(x)` for plain inputs.
    pub fn evaluate(&self, x: bool) -> bool {
        match self {
            Oracle::Constant0 => false,
            Oracle::Constant1 => true,
            Oracle::Balanced => x,
            Oracle::BalancedNot => !x,
        }
    }

    /// The class the algorithm should report.
    pub fn class(&self) -> FunctionClass {
        if self.evaluate(false) == self.evaluate(true) {
            FunctionClass::Constant
        } else {
            FunctionClass::Balanced
        }
    }

    /// Gates implementing `|x⟩|y⟩ → |x⟩|y ⊕ f(x)⟩`.
    pub fn operations(&self) -> Vec<Instruction> {
        let flip = || Instruction::single_qubit_gate(StandardGate::X, OUTPUT);
        let copy = || Instruction::two_qubit_gate(StandardGate::CX, INPUT, OUTPUT);
        match self {
            Oracle::Constant0 => vec![],
            Oracle::Constant1 => vec![flip()],
            Oracle::Balanced => vec![copy()],
            Oracle::BalancedNot => vec![copy(), flip()],
        }
    }

    /// Build the one-query circuit, measuring the input qubit.
    pub fn circuit(&self) -> IrResult<Circuit> {
        let mut circuit = Circuit::new(2)?.with_name(format!("deutsch-jozsa {}", self.name()));
        circuit.x(OUTPUT)?.h(INPUT)?.h(OUTPUT)?;
        circuit.extend(self.operations())?;
        circuit.h(INPUT)?.measure(KEY, [INPUT])?;
        Ok(circuit)
    }
}

impl fmt::Display for Oracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Oracle {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|oracle| oracle.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseChoiceError::new("oracle", s, &Self::ALL.map(|o| o.name())))
    }
}
