//! Superdense coding: two classical bits over one qubit.

use std::fmt;
use std::str::FromStr;

use entangle_ir::{Circuit, Instruction, IrResult, QubitId, StandardGate};
use entangle_sim::{RunResult, SimResult, aggregate};

use crate::ParseChoiceError;

/// Measurement key for Bob's decoded bits `[q0, q1]`.
pub const KEY: &str = "bob";

const ALICE: QubitId = QubitId(0);
const BOB: QubitId = QubitId(1);

/// A two-bit message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    M00,
    M01,
    M10,
    M11,
}

impl Message {
    /// Every message.
    pub const ALL: [Message; 4] = [Message::M00, Message::M01, Message::M10, Message::M11];

    /// The message as a bitstring.
    pub fn bits(&self) -> &'static str {
        match self {
            Message::M00 => "00",
            Message::M01 => "01",
            Message::M10 => "10",
            Message::M11 => "11",
        }
    }

    /// Look a message up by its bitstring.
    pub fn from_bits(bits: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.bits() == bits)
    }

    /// Alice's encoding gates on her half of the pair.
    pub fn encoding(&self) -> Vec<Instruction> {
        let gates: &[StandardGate] = match self {
            Message::M00 => &[],
            Message::M01 => &[StandardGate::X],
            Message::M10 => &[StandardGate::Z],
            Message::M11 => &[StandardGate::X, StandardGate::Z],
        };
        gates
            .iter()
            .map(|&gate| Instruction::single_qubit_gate(gate, ALICE))
            .collect()
    }

    /// Share a Bell pair, encode, then decode in the Bell basis.
    pub fn circuit(&self) -> IrResult<Circuit> {
        let mut circuit = Circuit::new(2)?.with_name(format!("superdense {}", self.bits()));
        circuit.h(ALICE)?.cx(ALICE, BOB)?;
        circuit.extend(self.encoding())?;
        circuit
            .cx(ALICE, BOB)?
            .h(ALICE)?
            .measure(KEY, [ALICE, BOB])?;
        Ok(circuit)
    }

    /// The most frequently decoded message in `result`, or `None` for an
    /// empty run.
    pub fn decode(result: &RunResult) -> SimResult<Option<Message>> {
        let histogram = aggregate(result, KEY)?;
        Ok(histogram
            .most_frequent()
            .and_then(|(bits, _)| Self::from_bits(bits)))
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.bits())
    }
}

impl FromStr for Message {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_bits(s)
            .ok_or_else(|| ParseChoiceError::new("message", s, &Self::ALL.map(|m| m.bits())))
    }
}
