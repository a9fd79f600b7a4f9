//! Quantum gate types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CircuitError, IrResult};
use crate::unitary::{GateMatrix, Unitary2x2, Unitary4x4};

/// The closed set of gates the simulator understands.
///
/// Parametrized variants carry a real exponent `t`: `XPow(t)` is `X^t`,
/// with `t = 1` the plain gate and `t = 0` the identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// Fractional power of Pauli-X.
    XPow(f64),
    /// Fractional power of Pauli-Y.
    YPow(f64),
    /// Controlled-X (CNOT) gate, targets `(control, target)`.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// Controlled `X^t`, targets `(control, target)`.
    CXPow(f64),
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// The parameterless identifier of this gate.
    pub fn kind(&self) -> GateKind {
        match self {
            StandardGate::I => GateKind::I,
            StandardGate::X => GateKind::X,
            StandardGate::Y => GateKind::Y,
            StandardGate::Z => GateKind::Z,
            StandardGate::H => GateKind::H,
            StandardGate::XPow(_) => GateKind::XPow,
            StandardGate::YPow(_) => GateKind::YPow,
            StandardGate::CX => GateKind::CX,
            StandardGate::CZ => GateKind::CZ,
            StandardGate::CXPow(_) => GateKind::CXPow,
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::XPow(_)
            | StandardGate::YPow(_) => 1,

            StandardGate::CX | StandardGate::CZ | StandardGate::CXPow(_) => 2,
        }
    }

    /// The exponent of a parametrized gate.
    pub fn exponent(&self) -> Option<f64> {
        match self {
            StandardGate::XPow(t) | StandardGate::YPow(t) | StandardGate::CXPow(t) => Some(*t),
            _ => None,
        }
    }

    /// Whether the gate acts as the identity on every state.
    ///
    /// Powers with an even integer exponent reduce to the identity.
    pub fn is_identity(&self) -> bool {
        match self {
            StandardGate::I => true,
            StandardGate::XPow(t) | StandardGate::YPow(t) | StandardGate::CXPow(t) => {
                (t / 2.0).fract().abs() < f64::EPSILON
            }
            _ => false,
        }
    }

    /// Whether applying the gate twice is the identity.
    pub fn is_self_inverse(&self) -> bool {
        matches!(
            self,
            StandardGate::I
                | StandardGate::X
                | StandardGate::Y
                | StandardGate::Z
                | StandardGate::H
                | StandardGate::CX
                | StandardGate::CZ
        )
    }

    /// Build the unitary matrix of this gate.
    pub fn matrix(&self) -> GateMatrix {
        let matrix = match self {
            StandardGate::I => GateMatrix::Single(Unitary2x2::identity()),
            StandardGate::X => GateMatrix::Single(Unitary2x2::x()),
            StandardGate::Y => GateMatrix::Single(Unitary2x2::y()),
            StandardGate::Z => GateMatrix::Single(Unitary2x2::z()),
            StandardGate::H => GateMatrix::Single(Unitary2x2::h()),
            StandardGate::XPow(t) => GateMatrix::Single(Unitary2x2::x_pow(*t)),
            StandardGate::YPow(t) => GateMatrix::Single(Unitary2x2::y_pow(*t)),
            StandardGate::CX => GateMatrix::Two(Unitary4x4::cx()),
            StandardGate::CZ => GateMatrix::Two(Unitary4x4::cz()),
            StandardGate::CXPow(t) => GateMatrix::Two(Unitary4x4::cx_pow(*t)),
        };
        debug_assert!(matrix.is_unitary(), "non-unitary matrix for {self}");
        matrix
    }

    /// Short label used by the text renderer, e.g. `X^0.5`.
    pub fn label(&self) -> String {
        match self {
            StandardGate::XPow(t) => format!("X^{}", format_exponent(*t)),
            StandardGate::YPow(t) => format!("Y^{}", format_exponent(*t)),
            StandardGate::CXPow(t) => format!("X^{}", format_exponent(*t)),
            StandardGate::CX => "X".into(),
            StandardGate::CZ => "@".into(),
            other => other.name().to_uppercase(),
        }
    }
}

impl fmt::Display for StandardGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.exponent() {
            Some(t) => write!(f, "{}^{}", self.name(), format_exponent(t)),
            None => write!(f, "{}", self.name()),
        }
    }
}

/// Render an exponent without trailing zeros, at most four decimals.
fn format_exponent(t: f64) -> String {
    let s = format!("{t:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".into() } else { s.into() }
}

/// Parameterless operation identifier.
///
/// This is the "gate kind" half of the flat
/// `append_op(kind, targets, parameter, key)` construction form; it pairs
/// with an optional exponent to become a [`StandardGate`], or with a key to
/// become a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
    /// Hadamard.
    H,
    /// `X^t`.
    XPow,
    /// `Y^t`.
    YPow,
    /// Controlled-X.
    CX,
    /// Controlled-Z.
    CZ,
    /// Controlled `X^t`.
    CXPow,
    /// Computational-basis measurement.
    Measure,
}

impl GateKind {
    /// Get the name of this operation kind.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            GateKind::I => "id",
            GateKind::X => "x",
            GateKind::Y => "y",
            GateKind::Z => "z",
            GateKind::H => "h",
            GateKind::XPow => "x_pow",
            GateKind::YPow => "y_pow",
            GateKind::CX => "cx",
            GateKind::CZ => "cz",
            GateKind::CXPow => "cx_pow",
            GateKind::Measure => "measure",
        }
    }

    /// Whether the kind needs an exponent.
    pub fn is_parameterized(&self) -> bool {
        matches!(self, GateKind::XPow | GateKind::YPow | GateKind::CXPow)
    }

    /// Combine with an optional exponent into a concrete gate.
    ///
    /// Returns `Ok(None)` for [`GateKind::Measure`], which is not a gate.
    pub fn with_parameter(self, parameter: Option<f64>) -> IrResult<Option<StandardGate>> {
        let gate = match (self, parameter) {
            (GateKind::Measure, None) => return Ok(None),
            (GateKind::I, None) => StandardGate::I,
            (GateKind::X, None) => StandardGate::X,
            (GateKind::Y, None) => StandardGate::Y,
            (GateKind::Z, None) => StandardGate::Z,
            (GateKind::H, None) => StandardGate::H,
            (GateKind::CX, None) => StandardGate::CX,
            (GateKind::CZ, None) => StandardGate::CZ,
            (kind, Some(t)) if kind.is_parameterized() && !t.is_finite() => {
                return Err(CircuitError::InvalidParameter(kind.name().into(), t));
            }
            (GateKind::XPow, Some(t)) => StandardGate::XPow(t),
            (GateKind::YPow, Some(t)) => StandardGate::YPow(t),
            (GateKind::CXPow, Some(t)) => StandardGate::CXPow(t),
            (kind @ (GateKind::XPow | GateKind::YPow | GateKind::CXPow), None) => {
                return Err(CircuitError::MissingParameter(kind.name().into()));
            }
            (kind, Some(_)) => {
                return Err(CircuitError::UnexpectedParameter(
                    kind.name().into(),
                    "an exponent",
                ));
            }
        };
        Ok(Some(gate))
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
