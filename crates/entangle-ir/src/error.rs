//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur while building a circuit.
///
/// All of these are local input errors: the caller must fix the circuit,
/// retrying the same call will fail the same way.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CircuitError {
    /// Register size is zero or above the configured maximum.
    #[error("Invalid register size {num_qubits}: must be between 1 and {max}")]
    InvalidSize {
        /// The requested number of qubits.
        num_qubits: u32,
        /// The maximum allowed for this circuit.
        max: u32,
    },

    /// Target qubit outside the register.
    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit register{}", format_gate_context(.gate_name))]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Number of qubits in the register.
        num_qubits: u32,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Operation has the wrong number of targets.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    ArityMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Same qubit appears twice in one operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateTarget {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Measurement key already used by an earlier measurement.
    #[error("Measurement key '{0}' is already used in this circuit")]
    DuplicateKey(String),

    /// Parametrized gate given without its exponent.
    #[error("Gate '{0}' requires an exponent parameter")]
    MissingParameter(String),

    /// Exponent that is NaN or infinite.
    #[error("Gate '{0}' needs a finite exponent, got {1}")]
    InvalidParameter(String, f64),

    /// Exponent (or key) supplied to an operation that takes none.
    #[error("Operation '{0}' does not take {1}")]
    UnexpectedParameter(String, &'static str),
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, CircuitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = CircuitError::QubitOutOfRange {
            qubit: QubitId(3),
            num_qubits: 2,
            gate_name: Some("cx".into()),
        };
        assert_eq!(
            err.to_string(),
            "Qubit q3 out of range for a 2-qubit register (gate: cx)"
        );

        let err = CircuitError::DuplicateTarget {
            qubit: QubitId(1),
            gate_name: None,
        };
        assert_eq!(err.to_string(), "Duplicate qubit q1 in operation");

        let err = CircuitError::InvalidParameter("x_pow".into(), f64::NAN);
        assert_eq!(err.to_string(), "Gate 'x_pow' needs a finite exponent, got NaN");
    }
}
