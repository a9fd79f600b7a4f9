//! Error types for the simulator crate.

use entangle_ir::CircuitError;
use thiserror::Error;

/// Errors that can occur while configuring or running the simulator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// The circuit needs more qubits than the simulator will allocate.
    #[error("Circuit needs {required} qubits but the simulator is limited to {limit}")]
    ResourceExhausted {
        /// Qubits in the circuit.
        required: usize,
        /// Configured maximum.
        limit: usize,
    },

    /// A measurement key that the run did not record.
    #[error("Unknown measurement key: '{0}'")]
    UnknownKey(String),

    /// Invalid circuit construction.
    #[error(transparent)]
    Circuit(#[from] CircuitError),

    /// Configuration rejected by validation or parsing.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for simulator operations.
pub type SimResult<T> = Result<T, SimError>;
