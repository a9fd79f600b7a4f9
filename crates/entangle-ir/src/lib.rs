//! Entangle Circuit Model
//!
//! This crate provides the data structures for describing quantum circuits
//! to the entangle statevector simulator: qubit identifiers, the gate
//! library with its unitary matrices, instructions, and the validated
//! [`Circuit`] builder.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`], a plain index into the register
//! - **Gates**: [`StandardGate`], a closed set including fractional powers
//! - **Matrices**: [`Unitary2x2`] and [`Unitary4x4`]
//! - **Instructions**: [`Instruction`], a gate or a keyed measurement
//! - **Circuit**: [`Circuit`], validated at every append
//! - **Diagrams**: [`TextDiagram`] for terminal output
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use entangle_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::new(2).unwrap().with_name("bell");
//!
//! // |00⟩ → (|00⟩ + |11⟩)/√2
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.measure("z", [QubitId(0), QubitId(1)]).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 3);
//! assert_eq!(circuit.measurement_keys(), vec!["z"]);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `I` | 1 | Identity |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `H` | 1 | Hadamard gate |
//! | `XPow(t)`, `YPow(t)` | 1 | `X^t`, `Y^t` |
//! | `CX` | 2 | Controlled-NOT, targets `(control, target)` |
//! | `CZ` | 2 | Controlled-Z |
//! | `CXPow(t)` | 2 | Controlled `X^t` |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;
pub mod render;
pub mod unitary;

pub use circuit::{Circuit, DEFAULT_MAX_QUBITS};
pub use error::{CircuitError, IrResult};
pub use gate::{GateKind, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::QubitId;
pub use render::TextDiagram;
pub use unitary::{EPSILON, GateMatrix, Unitary2x2, Unitary4x4};
